use crate::entities::{artist_genres, artists, genres, shows, venues};
use crate::services::genre::GenreService;
use chrono::NaiveDateTime;
use models::{listing::ArtistListing, showtime};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

/// An artist with its genre names and its shows split around `now`
pub struct ArtistDetail {
    pub artist: artists::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<(shows::Model, venues::Model)>,
    pub upcoming_shows: Vec<(shows::Model, venues::Model)>,
}

pub struct ArtistService;

impl ArtistService {
    /// All artists, alphabetically by name
    pub async fn list_alphabetical(
        db: &DatabaseConnection,
    ) -> Result<Vec<artists::Model>, DbErr> {
        artists::Entity::find()
            .order_by_asc(artists::Column::Name)
            .all(db)
            .await
    }

    /// Case-insensitive substring match on name, each match annotated with
    /// its number of shows starting after `now`
    pub async fn search_by_name(
        db: &DatabaseConnection,
        term: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<(artists::Model, u64)>, DbErr> {
        let pattern = format!("%{}%", term.to_lowercase());
        let matches = artists::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(artists::Column::Name))).like(pattern))
            .all(db)
            .await?;

        let artist_ids: Vec<i32> = matches.iter().map(|artist| artist.id).collect();
        let counts = Self::upcoming_counts(db, artist_ids, now).await?;

        Ok(matches
            .into_iter()
            .map(|artist| {
                let num_upcoming = counts.get(&artist.id).copied().unwrap_or(0);
                (artist, num_upcoming)
            })
            .collect())
    }

    /// A single artist with genres and shows partitioned around `now`
    pub async fn find_detail(
        db: &DatabaseConnection,
        artist_id: i32,
        now: NaiveDateTime,
    ) -> Result<Option<ArtistDetail>, DbErr> {
        let artist = match artists::Entity::find_by_id(artist_id).one(db).await? {
            Some(artist) => artist,
            None => return Ok(None),
        };

        let genres = Self::genre_names(db, artist_id).await?;

        let bookings = shows::Entity::find()
            .filter(shows::Column::ArtistId.eq(artist_id))
            .order_by_asc(shows::Column::StartTime)
            .find_also_related(venues::Entity)
            .all(db)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, venue) in bookings {
            let Some(venue) = venue else { continue };
            if showtime::is_upcoming(&show.start_time, &now) {
                upcoming_shows.push((show, venue));
            } else {
                past_shows.push((show, venue));
            }
        }

        Ok(Some(ArtistDetail {
            artist,
            genres,
            past_shows,
            upcoming_shows,
        }))
    }

    /// The artist and its genre names, as the edit form needs them
    pub async fn find_with_genres(
        db: &DatabaseConnection,
        artist_id: i32,
    ) -> Result<Option<(artists::Model, Vec<String>)>, DbErr> {
        let artist = match artists::Entity::find_by_id(artist_id).one(db).await? {
            Some(artist) => artist,
            None => return Ok(None),
        };

        let genres = Self::genre_names(db, artist_id).await?;
        Ok(Some((artist, genres)))
    }

    /// Insert the artist and its genre links in one transaction
    pub async fn create(
        db: &DatabaseConnection,
        listing: &ArtistListing,
    ) -> Result<artists::Model, DbErr> {
        let txn = db.begin().await?;

        let genre_ids = GenreService::resolve_names(&txn, &listing.genres).await?;

        let artist = artists::ActiveModel {
            name: Set(listing.name.clone()),
            city: Set(listing.city.clone()),
            state: Set(listing.state.clone()),
            phone: Set(listing.phone.digits().to_owned()),
            image_link: Set(listing.image_link.clone()),
            facebook_link: Set(listing.facebook_link.clone()),
            website: Set(listing.website.clone()),
            seeking_venue: Set(listing.seeking_venue),
            seeking_description: Set(listing.seeking_description.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::link_genres(&txn, artist.id, &genre_ids).await?;
        txn.commit().await?;

        Ok(artist)
    }

    /// Update the artist's columns and replace its genre links in one
    /// transaction. Returns `None` when the id does not exist.
    pub async fn update(
        db: &DatabaseConnection,
        artist_id: i32,
        listing: &ArtistListing,
    ) -> Result<Option<artists::Model>, DbErr> {
        let txn = db.begin().await?;

        let Some(artist) = artists::Entity::find_by_id(artist_id).one(&txn).await? else {
            return Ok(None);
        };

        let genre_ids = GenreService::resolve_names(&txn, &listing.genres).await?;

        let mut artist: artists::ActiveModel = artist.into();
        artist.name = Set(listing.name.clone());
        artist.city = Set(listing.city.clone());
        artist.state = Set(listing.state.clone());
        artist.phone = Set(listing.phone.digits().to_owned());
        artist.image_link = Set(listing.image_link.clone());
        artist.facebook_link = Set(listing.facebook_link.clone());
        artist.website = Set(listing.website.clone());
        artist.seeking_venue = Set(listing.seeking_venue);
        artist.seeking_description = Set(listing.seeking_description.clone());
        let artist = artist.update(&txn).await?;

        artist_genres::Entity::delete_many()
            .filter(artist_genres::Column::ArtistId.eq(artist_id))
            .exec(&txn)
            .await?;
        Self::link_genres(&txn, artist_id, &genre_ids).await?;

        txn.commit().await?;
        Ok(Some(artist))
    }

    /// Delete the artist and its genre links, returning its name. `None`
    /// when the id does not exist. Dependent shows are left to the foreign
    /// key, as on the venue side.
    pub async fn delete(db: &DatabaseConnection, artist_id: i32) -> Result<Option<String>, DbErr> {
        let txn = db.begin().await?;

        let Some(artist) = artists::Entity::find_by_id(artist_id).one(&txn).await? else {
            return Ok(None);
        };
        let name = artist.name.clone();

        artist_genres::Entity::delete_many()
            .filter(artist_genres::Column::ArtistId.eq(artist_id))
            .exec(&txn)
            .await?;
        artist.delete(&txn).await?;

        txn.commit().await?;
        Ok(Some(name))
    }

    async fn genre_names<C>(conn: &C, artist_id: i32) -> Result<Vec<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let links = artist_genres::Entity::find()
            .filter(artist_genres::Column::ArtistId.eq(artist_id))
            .find_also_related(genres::Entity)
            .all(conn)
            .await?;

        Ok(links
            .into_iter()
            .filter_map(|(_, genre)| genre.map(|genre| genre.name))
            .collect())
    }

    async fn upcoming_counts(
        db: &DatabaseConnection,
        artist_ids: Vec<i32>,
        now: NaiveDateTime,
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if artist_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let upcoming = shows::Entity::find()
            .filter(shows::Column::ArtistId.is_in(artist_ids))
            .filter(shows::Column::StartTime.gt(now))
            .all(db)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for show in upcoming {
            *counts.entry(show.artist_id).or_default() += 1;
        }
        Ok(counts)
    }

    async fn link_genres<C>(conn: &C, artist_id: i32, genre_ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let links = genre_ids.iter().map(|&genre_id| artist_genres::ActiveModel {
            artist_id: Set(artist_id),
            genre_id: Set(genre_id),
            ..Default::default()
        });
        artist_genres::Entity::insert_many(links).exec(conn).await?;
        Ok(())
    }
}
