use crate::entities::{artists, genres, shows, venue_genres, venues};
use crate::services::genre::GenreService;
use chrono::NaiveDateTime;
use futures::try_join;
use models::{listing::VenueListing, showtime};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::collections::HashMap;

/// A venue with its genre names and its shows split around `now`
pub struct VenueDetail {
    pub venue: venues::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<(shows::Model, artists::Model)>,
    pub upcoming_shows: Vec<(shows::Model, artists::Model)>,
}

pub struct VenueService;

impl VenueService {
    /// All venues, each with its number of shows starting after `now`
    pub async fn list_with_upcoming(
        db: &DatabaseConnection,
        now: NaiveDateTime,
    ) -> Result<Vec<(venues::Model, u64)>, DbErr> {
        let (venues, upcoming) = try_join!(
            venues::Entity::find()
                .order_by_asc(venues::Column::Id)
                .all(db),
            shows::Entity::find()
                .filter(shows::Column::StartTime.gt(now))
                .all(db)
        )?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for show in upcoming {
            *counts.entry(show.venue_id).or_default() += 1;
        }

        Ok(venues
            .into_iter()
            .map(|venue| {
                let num_upcoming = counts.get(&venue.id).copied().unwrap_or(0);
                (venue, num_upcoming)
            })
            .collect())
    }

    /// Case-insensitive substring match on name, annotated like the list view.
    /// Written as lower(name) LIKE so it runs on every backend the tests use.
    pub async fn search_by_name(
        db: &DatabaseConnection,
        term: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<(venues::Model, u64)>, DbErr> {
        let pattern = format!("%{}%", term.to_lowercase());
        let matches = venues::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(venues::Column::Name))).like(pattern))
            .all(db)
            .await?;

        let venue_ids: Vec<i32> = matches.iter().map(|venue| venue.id).collect();
        let counts = Self::upcoming_counts(db, venue_ids, now).await?;

        Ok(matches
            .into_iter()
            .map(|venue| {
                let num_upcoming = counts.get(&venue.id).copied().unwrap_or(0);
                (venue, num_upcoming)
            })
            .collect())
    }

    /// A single venue with genres and shows partitioned around `now`
    pub async fn find_detail(
        db: &DatabaseConnection,
        venue_id: i32,
        now: NaiveDateTime,
    ) -> Result<Option<VenueDetail>, DbErr> {
        let venue = match venues::Entity::find_by_id(venue_id).one(db).await? {
            Some(venue) => venue,
            None => return Ok(None),
        };

        let genres = Self::genre_names(db, venue_id).await?;

        let bookings = shows::Entity::find()
            .filter(shows::Column::VenueId.eq(venue_id))
            .order_by_asc(shows::Column::StartTime)
            .find_also_related(artists::Entity)
            .all(db)
            .await?;

        let mut past_shows = Vec::new();
        let mut upcoming_shows = Vec::new();
        for (show, artist) in bookings {
            let Some(artist) = artist else { continue };
            if showtime::is_upcoming(&show.start_time, &now) {
                upcoming_shows.push((show, artist));
            } else {
                past_shows.push((show, artist));
            }
        }

        Ok(Some(VenueDetail {
            venue,
            genres,
            past_shows,
            upcoming_shows,
        }))
    }

    /// The venue and its genre names, as the edit form needs them
    pub async fn find_with_genres(
        db: &DatabaseConnection,
        venue_id: i32,
    ) -> Result<Option<(venues::Model, Vec<String>)>, DbErr> {
        let venue = match venues::Entity::find_by_id(venue_id).one(db).await? {
            Some(venue) => venue,
            None => return Ok(None),
        };

        let genres = Self::genre_names(db, venue_id).await?;
        Ok(Some((venue, genres)))
    }

    /// Insert the venue and its genre links in one transaction
    pub async fn create(
        db: &DatabaseConnection,
        listing: &VenueListing,
    ) -> Result<venues::Model, DbErr> {
        let txn = db.begin().await?;

        let genre_ids = GenreService::resolve_names(&txn, &listing.genres).await?;

        let venue = venues::ActiveModel {
            name: Set(listing.name.clone()),
            city: Set(listing.city.clone()),
            state: Set(listing.state.clone()),
            address: Set(listing.address.clone()),
            phone: Set(listing.phone.digits().to_owned()),
            image_link: Set(listing.image_link.clone()),
            facebook_link: Set(listing.facebook_link.clone()),
            website: Set(listing.website.clone()),
            seeking_talent: Set(listing.seeking_talent),
            seeking_description: Set(listing.seeking_description.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        Self::link_genres(&txn, venue.id, &genre_ids).await?;
        txn.commit().await?;

        Ok(venue)
    }

    /// Update the venue's columns and replace its genre links in one
    /// transaction. Returns `None` when the id does not exist.
    pub async fn update(
        db: &DatabaseConnection,
        venue_id: i32,
        listing: &VenueListing,
    ) -> Result<Option<venues::Model>, DbErr> {
        let txn = db.begin().await?;

        let Some(venue) = venues::Entity::find_by_id(venue_id).one(&txn).await? else {
            return Ok(None);
        };

        let genre_ids = GenreService::resolve_names(&txn, &listing.genres).await?;

        let mut venue: venues::ActiveModel = venue.into();
        venue.name = Set(listing.name.clone());
        venue.city = Set(listing.city.clone());
        venue.state = Set(listing.state.clone());
        venue.address = Set(listing.address.clone());
        venue.phone = Set(listing.phone.digits().to_owned());
        venue.image_link = Set(listing.image_link.clone());
        venue.facebook_link = Set(listing.facebook_link.clone());
        venue.website = Set(listing.website.clone());
        venue.seeking_talent = Set(listing.seeking_talent);
        venue.seeking_description = Set(listing.seeking_description.clone());
        let venue = venue.update(&txn).await?;

        venue_genres::Entity::delete_many()
            .filter(venue_genres::Column::VenueId.eq(venue_id))
            .exec(&txn)
            .await?;
        Self::link_genres(&txn, venue_id, &genre_ids).await?;

        txn.commit().await?;
        Ok(Some(venue))
    }

    /// Delete the venue and its genre links, returning its name. `None` when
    /// the id does not exist. Dependent shows are left to the foreign key:
    /// a venue that still has shows fails here and the caller surfaces it.
    pub async fn delete(db: &DatabaseConnection, venue_id: i32) -> Result<Option<String>, DbErr> {
        let txn = db.begin().await?;

        let Some(venue) = venues::Entity::find_by_id(venue_id).one(&txn).await? else {
            return Ok(None);
        };
        let name = venue.name.clone();

        venue_genres::Entity::delete_many()
            .filter(venue_genres::Column::VenueId.eq(venue_id))
            .exec(&txn)
            .await?;
        venue.delete(&txn).await?;

        txn.commit().await?;
        Ok(Some(name))
    }

    async fn genre_names<C>(conn: &C, venue_id: i32) -> Result<Vec<String>, DbErr>
    where
        C: ConnectionTrait,
    {
        let links = venue_genres::Entity::find()
            .filter(venue_genres::Column::VenueId.eq(venue_id))
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
        venue_ids: Vec<i32>,
        now: NaiveDateTime,
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if venue_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let upcoming = shows::Entity::find()
            .filter(shows::Column::VenueId.is_in(venue_ids))
            .filter(shows::Column::StartTime.gt(now))
            .all(db)
            .await?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for show in upcoming {
            *counts.entry(show.venue_id).or_default() += 1;
        }
        Ok(counts)
    }

    async fn link_genres<C>(conn: &C, venue_id: i32, genre_ids: &[i32]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if genre_ids.is_empty() {
            return Ok(());
        }

        let links = genre_ids.iter().map(|&genre_id| venue_genres::ActiveModel {
            venue_id: Set(venue_id),
            genre_id: Set(genre_id),
            ..Default::default()
        });
        venue_genres::Entity::insert_many(links).exec(conn).await?;
        Ok(())
    }
}
