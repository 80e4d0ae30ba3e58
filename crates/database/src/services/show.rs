use crate::entities::{artists, shows, venues};
use models::listing::ShowListing;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};
use std::collections::HashMap;

pub struct ShowService;

impl ShowService {
    /// All shows with their artist and venue rows, ordered by start time
    pub async fn list(
        db: &DatabaseConnection,
    ) -> Result<Vec<(shows::Model, artists::Model, venues::Model)>, DbErr> {
        let bookings = shows::Entity::find()
            .order_by_asc(shows::Column::StartTime)
            .find_also_related(artists::Entity)
            .all(db)
            .await?;

        let venue_ids: Vec<i32> = bookings.iter().map(|(show, _)| show.venue_id).collect();
        let venues = if venue_ids.is_empty() {
            Vec::new()
        } else {
            venues::Entity::find()
                .filter(venues::Column::Id.is_in(venue_ids))
                .all(db)
                .await?
        };

        let venues_by_id: HashMap<i32, venues::Model> =
            venues.into_iter().map(|venue| (venue.id, venue)).collect();

        let mut rows = Vec::new();
        for (show, artist) in bookings {
            let Some(artist) = artist else { continue };
            let Some(venue) = venues_by_id.get(&show.venue_id) else {
                continue;
            };
            rows.push((show, artist, venue.clone()));
        }
        Ok(rows)
    }

    /// Insert a show. Artist and venue existence is left to the database's
    /// foreign keys, as in the form handlers.
    pub async fn create(
        db: &DatabaseConnection,
        listing: &ShowListing,
    ) -> Result<shows::Model, DbErr> {
        shows::ActiveModel {
            start_time: Set(listing.start_time),
            artist_id: Set(listing.artist_id),
            venue_id: Set(listing.venue_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
