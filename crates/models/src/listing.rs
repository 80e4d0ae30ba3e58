use crate::phone::Phone;
use chrono::NaiveDateTime;
use serde::Serialize;

/// A venue as submitted through the listing form, ready for persistence
#[derive(Debug, Clone, Default, Serialize)]
pub struct VenueListing {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Phone,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub genres: Vec<String>,
}

/// An artist as submitted through the listing form
#[derive(Debug, Clone, Default, Serialize)]
pub struct ArtistListing {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Phone,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub genres: Vec<String>,
}

/// A booking of one artist at one venue at a point in time
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}
