use models::{listing::ArtistListing, phone::Phone};
use serde::{Deserialize, Serialize};

/// Payload of the artist create and edit forms
#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
}

impl ArtistForm {
    /// Basic form checks; the returned field errors are flashed back
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push("name is required".to_owned());
        }
        if self.city.trim().is_empty() {
            errors.push("city is required".to_owned());
        }
        if self.state.trim().is_empty() {
            errors.push("state is required".to_owned());
        }

        let phone = Phone::from(self.phone.clone());
        if !phone.is_empty() && !phone.is_complete() {
            errors.push("phone must have exactly ten digits".to_owned());
        }

        errors
    }

    /// Trims the fields into the shape the database layer takes
    pub fn into_listing(self) -> ArtistListing {
        ArtistListing {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state,
            phone: Phone::from(self.phone),
            image_link: self.image_link.trim().to_owned(),
            facebook_link: self.facebook_link.trim().to_owned(),
            website: self.website.trim().to_owned(),
            seeking_venue: matches!(self.seeking_venue.as_deref(), Some("Yes")),
            seeking_description: self.seeking_description.trim().to_owned(),
            genres: self.genres,
        }
    }
}

/// One artist entry in the alphabetical list view
#[derive(Debug, Serialize)]
pub struct ArtistRow {
    pub id: i32,
    pub name: String,
}

/// One show on the artist detail page
#[derive(Debug, Serialize)]
pub struct ArtistShowRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: String,
}

/// The artist detail page context
#[derive(Debug, Serialize)]
pub struct ArtistPage {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
    pub past_shows: Vec<ArtistShowRow>,
    pub upcoming_shows: Vec<ArtistShowRow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// The edit form context, pre-filled from the stored row
#[derive(Debug, Serialize)]
pub struct ArtistFormData {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub image_link: String,
}

#[cfg(test)]
mod tests {
    use super::ArtistForm;

    fn valid_form() -> ArtistForm {
        ArtistForm {
            name: "Guns N Petals".to_owned(),
            city: "San Francisco".to_owned(),
            state: "CA".to_owned(),
            phone: "326-123-5000".to_owned(),
            genres: vec!["Rock n Roll".to_owned()],
            seeking_venue: Some("Yes".to_owned()),
            seeking_description: "Looking for shows downtown".to_owned(),
            image_link: String::new(),
            website: String::new(),
            facebook_link: String::new(),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_empty());
    }

    #[test]
    fn test_missing_city_is_rejected() {
        let mut form = valid_form();
        form.city = String::new();
        assert_eq!(form.validate(), vec!["city is required".to_owned()]);
    }

    #[test]
    fn test_listing_strips_phone() {
        let listing = valid_form().into_listing();
        assert_eq!(listing.phone.digits(), "3261235000");
        assert!(listing.seeking_venue);
    }
}
