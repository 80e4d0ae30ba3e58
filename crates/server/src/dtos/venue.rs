use models::{listing::VenueListing, phone::Phone};
use serde::{Deserialize, Serialize};

/// Payload of the venue create and edit forms
#[derive(Debug, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub image_link: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub facebook_link: String,
}

impl VenueForm {
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

    /// Trims the fields into the shape the database layer takes; the phone
    /// keeps only its digits
    pub fn into_listing(self) -> VenueListing {
        VenueListing {
            name: self.name.trim().to_owned(),
            city: self.city.trim().to_owned(),
            state: self.state,
            address: self.address.trim().to_owned(),
            phone: Phone::from(self.phone),
            image_link: self.image_link.trim().to_owned(),
            facebook_link: self.facebook_link.trim().to_owned(),
            website: self.website.trim().to_owned(),
            seeking_talent: matches!(self.seeking_talent.as_deref(), Some("Yes")),
            seeking_description: self.seeking_description.trim().to_owned(),
            genres: self.genres,
        }
    }
}

/// One venue entry in the grouped list view
#[derive(Debug, Serialize)]
pub struct VenueRow {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing one (city, state) location
#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueRow>,
}

/// One show on the venue detail page
#[derive(Debug, Serialize)]
pub struct VenueShowRow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

/// The venue detail page context
#[derive(Debug, Serialize)]
pub struct VenuePage {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
    pub past_shows: Vec<VenueShowRow>,
    pub upcoming_shows: Vec<VenueShowRow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// The edit form context, pre-filled from the stored row
#[derive(Debug, Serialize)]
pub struct VenueFormData {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: String,
    pub facebook_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub image_link: String,
}

#[cfg(test)]
mod tests {
    use super::VenueForm;

    fn valid_form() -> VenueForm {
        VenueForm {
            name: "Test Hall".to_owned(),
            city: "Austin".to_owned(),
            state: "TX".to_owned(),
            address: "100 Congress Ave".to_owned(),
            phone: "(512) 555-0100".to_owned(),
            genres: vec!["Jazz".to_owned()],
            seeking_talent: Some("Yes".to_owned()),
            seeking_description: "Looking for jazz acts".to_owned(),
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
    fn test_missing_name_is_rejected() {
        let mut form = valid_form();
        form.name = "  ".to_owned();
        assert_eq!(form.validate(), vec!["name is required".to_owned()]);
    }

    #[test]
    fn test_partial_phone_is_rejected() {
        let mut form = valid_form();
        form.phone = "555-0100".to_owned();
        assert_eq!(
            form.validate(),
            vec!["phone must have exactly ten digits".to_owned()]
        );
    }

    #[test]
    fn test_empty_phone_is_allowed() {
        let mut form = valid_form();
        form.phone = String::new();
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_listing_strips_phone_and_maps_seeking_flag() {
        let listing = valid_form().into_listing();
        assert_eq!(listing.phone.digits(), "5125550100");
        assert!(listing.seeking_talent);

        let mut form = valid_form();
        form.seeking_talent = Some("No".to_owned());
        assert!(!form.into_listing().seeking_talent);
    }
}
