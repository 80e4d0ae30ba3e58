use models::{listing::ShowListing, showtime};
use serde::{Deserialize, Serialize};

/// Payload of the show creation form
#[derive(Debug, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

impl ShowForm {
    /// Basic form checks, yielding the listing on success
    pub fn validate(&self) -> Result<ShowListing, Vec<String>> {
        let mut errors = Vec::new();

        let artist_id = self.artist_id.trim().parse::<i32>();
        if artist_id.is_err() {
            errors.push("artist id must be a number".to_owned());
        }

        let venue_id = self.venue_id.trim().parse::<i32>();
        if venue_id.is_err() {
            errors.push("venue id must be a number".to_owned());
        }

        let start_time = showtime::parse_start_time(&self.start_time);
        if start_time.is_none() {
            errors.push("start time must be a valid date and time".to_owned());
        }

        match (artist_id, venue_id, start_time) {
            (Ok(artist_id), Ok(venue_id), Some(start_time)) => Ok(ShowListing {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

/// One row of the shows list view
#[derive(Debug, Serialize)]
pub struct ShowRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: String,
}

#[cfg(test)]
mod tests {
    use super::ShowForm;

    #[test]
    fn test_valid_form_parses() {
        let form = ShowForm {
            artist_id: "4".to_owned(),
            venue_id: "7".to_owned(),
            start_time: "2026-09-21T21:30".to_owned(),
        };

        let listing = form.validate().unwrap();
        assert_eq!(listing.artist_id, 4);
        assert_eq!(listing.venue_id, 7);
        assert_eq!(listing.start_time.to_string(), "2026-09-21 21:30:00");
    }

    #[test]
    fn test_bad_fields_are_reported_together() {
        let form = ShowForm {
            artist_id: "four".to_owned(),
            venue_id: String::new(),
            start_time: "tonight".to_owned(),
        };

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
