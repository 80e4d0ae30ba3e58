use crate::{
    dtos::venue::{CityGroup, VenueForm, VenueFormData, VenuePage, VenueRow, VenueShowRow},
    dtos::{SearchForm, SearchResults, SearchRow, GENRES, STATES},
    flash::{insert_flash, post_response, set_flash, FlashData},
    views, AppState,
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::Form;
use chrono::Utc;
use database::{
    entities::{artists, shows, venues},
    services::venue::{VenueDetail, VenueService},
};
use log::error;
use models::{phone::Phone, showtime};
use serde_json::json;
use tera::Context;
use tower_cookies::Cookies;

/// All venues grouped by (city, state), each annotated with the number of
/// shows starting after now
pub async fn list_venues(State(state): State<AppState>, cookies: Cookies) -> Response {
    let now = Utc::now().naive_utc();
    let venues = match VenueService::list_with_upcoming(&state.conn, now).await {
        Ok(venues) => venues,
        Err(err) => {
            error!("failed to list venues: {err}");
            return views::server_error(&state.templates);
        }
    };

    let areas = group_by_city_state(venues);

    let mut ctx = Context::new();
    ctx.insert("areas", &areas);
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "pages/venues.html.tera", &ctx)
}

/// Case-insensitive substring search on venue names
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Response {
    let now = Utc::now().naive_utc();
    let matches = match VenueService::search_by_name(&state.conn, &form.search_term, now).await {
        Ok(matches) => matches,
        Err(err) => {
            error!("venue search for {:?} failed: {err}", form.search_term);
            return views::server_error(&state.templates);
        }
    };

    let results = SearchResults {
        count: matches.len(),
        data: matches
            .into_iter()
            .map(|(venue, num_upcoming_shows)| SearchRow {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows,
            })
            .collect(),
    };

    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", &form.search_term);
    views::render(&state.templates, "pages/search_venues.html.tera", &ctx)
}

/// Venue detail page with shows partitioned into past and upcoming
pub async fn show_venue(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let now = Utc::now().naive_utc();
    match VenueService::find_detail(&state.conn, id, now).await {
        Ok(Some(detail)) => {
            let mut ctx = Context::new();
            ctx.insert("venue", &to_venue_page(detail));
            views::render(&state.templates, "pages/show_venue.html.tera", &ctx)
        }
        Ok(None) => views::not_found(&state.templates),
        Err(err) => {
            error!("failed to load venue {id}: {err}");
            views::server_error(&state.templates)
        }
    }
}

/// Empty venue listing form
pub async fn create_venue_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let mut ctx = Context::new();
    ctx.insert("genres", &GENRES);
    ctx.insert("states", &STATES[..]);
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "forms/new_venue.html.tera", &ctx)
}

/// Create a venue from the submitted form
pub async fn create_venue(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<VenueForm>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        let data = FlashData::error(errors.join(", "));
        return post_response(&cookies, data, "/venues/create").into_response();
    }

    let listing = form.into_listing();
    match VenueService::create(&state.conn, &listing).await {
        Ok(venue) => {
            let data =
                FlashData::success(format!("Venue {} was successfully listed!", venue.name));
            post_response(&cookies, data, "/").into_response()
        }
        Err(err) => {
            error!("failed to create venue {}: {err}", listing.name);
            let data = FlashData::error(format!(
                "An error occurred. Venue {} could not be listed.",
                listing.name
            ));
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

/// Venue edit form, pre-filled from the stored row
pub async fn edit_venue_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
) -> Response {
    match VenueService::find_with_genres(&state.conn, id).await {
        Ok(Some((venue, genres))) => {
            let mut ctx = Context::new();
            ctx.insert("venue", &to_venue_form_data(venue, genres));
            ctx.insert("genres", &GENRES);
            ctx.insert("states", &STATES[..]);
            insert_flash(&mut ctx, &cookies);
            views::render(&state.templates, "forms/edit_venue.html.tera", &ctx)
        }
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to load venue {id} for editing: {err}");
            views::server_error(&state.templates)
        }
    }
}

/// Update a venue from the submitted form
pub async fn edit_venue(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
    Form(form): Form<VenueForm>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        let data = FlashData::error(errors.join(", "));
        return post_response(&cookies, data, &format!("/venues/{id}/edit")).into_response();
    }

    let listing = form.into_listing();
    match VenueService::update(&state.conn, id, &listing).await {
        Ok(Some(venue)) => {
            let data =
                FlashData::success(format!("Venue {} was successfully updated!", venue.name));
            post_response(&cookies, data, &format!("/venues/{id}")).into_response()
        }
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to update venue {id}: {err}");
            let data = FlashData::error(format!(
                "An error occurred. Venue {} could not be updated.",
                listing.name
            ));
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

/// Delete a venue, answering the page script with a small JSON ack
pub async fn delete_venue(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
) -> Response {
    match VenueService::delete(&state.conn, id).await {
        Ok(Some(_)) => Json(json!({ "deleted": true, "url": "/venues" })).into_response(),
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to delete venue {id}: {err}");
            let data = FlashData::error("An error occurred deleting the venue.");
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

/// Groups annotated venues into (city, state) buckets ordered by
/// (state, city)
fn group_by_city_state(mut venues: Vec<(venues::Model, u64)>) -> Vec<CityGroup> {
    venues.sort_by(|(a, _), (b, _)| a.state.cmp(&b.state).then_with(|| a.city.cmp(&b.city)));

    let mut groups: Vec<CityGroup> = Vec::new();
    for (venue, num_upcoming_shows) in venues {
        let row = VenueRow {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows,
        };

        // The input is sorted, so a venue either extends the last group or
        // opens a new one
        if let Some(group) = groups.last_mut()
            && group.city == venue.city
            && group.state == venue.state
        {
            group.venues.push(row);
            continue;
        }

        groups.push(CityGroup {
            city: venue.city,
            state: venue.state,
            venues: vec![row],
        });
    }
    groups
}

fn to_venue_page(detail: VenueDetail) -> VenuePage {
    let venue = detail.venue;
    let past_shows: Vec<VenueShowRow> = detail.past_shows.into_iter().map(to_show_row).collect();
    let upcoming_shows: Vec<VenueShowRow> =
        detail.upcoming_shows.into_iter().map(to_show_row).collect();

    VenuePage {
        id: venue.id,
        name: venue.name,
        genres: detail.genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: Phone::from(venue.phone).to_string(),
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

fn to_show_row((show, artist): (shows::Model, artists::Model)) -> VenueShowRow {
    VenueShowRow {
        artist_id: artist.id,
        artist_name: artist.name,
        artist_image_link: artist.image_link,
        start_time: showtime::format_start_time(&show.start_time),
    }
}

fn to_venue_form_data(venue: venues::Model, genres: Vec<String>) -> VenueFormData {
    VenueFormData {
        id: venue.id,
        name: venue.name,
        genres,
        address: venue.address,
        city: venue.city,
        state: venue.state,
        // Put the dashes back into the stored digits
        phone: Phone::from(venue.phone).to_string(),
        website: venue.website,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
    }
}

#[cfg(test)]
mod tests {
    use super::group_by_city_state;
    use database::entities::venues;

    fn venue(id: i32, name: &str, city: &str, state: &str) -> venues::Model {
        venues::Model {
            id,
            name: name.to_owned(),
            city: city.to_owned(),
            state: state.to_owned(),
            address: String::new(),
            phone: String::new(),
            image_link: String::new(),
            facebook_link: String::new(),
            website: String::new(),
            seeking_talent: false,
            seeking_description: String::new(),
        }
    }

    #[test]
    fn test_groups_are_sorted_by_state_then_city() {
        let groups = group_by_city_state(vec![
            (venue(1, "The Musical Hop", "San Francisco", "CA"), 0),
            (venue(2, "The Dueling Pianos Bar", "New York", "NY"), 1),
            (venue(3, "Park Square Live", "San Francisco", "CA"), 2),
            (venue(4, "The Fillmore", "Oakland", "CA"), 0),
        ]);

        let keys: Vec<(&str, &str)> = groups
            .iter()
            .map(|group| (group.state.as_str(), group.city.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("CA", "Oakland"), ("CA", "San Francisco"), ("NY", "New York")]
        );

        let sf = &groups[1];
        assert_eq!(sf.venues.len(), 2);
        assert_eq!(sf.venues[1].num_upcoming_shows, 2);
    }

    #[test]
    fn test_no_venues_yields_no_groups() {
        assert!(group_by_city_state(Vec::new()).is_empty());
    }
}
