use crate::{
    dtos::artist::{ArtistForm, ArtistFormData, ArtistPage, ArtistRow, ArtistShowRow},
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
    services::artist::{ArtistDetail, ArtistService},
};
use log::error;
use models::{phone::Phone, showtime};
use serde_json::json;
use tera::Context;
use tower_cookies::Cookies;

/// All artists, alphabetically
pub async fn list_artists(State(state): State<AppState>, cookies: Cookies) -> Response {
    let artists = match ArtistService::list_alphabetical(&state.conn).await {
        Ok(artists) => artists,
        Err(err) => {
            error!("failed to list artists: {err}");
            return views::server_error(&state.templates);
        }
    };

    let rows: Vec<ArtistRow> = artists
        .into_iter()
        .map(|artist| ArtistRow {
            id: artist.id,
            name: artist.name,
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("artists", &rows);
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "pages/artists.html.tera", &ctx)
}

/// Case-insensitive substring search on artist names
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Response {
    let now = Utc::now().naive_utc();
    let matches = match ArtistService::search_by_name(&state.conn, &form.search_term, now).await {
        Ok(matches) => matches,
        Err(err) => {
            error!("artist search for {:?} failed: {err}", form.search_term);
            return views::server_error(&state.templates);
        }
    };

    let results = SearchResults {
        count: matches.len(),
        data: matches
            .into_iter()
            .map(|(artist, num_upcoming_shows)| SearchRow {
                id: artist.id,
                name: artist.name,
                num_upcoming_shows,
            })
            .collect(),
    };

    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", &form.search_term);
    views::render(&state.templates, "pages/search_artists.html.tera", &ctx)
}

/// Artist detail page with shows partitioned into past and upcoming
pub async fn show_artist(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    let now = Utc::now().naive_utc();
    match ArtistService::find_detail(&state.conn, id, now).await {
        Ok(Some(detail)) => {
            let mut ctx = Context::new();
            ctx.insert("artist", &to_artist_page(detail));
            views::render(&state.templates, "pages/show_artist.html.tera", &ctx)
        }
        Ok(None) => views::not_found(&state.templates),
        Err(err) => {
            error!("failed to load artist {id}: {err}");
            views::server_error(&state.templates)
        }
    }
}

/// Empty artist listing form
pub async fn create_artist_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let mut ctx = Context::new();
    ctx.insert("genres", &GENRES);
    ctx.insert("states", &STATES[..]);
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "forms/new_artist.html.tera", &ctx)
}

/// Create an artist from the submitted form
pub async fn create_artist(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ArtistForm>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        let data = FlashData::error(errors.join(", "));
        return post_response(&cookies, data, "/artists/create").into_response();
    }

    let listing = form.into_listing();
    match ArtistService::create(&state.conn, &listing).await {
        Ok(artist) => {
            let data =
                FlashData::success(format!("Artist {} was successfully listed!", artist.name));
            post_response(&cookies, data, "/").into_response()
        }
        Err(err) => {
            error!("failed to create artist {}: {err}", listing.name);
            let data = FlashData::error(format!(
                "An error occurred. Artist {} could not be listed.",
                listing.name
            ));
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

/// Artist edit form, pre-filled from the stored row
pub async fn edit_artist_form(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
) -> Response {
    match ArtistService::find_with_genres(&state.conn, id).await {
        Ok(Some((artist, genres))) => {
            let mut ctx = Context::new();
            ctx.insert("artist", &to_artist_form_data(artist, genres));
            ctx.insert("genres", &GENRES);
            ctx.insert("states", &STATES[..]);
            insert_flash(&mut ctx, &cookies);
            views::render(&state.templates, "forms/edit_artist.html.tera", &ctx)
        }
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to load artist {id} for editing: {err}");
            views::server_error(&state.templates)
        }
    }
}

/// Update an artist from the submitted form
pub async fn edit_artist(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let errors = form.validate();
    if !errors.is_empty() {
        let data = FlashData::error(errors.join(", "));
        return post_response(&cookies, data, &format!("/artists/{id}/edit")).into_response();
    }

    let listing = form.into_listing();
    match ArtistService::update(&state.conn, id, &listing).await {
        Ok(Some(artist)) => {
            let data =
                FlashData::success(format!("Artist {} was successfully updated!", artist.name));
            post_response(&cookies, data, &format!("/artists/{id}")).into_response()
        }
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to update artist {id}: {err}");
            let data = FlashData::error(format!(
                "An error occurred. Artist {} could not be updated.",
                listing.name
            ));
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

/// Delete an artist, answering the page script with a small JSON ack
pub async fn delete_artist(
    State(state): State<AppState>,
    cookies: Cookies,
    Path(id): Path<i32>,
) -> Response {
    match ArtistService::delete(&state.conn, id).await {
        Ok(Some(_)) => Json(json!({ "deleted": true, "url": "/artists" })).into_response(),
        Ok(None) => views::redirect_home(),
        Err(err) => {
            error!("failed to delete artist {id}: {err}");
            let data = FlashData::error("An error occurred deleting the artist.");
            set_flash(&cookies, &data);
            views::server_error(&state.templates)
        }
    }
}

fn to_artist_page(detail: ArtistDetail) -> ArtistPage {
    let artist = detail.artist;
    let past_shows: Vec<ArtistShowRow> = detail.past_shows.into_iter().map(to_show_row).collect();
    let upcoming_shows: Vec<ArtistShowRow> =
        detail.upcoming_shows.into_iter().map(to_show_row).collect();

    ArtistPage {
        id: artist.id,
        name: artist.name,
        genres: detail.genres,
        city: artist.city,
        state: artist.state,
        phone: Phone::from(artist.phone).to_string(),
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

fn to_show_row((show, venue): (shows::Model, venues::Model)) -> ArtistShowRow {
    ArtistShowRow {
        venue_id: venue.id,
        venue_name: venue.name,
        venue_image_link: venue.image_link,
        start_time: showtime::format_start_time(&show.start_time),
    }
}

fn to_artist_form_data(artist: artists::Model, genres: Vec<String>) -> ArtistFormData {
    ArtistFormData {
        id: artist.id,
        name: artist.name,
        genres,
        city: artist.city,
        state: artist.state,
        // Put the dashes back into the stored digits
        phone: Phone::from(artist.phone).to_string(),
        website: artist.website,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
    }
}
