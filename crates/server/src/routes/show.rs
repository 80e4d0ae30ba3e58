use crate::{
    dtos::show::{ShowForm, ShowRow},
    flash::{insert_flash, post_response, FlashData},
    views, AppState,
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use database::services::show::ShowService;
use log::error;
use models::showtime;
use tera::Context;
use tower_cookies::Cookies;

/// All shows with their artist and venue names
pub async fn list_shows(State(state): State<AppState>, cookies: Cookies) -> Response {
    let bookings = match ShowService::list(&state.conn).await {
        Ok(bookings) => bookings,
        Err(err) => {
            error!("failed to list shows: {err}");
            return views::server_error(&state.templates);
        }
    };

    let rows: Vec<ShowRow> = bookings
        .into_iter()
        .map(|(show, artist, venue)| ShowRow {
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: showtime::format_start_time(&show.start_time),
        })
        .collect();

    let mut ctx = Context::new();
    ctx.insert("shows", &rows);
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "pages/shows.html.tera", &ctx)
}

/// Empty show listing form
pub async fn create_show_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    let mut ctx = Context::new();
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "forms/new_show.html.tera", &ctx)
}

/// Create a show from the submitted form. Either outcome lands on the home
/// page with a flash message; referential failures come back from the
/// database's foreign keys rather than a pre-check.
pub async fn create_show(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ShowForm>,
) -> Response {
    let listing = match form.validate() {
        Ok(listing) => listing,
        Err(errors) => {
            let data = FlashData::error(errors.join(", "));
            return post_response(&cookies, data, "/shows/create").into_response();
        }
    };

    let flash = match ShowService::create(&state.conn, &listing).await {
        Ok(_) => FlashData::success("Show was successfully listed!"),
        Err(err) => {
            error!(
                "failed to create show for artist {} at venue {}: {err}",
                listing.artist_id, listing.venue_id
            );
            FlashData::error("An error occurred. Show could not be listed.")
        }
    };

    let mut ctx = Context::new();
    ctx.insert("flash", &flash);
    views::render(&state.templates, "pages/home.html.tera", &ctx)
}
