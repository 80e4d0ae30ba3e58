use crate::{flash::insert_flash, views, AppState};
use axum::{extract::State, response::Response};
use tera::Context;
use tower_cookies::Cookies;

/// Home page
pub async fn index(State(state): State<AppState>, cookies: Cookies) -> Response {
    let mut ctx = Context::new();
    insert_flash(&mut ctx, &cookies);
    views::render(&state.templates, "pages/home.html.tera", &ctx)
}

/// Fallback for paths no route matches
pub async fn not_found(State(state): State<AppState>) -> Response {
    views::not_found(&state.templates)
}
