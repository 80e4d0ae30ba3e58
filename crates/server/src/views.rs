use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use log::error;
use tera::{Context, Tera};

/// Renders a template, falling back to the 500 page when rendering fails
pub fn render(templates: &Tera, name: &str, ctx: &Context) -> Response {
    match templates.render(name, ctx) {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            error!("failed to render {name}: {err}");
            server_error(templates)
        }
    }
}

pub fn not_found(templates: &Tera) -> Response {
    let body = templates
        .render("errors/404.html.tera", &Context::new())
        .unwrap_or_else(|_| "Not Found".to_owned());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

pub fn server_error(templates: &Tera) -> Response {
    let body = templates
        .render("errors/500.html.tera", &Context::new())
        .unwrap_or_else(|_| "Internal Server Error".to_owned());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

/// Redirect used when a write path targets an id that does not exist
pub fn redirect_home() -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, "/")]).into_response()
}
