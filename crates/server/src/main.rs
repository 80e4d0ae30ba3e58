mod dtos;
mod flash;
mod routes;
mod utils;
mod views;

use axum::{
    routing::{get, post},
    Router,
};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::env;
use tera::Tera;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{compression::CompressionLayer, services::ServeDir};
use utils::shutdown::shutdown_signal;

#[derive(Clone)]
pub struct AppState {
    pub templates: Tera,
    pub conn: DatabaseConnection,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    dotenvy::dotenv().ok();

    let conn = create_connection()
        .await
        .expect("Database connection failed");
    Migrator::up(&conn, None)
        .await
        .expect("Failed to run migrations");

    let templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))
        .expect("Tera initialization failed");

    let state = AppState { templates, conn };

    let app = Router::new()
        .route("/", get(routes::root::index))
        .route("/health", get(routes::health::health))
        .route("/venues", get(routes::venue::list_venues))
        .route("/venues/search", post(routes::venue::search_venues))
        .route(
            "/venues/create",
            get(routes::venue::create_venue_form).post(routes::venue::create_venue),
        )
        .route("/venues/{id}", get(routes::venue::show_venue))
        .route(
            "/venues/{id}/edit",
            get(routes::venue::edit_venue_form).post(routes::venue::edit_venue),
        )
        .route("/venues/{id}/delete", get(routes::venue::delete_venue))
        .route("/artists", get(routes::artist::list_artists))
        .route("/artists/search", post(routes::artist::search_artists))
        .route(
            "/artists/create",
            get(routes::artist::create_artist_form).post(routes::artist::create_artist),
        )
        .route("/artists/{id}", get(routes::artist::show_artist))
        .route(
            "/artists/{id}/edit",
            get(routes::artist::edit_artist_form).post(routes::artist::edit_artist),
        )
        .route("/artists/{id}/delete", get(routes::artist::delete_artist))
        .route("/shows", get(routes::show::list_shows))
        .route(
            "/shows/create",
            get(routes::show::create_show_form).post(routes::show::create_show),
        )
        .nest_service(
            "/static",
            ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        )
        .fallback(routes::root::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CookieManagerLayer::new())
                .layer(CompressionLayer::new()),
        )
        .with_state(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_owned());
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}"))
        .await
        .unwrap();
    info!("Running axum on http://{host}:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}
