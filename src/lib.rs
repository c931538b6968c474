pub mod client;
pub mod config;
pub mod db;
pub mod editor;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: config::AppConfig,
}

/// Build the API router with all routes, CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let allowed_origin = state
        .config
        .frontend_url
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:5173"));

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health/live", get(routes::health::live))
        .route("/health/ready", get(routes::health::ready))
        .route("/api/signup", post(routes::auth::signup))
        .route("/api/login", post(routes::auth::login))
        .route("/api/send-report", post(routes::report::send_report))
        .route("/inventory/get/all", get(routes::inventory::list))
        .route("/inventory/getById/{id}", get(routes::inventory::get_by_id))
        .route("/inventory/add", post(routes::inventory::create))
        .route("/inventory/update/{id}", put(routes::inventory::update))
        .route("/inventory/delete/{id}", delete(routes::inventory::delete))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
