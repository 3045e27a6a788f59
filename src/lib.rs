//! Token gateway for a Centrifugo real-time backend.
//!
//! Authenticates static credentials, issues HS256 connection and channel
//! subscription tokens, and forwards publish requests to the backend API.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::{Config, CorsConfig};
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::{AuthService, Publisher};

use axum::routing::{get, post};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the API router (health, register, subscribe, publish). Used by main and by integration tests.
pub fn create_app(state: AppState, cors: CorsConfig) -> axum::Router {
    axum::Router::new()
        .route("/", get(http::health))
        .route("/register", post(auth::register).options(http::preflight))
        .route("/subscribe", post(auth::subscribe).options(http::preflight))
        .route("/publish", post(http::publish).options(http::preflight))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            cors,
            middleware::cors_headers,
        ))
        .layer(TraceLayer::new_for_http())
}
