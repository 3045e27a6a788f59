//! HTTP handlers: publish, health and CORS preflight.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::handlers::json::AppJson;
use crate::models::event::PublishRequest;
use crate::services::{AuthService, Publisher};

/// Shared application state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub publisher: Arc<dyn Publisher>,
}

impl AppState {
    pub fn new(auth_service: AuthService, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            auth_service,
            publisher,
        }
    }
    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
    pub fn publisher(&self) -> &dyn Publisher {
        self.publisher.as_ref()
    }
}

/// POST /publish — forward `data` to `channel` on the messaging backend.
pub async fn publish(
    State(state): State<AppState>,
    AppJson(body): AppJson<PublishRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Err(e) = state
        .publisher()
        .publish(&body.channel, body.data.as_bytes())
        .await
    {
        warn!(channel = %body.channel, error = %e, "publish failed");
        return Err(e);
    }
    debug!(channel = %body.channel, bytes = body.data.len(), "publish forwarded");
    Ok(Json(json!({ "ok": true })))
}

/// GET / — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

/// OPTIONS on API routes: empty body, CORS headers come from the middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
