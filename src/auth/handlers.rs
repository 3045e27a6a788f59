//! Token HTTP handlers: register (connection token), subscribe (channel tokens).

use axum::{extract::State, Json};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::handlers::json::AppJson;
use crate::models::{Credential, RegisterResponse, SubscribeRequest, SubscribeResponse};

/// POST /register
///
/// Unknown credentials still receive a token, scoped to user `0`.
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<Credential>,
) -> Result<Json<RegisterResponse>, AppError> {
    let access_token = state.auth_service().connection_token(&body)?;
    Ok(Json(RegisterResponse { access_token }))
}

/// POST /subscribe
pub async fn subscribe(
    State(state): State<AppState>,
    AppJson(body): AppJson<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, AppError> {
    let channels = state
        .auth_service()
        .channel_tokens(&body.client, &body.channels)?;
    debug!(client = %body.client, count = channels.len(), "issued channel tokens");
    Ok(Json(SubscribeResponse { channels }))
}
