//! Entry point: load config, wire dependencies, and run the server.

use std::sync::Arc;
use tokengate::auth::{CredentialStore, TokenIssuer};
use tokengate::config::Config;
use tokengate::repositories::CentrifugoClient;
use tokengate::services::AuthService;
use tokengate::{create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.jwt_secret.is_empty() {
        tracing::warn!("CENTRIFUGO_JWT_SECRET is empty; tokens are signed with an empty key");
    }
    if config.token_ttl.is_none() {
        tracing::warn!("TOKEN_TTL_SECS unset; issued tokens never expire");
    }

    let store = Arc::new(CredentialStore::demo());
    tracing::info!(users = store.user_count(), "credential store loaded");
    let issuer = TokenIssuer::new(config.jwt_secret.clone(), config.token_ttl);
    let auth_service = AuthService::new(store, issuer);
    let publisher = Arc::new(CentrifugoClient::new(
        &config.centrifugo_url,
        config.centrifugo_api_key.clone(),
    ));
    tracing::info!(api = %publisher.api_url(), "centrifugo publisher configured");

    let state = AppState::new(auth_service, publisher);
    let app = create_app(state, config.cors.clone());

    tracing::info!(addr = %config.server_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
