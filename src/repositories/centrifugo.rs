//! Centrifugo HTTP API client used for server-side publishing.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde_json::value::RawValue;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::event::{ApiCommand, ApiReply, PublishParams};
use crate::services::Publisher;

/// Publishes through `POST {base}/api` with an `apikey` authorization header.
#[derive(Clone)]
pub struct CentrifugoClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl CentrifugoClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: format!("{}/api", base_url.trim_end_matches('/')),
            api_key,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl Publisher for CentrifugoClient {
    async fn publish(&self, channel: &str, payload: &[u8]) -> AppResult<()> {
        let data: &RawValue = serde_json::from_slice(payload)
            .map_err(|e| AppError::Publish(format!("data is not valid JSON: {}", e)))?;
        let command = ApiCommand {
            method: "publish",
            params: PublishParams { channel, data },
        };

        let response = self
            .http
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("apikey {}", self.api_key))
            .json(&command)
            .send()
            .await
            .map_err(|e| AppError::Publish(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::Publish(e.to_string()))?;
        check_reply(status, &body)?;

        debug!(channel = %channel, "published");
        Ok(())
    }
}

fn check_reply(status: StatusCode, body: &[u8]) -> AppResult<()> {
    if !status.is_success() {
        return Err(AppError::Publish(format!("backend returned {}", status)));
    }
    if body.is_empty() {
        return Ok(());
    }
    let reply: ApiReply = serde_json::from_slice(body)
        .map_err(|e| AppError::Publish(format!("unexpected backend reply: {}", e)))?;
    match reply.error {
        Some(err) => Err(AppError::Publish(format!("{}: {}", err.code, err.message))),
        None => Ok(()),
    }
}
