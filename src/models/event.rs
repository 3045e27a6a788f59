//! Publish payloads forwarded to the messaging backend.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::models::credential::Credential;

/// Body of `POST /publish`.
///
/// `credential` is accepted for compatibility with existing clients but is not
/// checked. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub credential: Option<Credential>,
    /// JSON document as text; forwarded to the backend as raw bytes.
    pub data: String,
    pub channel: String,
}

/// Command envelope for the Centrifugo HTTP API.
#[derive(Debug, Serialize)]
pub struct ApiCommand<'a, P> {
    pub method: &'a str,
    pub params: P,
}

/// `data` is written to the wire exactly as the client sent it.
#[derive(Debug, Serialize)]
pub struct PublishParams<'a> {
    pub channel: &'a str,
    pub data: &'a RawValue,
}

/// Centrifugo API reply: either `result` or `error` is set.
#[derive(Debug, Deserialize)]
pub struct ApiReply {
    #[serde(default)]
    pub error: Option<ApiReplyError>,
}

#[derive(Debug, Deserialize)]
pub struct ApiReplyError {
    pub code: u32,
    pub message: String,
}
