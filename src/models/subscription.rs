//! Channel subscription request and per-channel tokens.

use serde::{Deserialize, Serialize};

/// Body of `POST /subscribe`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub client: String,
    pub channels: Vec<String>,
}

/// One signed subscription token for a single channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelToken {
    pub channel: String,
    pub token: String,
}

/// Response for `POST /subscribe`; tokens follow the request's channel order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub channels: Vec<ChannelToken>,
}
