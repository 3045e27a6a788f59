//! Publishing to the external messaging backend.

use async_trait::async_trait;

use crate::error::AppResult;

/// Forwards a payload to a channel on the messaging backend.
///
/// Implementations make a single attempt; cancellation happens by dropping the future.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, channel: &str, payload: &[u8]) -> AppResult<()>;
}
