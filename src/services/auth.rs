//! Token issuance for connections and private channel subscriptions.

use crate::auth::{CredentialStore, TokenIssuer};
use crate::error::AppResult;
use crate::models::{ChannelToken, Credential};
use std::sync::Arc;
use tracing::warn;

/// Resolves credentials and signs tokens. Shared read-only across requests.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<CredentialStore>,
    issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<CredentialStore>, issuer: TokenIssuer) -> Self {
        Self { store, issuer }
    }

    /// Connection token for the user behind `credential`.
    /// A miss is not an error: the token is issued for the anonymous user id.
    pub fn connection_token(&self, credential: &Credential) -> AppResult<String> {
        let user_id = self.store.lookup(credential);
        if user_id.is_anonymous() {
            warn!(email = %credential.email, "unknown credential, issuing anonymous token");
        }
        self.issuer.connection_token(user_id)
    }

    /// One token per channel, in input order. Stops at the first signing failure.
    pub fn channel_tokens(&self, client: &str, channels: &[String]) -> AppResult<Vec<ChannelToken>> {
        channels
            .iter()
            .map(|channel| -> AppResult<ChannelToken> {
                Ok(ChannelToken {
                    channel: channel.clone(),
                    token: self.issuer.channel_token(client, channel)?,
                })
            })
            .collect()
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}
