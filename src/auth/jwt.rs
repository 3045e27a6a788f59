//! HS256 token issuing for the messaging backend.
//!
//! Tokens are verified by the backend with the same shared secret. Unless a TTL
//! is configured they carry no `exp` and stay valid indefinitely.

use crate::auth::credentials::UserId;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionClaims {
    pub sub: String, // user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Private channel subscription claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelClaims {
    pub client: String,
    pub channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    pub fn new(secret: String, ttl: Option<Duration>) -> Self {
        Self { secret, ttl }
    }

    pub fn connection_token(&self, user_id: UserId) -> AppResult<String> {
        let claims = ConnectionClaims {
            sub: user_id.to_string(),
            exp: self.expiry()?,
        };
        self.sign(&claims)
    }

    pub fn channel_token(&self, client: &str, channel: &str) -> AppResult<String> {
        let claims = ChannelClaims {
            client: client.to_string(),
            channel: channel.to_string(),
            exp: self.expiry()?,
        };
        self.sign(&claims)
    }

    /// Sign an arbitrary claim set with HS256.
    pub fn sign<C: Serialize>(&self, claims: &C) -> AppResult<String> {
        let token = encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;
        Ok(token)
    }

    fn expiry(&self) -> AppResult<Option<i64>> {
        let Some(ttl) = self.ttl else {
            return Ok(None);
        };
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AppError::Signing(format!("token ttl: {}", e)))?;
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Signing("token ttl out of range".to_string()))?;
        Ok(Some(exp.timestamp()))
    }
}

#[cfg(test)]
impl TokenIssuer {
    /// Verify a token issued with this secret and return its claims.
    pub(crate) fn decode<C: serde::de::DeserializeOwned>(&self, token: &str) -> AppResult<C> {
        use jsonwebtoken::{DecodingKey, Validation};

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = self.ttl.is_some();
        let data = jsonwebtoken::decode::<C>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Decode(format!("invalid token: {}", e)))?;
        Ok(data.claims)
    }
}
