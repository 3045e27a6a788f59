//! Authentication: static credentials and token issuing.

mod credentials;
mod handlers;
mod jwt;

pub use credentials::{CredentialStore, UserId};
pub use handlers::{register, subscribe};
pub use jwt::{ChannelClaims, ConnectionClaims, TokenIssuer};
