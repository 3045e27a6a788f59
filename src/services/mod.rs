//! Business logic: token issuance and publishing.

pub mod auth;
pub mod publish;

pub use auth::AuthService;
pub use publish::Publisher;
