//! Request, response and backend wire models.

pub mod credential;
pub mod event;
pub mod subscription;

pub use credential::*;
pub use event::*;
pub use subscription::*;
