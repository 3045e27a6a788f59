//! HTTP request handlers.

pub mod http;
pub mod json;

pub use http::*;
pub use json::AppJson;
