//! External backends.

pub mod centrifugo;

pub use centrifugo::CentrifugoClient;
