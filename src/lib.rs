//! One-Shot Cache - an in-memory key/value server with read-once values
//!
//! A stored value is removed when it is first read or when its lifetime
//! ends, whichever comes first.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
mod tasks;

pub use api::AppState;
pub use cache::{EntryStore, Lifetime};
pub use config::Config;
pub use error::CacheError;
