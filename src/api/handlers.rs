//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.
//!
//! Bodies are taken as raw bytes and decoded here, so clients do not need
//! to send a `Content-Type` header and `GET /get` can carry a JSON body.

use std::time::Duration;

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use tracing::debug;

use crate::cache::{EntryStore, Lifetime};
use crate::config::Config;
use crate::error::Result;
use crate::models::{decode, GetRequest, GetResponse, HealthResponse, SetRequest, SetResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// One-shot store of decoded JSON values
    pub store: EntryStore<String, Value>,
    /// Lifetime given to every stored key
    pub key_live_time: Duration,
}

impl AppState {
    /// Creates a new AppState around the given store.
    pub fn new(store: EntryStore<String, Value>, key_live_time: Duration) -> Self {
        Self {
            store,
            key_live_time,
        }
    }

    /// Creates a new AppState with an empty store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(EntryStore::new(), config.key_live_time())
    }
}

/// Handler for POST /set
///
/// Stores a value until it is read once or the configured lifetime elapses.
pub async fn set_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<SetResponse>> {
    let req: SetRequest = decode(&body)?;
    req.validate()?;

    debug!("set key {:?} for {:?}", req.key, state.key_live_time);
    state
        .store
        .set(Lifetime::with_timeout(state.key_live_time), req.key, req.value)
        .await;

    Ok(Json(SetResponse::new()))
}

/// Handler for GET /get
///
/// Returns the value and removes it; a second read of the same key is a 404.
pub async fn get_handler(State(state): State<AppState>, body: Bytes) -> Result<Json<GetResponse>> {
    let req: GetRequest = decode(&body)?;
    req.validate()?;

    let value = state.store.get(req.key.as_str()).await?;

    Ok(Json(GetResponse::new(value)))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.store.len().await))
}
