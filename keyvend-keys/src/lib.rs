//! API key endpoint for keyvend
//!
//! Reads a fixed, ordered set of key slots (by default `API_KEY_1` through
//! `API_KEY_3`) from a [`KeySource`] and serves the non-empty values as JSON.
//!
//! - `GET /api/keys` returns `{"status","keys","timestamp","keysCount"}`
//! - Responds 500 with `{"error":"Keys not configured"}` when no slot is set

mod error;
pub mod handlers;
mod source;

use axum::{routing::get, Router};
use std::sync::Arc;

pub use error::{ErrorPayload, KeysError};
pub use handlers::{handle_get_keys, KeysPayload, KeysState};
pub use source::{
    collect_keys, EnvSource, KeySlots, KeySource, MapSource, DEFAULT_COUNT, DEFAULT_PREFIX,
};

/// Path the key endpoint is mounted on
pub const KEYS_PATH: &str = "/api/keys";

/// Router serving the key endpoint
pub fn router(state: Arc<KeysState>) -> Router {
    Router::new()
        .route(KEYS_PATH, get(handle_get_keys))
        .with_state(state)
}
