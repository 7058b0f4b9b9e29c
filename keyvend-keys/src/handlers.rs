//! HTTP handlers for the key endpoint

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::KeysError;
use crate::source::{collect_keys, EnvSource, KeySlots, KeySource};

/// Shared, read-only state for the key handler
pub struct KeysState {
    pub source: Arc<dyn KeySource>,
    pub slots: KeySlots,
}

impl KeysState {
    pub fn new(source: Arc<dyn KeySource>, slots: KeySlots) -> Self {
        Self { source, slots }
    }

    /// State reading the given slots from the process environment
    pub fn from_env(slots: KeySlots) -> Self {
        Self::new(Arc::new(EnvSource), slots)
    }
}

// === Response types ===

/// Success body of the key endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysPayload {
    pub status: &'static str,
    pub keys: Vec<String>,
    pub timestamp: i64,
    pub keys_count: usize,
}

impl KeysPayload {
    /// Build the payload, failing when no key was found
    pub fn from_keys(keys: Vec<String>, timestamp: i64) -> Result<Self, KeysError> {
        if keys.is_empty() {
            return Err(KeysError::NotConfigured);
        }

        Ok(Self {
            status: "success",
            keys_count: keys.len(),
            keys,
            timestamp,
        })
    }
}

// === Handlers ===

/// GET handler: scan the configured slots and return every key found
pub async fn handle_get_keys(State(state): State<Arc<KeysState>>) -> Response {
    let keys = collect_keys(state.source.as_ref(), &state.slots);
    let timestamp = chrono::Utc::now().timestamp();

    match KeysPayload::from_keys(keys, timestamp) {
        Ok(payload) => {
            debug!(keys_count = payload.keys_count, "Serving API keys");
            json_response(StatusCode::OK, &payload)
        }
        Err(e) => {
            warn!(slots = ?state.slots.names(), "No API keys configured");
            e.into_response()
        }
    }
}

// === Helpers ===

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    let Ok(body) = serde_json::to_string(body) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
