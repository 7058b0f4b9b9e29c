//! Key handler errors

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the key handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeysError {
    /// Every slot was absent or empty
    #[error("Keys not configured")]
    NotConfigured,
}

impl KeysError {
    pub fn status(self) -> StatusCode {
        match self {
            Self::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: String,
}

impl From<KeysError> for ErrorPayload {
    fn from(err: KeysError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

// Error responses carry no Content-Type and no CORS header.
impl IntoResponse for KeysError {
    fn into_response(self) -> Response {
        let body = serde_json::to_string(&ErrorPayload::from(self))
            .unwrap_or_else(|_| format!(r#"{{"error":"{self}"}}"#));

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = self.status();
        response
    }
}
