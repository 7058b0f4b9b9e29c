//! HTTP router for keyvend

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use keyvend_keys::KeysState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_router(state: Arc<KeysState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .merge(keyvend_keys::router(state))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({"status": "running"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use keyvend_keys::{KeySlots, MapSource};
    use tower::ServiceExt;

    fn app(source: MapSource) -> Router {
        create_router(Arc::new(KeysState::new(
            Arc::new(source),
            KeySlots::default(),
        )))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MapSource::new())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "running");
    }

    #[tokio::test]
    async fn test_keys_route_mounted() {
        let response = app(MapSource::new().with("API_KEY_2", "def"))
            .oneshot(Request::get("/api/keys").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["keys"], serde_json::json!(["def"]));
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let response = app(MapSource::new())
            .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
