//! Environment-backed key endpoint
//!
//! Kept in its own test binary with a single test: the process environment
//! is written before any server or client thread starts.

use std::sync::Arc;

use keyvend_keys::{EnvSource, KeySlots, KeysState, KEYS_PATH};
use tokio::net::TcpListener;

#[tokio::test]
async fn test_env_source_with_custom_prefix() {
    std::env::set_var("KEYVEND_IT_KEY_1", "first");
    std::env::set_var("KEYVEND_IT_KEY_2", "");
    std::env::set_var("KEYVEND_IT_KEY_3", "third");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let state = KeysState::new(Arc::new(EnvSource), KeySlots::numbered("KEYVEND_IT_KEY_", 3));
    let router = keyvend_keys::router(Arc::new(state));

    let server = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let body: serde_json::Value = reqwest::get(format!("http://127.0.0.1:{}{}", port, KEYS_PATH))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "success");
    assert_eq!(body["keys"], serde_json::json!(["first", "third"]));
    assert_eq!(body["keysCount"], 2);

    server.abort();
}
