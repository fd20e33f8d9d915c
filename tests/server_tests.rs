//! End-to-end test over a real socket
//!
//! Binds the router to an ephemeral port and talks to it with reqwest, the
//! way an external client would.

use std::net::SocketAddr;
use std::time::Duration;

use logitrack::{cache::InvalidationMode, create_router, AppState, Config};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_server(config: Config) -> SocketAddr {
    let app = create_router(AppState::from_config(&config).await.unwrap());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

#[tokio::test]
async fn test_admin_workflow_over_http() {
    let config = Config {
        cache_ttl: Duration::from_secs(60),
        invalidation: InvalidationMode::Strict,
        database_url: Some("sqlite::memory:".to_string()),
        ..Config::default()
    };
    let base = format!("http://{}", spawn_server(config).await);
    let client = reqwest::Client::new();

    let liveness = client.get(format!("{}/", base)).send().await.unwrap();
    assert_eq!(liveness.text().await.unwrap(), "LogiTrack API");

    let status = client
        .post(format!("{}/api/auth/create-role", base))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::OK);

    let status = client
        .post(format!("{}/api/auth/register", base))
        .json(&json!({"username": "ops", "email": "ops@example.com", "password": "Pa55word!"}))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::OK);

    let login: Value = client
        .post(format!("{}/api/auth/login", base))
        .json(&json!({"username": "ops", "password": "Pa55word!"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let token = login["token"].as_str().unwrap().to_string();

    // Anonymous delete is turned away.
    let status = client
        .delete(format!("{}/api/inventory/1", base))
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let created = client
        .post(format!("{}/api/inventory", base))
        .bearer_auth(&token)
        .json(&json!({"name": "Pallet", "quantity": 10, "location": "A1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let display: String = created.json().await.unwrap();
    assert_eq!(display, "Item: Pallet | Quantity: 10 | Location: A1");

    let inventory: Vec<Value> = client
        .get(format!("{}/api/inventory", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inventory.len(), 1);

    let status = client
        .delete(format!("{}/api/inventory/1", base))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::NO_CONTENT);

    let status = client
        .get(format!("{}/api/inventory/1", base))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .status();
    assert_eq!(status, StatusCode::NOT_FOUND);
}
