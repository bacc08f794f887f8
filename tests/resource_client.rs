//! Integration tests for `ResourceClient` against a local axum server.

#![allow(clippy::panic, missing_docs)]

use std::net::SocketAddr;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use serde_json::{Value, json};

use agent_hub_core::client::ResourceClient;
use agent_hub_core::config::HubConfig;
use agent_hub_core::error::HubError;

async fn manifest() -> impl IntoResponse {
    axum::Json(json!({"name": "Agent Economy Hub", "version": "2.0.0"}))
}

async fn registry() -> impl IntoResponse {
    axum::Json(json!({"frameworks": [{"id": "swot"}, {"id": "pestle"}]}))
}

async fn categories() -> impl IntoResponse {
    axum::Json(json!(["strategy", "operations"]))
}

async fn search_index() -> impl IntoResponse {
    axum::Json(json!({"entries": 2}))
}

async fn gate_config() -> impl IntoResponse {
    axum::Json(json!({"questions": 10, "total": 100}))
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{\"name\": ",
    )
}

async fn server_error() -> impl IntoResponse {
    (StatusCode::SERVICE_UNAVAILABLE, "maintenance")
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/api/manifest.json", get(manifest))
        .route("/api/frameworks/registry.json", get(registry))
        .route("/api/frameworks/categories.json", get(categories))
        .route("/api/search/index.json", get(search_index))
        .route("/api/agent/config.json", get(gate_config))
        .route("/api/broken.json", get(broken))
        .route("/api/down.json", get(server_error))
        .route("/elsewhere/data.json", get(manifest));

    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind test listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("listener address");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn client_for(addr: SocketAddr) -> ResourceClient {
    ResourceClient::new(&HubConfig::default().with_origin(format!("http://{addr}")))
}

#[tokio::test]
async fn named_resources_are_fetched_from_api_base() {
    let client = client_for(spawn_server().await);

    let Ok(manifest) = client.fetch_manifest().await else {
        panic!("manifest fetch failed");
    };
    assert_eq!(manifest["version"], "2.0.0");

    let Ok(registry) = client.fetch_registry().await else {
        panic!("registry fetch failed");
    };
    assert_eq!(registry["frameworks"][1]["id"], "pestle");

    let Ok(categories) = client.fetch_categories().await else {
        panic!("categories fetch failed");
    };
    assert_eq!(categories, json!(["strategy", "operations"]));

    let Ok(index) = client.fetch_search_index().await else {
        panic!("search index fetch failed");
    };
    assert_eq!(index["entries"], 2);

    let Ok(gate) = client.fetch_gate_config().await else {
        panic!("gate config fetch failed");
    };
    assert_eq!(gate["total"], 100);
}

#[tokio::test]
async fn typed_fetch_deserializes_into_caller_type() {
    #[derive(Debug, Deserialize)]
    struct Gate {
        questions: u32,
        total: u32,
    }

    let client = client_for(spawn_server().await);
    let Ok(gate) = client.fetch_json::<Gate>("/agent/config.json").await else {
        panic!("typed fetch failed");
    };
    assert_eq!(gate.questions, 10);
    assert_eq!(gate.total, 100);
}

#[tokio::test]
async fn absolute_urls_bypass_api_base() {
    let addr = spawn_server().await;
    let client = client_for(addr);
    let result = client
        .fetch_json::<Value>(&format!("http://{addr}/elsewhere/data.json"))
        .await;
    let Ok(value) = result else {
        panic!("absolute fetch failed");
    };
    assert_eq!(value["name"], "Agent Economy Hub");
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let client = client_for(spawn_server().await);

    let missing = client.fetch_json::<Value>("/nope.json").await;
    let Err(err) = missing else {
        panic!("404 must fail");
    };
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404");

    let down = client.fetch_json::<Value>("/down.json").await;
    assert!(matches!(down, Err(HubError::Http { status: 503 })));
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let client = client_for(spawn_server().await);
    let result = client.fetch_json::<Value>("/broken.json").await;
    assert!(matches!(result, Err(HubError::Parse(_))));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind throwaway listener");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("throwaway address");
    };
    drop(listener);

    let client = client_for(addr);
    let result = client.fetch_manifest().await;
    assert!(matches!(result, Err(HubError::Transport(_))));
}
