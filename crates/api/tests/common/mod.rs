#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use threadline_core::authorization::AccessPolicy;
use threadline_ledger::containment::ContainmentMode;
use tower::ServiceExt;

use threadline_api::config::ServerConfig;
use threadline_api::middleware::identity::ORG_ID_HEADER;
use threadline_api::router::build_app_router;
use threadline_api::state::AppState;

pub const ORG_RETAILER: &str = "Org1MSP";
pub const ORG_SUPPLIER: &str = "Org2MSP";
pub const ORG_AUDITOR: &str = "Org3MSP";
pub const ORG_SPINNER: &str = "Org4MSP";
pub const ORG_FABRIC_MILL: &str = "Org5MSP";
pub const ORG_GARMENT_FACTORY: &str = "Org6MSP";

/// Timestamp used for every client-supplied date.
pub const PRODUCED_AT: &str = "2024-03-01T08:00:00Z";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        policy_path: None,
        containment_mode: ContainmentMode::Indexed,
    }
}

/// Build the full application router over fresh in-memory ledgers.
///
/// Mirrors `main.rs` so tests run through the same middleware stack.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::in_memory(config.clone(), AccessPolicy::default());
    build_app_router(state, &config).expect("test router builds")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    org: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(org) = org {
        builder = builder.header(ORG_ID_HEADER, org);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: &Router, uri: &str, org: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(org), Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, org: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(org), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---- Request bodies ----

pub fn order_body(id: &str, receiver: &str) -> Value {
    serde_json::json!({
        "id": id,
        "created_at": PRODUCED_AT,
        "delivery_date": "2099-01-01T00:00:00Z",
        "payment_terms": "net 60",
        "product_details": "10k crew-neck shirts",
        "receiver_id": receiver,
        "total_order_value": 125000.0,
    })
}

pub fn plan_body(id: &str, order_id: &str, factories: &[&str]) -> Value {
    serde_json::json!({
        "id": id,
        "created_at": PRODUCED_AT,
        "factories": factories,
        "order_id": order_id,
        "production_plan": "two shifts",
    })
}

pub fn factory_body(id: &str) -> Value {
    serde_json::json!({
        "id": id,
        "factory_owner": "Rahman Textiles",
        "location": "Gazipur",
        "name": "Unit 3",
        "past_fulfillment": true,
        "start_date": PRODUCED_AT,
    })
}

pub fn bale_body(id: &str, total_weight: f32) -> Value {
    serde_json::json!({
        "id": id,
        "approval": true,
        "assembly_date": PRODUCED_AT,
        "origin": "Gujarat",
        "quality_grade": "A",
        "total_weight": total_weight,
    })
}

pub fn lot_body(id: &str, prefix: &str, content: &[&str], total_weight: f32) -> Value {
    serde_json::json!({
        "id": id,
        "assembly_date": PRODUCED_AT,
        "asset_id_prefix": prefix,
        "content": content,
        "destination": "Tiruppur",
        "origin": "Gujarat",
        "total_weight": total_weight,
    })
}
