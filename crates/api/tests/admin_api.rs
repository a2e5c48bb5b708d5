mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::*;
use serde_json::json;
use threadline_api::router::build_app_router;
use threadline_api::state::AppState;
use threadline_contracts::Contract;
use threadline_core::asset_kind::Channel;
use threadline_core::authorization::AccessPolicy;
use threadline_core::error::CoreError;
use threadline_ledger::store::{LedgerStore, RangeIter, WriteBatch};
use threadline_ledger::MemoryLedger;

async fn seeded() -> axum::Router {
    let app = build_test_app();
    let resp = post_json(
        &app,
        "/api/v1/admin/factories",
        ORG_SUPPLIER,
        factory_body("factory_1"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = post_json(
        &app,
        "/api/v1/admin/orders",
        ORG_RETAILER,
        order_body("order_1", ORG_SUPPLIER),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = post_json(
        &app,
        "/api/v1/admin/plans",
        ORG_SUPPLIER,
        plan_body("plan_1", "order_1", &["factory_1"]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    app
}

async fn approve(app: &axum::Router, uri: &str) {
    for org in [ORG_RETAILER, ORG_AUDITOR] {
        let resp = put_json(app, uri, org, json!({ "approval": true })).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_returns_record_in_envelope() {
    let app = build_test_app();
    let resp = post_json(
        &app,
        "/api/v1/admin/orders",
        ORG_RETAILER,
        order_body("order_1", ORG_SUPPLIER),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert!(resp.headers().contains_key("x-request-id"));

    let json = body_json(resp).await;
    assert_eq!(json["data"]["ID"], "order_1");
    assert_eq!(json["data"]["Status"], "issued");
    assert_eq!(json["data"]["CreatorID"], ORG_RETAILER);
    assert_eq!(json["data"]["IsAccepted"], false);
}

#[tokio::test]
async fn duplicate_order_conflicts() {
    let app = seeded().await;
    let resp = post_json(
        &app,
        "/api/v1/admin/orders",
        ORG_RETAILER,
        order_body("order_1", ORG_SUPPLIER),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["code"], "ALREADY_EXISTS");
}

#[tokio::test]
async fn misprefixed_order_id_is_rejected() {
    let app = build_test_app();
    let resp = post_json(
        &app,
        "/api/v1/admin/orders",
        ORG_RETAILER,
        order_body("plan_9", ORG_SUPPLIER),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["code"], "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn plan_for_missing_order_is_not_found() {
    let app = build_test_app();
    let resp = post_json(
        &app,
        "/api/v1/admin/plans",
        ORG_SUPPLIER,
        plan_body("plan_1", "order_404", &[]),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Approvals and lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn factory_approval_is_limited_to_retailer_and_auditor() {
    let app = seeded().await;
    let resp = put_json(
        &app,
        "/api/v1/admin/factories/factory_1/approval",
        ORG_SPINNER,
        json!({ "approval": true }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(resp).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn factory_status_waits_for_both_approvals() {
    let app = seeded().await;
    let empty = json!({});
    let resp = put_json(
        &app,
        "/api/v1/admin/factories/factory_1/status",
        ORG_SUPPLIER,
        empty.clone(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(body_json(resp).await["code"], "PRECONDITION_NOT_MET");

    approve(&app, "/api/v1/admin/factories/factory_1/approval").await;
    let resp = put_json(
        &app,
        "/api/v1/admin/factories/factory_1/status",
        ORG_SUPPLIER,
        empty,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["Status"], "approved");
}

#[tokio::test]
async fn order_moves_to_accepted_after_plan_approval() {
    let app = seeded().await;
    let status = json!({ "status": "accepted" });

    let resp = put_json(
        &app,
        "/api/v1/admin/orders/order_1/status",
        ORG_RETAILER,
        status.clone(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);

    let resp = put_json(
        &app,
        "/api/v1/admin/orders/order_1/acceptance",
        ORG_SUPPLIER,
        json!({ "plan_id": "plan_1", "acceptance": true }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["PlanID"], "plan_1");

    approve(&app, "/api/v1/admin/factories/factory_1/approval").await;
    let resp = put_json(
        &app,
        "/api/v1/admin/factories/factory_1/status",
        ORG_SUPPLIER,
        json!({}),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    approve(&app, "/api/v1/admin/plans/plan_1/approval").await;
    let resp = put_json(&app, "/api/v1/admin/plans/plan_1/status", ORG_SUPPLIER, json!({})).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = put_json(
        &app,
        "/api/v1/admin/orders/order_1/status",
        ORG_RETAILER,
        json!({ "status": "shipped" }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["code"], "INVALID_STATUS");

    let resp = put_json(&app, "/api/v1/admin/orders/order_1/status", ORG_RETAILER, status).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["Status"], "accepted");
}

#[tokio::test]
async fn only_receiver_answers_an_order() {
    let app = seeded().await;
    let resp = put_json(
        &app,
        "/api/v1/admin/orders/order_1/acceptance",
        ORG_AUDITOR,
        json!({ "plan_id": "plan_1", "acceptance": true }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_queries_need_no_identity() {
    let app = seeded().await;

    let resp = get(&app, "/api/v1/admin/assets").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 3);

    let resp = get(&app, "/api/v1/admin/assets/count?kind=order").await;
    assert_eq!(body_json(resp).await["data"]["count"], 1);

    let resp = get(&app, "/api/v1/admin/assets/plan_1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["OrderID"], "order_1");
}

#[tokio::test]
async fn channels_do_not_share_records() {
    let app = seeded().await;
    let resp = get(&app, "/api/v1/production/assets/order_1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = get(&app, "/api/v1/production/assets/order_1/exists").await;
    assert_eq!(body_json(resp).await["data"]["exists"], false);
}

#[tokio::test]
async fn health_reports_both_ledgers() {
    let app = build_test_app();
    let resp = get(&app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["ledgers_healthy"], true);
}

struct Unreachable;

impl LedgerStore for Unreachable {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Err(CoreError::LedgerAccess("connection refused".to_string()))
    }

    fn range_scan(&self, _start: &str, _end: &str) -> Result<RangeIter<'_>, CoreError> {
        Err(CoreError::LedgerAccess("connection refused".to_string()))
    }

    fn commit(&self, _batch: WriteBatch) -> Result<(), CoreError> {
        Err(CoreError::LedgerAccess("connection refused".to_string()))
    }
}

#[tokio::test]
async fn health_degrades_when_a_ledger_is_unreachable() {
    let config = test_config();
    let policy = Arc::new(AccessPolicy::default());
    let state = AppState {
        admin: Arc::new(Contract::new(
            Channel::Admin,
            Arc::new(MemoryLedger::new()),
            Arc::clone(&policy),
            config.containment_mode,
        )),
        production: Arc::new(Contract::new(
            Channel::Production,
            Arc::new(Unreachable),
            policy,
            config.containment_mode,
        )),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config).unwrap();

    let resp = get(&app, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["ledgers_healthy"], false);
}
