//! Handlers for the admin channel: orders, plans, and factories.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use threadline_contracts::admin;
use threadline_core::asset_kind::Channel;
use threadline_ledger::models::admin::{
    CreateFactory, CreateOrder, CreatePlan, Factory, Order, Plan,
};

use crate::error::AppResult;
use crate::middleware::identity::HeaderIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `PUT /orders/{id}/acceptance`.
#[derive(Debug, Deserialize)]
pub struct AcceptanceRequest {
    pub plan_id: String,
    pub acceptance: bool,
}

/// Body for `PUT /orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// Body for the plan and factory approval endpoints.
#[derive(Debug, Deserialize)]
pub struct ApprovalRequest {
    pub approval: bool,
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/orders
pub async fn create_order(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<DataResponse<Order>>)> {
    let id = input.id.clone();
    let order = state
        .submit(Channel::Admin, identity, "create_order", id, move |ctx, _| {
            admin::create_order(ctx, input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// PUT /api/v1/admin/orders/{id}/acceptance
///
/// Only the order's receiver may answer it.
pub async fn set_order_acceptance(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<AcceptanceRequest>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = state
        .submit(Channel::Admin, identity, "set_order_acceptance", id, move |ctx, id| {
            admin::set_order_acceptance(ctx, id, &body.plan_id, body.acceptance)
        })
        .await?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /api/v1/admin/orders/{id}/status
pub async fn set_order_status(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> AppResult<Json<DataResponse<Order>>> {
    let order = state
        .submit(Channel::Admin, identity, "set_order_status", id, move |ctx, id| {
            admin::set_order_status(ctx, id, &body.status)
        })
        .await?;
    Ok(Json(DataResponse { data: order }))
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/plans
pub async fn create_plan(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreatePlan>,
) -> AppResult<(StatusCode, Json<DataResponse<Plan>>)> {
    let id = input.id.clone();
    let plan = state
        .submit(Channel::Admin, identity, "create_plan", id, move |ctx, _| {
            admin::create_plan(ctx, input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: plan })))
}

/// PUT /api/v1/admin/plans/{id}/approval
pub async fn set_plan_approval(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<ApprovalRequest>,
) -> AppResult<Json<DataResponse<Plan>>> {
    let plan = state
        .submit(Channel::Admin, identity, "set_plan_approval", id, move |ctx, id| {
            admin::set_plan_approval(ctx, id, body.approval)
        })
        .await?;
    Ok(Json(DataResponse { data: plan }))
}

/// PUT /api/v1/admin/plans/{id}/status
pub async fn set_plan_status(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Plan>>> {
    let plan = state
        .submit(Channel::Admin, identity, "set_plan_status", id, move |ctx, id| {
            admin::set_plan_status(ctx, id)
        })
        .await?;
    Ok(Json(DataResponse { data: plan }))
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/factories
pub async fn create_factory(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateFactory>,
) -> AppResult<(StatusCode, Json<DataResponse<Factory>>)> {
    let id = input.id.clone();
    let factory = state
        .submit(Channel::Admin, identity, "create_factory", id, move |ctx, _| {
            admin::create_factory(ctx, input)
        })
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: factory })))
}

/// PUT /api/v1/admin/factories/{id}/approval
pub async fn set_factory_approval(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<ApprovalRequest>,
) -> AppResult<Json<DataResponse<Factory>>> {
    let factory = state
        .submit(Channel::Admin, identity, "set_factory_approval", id, move |ctx, id| {
            admin::set_factory_approval(ctx, id, body.approval)
        })
        .await?;
    Ok(Json(DataResponse { data: factory }))
}

/// PUT /api/v1/admin/factories/{id}/status
pub async fn set_factory_status(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Factory>>> {
    let factory = state
        .submit(Channel::Admin, identity, "set_factory_status", id, move |ctx, id| {
            admin::set_factory_status(ctx, id)
        })
        .await?;
    Ok(Json(DataResponse { data: factory }))
}
