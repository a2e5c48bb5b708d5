//! Route definitions for the admin channel.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /orders                      -> create_order
/// PUT  /orders/{id}/acceptance      -> set_order_acceptance
/// PUT  /orders/{id}/status          -> set_order_status
/// POST /plans                       -> create_plan
/// PUT  /plans/{id}/approval         -> set_plan_approval
/// PUT  /plans/{id}/status           -> set_plan_status
/// POST /factories                   -> create_factory
/// PUT  /factories/{id}/approval     -> set_factory_approval
/// PUT  /factories/{id}/status       -> set_factory_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", post(admin::create_order))
        .route("/orders/{id}/acceptance", put(admin::set_order_acceptance))
        .route("/orders/{id}/status", put(admin::set_order_status))
        .route("/plans", post(admin::create_plan))
        .route("/plans/{id}/approval", put(admin::set_plan_approval))
        .route("/plans/{id}/status", put(admin::set_plan_status))
        .route("/factories", post(admin::create_factory))
        .route("/factories/{id}/approval", put(admin::set_factory_approval))
        .route("/factories/{id}/status", put(admin::set_factory_status))
}
