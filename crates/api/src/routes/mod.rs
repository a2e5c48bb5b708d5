pub mod admin;
pub mod audit;
pub mod health;
pub mod production;

use axum::Router;
use threadline_core::asset_kind::Channel;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /admin/orders, /admin/plans, /admin/factories      admin channel operations
/// /production/{kind}                                 production channel operations
/// /production/lots/{id}/owner                        lot transfer
/// /production/cartons/{id}/owner                     carton transfer
/// /{admin|production}/assets[/...]                   queries, flags, notes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/admin",
            admin::router().merge(audit::router(Channel::Admin)),
        )
        .nest(
            "/production",
            production::router().merge(audit::router(Channel::Production)),
        )
}
