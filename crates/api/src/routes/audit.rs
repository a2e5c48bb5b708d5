//! Asset query, flag, and notes routes, mounted once per channel.

use axum::routing::{get, put};
use axum::{Extension, Router};
use threadline_core::asset_kind::Channel;

use crate::handlers::audit;
use crate::state::AppState;

/// Routes mounted at `/{channel}` for the given channel.
///
/// ```text
/// GET /assets[?kind=]               -> list_assets
/// GET /assets/count[?kind=]         -> count_assets
/// GET /assets/{id}                  -> get_asset
/// GET /assets/{id}/exists           -> asset_exists
/// PUT /assets/{id}/flag             -> set_flag
/// PUT /assets/{id}/notes            -> set_notes
/// ```
pub fn router(channel: Channel) -> Router<AppState> {
    Router::new()
        .route("/assets", get(audit::list_assets))
        .route("/assets/count", get(audit::count_assets))
        .route("/assets/{id}", get(audit::get_asset))
        .route("/assets/{id}/exists", get(audit::asset_exists))
        .route("/assets/{id}/flag", put(audit::set_flag))
        .route("/assets/{id}/notes", put(audit::set_notes))
        .layer(Extension(channel))
}
