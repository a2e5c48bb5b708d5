//! Handlers shared by both channels: asset queries, flags, and notes.
//!
//! The channel is supplied by the router as an `Extension<Channel>`.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use threadline_contracts::audit;
use threadline_core::asset_kind::{AssetKind, Channel};
use threadline_ledger::models::Asset;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::HeaderIdentity;
use crate::response::{CountResponse, DataResponse, ExistsResponse};
use crate::state::AppState;

/// Optional kind filter for listing and counting.
#[derive(Debug, Deserialize)]
pub struct KindQuery {
    /// Kind name (`cotton_bale`) or ID prefix (`cottonbale_`).
    pub kind: Option<String>,
}

/// Body for `PUT /assets/{id}/flag`.
#[derive(Debug, Deserialize)]
pub struct FlagRequest {
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
}

/// Body for `PUT /assets/{id}/notes`.
#[derive(Debug, Deserialize)]
pub struct NotesRequest {
    pub notes: String,
}

/// Parse a `kind` query value. Unknown kinds are a malformed request.
pub(crate) fn parse_kind(raw: &str) -> AppResult<AssetKind> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Unknown asset kind '{raw}'")))
}

/// GET /api/v1/{channel}/assets[?kind=]
pub async fn list_assets(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    Query(params): Query<KindQuery>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    let kind = params.kind.as_deref().map(parse_kind).transpose()?;
    let assets = state.contract(channel).query(|tx| match kind {
        Some(kind) => audit::get_all_of_kind(tx, kind),
        None => audit::get_all_assets(tx),
    })?;
    Ok(Json(DataResponse { data: assets }))
}

/// GET /api/v1/{channel}/assets/count[?kind=]
pub async fn count_assets(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    Query(params): Query<KindQuery>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let kind = params.kind.as_deref().map(parse_kind).transpose()?;
    let count = state.contract(channel).query(|tx| match kind {
        Some(kind) => audit::count_of_kind(tx, kind),
        None => audit::get_all_assets_count(tx),
    })?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

/// GET /api/v1/{channel}/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = state
        .contract(channel)
        .query(|tx| audit::get_asset(tx, &id))?;
    Ok(Json(DataResponse { data: asset }))
}

/// GET /api/v1/{channel}/assets/{id}/exists
pub async fn asset_exists(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<ExistsResponse>>> {
    let exists = state
        .contract(channel)
        .query(|tx| audit::asset_exists(tx, &id))?;
    Ok(Json(DataResponse {
        data: ExistsResponse { exists },
    }))
}

/// PUT /api/v1/{channel}/assets/{id}/flag
pub async fn set_flag(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<FlagRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = state
        .submit(channel, identity, "set_flag", id, move |ctx, id| {
            audit::set_flag(ctx, id, body.is_flagged, body.flag_reason)
        })
        .await?;
    Ok(Json(DataResponse { data: asset }))
}

/// PUT /api/v1/{channel}/assets/{id}/notes
pub async fn set_notes(
    State(state): State<AppState>,
    Extension(channel): Extension<Channel>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<NotesRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = state
        .submit(channel, identity, "set_notes", id, move |ctx, id| {
            audit::set_notes(ctx, id, body.notes)
        })
        .await?;
    Ok(Json(DataResponse { data: asset }))
}
