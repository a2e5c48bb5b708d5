//! Handlers for the production channel.
//!
//! Every create endpoint answers 201 with the committed record. Ownership
//! endpoints only accept IDs of the resource they are mounted under.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use threadline_contracts::{audit, production, TxContext};
use threadline_core::asset_kind::{AssetKind, Channel};
use threadline_core::error::CoreError;
use threadline_core::specs::require_prefix;
use threadline_core::types::OrgId;
use threadline_ledger::models::production::{
    AssembledGarment, BillOfLading, Button, Carton, Container, CottonBale, CottonYarn,
    CreateAssembledGarment, CreateBillOfLading, CreateButton, CreateCarton, CreateContainer,
    CreateCottonBale, CreateCottonYarn, CreateCutPart, CreateFabric, CreateLot, CutPart,
    FinishedFabric, Lot, UnfinishedFabric,
};
use threadline_ledger::models::Asset;

use crate::error::AppResult;
use crate::handlers::audit::parse_kind;
use crate::middleware::identity::HeaderIdentity;
use crate::response::{CountResponse, DataResponse};
use crate::state::AppState;

/// Body for the ownership transfer endpoints.
#[derive(Debug, Deserialize)]
pub struct OwnerRequest {
    pub owner: OrgId,
}

/// Query parameters for `GET /lots/count`.
#[derive(Debug, Deserialize)]
pub struct LotCountQuery {
    pub kind: String,
}

type Created<T> = (StatusCode, Json<DataResponse<T>>);

/// Submit a create operation on the production channel.
async fn create<T, F>(
    state: &AppState,
    identity: HeaderIdentity,
    operation: &'static str,
    id: String,
    op: F,
) -> AppResult<Created<T>>
where
    T: Serialize + Send + 'static,
    F: FnOnce(&mut TxContext<'_>) -> Result<T, CoreError> + Send + 'static,
{
    let record = state
        .submit(Channel::Production, identity, operation, id, move |ctx, _| op(ctx))
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

// ---------------------------------------------------------------------------
// Leaves and lots
// ---------------------------------------------------------------------------

/// POST /api/v1/production/cotton-bales
pub async fn create_cotton_bale(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateCottonBale>,
) -> AppResult<Created<CottonBale>> {
    let id = input.id.clone();
    create(&state, identity, "create_cotton_bale", id, move |ctx| {
        production::create_cotton_bale(ctx, input)
    })
    .await
}

/// POST /api/v1/production/buttons
pub async fn create_button(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateButton>,
) -> AppResult<Created<Button>> {
    let id = input.id.clone();
    create(&state, identity, "create_button", id, move |ctx| {
        production::create_button(ctx, input)
    })
    .await
}

/// POST /api/v1/production/lots
pub async fn create_lot(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateLot>,
) -> AppResult<Created<Lot>> {
    let id = input.id.clone();
    create(&state, identity, "create_lot", id, move |ctx| {
        production::create_lot(ctx, input)
    })
    .await
}

/// GET /api/v1/production/lots/count?kind=cotton_bale
pub async fn count_lots(
    State(state): State<AppState>,
    Query(params): Query<LotCountQuery>,
) -> AppResult<Json<DataResponse<CountResponse>>> {
    let kind = parse_kind(&params.kind)?;
    let count = state
        .production
        .query(|tx| audit::count_lots_of_kind(tx, kind))?;
    Ok(Json(DataResponse {
        data: CountResponse { count },
    }))
}

// ---------------------------------------------------------------------------
// Intermediate goods
// ---------------------------------------------------------------------------

/// POST /api/v1/production/cotton-yarns
pub async fn create_cotton_yarn(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateCottonYarn>,
) -> AppResult<Created<CottonYarn>> {
    let id = input.id.clone();
    create(&state, identity, "create_cotton_yarn", id, move |ctx| {
        production::create_cotton_yarn(ctx, input)
    })
    .await
}

/// POST /api/v1/production/unfinished-fabrics
pub async fn create_unfinished_fabric(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateFabric>,
) -> AppResult<Created<UnfinishedFabric>> {
    let id = input.id.clone();
    create(&state, identity, "create_unfinished_fabric", id, move |ctx| {
        production::create_unfinished_fabric(ctx, input)
    })
    .await
}

/// POST /api/v1/production/finished-fabrics
pub async fn create_finished_fabric(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateFabric>,
) -> AppResult<Created<FinishedFabric>> {
    let id = input.id.clone();
    create(&state, identity, "create_finished_fabric", id, move |ctx| {
        production::create_finished_fabric(ctx, input)
    })
    .await
}

/// POST /api/v1/production/cut-parts
pub async fn create_cut_part(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateCutPart>,
) -> AppResult<Created<CutPart>> {
    let id = input.id.clone();
    create(&state, identity, "create_cut_part", id, move |ctx| {
        production::create_cut_part(ctx, input)
    })
    .await
}

/// POST /api/v1/production/assembled-garments
pub async fn create_assembled_garment(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateAssembledGarment>,
) -> AppResult<Created<AssembledGarment>> {
    let id = input.id.clone();
    create(&state, identity, "create_assembled_garment", id, move |ctx| {
        production::create_assembled_garment(ctx, input)
    })
    .await
}

// ---------------------------------------------------------------------------
// Packaging and shipping
// ---------------------------------------------------------------------------

/// POST /api/v1/production/cartons
pub async fn create_carton(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateCarton>,
) -> AppResult<Created<Carton>> {
    let id = input.id.clone();
    create(&state, identity, "create_carton", id, move |ctx| {
        production::create_carton(ctx, input)
    })
    .await
}

/// POST /api/v1/production/containers
pub async fn create_container(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateContainer>,
) -> AppResult<Created<Container>> {
    let id = input.id.clone();
    create(&state, identity, "create_container", id, move |ctx| {
        production::create_container(ctx, input)
    })
    .await
}

/// POST /api/v1/production/bills-of-lading
pub async fn create_bill_of_lading(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Json(input): Json<CreateBillOfLading>,
) -> AppResult<Created<BillOfLading>> {
    let id = input.id.clone();
    create(&state, identity, "create_bill_of_lading", id, move |ctx| {
        production::create_bill_of_lading(ctx, input)
    })
    .await
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// PUT /api/v1/production/lots/{id}/owner
pub async fn transfer_lot(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<OwnerRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    transfer(&state, identity, AssetKind::Lot, id, body.owner).await
}

/// PUT /api/v1/production/cartons/{id}/owner
pub async fn transfer_carton(
    State(state): State<AppState>,
    identity: HeaderIdentity,
    Path(id): Path<String>,
    Json(body): Json<OwnerRequest>,
) -> AppResult<Json<DataResponse<Asset>>> {
    transfer(&state, identity, AssetKind::Carton, id, body.owner).await
}

async fn transfer(
    state: &AppState,
    identity: HeaderIdentity,
    kind: AssetKind,
    id: String,
    owner: OrgId,
) -> AppResult<Json<DataResponse<Asset>>> {
    require_prefix(&id, kind.prefix())?;
    let asset = state
        .submit(Channel::Production, identity, "transfer_ownership", id, move |ctx, id| {
            production::transfer_ownership(ctx, id, owner)
        })
        .await?;
    Ok(Json(DataResponse { data: asset }))
}
