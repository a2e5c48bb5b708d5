//! Operations shared by both channels: flagging, notes, and read-only
//! queries.

use threadline_core::asset_kind::AssetKind;
use threadline_core::authorization::Operation;
use threadline_core::error::CoreError;
use threadline_core::specs::validate_flag;
use threadline_ledger::models::Asset;
use threadline_ledger::repositories::AssetRepo;
use threadline_ledger::Transaction;

use crate::context::TxContext;

// ---- Mutations ----

/// Flag or clear any asset. A flag needs a real reason; clearing needs none.
pub fn set_flag(
    ctx: &mut TxContext<'_>,
    asset_id: &str,
    is_flagged: bool,
    flag_reason: String,
) -> Result<Asset, CoreError> {
    ctx.authorize(Operation::SetFlag)?;
    validate_flag(is_flagged, &flag_reason)?;
    let mut asset = AssetRepo::get(&ctx.tx, asset_id)?;
    asset.set_flag(is_flagged, flag_reason);
    asset.touch(ctx.now)?;
    AssetRepo::save_asset(&mut ctx.tx, &asset)?;
    Ok(asset)
}

pub fn set_notes(
    ctx: &mut TxContext<'_>,
    asset_id: &str,
    notes: String,
) -> Result<Asset, CoreError> {
    ctx.authorize(Operation::SetNotes)?;
    let mut asset = AssetRepo::get(&ctx.tx, asset_id)?;
    asset.set_notes(notes);
    asset.touch(ctx.now)?;
    AssetRepo::save_asset(&mut ctx.tx, &asset)?;
    Ok(asset)
}

// ---- Queries ----

pub fn get_asset(tx: &Transaction<'_>, asset_id: &str) -> Result<Asset, CoreError> {
    AssetRepo::get(tx, asset_id)
}

pub fn get_all_assets(tx: &Transaction<'_>) -> Result<Vec<Asset>, CoreError> {
    AssetRepo::list(tx)
}

pub fn get_all_assets_count(tx: &Transaction<'_>) -> Result<usize, CoreError> {
    AssetRepo::count(tx)
}

pub fn get_all_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<Vec<Asset>, CoreError> {
    AssetRepo::list_of_kind(tx, kind)
}

pub fn count_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<usize, CoreError> {
    AssetRepo::count_of_kind(tx, kind)
}

pub fn asset_exists(tx: &Transaction<'_>, asset_id: &str) -> Result<bool, CoreError> {
    AssetRepo::exists(tx, asset_id)
}

/// Lots whose declared content kind is `kind`. Only lot-able kinds are
/// accepted.
pub fn count_lots_of_kind(tx: &Transaction<'_>, kind: AssetKind) -> Result<usize, CoreError> {
    if !kind.is_lotable() {
        return Err(CoreError::UnknownAssetKind(format!(
            "{kind} cannot be packed into lots"
        )));
    }
    AssetRepo::count_lots_of_kind(tx, kind)
}
