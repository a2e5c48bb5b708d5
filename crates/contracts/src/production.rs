//! Production channel operations: creating each tier of the bill of
//! materials and moving lots and cartons between owners.

use threadline_core::asset_kind::AssetKind;
use threadline_core::authorization::{authorize, Operation};
use threadline_core::composition::{CompositionSlot, ContainmentScope};
use threadline_core::error::CoreError;
use threadline_core::ownership::{authorize_transfer, require_eligible_owner, OwnershipChange};
use threadline_core::specs::{require_chronological, validate_flag};
use threadline_core::types::OrgId;
use threadline_ledger::models::production::{
    AssembledGarment, BillOfLading, Button, Carton, Container, CottonBale, CottonYarn,
    CreateAssembledGarment, CreateBillOfLading, CreateButton, CreateCarton, CreateContainer,
    CreateCottonBale, CreateCottonYarn, CreateCutPart, CreateFabric, CreateLot, CutPart,
    FinishedFabric, Lot, UnfinishedFabric,
};
use threadline_ledger::models::{Asset, Record};

use crate::checks::{
    load, reconcile_weights, record_containment, require_new, save, validate_composite,
    validate_slot,
};
use crate::context::TxContext;

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

pub fn create_cotton_bale(
    ctx: &mut TxContext<'_>,
    input: CreateCottonBale,
) -> Result<CottonBale, CoreError> {
    ctx.authorize(Operation::CreateCottonBale)?;
    require_new(ctx, AssetKind::CottonBale, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_chronological(&[input.assembly_date, ctx.now])?;

    let bale = CottonBale::harvest(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &bale)?;
    Ok(bale)
}

pub fn create_button(ctx: &mut TxContext<'_>, input: CreateButton) -> Result<Button, CoreError> {
    ctx.authorize(Operation::CreateButton)?;
    require_new(ctx, AssetKind::Button, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_chronological(&[input.assembly_date, ctx.now])?;

    let button = Button::produce(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &button)?;
    Ok(button)
}

pub fn create_bill_of_lading(
    ctx: &mut TxContext<'_>,
    input: CreateBillOfLading,
) -> Result<BillOfLading, CoreError> {
    ctx.authorize(Operation::CreateBillOfLading)?;
    require_new(ctx, AssetKind::BillOfLading, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_chronological(&[input.issue_date, ctx.now])?;

    let bill = BillOfLading::issue(input, ctx.invoker.clone(), ctx.now);
    save(ctx, &bill)?;
    Ok(bill)
}

// ---------------------------------------------------------------------------
// Lots
// ---------------------------------------------------------------------------

/// Pack approved, unflagged assets of one lot-able kind into a new lot. Who
/// may pack depends on the declared kind. A requested owner must be eligible
/// to own that kind; without one the invoker owns the lot.
pub fn create_lot(ctx: &mut TxContext<'_>, input: CreateLot) -> Result<Lot, CoreError> {
    let kind = AssetKind::from_prefix(&input.asset_id_prefix)
        .filter(|kind| kind.is_lotable())
        .ok_or_else(|| CoreError::UnknownAssetKind(input.asset_id_prefix.clone()))?;
    authorize(&ctx.invoker, ctx.policy.lot_creation(kind))?;
    require_new(ctx, AssetKind::Lot, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    if let Some(owner) = &input.owner {
        require_eligible_owner(owner, ctx.policy.ownership(kind))?;
    }

    let slot = CompositionSlot::lot_content(kind);
    let constituents = validate_slot(
        ctx,
        &input.id,
        ContainmentScope::Shipment,
        &slot,
        &input.content,
    )?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let lot = Lot::pack(input, ctx.invoker.clone(), weights, ctx.now)?;
    save(ctx, &lot)?;
    record_containment(ctx, ContainmentScope::Shipment, &lot.id, &lot.content);
    Ok(lot)
}

// ---------------------------------------------------------------------------
// Intermediate goods
// ---------------------------------------------------------------------------

pub fn create_cotton_yarn(
    ctx: &mut TxContext<'_>,
    input: CreateCottonYarn,
) -> Result<CottonYarn, CoreError> {
    ctx.authorize(Operation::CreateCottonYarn)?;
    require_new(ctx, AssetKind::CottonYarn, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents =
        validate_composite(ctx, AssetKind::CottonYarn, &input.id, &[&input.content])?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let yarn = CottonYarn::spin(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &yarn)?;
    record_containment(ctx, ContainmentScope::Assembly, &yarn.id, &yarn.content);
    Ok(yarn)
}

pub fn create_unfinished_fabric(
    ctx: &mut TxContext<'_>,
    input: CreateFabric,
) -> Result<UnfinishedFabric, CoreError> {
    ctx.authorize(Operation::CreateUnfinishedFabric)?;
    require_new(ctx, AssetKind::UnfinishedFabric, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents =
        validate_composite(ctx, AssetKind::UnfinishedFabric, &input.id, &[&input.content])?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let fabric = UnfinishedFabric::weave(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &fabric)?;
    record_containment(ctx, ContainmentScope::Assembly, &fabric.id, &fabric.content);
    Ok(fabric)
}

pub fn create_finished_fabric(
    ctx: &mut TxContext<'_>,
    input: CreateFabric,
) -> Result<FinishedFabric, CoreError> {
    ctx.authorize(Operation::CreateFinishedFabric)?;
    require_new(ctx, AssetKind::FinishedFabric, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents =
        validate_composite(ctx, AssetKind::FinishedFabric, &input.id, &[&input.content])?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let fabric = FinishedFabric::finish(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &fabric)?;
    record_containment(ctx, ContainmentScope::Assembly, &fabric.id, &fabric.content);
    Ok(fabric)
}

pub fn create_cut_part(
    ctx: &mut TxContext<'_>,
    input: CreateCutPart,
) -> Result<CutPart, CoreError> {
    ctx.authorize(Operation::CreateCutPart)?;
    require_new(ctx, AssetKind::CutPart, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents =
        validate_composite(ctx, AssetKind::CutPart, &input.id, &[&input.content])?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let part = CutPart::cut(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &part)?;
    record_containment(ctx, ContainmentScope::Assembly, &part.id, &part.content);
    Ok(part)
}

/// Content weight is the buttons' weight plus the cut parts' weight.
pub fn create_assembled_garment(
    ctx: &mut TxContext<'_>,
    input: CreateAssembledGarment,
) -> Result<AssembledGarment, CoreError> {
    ctx.authorize(Operation::CreateAssembledGarment)?;
    require_new(ctx, AssetKind::AssembledGarment, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents = validate_composite(
        ctx,
        AssetKind::AssembledGarment,
        &input.id,
        &[&input.buttons, &input.cut_parts],
    )?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let garment = AssembledGarment::sew(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &garment)?;
    let held: Vec<String> = garment
        .buttons
        .iter()
        .chain(&garment.cut_parts)
        .cloned()
        .collect();
    record_containment(ctx, ContainmentScope::Assembly, &garment.id, &held);
    Ok(garment)
}

// ---------------------------------------------------------------------------
// Packaging
// ---------------------------------------------------------------------------

/// `AllAssetsApproved` is true only if every packed garment is approved.
pub fn create_carton(ctx: &mut TxContext<'_>, input: CreateCarton) -> Result<Carton, CoreError> {
    ctx.authorize(Operation::CreateCarton)?;
    require_new(ctx, AssetKind::Carton, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    require_eligible_owner(&input.owner, ctx.policy.ownership(AssetKind::Carton))?;
    let constituents = validate_composite(ctx, AssetKind::Carton, &input.id, &[&input.content])?;
    let all_assets_approved = constituents
        .iter()
        .all(|garment| garment.approval() == Some(true));
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.assembly_date, ctx.now])?;

    let carton = Carton::pack(
        input,
        ctx.invoker.clone(),
        all_assets_approved,
        weights,
        ctx.now,
    )?;
    save(ctx, &carton)?;
    record_containment(ctx, ContainmentScope::Assembly, &carton.id, &carton.content);
    Ok(carton)
}

pub fn create_container(
    ctx: &mut TxContext<'_>,
    input: CreateContainer,
) -> Result<Container, CoreError> {
    ctx.authorize(Operation::CreateContainer)?;
    require_new(ctx, AssetKind::Container, &input.id)?;
    validate_flag(input.is_flagged, &input.flag_reason)?;
    let constituents =
        validate_composite(ctx, AssetKind::Container, &input.id, &[&input.content])?;
    let weights = reconcile_weights(&constituents, input.total_weight);
    require_chronological(&[input.loaded_at, ctx.now])?;

    let container = Container::load(input, ctx.invoker.clone(), weights, ctx.now);
    save(ctx, &container)?;
    record_containment(
        ctx,
        ContainmentScope::Assembly,
        &container.id,
        &container.content,
    );
    Ok(container)
}

// ---------------------------------------------------------------------------
// Ownership
// ---------------------------------------------------------------------------

/// Hand a lot or carton to `new_owner`. Both the invoker and the new owner
/// must belong to the ownership allow-set of the underlying kind: the lot's
/// declared kind, or `carton`.
pub fn transfer_ownership(
    ctx: &mut TxContext<'_>,
    asset_id: &str,
    new_owner: OrgId,
) -> Result<Asset, CoreError> {
    match AssetKind::of_id(asset_id) {
        Some(AssetKind::Lot) => {
            let mut lot: Lot = load(ctx, asset_id)?;
            let kind = lot
                .wrapped_kind()
                .ok_or_else(|| CoreError::UnknownAssetKind(lot.asset_id_prefix.clone()))?;
            authorize_transfer(&ctx.invoker, &new_owner, ctx.policy.ownership(kind))?;
            let change = OwnershipChange::transfer(&lot.owner, new_owner);
            lot.owner = change.owner;
            lot.previous_owner = change.previous_owner;
            lot.touch(ctx.now)?;
            save(ctx, &lot)?;
            Ok(Asset::Lot(lot))
        }
        Some(AssetKind::Carton) => {
            let mut carton: Carton = load(ctx, asset_id)?;
            authorize_transfer(
                &ctx.invoker,
                &new_owner,
                ctx.policy.ownership(AssetKind::Carton),
            )?;
            let change = OwnershipChange::transfer(&carton.owner, new_owner);
            carton.owner = change.owner;
            carton.previous_owner = change.previous_owner;
            carton.touch(ctx.now)?;
            save(ctx, &carton)?;
            Ok(Asset::Carton(carton))
        }
        _ => Err(CoreError::InvalidIdentifier {
            id: asset_id.to_string(),
            expected_prefix: format!(
                "{} or {}",
                AssetKind::Lot.prefix(),
                AssetKind::Carton.prefix()
            ),
        }),
    }
}
