//! Ledger-aware checks composed from the pure validators in `core`.

use threadline_core::asset_kind::AssetKind;
use threadline_core::composition::{
    check_element_prefix, check_lot_wraps, check_no_duplicates, check_non_empty, slots_for,
    CompositionSlot, ContainmentScope, SlotSource,
};
use threadline_core::error::CoreError;
use threadline_core::specs::require_prefix;
use threadline_core::weight::WeightReconciliation;
use threadline_ledger::containment::ContainmentIndex;
use threadline_ledger::models::{Asset, Record};
use threadline_ledger::repositories::AssetRepo;

use crate::context::TxContext;

// ---------------------------------------------------------------------------
// Existence
// ---------------------------------------------------------------------------

pub fn require_absent(ctx: &TxContext<'_>, id: &str) -> Result<(), CoreError> {
    if AssetRepo::exists(&ctx.tx, id)? {
        Err(CoreError::AlreadyExists { id: id.to_string() })
    } else {
        Ok(())
    }
}

/// A new asset of `kind` may be created under `id` on this channel.
pub fn require_new(ctx: &TxContext<'_>, kind: AssetKind, id: &str) -> Result<(), CoreError> {
    if kind.channel() != ctx.channel {
        return Err(CoreError::UnknownAssetKind(format!(
            "{kind} is not kept on the {} channel",
            ctx.channel
        )));
    }
    require_prefix(id, kind.prefix())?;
    require_absent(ctx, id)
}

/// Load an existing record of a known type.
pub fn load<R: Record>(ctx: &TxContext<'_>, id: &str) -> Result<R, CoreError> {
    require_prefix(id, R::KIND.prefix())?;
    AssetRepo::get_as(&ctx.tx, id)
}

pub fn save<R: Record>(ctx: &mut TxContext<'_>, record: &R) -> Result<(), CoreError> {
    AssetRepo::save(&mut ctx.tx, record)
}

// ---------------------------------------------------------------------------
// Composition
// ---------------------------------------------------------------------------

/// Validate one content slot of the composite `composite_id`, returning the
/// loaded constituents in list order.
///
/// Fails fast: emptiness, in-list duplicates, per-element type and
/// existence, containment elsewhere in `scope`, then approval when the slot
/// requires it.
pub fn validate_slot(
    ctx: &TxContext<'_>,
    composite_id: &str,
    scope: ContainmentScope,
    slot: &CompositionSlot,
    content: &[String],
) -> Result<Vec<Asset>, CoreError> {
    check_non_empty(slot, content)?;
    check_no_duplicates(content)?;

    let mut constituents = Vec::with_capacity(content.len());
    for id in content {
        check_element_prefix(slot, id)?;
        let asset = AssetRepo::get(&ctx.tx, id)?;
        if let SlotSource::Lots(kind) = slot.source {
            match &asset {
                Asset::Lot(lot) => check_lot_wraps(id, &lot.asset_id_prefix, &lot.content, kind)?,
                _ => {
                    return Err(CoreError::CompositionTypeMismatch {
                        id: id.clone(),
                        expected_prefix: kind.prefix().to_string(),
                    })
                }
            }
        }
        constituents.push(asset);
    }

    if let Some(conflict) =
        ContainmentIndex::find_conflict(&ctx.tx, ctx.containment, scope, composite_id, content)?
    {
        return Err(conflict.into());
    }

    if slot.requires_approval {
        for asset in &constituents {
            if asset.approval() != Some(true) {
                return Err(CoreError::ConstituentNotApproved {
                    id: asset.id().to_string(),
                });
            }
            if asset.is_flagged() {
                return Err(CoreError::ConstituentFlagged {
                    id: asset.id().to_string(),
                });
            }
        }
    }

    Ok(constituents)
}

/// Validate every slot of a composite kind. `contents` follows the order of
/// [`slots_for`].
pub fn validate_composite(
    ctx: &TxContext<'_>,
    kind: AssetKind,
    composite_id: &str,
    contents: &[&[String]],
) -> Result<Vec<Asset>, CoreError> {
    let scope = kind
        .containment_scope()
        .ok_or_else(|| CoreError::UnknownAssetKind(format!("{kind} holds no content")))?;
    let slots = slots_for(kind);
    debug_assert_eq!(slots.len(), contents.len());

    let mut constituents = Vec::new();
    for (slot, content) in slots.iter().zip(contents) {
        constituents.extend(validate_slot(ctx, composite_id, scope, slot, content)?);
    }
    Ok(constituents)
}

/// Claim `ids` for `composite_id` in the containment index.
pub fn record_containment(
    ctx: &mut TxContext<'_>,
    scope: ContainmentScope,
    composite_id: &str,
    ids: &[String],
) {
    let mode = ctx.containment;
    ContainmentIndex::record(&mut ctx.tx, mode, scope, composite_id, ids);
}

/// Content weight from the constituents' declared weights, compared with
/// the composite's declared total.
pub fn reconcile_weights(constituents: &[Asset], total_weight: f32) -> WeightReconciliation {
    WeightReconciliation::compute(
        constituents
            .iter()
            .map(|asset| asset.total_weight().unwrap_or(0.0)),
        total_weight,
    )
}
