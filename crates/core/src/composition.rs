//! Bill-of-materials rules: which kinds a composite may contain, through
//! which slot, and in which containment scope.
//!
//! Only the ledger-independent checks live here. Existence, containment, and
//! approval of constituents need the ledger and are run by the contracts.

use std::collections::HashSet;

use crate::asset_kind::AssetKind;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Containment scope
// ---------------------------------------------------------------------------

/// An asset appears in at most one composite per scope.
///
/// Lots are shipments and may hold assets that are later built into
/// something else, so they get a scope of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainmentScope {
    Shipment,
    Assembly,
}

impl ContainmentScope {
    pub const ALL: [ContainmentScope; 2] = [Self::Shipment, Self::Assembly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shipment => "shipment",
            Self::Assembly => "assembly",
        }
    }
}

impl AssetKind {
    /// Scope a composite of this kind claims its content in. `None` for
    /// leaf kinds.
    pub const fn containment_scope(self) -> Option<ContainmentScope> {
        match self {
            Self::Lot => Some(ContainmentScope::Shipment),
            Self::CottonYarn
            | Self::UnfinishedFabric
            | Self::FinishedFabric
            | Self::CutPart
            | Self::AssembledGarment
            | Self::Carton
            | Self::Container => Some(ContainmentScope::Assembly),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// Where the elements of a slot come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotSource {
    /// Elements are assets of this kind.
    Direct(AssetKind),
    /// Elements are lots wrapping assets of this kind.
    Lots(AssetKind),
}

/// One content list of a composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionSlot {
    pub name: &'static str,
    pub source: SlotSource,
    /// Constituents must be approved and unflagged when included.
    pub requires_approval: bool,
}

impl CompositionSlot {
    const fn direct(name: &'static str, kind: AssetKind) -> Self {
        Self {
            name,
            source: SlotSource::Direct(kind),
            requires_approval: false,
        }
    }

    const fn lots(kind: AssetKind) -> Self {
        Self {
            name: "Content",
            source: SlotSource::Lots(kind),
            requires_approval: false,
        }
    }

    /// The content slot of a lot of `kind`.
    pub const fn lot_content(kind: AssetKind) -> Self {
        Self {
            name: "Content",
            source: SlotSource::Direct(kind),
            requires_approval: true,
        }
    }

    /// Prefix every element ID must carry.
    pub const fn element_prefix(&self) -> &'static str {
        match self.source {
            SlotSource::Direct(kind) => kind.prefix(),
            SlotSource::Lots(_) => AssetKind::Lot.prefix(),
        }
    }
}

const YARN_SLOTS: [CompositionSlot; 1] = [CompositionSlot::lots(AssetKind::CottonBale)];
const UNFINISHED_FABRIC_SLOTS: [CompositionSlot; 1] =
    [CompositionSlot::lots(AssetKind::CottonYarn)];
const FINISHED_FABRIC_SLOTS: [CompositionSlot; 1] =
    [CompositionSlot::lots(AssetKind::UnfinishedFabric)];
const CUT_PART_SLOTS: [CompositionSlot; 1] = [CompositionSlot::lots(AssetKind::FinishedFabric)];
const GARMENT_SLOTS: [CompositionSlot; 2] = [
    CompositionSlot::direct("Buttons", AssetKind::Button),
    CompositionSlot::direct("CutParts", AssetKind::CutPart),
];
const CARTON_SLOTS: [CompositionSlot; 1] =
    [CompositionSlot::direct("Content", AssetKind::AssembledGarment)];
const CONTAINER_SLOTS: [CompositionSlot; 1] =
    [CompositionSlot::direct("Content", AssetKind::Carton)];

/// Static slot rules per composite kind. Lots are typed by their declared
/// content kind; see [`CompositionSlot::lot_content`].
pub fn slots_for(kind: AssetKind) -> &'static [CompositionSlot] {
    match kind {
        AssetKind::CottonYarn => &YARN_SLOTS,
        AssetKind::UnfinishedFabric => &UNFINISHED_FABRIC_SLOTS,
        AssetKind::FinishedFabric => &FINISHED_FABRIC_SLOTS,
        AssetKind::CutPart => &CUT_PART_SLOTS,
        AssetKind::AssembledGarment => &GARMENT_SLOTS,
        AssetKind::Carton => &CARTON_SLOTS,
        AssetKind::Container => &CONTAINER_SLOTS,
        _ => &[],
    }
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

pub fn check_non_empty(slot: &CompositionSlot, content: &[String]) -> Result<(), CoreError> {
    if content.is_empty() {
        Err(CoreError::EmptyComposition { slot: slot.name })
    } else {
        Ok(())
    }
}

pub fn check_no_duplicates(content: &[String]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(content.len());
    for id in content {
        if !seen.insert(id.as_str()) {
            return Err(CoreError::DuplicateInComposition { id: id.clone() });
        }
    }
    Ok(())
}

pub fn check_element_prefix(slot: &CompositionSlot, id: &str) -> Result<(), CoreError> {
    let expected = slot.element_prefix();
    if id.starts_with(expected) {
        Ok(())
    } else {
        Err(CoreError::CompositionTypeMismatch {
            id: id.to_string(),
            expected_prefix: expected.to_string(),
        })
    }
}

/// A lot placed in a lot-sourced slot must declare the slot's kind and hold
/// only assets of it.
pub fn check_lot_wraps(
    lot_id: &str,
    declared_prefix: &str,
    lot_content: &[String],
    expected: AssetKind,
) -> Result<(), CoreError> {
    let mismatch = || CoreError::CompositionTypeMismatch {
        id: lot_id.to_string(),
        expected_prefix: expected.prefix().to_string(),
    };
    if declared_prefix != expected.prefix() {
        return Err(mismatch());
    }
    if lot_content.iter().any(|id| !id.starts_with(expected.prefix())) {
        return Err(mismatch());
    }
    Ok(())
}
