//! Records of the production channel, from raw cotton to shipping papers.

use serde::{Deserialize, Serialize};
use threadline_core::asset_kind::AssetKind;
use threadline_core::error::CoreError;
use threadline_core::types::{OrgId, Timestamp};
use threadline_core::weight::WeightReconciliation;

// ---------------------------------------------------------------------------
// Leaves
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CottonBale {
    pub approval: bool,
    pub assembly_date: Timestamp,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub quality_grade: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
}

impl_record!(CottonBale, AssetKind::CottonBale);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCottonBale {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub quality_grade: String,
    pub total_weight: f32,
}

impl CottonBale {
    pub fn harvest(input: CreateCottonBale, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            quality_grade: input.quality_grade,
            total_weight: input.total_weight,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Button {
    pub approval: bool,
    pub assembly_date: Timestamp,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
}

impl_record!(Button, AssetKind::Button);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateButton {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
}

impl Button {
    pub fn produce(input: CreateButton, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            total_weight: input.total_weight,
            updated_at: now,
        }
    }
}

/// Shipping document issued for a loaded container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BillOfLading {
    pub consignee: String,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub delivery_place: String,
    pub discharge_port: String,
    #[serde(rename = "DocumentID")]
    pub document_id: String,
    pub flag_reason: String,
    pub freight_terms: String,
    pub gross_weight: f32,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub issue_date: Timestamp,
    pub loading_port: String,
    pub notes: String,
    pub receipt_place: String,
    pub seal_number: u32,
    pub shipper: String,
    pub updated_at: Timestamp,
    #[serde(rename = "URL")]
    pub url: String,
    pub vessel: String,
}

impl_record!(BillOfLading, AssetKind::BillOfLading);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBillOfLading {
    pub id: String,
    pub consignee: String,
    pub delivery_place: String,
    pub discharge_port: String,
    pub document_id: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    pub freight_terms: String,
    pub gross_weight: f32,
    pub issue_date: Timestamp,
    pub loading_port: String,
    #[serde(default)]
    pub notes: String,
    pub receipt_place: String,
    pub seal_number: u32,
    pub shipper: String,
    #[serde(default)]
    pub url: String,
    pub vessel: String,
}

impl BillOfLading {
    pub fn issue(input: CreateBillOfLading, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            consignee: input.consignee,
            creator_id,
            delivery_place: input.delivery_place,
            discharge_port: input.discharge_port,
            document_id: input.document_id,
            flag_reason: input.flag_reason,
            freight_terms: input.freight_terms,
            gross_weight: input.gross_weight,
            id: input.id,
            is_flagged: input.is_flagged,
            issue_date: input.issue_date,
            loading_port: input.loading_port,
            notes: input.notes,
            receipt_place: input.receipt_place,
            seal_number: input.seal_number,
            shipper: input.shipper,
            updated_at: now,
            url: input.url,
            vessel: input.vessel,
        }
    }
}

// ---------------------------------------------------------------------------
// Lot
// ---------------------------------------------------------------------------

/// A shipment of assets of one lot-able kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lot {
    pub all_assets_approved: bool,
    pub assembly_date: Timestamp,
    #[serde(rename = "AssetIDPrefix")]
    pub asset_id_prefix: String,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub destination: String,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub owner: OrgId,
    pub previous_owner: Option<OrgId>,
    pub quantity: u32,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
}

impl_record!(Lot, AssetKind::Lot);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLot {
    pub id: String,
    pub assembly_date: Timestamp,
    /// Prefix of the wrapped kind, e.g. `cottonbale_`.
    pub asset_id_prefix: String,
    pub content: Vec<String>,
    pub destination: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    /// First owner. The creator when absent.
    #[serde(default)]
    pub owner: Option<OrgId>,
    pub total_weight: f32,
}

/// Number of constituents, as stored in `Quantity`.
pub fn content_quantity(len: usize) -> Result<u32, CoreError> {
    u32::try_from(len).map_err(|_| {
        CoreError::InvalidInput(format!("{len} constituents do not fit a u32 quantity"))
    })
}

impl Lot {
    /// New lot owned by the requested owner, or by its creator. Constituents
    /// were approved when packed.
    pub fn pack(
        input: CreateLot,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            all_assets_approved: true,
            assembly_date: input.assembly_date,
            asset_id_prefix: input.asset_id_prefix,
            quantity: content_quantity(input.content.len())?,
            content: input.content,
            content_weight: weights.content_weight,
            owner: input.owner.unwrap_or_else(|| creator_id.clone()),
            creator_id,
            destination: input.destination,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            previous_owner: None,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
        })
    }

    /// Kind of the wrapped assets.
    pub fn wrapped_kind(&self) -> Option<AssetKind> {
        AssetKind::from_prefix(&self.asset_id_prefix).filter(|kind| kind.is_lotable())
    }
}

// ---------------------------------------------------------------------------
// Intermediate goods
// ---------------------------------------------------------------------------

/// Yarn spun from lots of cotton bales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CottonYarn {
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
    pub yarn_count: u32,
}

impl_record!(CottonYarn, AssetKind::CottonYarn);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCottonYarn {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub yarn_count: u32,
}

impl CottonYarn {
    pub fn spin(
        input: CreateCottonYarn,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
            yarn_count: input.yarn_count,
        }
    }
}

/// Greige fabric woven from lots of yarn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UnfinishedFabric {
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub length: f32,
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
    pub width: f32,
}

impl_record!(UnfinishedFabric, AssetKind::UnfinishedFabric);

/// DTO shared by unfinished and finished fabric.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFabric {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    pub length: f32,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub width: f32,
}

impl UnfinishedFabric {
    pub fn weave(
        input: CreateFabric,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            length: input.length,
            notes: input.notes,
            origin: input.origin,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
            width: input.width,
        }
    }
}

/// Dyed and finished fabric made from lots of unfinished fabric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinishedFabric {
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub length: f32,
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
    pub width: f32,
}

impl_record!(FinishedFabric, AssetKind::FinishedFabric);

impl FinishedFabric {
    pub fn finish(
        input: CreateFabric,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            length: input.length,
            notes: input.notes,
            origin: input.origin,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
            width: input.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CutPart {
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub pattern_piece: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
}

impl_record!(CutPart, AssetKind::CutPart);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCutPart {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub pattern_piece: String,
    pub total_weight: f32,
}

impl CutPart {
    pub fn cut(
        input: CreateCutPart,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            pattern_piece: input.pattern_piece,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssembledGarment {
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub buttons: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub cut_parts: Vec<String>,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
}

impl_record!(AssembledGarment, AssetKind::AssembledGarment);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssembledGarment {
    pub id: String,
    pub approval: bool,
    pub assembly_date: Timestamp,
    pub buttons: Vec<String>,
    pub cut_parts: Vec<String>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub total_weight: f32,
}

impl AssembledGarment {
    pub fn sew(
        input: CreateAssembledGarment,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            approval: input.approval,
            assembly_date: input.assembly_date,
            buttons: input.buttons,
            content_weight: weights.content_weight,
            creator_id,
            cut_parts: input.cut_parts,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
        }
    }
}

// ---------------------------------------------------------------------------
// Packaging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Carton {
    pub all_assets_approved: bool,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    #[serde(rename = "CustomerID")]
    pub customer_id: String,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub notes: String,
    pub origin: String,
    pub owner: OrgId,
    pub previous_owner: Option<OrgId>,
    pub quantity: u32,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub weight_difference: f32,
}

impl_record!(Carton, AssetKind::Carton);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCarton {
    pub id: String,
    pub assembly_date: Timestamp,
    pub content: Vec<String>,
    pub customer_id: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub origin: String,
    pub owner: OrgId,
    pub total_weight: f32,
}

impl Carton {
    pub fn pack(
        input: CreateCarton,
        creator_id: OrgId,
        all_assets_approved: bool,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            all_assets_approved,
            assembly_date: input.assembly_date,
            quantity: content_quantity(input.content.len())?,
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            customer_id: input.customer_id,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            notes: input.notes,
            origin: input.origin,
            owner: input.owner,
            previous_owner: None,
            total_weight: input.total_weight,
            updated_at: now,
            weight_difference: weights.weight_difference,
        })
    }
}

/// A shipping container loaded with cartons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    pub content: Vec<String>,
    pub content_weight: f32,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub destination_port: String,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_flagged: bool,
    pub loaded_at: Timestamp,
    pub notes: String,
    pub origin_port: String,
    pub total_weight: f32,
    pub updated_at: Timestamp,
    pub vessel: String,
    pub weight_difference: f32,
}

impl_record!(Container, AssetKind::Container);

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContainer {
    pub id: String,
    pub content: Vec<String>,
    pub destination_port: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    pub loaded_at: Timestamp,
    #[serde(default)]
    pub notes: String,
    pub origin_port: String,
    pub total_weight: f32,
    pub vessel: String,
}

impl Container {
    pub fn load(
        input: CreateContainer,
        creator_id: OrgId,
        weights: WeightReconciliation,
        now: Timestamp,
    ) -> Self {
        Self {
            content: input.content,
            content_weight: weights.content_weight,
            creator_id,
            destination_port: input.destination_port,
            flag_reason: input.flag_reason,
            id: input.id,
            is_flagged: input.is_flagged,
            loaded_at: input.loaded_at,
            notes: input.notes,
            origin_port: input.origin_port,
            total_weight: input.total_weight,
            updated_at: now,
            vessel: input.vessel,
            weight_difference: weights.weight_difference,
        }
    }
}
