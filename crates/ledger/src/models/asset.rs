//! Any record on either channel, dispatched by ID prefix.

use serde::Serialize;
use threadline_core::asset_kind::AssetKind;
use threadline_core::composition::ContainmentScope;
use threadline_core::error::CoreError;
use threadline_core::types::Timestamp;

use super::admin::{Factory, Order, Plan};
use super::production::{
    AssembledGarment, BillOfLading, Button, Carton, Container, CottonBale, CottonYarn, CutPart,
    FinishedFabric, Lot, UnfinishedFabric,
};
use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Asset {
    Order(Order),
    Plan(Plan),
    Factory(Factory),
    CottonBale(CottonBale),
    Lot(Lot),
    CottonYarn(CottonYarn),
    UnfinishedFabric(UnfinishedFabric),
    FinishedFabric(FinishedFabric),
    CutPart(CutPart),
    Button(Button),
    AssembledGarment(AssembledGarment),
    Carton(Carton),
    Container(Container),
    BillOfLading(BillOfLading),
}

/// Runs `$body` with `$r` bound to the inner record, whatever its type.
macro_rules! dispatch {
    ($asset:expr, $r:ident => $body:expr) => {
        match $asset {
            Asset::Order($r) => $body,
            Asset::Plan($r) => $body,
            Asset::Factory($r) => $body,
            Asset::CottonBale($r) => $body,
            Asset::Lot($r) => $body,
            Asset::CottonYarn($r) => $body,
            Asset::UnfinishedFabric($r) => $body,
            Asset::FinishedFabric($r) => $body,
            Asset::CutPart($r) => $body,
            Asset::Button($r) => $body,
            Asset::AssembledGarment($r) => $body,
            Asset::Carton($r) => $body,
            Asset::Container($r) => $body,
            Asset::BillOfLading($r) => $body,
        }
    };
}

impl Asset {
    /// Decode stored bytes, choosing the record type from the key's prefix.
    pub fn decode(id: &str, bytes: &[u8]) -> Result<Self, CoreError> {
        let kind =
            AssetKind::of_id(id).ok_or_else(|| CoreError::UnknownAssetKind(id.to_string()))?;
        let asset = match kind {
            AssetKind::Order => Self::Order(serde_json::from_slice(bytes)?),
            AssetKind::Plan => Self::Plan(serde_json::from_slice(bytes)?),
            AssetKind::Factory => Self::Factory(serde_json::from_slice(bytes)?),
            AssetKind::CottonBale => Self::CottonBale(serde_json::from_slice(bytes)?),
            AssetKind::Lot => Self::Lot(serde_json::from_slice(bytes)?),
            AssetKind::CottonYarn => Self::CottonYarn(serde_json::from_slice(bytes)?),
            AssetKind::UnfinishedFabric => Self::UnfinishedFabric(serde_json::from_slice(bytes)?),
            AssetKind::FinishedFabric => Self::FinishedFabric(serde_json::from_slice(bytes)?),
            AssetKind::CutPart => Self::CutPart(serde_json::from_slice(bytes)?),
            AssetKind::Button => Self::Button(serde_json::from_slice(bytes)?),
            AssetKind::AssembledGarment => Self::AssembledGarment(serde_json::from_slice(bytes)?),
            AssetKind::Carton => Self::Carton(serde_json::from_slice(bytes)?),
            AssetKind::Container => Self::Container(serde_json::from_slice(bytes)?),
            AssetKind::BillOfLading => Self::BillOfLading(serde_json::from_slice(bytes)?),
        };
        Ok(asset)
    }

    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        Ok(dispatch!(self, r => serde_json::to_vec(r))?)
    }

    pub fn kind(&self) -> AssetKind {
        dispatch!(self, r => kind_of(r))
    }

    pub fn id(&self) -> &str {
        dispatch!(self, r => r.id())
    }

    pub fn is_flagged(&self) -> bool {
        dispatch!(self, r => r.is_flagged())
    }

    pub fn updated_at(&self) -> Timestamp {
        dispatch!(self, r => r.updated_at())
    }

    pub fn set_flag(&mut self, is_flagged: bool, flag_reason: String) {
        dispatch!(self, r => r.set_flag(is_flagged, flag_reason))
    }

    pub fn set_notes(&mut self, notes: String) {
        dispatch!(self, r => r.set_notes(notes))
    }

    pub fn touch(&mut self, now: Timestamp) -> Result<(), CoreError> {
        dispatch!(self, r => r.touch(now))
    }

    /// Declared weight, for assets that can be counted into a composite.
    pub fn total_weight(&self) -> Option<f32> {
        match self {
            Self::CottonBale(r) => Some(r.total_weight),
            Self::Lot(r) => Some(r.total_weight),
            Self::CottonYarn(r) => Some(r.total_weight),
            Self::UnfinishedFabric(r) => Some(r.total_weight),
            Self::FinishedFabric(r) => Some(r.total_weight),
            Self::CutPart(r) => Some(r.total_weight),
            Self::Button(r) => Some(r.total_weight),
            Self::AssembledGarment(r) => Some(r.total_weight),
            Self::Carton(r) => Some(r.total_weight),
            Self::Container(r) => Some(r.total_weight),
            Self::Order(_) | Self::Plan(_) | Self::Factory(_) | Self::BillOfLading(_) => None,
        }
    }

    /// `Approval`, or `AllAssetsApproved` for lots and cartons.
    pub fn approval(&self) -> Option<bool> {
        match self {
            Self::CottonBale(r) => Some(r.approval),
            Self::CottonYarn(r) => Some(r.approval),
            Self::UnfinishedFabric(r) => Some(r.approval),
            Self::FinishedFabric(r) => Some(r.approval),
            Self::CutPart(r) => Some(r.approval),
            Self::Button(r) => Some(r.approval),
            Self::AssembledGarment(r) => Some(r.approval),
            Self::Lot(r) => Some(r.all_assets_approved),
            Self::Carton(r) => Some(r.all_assets_approved),
            _ => None,
        }
    }

    /// IDs this composite holds, with the scope it holds them in.
    pub fn constituents(&self) -> Option<(ContainmentScope, Vec<&str>)> {
        let ids: Vec<&str> = match self {
            Self::Lot(r) => r.content.iter().map(String::as_str).collect(),
            Self::CottonYarn(r) => r.content.iter().map(String::as_str).collect(),
            Self::UnfinishedFabric(r) => r.content.iter().map(String::as_str).collect(),
            Self::FinishedFabric(r) => r.content.iter().map(String::as_str).collect(),
            Self::CutPart(r) => r.content.iter().map(String::as_str).collect(),
            Self::AssembledGarment(r) => r
                .buttons
                .iter()
                .chain(&r.cut_parts)
                .map(String::as_str)
                .collect(),
            Self::Carton(r) => r.content.iter().map(String::as_str).collect(),
            Self::Container(r) => r.content.iter().map(String::as_str).collect(),
            _ => return None,
        };
        self.kind().containment_scope().map(|scope| (scope, ids))
    }
}

fn kind_of<R: Record>(_: &R) -> AssetKind {
    R::KIND
}

macro_rules! impl_from_record {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Asset {
                fn from(record: $variant) -> Self {
                    Self::$variant(record)
                }
            }
        )*
    };
}

impl_from_record!(
    Order,
    Plan,
    Factory,
    CottonBale,
    Lot,
    CottonYarn,
    UnfinishedFabric,
    FinishedFabric,
    CutPart,
    Button,
    AssembledGarment,
    Carton,
    Container,
    BillOfLading,
);
