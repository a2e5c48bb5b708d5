//! The closed set of asset kinds and the data each kind carries: its ID
//! prefix, the channel that hosts it, and whether it can be wrapped in a lot
//! or change hands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Prefixes
// ---------------------------------------------------------------------------

pub const PREFIX_ORDER: &str = "order_";
pub const PREFIX_PLAN: &str = "plan_";
pub const PREFIX_FACTORY: &str = "factory_";
pub const PREFIX_COTTON_BALE: &str = "cottonbale_";
pub const PREFIX_LOT: &str = "lot_";
pub const PREFIX_COTTON_YARN: &str = "cottonyarn_";
pub const PREFIX_UNFINISHED_FABRIC: &str = "unfinishedfabric_";
pub const PREFIX_FINISHED_FABRIC: &str = "finishedfabric_";
pub const PREFIX_CUT_PART: &str = "cutpart_";
pub const PREFIX_BUTTON: &str = "button_";
pub const PREFIX_ASSEMBLED_GARMENT: &str = "assembledgarment_";
pub const PREFIX_CARTON: &str = "carton_";
pub const PREFIX_CONTAINER: &str = "container_";
pub const PREFIX_BILL_OF_LADING: &str = "billoflading_";

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// The two ledgers assets live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Admin,
    Production,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssetKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
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
}

impl AssetKind {
    pub const ALL: [AssetKind; 14] = [
        Self::Order,
        Self::Plan,
        Self::Factory,
        Self::CottonBale,
        Self::Lot,
        Self::CottonYarn,
        Self::UnfinishedFabric,
        Self::FinishedFabric,
        Self::CutPart,
        Self::Button,
        Self::AssembledGarment,
        Self::Carton,
        Self::Container,
        Self::BillOfLading,
    ];

    /// Kinds that can be wrapped in a lot.
    pub const LOTABLE: [AssetKind; 7] = [
        Self::CottonBale,
        Self::CottonYarn,
        Self::UnfinishedFabric,
        Self::FinishedFabric,
        Self::CutPart,
        Self::Button,
        Self::AssembledGarment,
    ];

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Order => PREFIX_ORDER,
            Self::Plan => PREFIX_PLAN,
            Self::Factory => PREFIX_FACTORY,
            Self::CottonBale => PREFIX_COTTON_BALE,
            Self::Lot => PREFIX_LOT,
            Self::CottonYarn => PREFIX_COTTON_YARN,
            Self::UnfinishedFabric => PREFIX_UNFINISHED_FABRIC,
            Self::FinishedFabric => PREFIX_FINISHED_FABRIC,
            Self::CutPart => PREFIX_CUT_PART,
            Self::Button => PREFIX_BUTTON,
            Self::AssembledGarment => PREFIX_ASSEMBLED_GARMENT,
            Self::Carton => PREFIX_CARTON,
            Self::Container => PREFIX_CONTAINER,
            Self::BillOfLading => PREFIX_BILL_OF_LADING,
        }
    }

    /// Entity name used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Plan => "Plan",
            Self::Factory => "Factory",
            Self::CottonBale => "CottonBale",
            Self::Lot => "Lot",
            Self::CottonYarn => "CottonYarn",
            Self::UnfinishedFabric => "UnfinishedFabric",
            Self::FinishedFabric => "FinishedFabric",
            Self::CutPart => "CutPart",
            Self::Button => "Button",
            Self::AssembledGarment => "AssembledGarment",
            Self::Carton => "Carton",
            Self::Container => "Container",
            Self::BillOfLading => "BillOfLading",
        }
    }

    /// Snake-case name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Plan => "plan",
            Self::Factory => "factory",
            Self::CottonBale => "cotton_bale",
            Self::Lot => "lot",
            Self::CottonYarn => "cotton_yarn",
            Self::UnfinishedFabric => "unfinished_fabric",
            Self::FinishedFabric => "finished_fabric",
            Self::CutPart => "cut_part",
            Self::Button => "button",
            Self::AssembledGarment => "assembled_garment",
            Self::Carton => "carton",
            Self::Container => "container",
            Self::BillOfLading => "bill_of_lading",
        }
    }

    pub const fn channel(self) -> Channel {
        match self {
            Self::Order | Self::Plan | Self::Factory => Channel::Admin,
            _ => Channel::Production,
        }
    }

    pub const fn is_lotable(self) -> bool {
        matches!(
            self,
            Self::CottonBale
                | Self::CottonYarn
                | Self::UnfinishedFabric
                | Self::FinishedFabric
                | Self::CutPart
                | Self::Button
                | Self::AssembledGarment
        )
    }

    /// Kinds whose ownership is tracked directly on the record.
    pub const fn is_transferable(self) -> bool {
        matches!(self, Self::Lot | Self::Carton)
    }

    /// Exact lookup by prefix, as declared in a lot's `AssetIDPrefix`.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }

    /// The kind whose prefix the identifier starts with.
    pub fn of_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| id.starts_with(kind.prefix()))
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = CoreError;

    /// Accepts either the snake-case name (`cotton_bale`) or the ID prefix
    /// (`cottonbale_`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.prefix() == s)
            .ok_or_else(|| CoreError::UnknownAssetKind(s.to_string()))
    }
}
