//! Per-operation allow-sets and the access policy that holds them.
//!
//! The policy is built once (the default deployment matrix, or parsed from
//! JSON), validated for completeness, and then only read. Every mutating
//! operation checks the invoker against exactly one allow-set.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::asset_kind::AssetKind;
use crate::error::CoreError;
use crate::types::OrgId;

// ---------------------------------------------------------------------------
// Default organizations
// ---------------------------------------------------------------------------

pub const ORG_RETAILER: &str = "Org1MSP";
pub const ORG_SUPPLIER: &str = "Org2MSP";
pub const ORG_AUDITOR: &str = "Org3MSP";
pub const ORG_SPINNER: &str = "Org4MSP";
pub const ORG_FABRIC_MILL: &str = "Org5MSP";
pub const ORG_GARMENT_FACTORY: &str = "Org6MSP";

// ---------------------------------------------------------------------------
// AllowSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowSet {
    Anyone,
    Orgs(BTreeSet<OrgId>),
}

/// Denies everyone; stands in for a missing policy entry.
static NOBODY: AllowSet = AllowSet::Orgs(BTreeSet::new());

impl AllowSet {
    pub fn only<I, S>(orgs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OrgId>,
    {
        Self::Orgs(orgs.into_iter().map(Into::into).collect())
    }

    pub fn permits(&self, org: &OrgId) -> bool {
        match self {
            Self::Anyone => true,
            Self::Orgs(orgs) => orgs.contains(org),
        }
    }
}

impl fmt::Display for AllowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anyone => f.write_str("anyone"),
            Self::Orgs(orgs) => {
                let names: Vec<&str> = orgs.iter().map(OrgId::as_str).collect();
                write!(f, "{{{}}}", names.join(", "))
            }
        }
    }
}

/// Rejects the invoker unless the allow-set contains it.
pub fn authorize(invoker: &OrgId, allowed: &AllowSet) -> Result<(), CoreError> {
    if allowed.permits(invoker) {
        Ok(())
    } else {
        Err(CoreError::Unauthorized {
            invoker: invoker.clone(),
            allowed: allowed.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Operations gated by a static allow-set.
///
/// Order acceptance is gated by the order's receiver, lot creation and
/// ownership transfer by the underlying asset kind; those are looked up
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateOrder,
    SetOrderStatus,
    CreatePlan,
    SetPlanApproval,
    SetPlanStatus,
    CreateFactory,
    SetFactoryApproval,
    SetFactoryStatus,
    SetFlag,
    SetNotes,
    CreateCottonBale,
    CreateCottonYarn,
    CreateUnfinishedFabric,
    CreateFinishedFabric,
    CreateCutPart,
    CreateButton,
    CreateAssembledGarment,
    CreateCarton,
    CreateContainer,
    CreateBillOfLading,
}

impl Operation {
    pub const ALL: [Operation; 20] = [
        Self::CreateOrder,
        Self::SetOrderStatus,
        Self::CreatePlan,
        Self::SetPlanApproval,
        Self::SetPlanStatus,
        Self::CreateFactory,
        Self::SetFactoryApproval,
        Self::SetFactoryStatus,
        Self::SetFlag,
        Self::SetNotes,
        Self::CreateCottonBale,
        Self::CreateCottonYarn,
        Self::CreateUnfinishedFabric,
        Self::CreateFinishedFabric,
        Self::CreateCutPart,
        Self::CreateButton,
        Self::CreateAssembledGarment,
        Self::CreateCarton,
        Self::CreateContainer,
        Self::CreateBillOfLading,
    ];
}

/// Which approval flag an invoker sets on plans and factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproverRole {
    Retailer,
    Auditor,
}

// ---------------------------------------------------------------------------
// AccessPolicy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPolicy {
    pub retailer: OrgId,
    pub auditor: OrgId,
    pub operations: BTreeMap<Operation, AllowSet>,
    /// Keyed by the kind a lot wraps.
    pub lot_creation: BTreeMap<AssetKind, AllowSet>,
    /// Keyed by the kind a lot wraps, plus `carton`.
    pub ownership: BTreeMap<AssetKind, AllowSet>,
}

impl AccessPolicy {
    /// Parse and validate a policy document.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let policy: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Every operation and every lot-able kind must have an entry, and only
    /// lot-able kinds (plus cartons for ownership) may appear in the
    /// per-kind tables.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(op) = Operation::ALL
            .iter()
            .find(|op| !self.operations.contains_key(op))
        {
            return Err(CoreError::InvalidPolicy(format!(
                "missing allow-set for operation {op:?}"
            )));
        }

        for kind in AssetKind::LOTABLE {
            if !self.lot_creation.contains_key(&kind) {
                return Err(CoreError::InvalidPolicy(format!(
                    "missing lot creation allow-set for {kind}"
                )));
            }
            if !self.ownership.contains_key(&kind) {
                return Err(CoreError::InvalidPolicy(format!(
                    "missing ownership allow-set for {kind}"
                )));
            }
        }
        if !self.ownership.contains_key(&AssetKind::Carton) {
            return Err(CoreError::InvalidPolicy(
                "missing ownership allow-set for carton".to_string(),
            ));
        }

        if let Some(kind) = self.lot_creation.keys().find(|k| !k.is_lotable()) {
            return Err(CoreError::InvalidPolicy(format!(
                "{kind} cannot be wrapped in a lot"
            )));
        }
        if let Some(kind) = self
            .ownership
            .keys()
            .find(|k| !k.is_lotable() && **k != AssetKind::Carton)
        {
            return Err(CoreError::InvalidPolicy(format!(
                "{kind} has no tracked ownership"
            )));
        }
        Ok(())
    }

    pub fn allowed(&self, op: Operation) -> &AllowSet {
        self.operations.get(&op).unwrap_or(&NOBODY)
    }

    pub fn lot_creation(&self, kind: AssetKind) -> &AllowSet {
        self.lot_creation.get(&kind).unwrap_or(&NOBODY)
    }

    pub fn ownership(&self, kind: AssetKind) -> &AllowSet {
        self.ownership.get(&kind).unwrap_or(&NOBODY)
    }

    pub fn authorize(&self, invoker: &OrgId, op: Operation) -> Result<(), CoreError> {
        authorize(invoker, self.allowed(op))
    }

    pub fn approver_role(&self, invoker: &OrgId) -> Option<ApproverRole> {
        if *invoker == self.retailer {
            Some(ApproverRole::Retailer)
        } else if *invoker == self.auditor {
            Some(ApproverRole::Auditor)
        } else {
            None
        }
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        use AssetKind as K;
        use Operation as Op;

        let retail_supply = |extra: &[&str]| {
            AllowSet::only([ORG_RETAILER, ORG_SUPPLIER].iter().chain(extra).copied())
        };

        let mut operations = BTreeMap::new();
        for op in [
            Op::CreateOrder,
            Op::CreatePlan,
            Op::CreateFactory,
            Op::SetPlanStatus,
            Op::SetFactoryStatus,
            Op::SetFlag,
            Op::SetNotes,
        ] {
            operations.insert(op, AllowSet::Anyone);
        }
        operations.insert(Op::SetOrderStatus, retail_supply(&[]));
        for op in [Op::SetPlanApproval, Op::SetFactoryApproval] {
            operations.insert(op, AllowSet::only([ORG_RETAILER, ORG_AUDITOR]));
        }
        for op in [Op::CreateCottonBale, Op::CreateCottonYarn] {
            operations.insert(op, AllowSet::only([ORG_SPINNER]));
        }
        for op in [Op::CreateUnfinishedFabric, Op::CreateFinishedFabric] {
            operations.insert(op, AllowSet::only([ORG_FABRIC_MILL]));
        }
        for op in [
            Op::CreateCutPart,
            Op::CreateButton,
            Op::CreateAssembledGarment,
            Op::CreateCarton,
            Op::CreateContainer,
            Op::CreateBillOfLading,
        ] {
            operations.insert(op, AllowSet::only([ORG_GARMENT_FACTORY]));
        }

        let lot_creation = BTreeMap::from([
            (K::CottonBale, retail_supply(&[ORG_SPINNER])),
            (K::CottonYarn, retail_supply(&[ORG_SPINNER])),
            (K::UnfinishedFabric, retail_supply(&[ORG_FABRIC_MILL])),
            (K::FinishedFabric, retail_supply(&[ORG_FABRIC_MILL])),
            (K::CutPart, retail_supply(&[ORG_GARMENT_FACTORY])),
            (K::Button, retail_supply(&[ORG_GARMENT_FACTORY])),
            (K::AssembledGarment, retail_supply(&[ORG_GARMENT_FACTORY])),
        ]);

        let ownership = BTreeMap::from([
            (K::CottonBale, retail_supply(&[ORG_SPINNER])),
            (K::CottonYarn, retail_supply(&[ORG_SPINNER, ORG_FABRIC_MILL])),
            (K::UnfinishedFabric, retail_supply(&[ORG_FABRIC_MILL])),
            (
                K::FinishedFabric,
                retail_supply(&[ORG_FABRIC_MILL, ORG_GARMENT_FACTORY]),
            ),
            (K::CutPart, retail_supply(&[ORG_GARMENT_FACTORY])),
            (K::Button, retail_supply(&[ORG_GARMENT_FACTORY])),
            (K::AssembledGarment, retail_supply(&[ORG_GARMENT_FACTORY])),
            (K::Carton, retail_supply(&[ORG_GARMENT_FACTORY])),
        ]);

        Self {
            retailer: OrgId::from(ORG_RETAILER),
            auditor: OrgId::from(ORG_AUDITOR),
            operations,
            lot_creation,
            ownership,
        }
    }
}
