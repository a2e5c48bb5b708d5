//! Status state machines for orders, plans, and factories.
//!
//! Transitions are guards over pre-loaded record state. A transition that
//! has already happened fails on its "still issued" / "still pending"
//! condition like any other unmet precondition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::authorization::ApproverRole;
use crate::error::CoreError;
use crate::specs::require_ready;

// ---------------------------------------------------------------------------
// Status values
// ---------------------------------------------------------------------------

pub const STATUS_ISSUED: &str = "issued";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_PENDING: &str = "pending";

/// Statuses an issued order may move to.
pub const ORDER_TARGET_STATUSES: &[&str] = &[STATUS_ACCEPTED, STATUS_CANCELLED, STATUS_REJECTED];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Issued,
    Accepted,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Issued => STATUS_ISSUED,
            Self::Accepted => STATUS_ACCEPTED,
            Self::Cancelled => STATUS_CANCELLED,
            Self::Rejected => STATUS_REJECTED,
        }
    }

    /// Parse a requested target status. `issued` is not a valid target.
    pub fn parse_target(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_ACCEPTED => Ok(Self::Accepted),
            STATUS_CANCELLED => Ok(Self::Cancelled),
            STATUS_REJECTED => Ok(Self::Rejected),
            _ => Err(CoreError::InvalidStatus {
                value: value.to_string(),
                allowed: ORDER_TARGET_STATUSES,
            }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Issued,
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactoryStatus {
    Pending,
    Approved,
}

// ---------------------------------------------------------------------------
// Approvals
// ---------------------------------------------------------------------------

/// The pair of independent approval flags carried by plans and factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApprovalFlags {
    pub retailer: bool,
    pub auditor: bool,
}

impl ApprovalFlags {
    /// Sets the flag belonging to `role`. A `false` approval, or an invoker
    /// with no approver role, leaves both flags untouched; approvals are
    /// never revoked.
    pub fn record(self, role: Option<ApproverRole>, approval: bool) -> Self {
        match (role, approval) {
            (Some(ApproverRole::Retailer), true) => Self {
                retailer: true,
                ..self
            },
            (Some(ApproverRole::Auditor), true) => Self {
                auditor: true,
                ..self
            },
            _ => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Order state relevant to a status change.
#[derive(Debug, Clone, Copy)]
pub struct OrderGate {
    pub status: OrderStatus,
    pub is_accepted: bool,
    pub is_flagged: bool,
    pub plan_approved: bool,
}

pub fn order_transition(
    order_id: &str,
    gate: &OrderGate,
    target: &str,
) -> Result<OrderStatus, CoreError> {
    require_ready(
        order_id,
        &[
            ("accepted by receiver", gate.is_accepted),
            ("not flagged", !gate.is_flagged),
            ("linked plan approved", gate.plan_approved),
            ("still issued", gate.status == OrderStatus::Issued),
        ],
    )?;
    OrderStatus::parse_target(target)
}

/// Plan state relevant to approval.
#[derive(Debug, Clone, Copy)]
pub struct PlanGate {
    pub status: PlanStatus,
    pub approvals: ApprovalFlags,
    pub all_factories_approved: bool,
    pub is_flagged: bool,
}

pub fn plan_transition(plan_id: &str, gate: &PlanGate) -> Result<PlanStatus, CoreError> {
    require_ready(
        plan_id,
        &[
            ("all factories approved", gate.all_factories_approved),
            ("auditor approved", gate.approvals.auditor),
            ("retailer approved", gate.approvals.retailer),
            ("not flagged", !gate.is_flagged),
            ("still issued", gate.status == PlanStatus::Issued),
        ],
    )?;
    Ok(PlanStatus::Approved)
}

/// Factory state relevant to approval.
#[derive(Debug, Clone, Copy)]
pub struct FactoryGate {
    pub status: FactoryStatus,
    pub approvals: ApprovalFlags,
    pub is_flagged: bool,
}

pub fn factory_transition(
    factory_id: &str,
    gate: &FactoryGate,
) -> Result<FactoryStatus, CoreError> {
    require_ready(
        factory_id,
        &[
            ("auditor approved", gate.approvals.auditor),
            ("retailer approved", gate.approvals.retailer),
            ("not flagged", !gate.is_flagged),
            ("still pending", gate.status == FactoryStatus::Pending),
        ],
    )?;
    Ok(FactoryStatus::Approved)
}
