//! Records of the administrative channel.

use serde::{Deserialize, Serialize};
use threadline_core::asset_kind::AssetKind;
use threadline_core::lifecycle::{ApprovalFlags, FactoryStatus, OrderStatus, PlanStatus};
use threadline_core::types::{OrgId, Timestamp};

/// A purchase order placed with a receiving organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub created_at: Timestamp,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub delivery_date: Timestamp,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_accepted: bool,
    pub is_flagged: bool,
    pub notes: String,
    pub payment_terms: String,
    #[serde(rename = "PlanID")]
    pub plan_id: Option<String>,
    pub product_details: String,
    #[serde(rename = "ReceiverID")]
    pub receiver_id: OrgId,
    pub status: OrderStatus,
    pub total_order_value: f32,
    pub updated_at: Timestamp,
}

impl_record!(Order, AssetKind::Order);

/// DTO for issuing a new order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrder {
    pub id: String,
    pub created_at: Timestamp,
    pub delivery_date: Timestamp,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub payment_terms: String,
    pub product_details: String,
    pub receiver_id: OrgId,
    pub total_order_value: f32,
}

impl Order {
    pub fn issue(input: CreateOrder, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            created_at: input.created_at,
            creator_id,
            delivery_date: input.delivery_date,
            flag_reason: input.flag_reason,
            id: input.id,
            is_accepted: false,
            is_flagged: input.is_flagged,
            notes: input.notes,
            payment_terms: input.payment_terms,
            plan_id: None,
            product_details: input.product_details,
            receiver_id: input.receiver_id,
            status: OrderStatus::Issued,
            total_order_value: input.total_order_value,
            updated_at: now,
        }
    }
}

/// A production plan fulfilling an order across one or more factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Plan {
    pub all_factories_approved: bool,
    pub created_at: Timestamp,
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub factories: Vec<String>,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_auditor_approved: bool,
    pub is_flagged: bool,
    pub is_retailer_approved: bool,
    pub notes: String,
    #[serde(rename = "OrderID")]
    pub order_id: String,
    pub production_plan: String,
    pub status: PlanStatus,
    pub updated_at: Timestamp,
}

impl_record!(Plan, AssetKind::Plan);

/// DTO for issuing a new plan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlan {
    pub id: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub factories: Vec<String>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    #[serde(default)]
    pub notes: String,
    pub order_id: String,
    pub production_plan: String,
}

impl Plan {
    pub fn issue(input: CreatePlan, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            all_factories_approved: false,
            created_at: input.created_at,
            creator_id,
            factories: input.factories,
            flag_reason: input.flag_reason,
            id: input.id,
            is_auditor_approved: false,
            is_flagged: input.is_flagged,
            is_retailer_approved: false,
            notes: input.notes,
            order_id: input.order_id,
            production_plan: input.production_plan,
            status: PlanStatus::Issued,
            updated_at: now,
        }
    }

    pub fn approvals(&self) -> ApprovalFlags {
        ApprovalFlags {
            retailer: self.is_retailer_approved,
            auditor: self.is_auditor_approved,
        }
    }

    pub fn set_approvals(&mut self, flags: ApprovalFlags) {
        self.is_retailer_approved = flags.retailer;
        self.is_auditor_approved = flags.auditor;
    }
}

/// A factory nominated to produce against plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Factory {
    #[serde(rename = "CreatorID")]
    pub creator_id: OrgId,
    pub factory_owner: String,
    pub flag_reason: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub is_auditor_approved: bool,
    pub is_flagged: bool,
    pub is_retailer_approved: bool,
    pub location: String,
    pub name: String,
    pub notes: String,
    pub past_fulfillment: bool,
    pub start_date: Timestamp,
    pub status: FactoryStatus,
    pub updated_at: Timestamp,
}

impl_record!(Factory, AssetKind::Factory);

/// DTO for registering a new factory.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFactory {
    pub id: String,
    pub factory_owner: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flag_reason: String,
    pub location: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub past_fulfillment: bool,
    pub start_date: Timestamp,
}

impl Factory {
    pub fn register(input: CreateFactory, creator_id: OrgId, now: Timestamp) -> Self {
        Self {
            creator_id,
            factory_owner: input.factory_owner,
            flag_reason: input.flag_reason,
            id: input.id,
            is_auditor_approved: false,
            is_flagged: input.is_flagged,
            is_retailer_approved: false,
            location: input.location,
            name: input.name,
            notes: input.notes,
            past_fulfillment: input.past_fulfillment,
            start_date: input.start_date,
            status: FactoryStatus::Pending,
            updated_at: now,
        }
    }

    pub fn approvals(&self) -> ApprovalFlags {
        ApprovalFlags {
            retailer: self.is_retailer_approved,
            auditor: self.is_auditor_approved,
        }
    }

    pub fn set_approvals(&mut self, flags: ApprovalFlags) {
        self.is_retailer_approved = flags.retailer;
        self.is_auditor_approved = flags.auditor;
    }
}
