#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{Duration, TimeZone, Utc};
use threadline_contracts::{Clock, Contract, TxContext};
use threadline_core::asset_kind::Channel;
use threadline_core::authorization::AccessPolicy;
use threadline_core::error::CoreError;
use threadline_core::identity::StaticIdentity;
use threadline_core::types::{OrgId, Timestamp};
use threadline_ledger::containment::ContainmentMode;
use threadline_ledger::models::admin::{CreateFactory, CreateOrder, CreatePlan};
use threadline_ledger::models::production::{
    CreateAssembledGarment, CreateBillOfLading, CreateButton, CreateCarton, CreateContainer,
    CreateCottonBale, CreateCottonYarn, CreateCutPart, CreateFabric, CreateLot,
};
use threadline_ledger::{MemoryLedger, Transaction};

pub use threadline_core::authorization::{
    ORG_AUDITOR, ORG_FABRIC_MILL, ORG_GARMENT_FACTORY, ORG_RETAILER, ORG_SPINNER, ORG_SUPPLIER,
};

/// Date every input's own timestamp (assembly, creation, start) is set to.
pub fn produced_at() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

/// One channel over a fresh in-memory ledger with the default policy.
///
/// Each submission is stamped one minute after the previous one, starting a
/// day after [`produced_at`].
pub struct Harness {
    pub ledger: Arc<MemoryLedger>,
    pub contract: Contract,
}

/// A clock that starts at `start` and advances one minute per reading.
pub fn ticking_clock(start: Timestamp) -> Clock {
    let current = Mutex::new(start);
    Arc::new(move || {
        let mut now = current.lock().unwrap();
        *now += Duration::minutes(1);
        *now
    })
}

/// A clock stuck at `at`.
pub fn fixed_clock(at: Timestamp) -> Clock {
    Arc::new(move || at)
}

impl Harness {
    pub fn new(channel: Channel, mode: ContainmentMode) -> Self {
        let ledger = Arc::new(MemoryLedger::new());
        let contract = Contract::new(
            channel,
            ledger.clone(),
            Arc::new(AccessPolicy::default()),
            mode,
        )
        .with_clock(ticking_clock(produced_at() + Duration::days(1)));
        Self { ledger, contract }
    }

    pub fn admin() -> Self {
        Self::new(Channel::Admin, ContainmentMode::Scan)
    }

    pub fn production() -> Self {
        Self::new(Channel::Production, ContainmentMode::Scan)
    }

    pub fn production_with(mode: ContainmentMode) -> Self {
        Self::new(Channel::Production, mode)
    }

    /// Submit `op` as `org`.
    pub fn run<T>(
        &self,
        org: &str,
        op: impl FnOnce(&mut TxContext<'_>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let identity = StaticIdentity::new(org);
        self.contract.submit(&identity, "test", "", op)
    }

    pub fn query<T>(
        &self,
        query: impl FnOnce(&Transaction<'_>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        self.contract.query(query)
    }

    pub fn snapshot(&self) -> std::collections::BTreeMap<String, Vec<u8>> {
        self.ledger.snapshot().unwrap()
    }
}

pub fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ---- Production inputs ----

pub fn bale(id: &str, total_weight: f32, approval: bool) -> CreateCottonBale {
    CreateCottonBale {
        id: id.to_string(),
        approval,
        assembly_date: produced_at(),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Gujarat".to_string(),
        quality_grade: "A".to_string(),
        total_weight,
    }
}

pub fn button(id: &str, total_weight: f32) -> CreateButton {
    CreateButton {
        id: id.to_string(),
        approval: true,
        assembly_date: produced_at(),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Dhaka".to_string(),
        total_weight,
    }
}

pub fn bill_of_lading(id: &str) -> CreateBillOfLading {
    CreateBillOfLading {
        id: id.to_string(),
        consignee: "Retail Co".to_string(),
        delivery_place: "Rotterdam".to_string(),
        discharge_port: "NLRTM".to_string(),
        document_id: "BL-2024-118".to_string(),
        is_flagged: false,
        flag_reason: String::new(),
        freight_terms: "prepaid".to_string(),
        gross_weight: 1200.0,
        issue_date: produced_at(),
        loading_port: "BDCGP".to_string(),
        notes: String::new(),
        receipt_place: "Chittagong".to_string(),
        seal_number: 448_120,
        shipper: "Org6MSP".to_string(),
        url: String::new(),
        vessel: "MV Meridian".to_string(),
    }
}

pub fn lot(id: &str, asset_id_prefix: &str, content: &[&str], total_weight: f32) -> CreateLot {
    CreateLot {
        id: id.to_string(),
        assembly_date: produced_at(),
        asset_id_prefix: asset_id_prefix.to_string(),
        content: ids(content),
        destination: "Tiruppur".to_string(),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Gujarat".to_string(),
        owner: None,
        total_weight,
    }
}

pub fn yarn(id: &str, content: &[&str], total_weight: f32) -> CreateCottonYarn {
    CreateCottonYarn {
        id: id.to_string(),
        approval: true,
        assembly_date: produced_at(),
        content: ids(content),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Tiruppur".to_string(),
        total_weight,
        yarn_count: 40,
    }
}

pub fn fabric(id: &str, content: &[&str], total_weight: f32) -> CreateFabric {
    CreateFabric {
        id: id.to_string(),
        approval: true,
        assembly_date: produced_at(),
        content: ids(content),
        is_flagged: false,
        flag_reason: String::new(),
        length: 120.0,
        notes: String::new(),
        origin: "Tiruppur".to_string(),
        total_weight,
        width: 1.5,
    }
}

pub fn cut_part(id: &str, content: &[&str], total_weight: f32) -> CreateCutPart {
    CreateCutPart {
        id: id.to_string(),
        approval: true,
        assembly_date: produced_at(),
        content: ids(content),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Dhaka".to_string(),
        pattern_piece: "front panel".to_string(),
        total_weight,
    }
}

pub fn garment(
    id: &str,
    buttons: &[&str],
    cut_parts: &[&str],
    total_weight: f32,
    approval: bool,
) -> CreateAssembledGarment {
    CreateAssembledGarment {
        id: id.to_string(),
        approval,
        assembly_date: produced_at(),
        buttons: ids(buttons),
        cut_parts: ids(cut_parts),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Dhaka".to_string(),
        total_weight,
    }
}

pub fn carton(id: &str, content: &[&str], owner: &str, total_weight: f32) -> CreateCarton {
    CreateCarton {
        id: id.to_string(),
        assembly_date: produced_at(),
        content: ids(content),
        customer_id: "customer-17".to_string(),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        origin: "Dhaka".to_string(),
        owner: OrgId::from(owner),
        total_weight,
    }
}

pub fn container(id: &str, content: &[&str], total_weight: f32) -> CreateContainer {
    CreateContainer {
        id: id.to_string(),
        content: ids(content),
        destination_port: "Rotterdam".to_string(),
        is_flagged: false,
        flag_reason: String::new(),
        loaded_at: produced_at(),
        notes: String::new(),
        origin_port: "Chittagong".to_string(),
        total_weight,
        vessel: "MV Meridian".to_string(),
    }
}

// ---- Admin inputs ----

pub fn order(id: &str, receiver: &str) -> CreateOrder {
    CreateOrder {
        id: id.to_string(),
        created_at: produced_at(),
        delivery_date: produced_at() + Duration::days(90),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        payment_terms: "net 60".to_string(),
        product_details: "10k crew-neck shirts".to_string(),
        receiver_id: OrgId::from(receiver),
        total_order_value: 125_000.0,
    }
}

pub fn plan(id: &str, order_id: &str, factories: &[&str]) -> CreatePlan {
    CreatePlan {
        id: id.to_string(),
        created_at: produced_at(),
        factories: ids(factories),
        is_flagged: false,
        flag_reason: String::new(),
        notes: String::new(),
        order_id: order_id.to_string(),
        production_plan: "two shifts".to_string(),
    }
}

pub fn factory(id: &str) -> CreateFactory {
    CreateFactory {
        id: id.to_string(),
        factory_owner: "Rahman Textiles".to_string(),
        is_flagged: false,
        flag_reason: String::new(),
        location: "Gazipur".to_string(),
        name: "Unit 3".to_string(),
        notes: String::new(),
        past_fulfillment: true,
        start_date: produced_at(),
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}
