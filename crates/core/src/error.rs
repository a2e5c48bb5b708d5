use crate::authorization::AllowSet;
use crate::types::{OrgId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Asset already exists: {id}")]
    AlreadyExists { id: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Invalid identifier '{id}': expected prefix '{expected_prefix}'")]
    InvalidIdentifier { id: String, expected_prefix: String },

    #[error("Invalid flag state: {0}")]
    InvalidFlagState(String),

    #[error("Chronology violation at position {position}: {later} is not after {earlier}")]
    ChronologyViolation {
        position: usize,
        earlier: Timestamp,
        later: Timestamp,
    },

    #[error("Unauthorized: {invoker} is not in {allowed}")]
    Unauthorized { invoker: OrgId, allowed: AllowSet },

    #[error("Owner not eligible: {owner} is not in {allowed}")]
    OwnerNotEligible { owner: OrgId, allowed: AllowSet },

    #[error("Composition is empty: {slot}")]
    EmptyComposition { slot: &'static str },

    #[error("Duplicate asset in composition: {id}")]
    DuplicateInComposition { id: String },

    #[error("Composition type mismatch for '{id}': expected prefix '{expected_prefix}'")]
    CompositionTypeMismatch { id: String, expected_prefix: String },

    #[error("Asset {id} is already contained in {container}")]
    AssetAlreadyContained { id: String, container: String },

    #[error("Constituent not approved: {id}")]
    ConstituentNotApproved { id: String },

    #[error("Constituent is flagged: {id}")]
    ConstituentFlagged { id: String },

    #[error("Precondition not met for {id}: {condition}")]
    PreconditionNotMet { id: String, condition: &'static str },

    #[error("Invalid status '{value}'. Must be one of: {}", .allowed.join(", "))]
    InvalidStatus {
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown asset kind: {0}")]
    UnknownAssetKind(String),

    #[error("Identity resolution failed: {0}")]
    IdentityResolution(String),

    #[error("Invalid access policy: {0}")]
    InvalidPolicy(String),

    #[error("Ledger access failed: {0}")]
    LedgerAccess(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
