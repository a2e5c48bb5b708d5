//! Typed ledger records and the inputs that create them.
//!
//! Records serialize with the PascalCase field names the ledger has always
//! stored. Creation inputs are plain snake_case DTOs.

macro_rules! impl_record {
    ($ty:ty, $kind:expr) => {
        impl $crate::models::Record for $ty {
            const KIND: ::threadline_core::asset_kind::AssetKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn creator_id(&self) -> &::threadline_core::types::OrgId {
                &self.creator_id
            }

            fn is_flagged(&self) -> bool {
                self.is_flagged
            }

            fn updated_at(&self) -> ::threadline_core::types::Timestamp {
                self.updated_at
            }

            fn set_flag(&mut self, is_flagged: bool, flag_reason: String) {
                self.is_flagged = is_flagged;
                self.flag_reason = flag_reason;
            }

            fn set_notes(&mut self, notes: String) {
                self.notes = notes;
            }

            fn set_updated_at(&mut self, now: ::threadline_core::types::Timestamp) {
                self.updated_at = now;
            }
        }
    };
}

pub mod admin;
pub mod asset;
pub mod production;

use serde::de::DeserializeOwned;
use serde::Serialize;
use threadline_core::asset_kind::AssetKind;
use threadline_core::error::CoreError;
use threadline_core::specs::require_chronological;
use threadline_core::types::{OrgId, Timestamp};

pub use asset::Asset;

/// Fields and setters every asset record shares.
pub trait Record: Serialize + DeserializeOwned {
    const KIND: AssetKind;

    fn id(&self) -> &str;
    fn creator_id(&self) -> &OrgId;
    fn is_flagged(&self) -> bool;
    fn updated_at(&self) -> Timestamp;

    fn set_flag(&mut self, is_flagged: bool, flag_reason: String);
    fn set_notes(&mut self, notes: String);

    #[doc(hidden)]
    fn set_updated_at(&mut self, now: Timestamp);

    /// Advance `UpdatedAt` to `now`, which must be strictly later.
    fn touch(&mut self, now: Timestamp) -> Result<(), CoreError> {
        require_chronological(&[self.updated_at(), now])?;
        self.set_updated_at(now);
        Ok(())
    }
}
