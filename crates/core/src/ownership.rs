//! Ownership transfer for lots and cartons.

use crate::authorization::{authorize, AllowSet};
use crate::error::CoreError;
use crate::types::OrgId;

/// The proposed owner must belong to the allow-set of the asset's
/// underlying kind.
pub fn require_eligible_owner(owner: &OrgId, allowed: &AllowSet) -> Result<(), CoreError> {
    if allowed.permits(owner) {
        Ok(())
    } else {
        Err(CoreError::OwnerNotEligible {
            owner: owner.clone(),
            allowed: allowed.clone(),
        })
    }
}

/// Both the invoker and the proposed owner must be in `allowed`; the invoker
/// is checked first.
pub fn authorize_transfer(
    invoker: &OrgId,
    proposed_owner: &OrgId,
    allowed: &AllowSet,
) -> Result<(), CoreError> {
    authorize(invoker, allowed)?;
    require_eligible_owner(proposed_owner, allowed)
}

/// Owner fields after a transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipChange {
    pub owner: OrgId,
    pub previous_owner: Option<OrgId>,
}

impl OwnershipChange {
    pub fn transfer(current_owner: &OrgId, proposed_owner: OrgId) -> Self {
        Self {
            owner: proposed_owner,
            previous_owner: Some(current_owner.clone()),
        }
    }
}
