//! Structural validators shared by every operation.
//!
//! Each check is pure and returns the first violation it finds. Ledger-aware
//! checks (existence, containment) live in the `contracts` crate and build on
//! these.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Flag reason meaning "no reason given".
pub const FLAG_REASON_NONE: &str = "N/A";

/// The identifier must start with the prefix reserved for its kind.
pub fn require_prefix(id: &str, prefix: &str) -> Result<(), CoreError> {
    if id.starts_with(prefix) {
        Ok(())
    } else {
        Err(CoreError::InvalidIdentifier {
            id: id.to_string(),
            expected_prefix: prefix.to_string(),
        })
    }
}

/// Whether a flag reason counts as absent.
pub fn is_blank_reason(reason: &str) -> bool {
    reason.is_empty() || reason == FLAG_REASON_NONE
}

/// A flagged asset needs a real reason; an unflagged one must not carry one.
pub fn validate_flag(is_flagged: bool, flag_reason: &str) -> Result<(), CoreError> {
    match (is_flagged, is_blank_reason(flag_reason)) {
        (true, true) => Err(CoreError::InvalidFlagState(
            "a flagged asset requires a flag reason".to_string(),
        )),
        (false, false) => Err(CoreError::InvalidFlagState(format!(
            "an unflagged asset cannot carry the flag reason '{flag_reason}'"
        ))),
        _ => Ok(()),
    }
}

/// Each timestamp must be strictly after the one before it.
pub fn require_chronological(timestamps: &[Timestamp]) -> Result<(), CoreError> {
    for (position, pair) in timestamps.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CoreError::ChronologyViolation {
                position: position + 1,
                earlier: pair[0],
                later: pair[1],
            });
        }
    }
    Ok(())
}

/// Fails on the first unmet labelled condition.
pub fn require_ready(id: &str, conditions: &[(&'static str, bool)]) -> Result<(), CoreError> {
    match conditions.iter().find(|(_, met)| !met) {
        Some(&(condition, _)) => Err(CoreError::PreconditionNotMet {
            id: id.to_string(),
            condition,
        }),
        None => Ok(()),
    }
}
