//! Ledger key layout.
//!
//! Asset records are stored under their own ID. Auxiliary entries start
//! with `~`, a byte no asset prefix can begin with, and are skipped by every
//! asset query.

use threadline_core::composition::ContainmentScope;

pub const INDEX_KEY_PREFIX: &str = "~";

const CONTAINS_KEY_PREFIX: &str = "~contains/";

/// Never written. Reading it shows whether the store answers.
pub const HEALTH_KEY: &str = "~health";

pub fn is_index_key(key: &str) -> bool {
    key.starts_with(INDEX_KEY_PREFIX)
}

/// Key of the index entry recording which composite holds `asset_id`.
pub fn containment_key(scope: ContainmentScope, asset_id: &str) -> String {
    format!("{CONTAINS_KEY_PREFIX}{}/{asset_id}", scope.as_str())
}

/// Range covering every index entry of a scope.
pub fn containment_range(scope: ContainmentScope) -> (String, String) {
    let start = format!("{CONTAINS_KEY_PREFIX}{}/", scope.as_str());
    let end = prefix_end(&start);
    (start, end)
}

/// Smallest key greater than every key starting with `prefix`.
///
/// Prefixes are ASCII, so bumping the last byte is enough.
pub fn prefix_end(prefix: &str) -> String {
    let mut bytes = prefix.as_bytes().to_vec();
    match bytes.pop() {
        Some(last) if last < 0x7f => {
            bytes.push(last + 1);
            String::from_utf8(bytes).unwrap_or_default()
        }
        _ => String::new(),
    }
}
