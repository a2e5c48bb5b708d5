use std::collections::BTreeMap;

use threadline_core::error::CoreError;

/// A key and its stored bytes.
pub type KvPair = (String, Vec<u8>);

/// Lazy, forward-ordered scan results. Dropping the iterator closes the scan.
pub type RangeIter<'a> = Box<dyn Iterator<Item = Result<KvPair, CoreError>> + 'a>;

/// Writes staged by one operation, applied together.
pub type WriteBatch = BTreeMap<String, Vec<u8>>;

/// The key-value ledger the engine runs against.
///
/// Implementations must be linearizable: a successful `commit` is visible to
/// every later read.
pub trait LedgerStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError>;

    /// Keys in `[start, end)` in ascending order. An empty `end` leaves the
    /// range open.
    fn range_scan(&self, start: &str, end: &str) -> Result<RangeIter<'_>, CoreError>;

    /// Apply every write of the batch, or none of them.
    fn commit(&self, batch: WriteBatch) -> Result<(), CoreError>;

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), CoreError> {
        self.commit(WriteBatch::from([(key.to_string(), value)]))
    }
}
