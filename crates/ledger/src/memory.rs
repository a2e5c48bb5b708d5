//! In-memory ledger backed by a sorted map.
//!
//! The map sits behind an `Arc` and is copied on write only while a scan
//! still holds the previous version, so scans never hold the lock.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use threadline_core::error::CoreError;

use crate::store::{KvPair, LedgerStore, RangeIter, WriteBatch};

type Entries = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Default)]
pub struct MemoryLedger {
    state: RwLock<Arc<Entries>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the full key space, index entries included.
    pub fn snapshot(&self) -> Result<Entries, CoreError> {
        Ok(self.read()?.as_ref().clone())
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Arc<Entries>>, CoreError> {
        self.state
            .read()
            .map_err(|_| CoreError::LedgerAccess("ledger lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Arc<Entries>>, CoreError> {
        self.state
            .write()
            .map_err(|_| CoreError::LedgerAccess("ledger lock poisoned".to_string()))
    }
}

/// Bounds for `[start, end)`, `None` when the range is empty. `BTreeMap::range`
/// panics on inverted bounds.
pub(crate) fn scan_bounds<'k>(
    start: &'k str,
    end: &'k str,
) -> Option<(Bound<&'k str>, Bound<&'k str>)> {
    if end.is_empty() {
        Some((Bound::Included(start), Bound::Unbounded))
    } else if start > end {
        None
    } else {
        Some((Bound::Included(start), Bound::Excluded(end)))
    }
}

/// Walks one version of the map, re-seeking past the last key it returned.
struct Cursor {
    entries: Arc<Entries>,
    lower: Bound<String>,
    upper: Bound<String>,
}

fn borrowed(bound: &Bound<String>) -> Bound<&str> {
    match bound {
        Bound::Included(key) => Bound::Included(key.as_str()),
        Bound::Excluded(key) => Bound::Excluded(key.as_str()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

fn owned(bound: Bound<&str>) -> Bound<String> {
    match bound {
        Bound::Included(key) => Bound::Included(key.to_string()),
        Bound::Excluded(key) => Bound::Excluded(key.to_string()),
        Bound::Unbounded => Bound::Unbounded,
    }
}

impl Iterator for Cursor {
    type Item = Result<KvPair, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self
            .entries
            .range::<str, _>((borrowed(&self.lower), borrowed(&self.upper)))
            .next()
            .map(|(k, v)| (k.clone(), v.clone()))?;
        self.lower = Bound::Excluded(key.clone());
        Some(Ok((key, value)))
    }
}

impl LedgerStore for MemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<RangeIter<'_>, CoreError> {
        let Some((lower, upper)) = scan_bounds(start, end) else {
            return Ok(Box::new(std::iter::empty()));
        };
        let entries: Arc<Entries> = Arc::clone(&*self.read()?);
        Ok(Box::new(Cursor {
            entries,
            lower: owned(lower),
            upper: owned(upper),
        }))
    }

    fn commit(&self, batch: WriteBatch) -> Result<(), CoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut state = self.write()?;
        Arc::make_mut(&mut state).extend(batch);
        Ok(())
    }
}
