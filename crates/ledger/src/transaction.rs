//! Per-operation transaction: reads fall through to the store, writes are
//! staged and only reach the store on commit.

use std::cmp::Ordering;
use std::iter::Peekable;

use threadline_core::error::CoreError;

use crate::memory::scan_bounds;
use crate::store::{KvPair, LedgerStore, RangeIter, WriteBatch};

pub struct Transaction<'s> {
    store: &'s dyn LedgerStore,
    writes: WriteBatch,
}

impl<'s> Transaction<'s> {
    pub fn begin(store: &'s dyn LedgerStore) -> Self {
        Self {
            store,
            writes: WriteBatch::new(),
        }
    }

    /// Staged value if this transaction wrote the key, else the stored one.
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CoreError> {
        match self.writes.get(key) {
            Some(value) => Ok(Some(value.clone())),
            None => self.store.get(key),
        }
    }

    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), value);
    }

    /// Ordered scan over the store with this transaction's writes merged in.
    pub fn range_scan(&self, start: &str, end: &str) -> Result<RangeIter<'_>, CoreError> {
        let base: RangeIter<'_> = self.store.range_scan(start, end)?;
        let staged: StagedIter<'_> = match scan_bounds(start, end) {
            Some(bounds) => Box::new(self.writes.range::<str, _>(bounds)),
            None => Box::new(std::iter::empty()),
        };
        Ok(Box::new(MergeScan {
            base: base.peekable(),
            staged: staged.peekable(),
        }))
    }

    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply staged writes atomically. Returns how many keys were written.
    pub fn commit(self) -> Result<usize, CoreError> {
        let count = self.writes.len();
        self.store.commit(self.writes)?;
        Ok(count)
    }
}

type StagedIter<'a> = Box<dyn Iterator<Item = (&'a String, &'a Vec<u8>)> + 'a>;

struct MergeScan<'a> {
    base: Peekable<RangeIter<'a>>,
    staged: Peekable<StagedIter<'a>>,
}

enum Step {
    Base,
    Staged,
    /// Same key on both sides; the staged value wins.
    Shadowed,
}

impl<'a> Iterator for MergeScan<'a> {
    type Item = Result<KvPair, CoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match (self.base.peek(), self.staged.peek()) {
            (None, None) => return None,
            (Some(Err(_)), _) | (Some(Ok(_)), None) => Step::Base,
            (None, Some(_)) => Step::Staged,
            (Some(Ok((base_key, _))), Some((staged_key, _))) => {
                match base_key.as_str().cmp(staged_key.as_str()) {
                    Ordering::Less => Step::Base,
                    Ordering::Equal => Step::Shadowed,
                    Ordering::Greater => Step::Staged,
                }
            }
        };
        match step {
            Step::Base => self.base.next(),
            Step::Shadowed => {
                self.base.next();
                self.next_staged()
            }
            Step::Staged => self.next_staged(),
        }
    }
}

impl<'a> MergeScan<'a> {
    fn next_staged(&mut self) -> Option<Result<KvPair, CoreError>> {
        self.staged
            .next()
            .map(|(key, value)| Ok((key.clone(), value.clone())))
    }
}
