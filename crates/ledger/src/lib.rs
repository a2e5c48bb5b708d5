//! Ledger storage for threadline: the key-value store seam, an in-memory
//! implementation, the per-operation transaction overlay, typed records, and
//! repositories over them.

pub mod containment;
pub mod keys;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;
pub mod transaction;

pub use memory::MemoryLedger;
pub use store::LedgerStore;
pub use transaction::Transaction;
