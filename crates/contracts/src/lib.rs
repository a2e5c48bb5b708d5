//! Ledger operations for the admin and production channels.
//!
//! Every mutating operation is a function over a [`TxContext`] and is run
//! through [`Contract::submit`], which resolves the invoker, owns the
//! transaction, and commits only when the operation returns `Ok`.

pub mod admin;
pub mod audit;
pub mod checks;
pub mod context;
pub mod production;

pub use context::{Clock, Contract, TxContext};
