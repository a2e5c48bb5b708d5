//! Pure domain logic for the threadline ledger engine.
//!
//! Nothing in this crate touches storage. Validators and guards operate on
//! values handed in by the `ledger` and `contracts` crates.

pub mod asset_kind;
pub mod authorization;
pub mod composition;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod ownership;
pub mod specs;
pub mod types;
pub mod weight;
