//! Repository layer.
//!
//! Each repository is a zero-sized struct whose associated functions take the
//! operation's `Transaction` as the first argument.

pub mod asset_repo;

pub use asset_repo::AssetRepo;
