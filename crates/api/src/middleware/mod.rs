//! Request extractors.
//!
//! - [`identity::HeaderIdentity`] -- The invoking organization, from `x-org-id`.

pub mod identity;
