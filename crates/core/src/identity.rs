//! Invoker identity resolution.

use crate::error::CoreError;
use crate::types::OrgId;

/// Supplies the organization invoking the current operation. Resolved once
/// per operation, before any check runs.
pub trait IdentityProvider {
    fn current_invoker(&self) -> Result<OrgId, CoreError>;
}

/// An identity fixed up front; `None` models an unavailable identity service.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<OrgId>);

impl StaticIdentity {
    pub fn new(org: impl Into<OrgId>) -> Self {
        Self(Some(org.into()))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_invoker(&self) -> Result<OrgId, CoreError> {
        match &self.0 {
            Some(org) if !org.as_str().is_empty() => Ok(org.clone()),
            Some(_) => Err(CoreError::IdentityResolution(
                "invoker identity is empty".to_string(),
            )),
            None => Err(CoreError::IdentityResolution(
                "no invoker identity available".to_string(),
            )),
        }
    }
}
