//! Invoker identity taken from the `x-org-id` request header.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use threadline_core::error::CoreError;
use threadline_core::identity::IdentityProvider;
use threadline_core::types::OrgId;

/// Header carrying the invoking organization's MSP ID.
pub const ORG_ID_HEADER: &str = "x-org-id";

/// The invoker as presented by the caller.
///
/// Extraction never fails. A missing or unreadable header surfaces as
/// `IdentityResolution` when an operation asks for the invoker, so queries
/// stay open to anonymous callers.
///
/// ```ignore
/// async fn my_handler(identity: HeaderIdentity) -> AppResult<Json<()>> {
///     state.submit(Channel::Production, identity, "op", id, move |ctx, id| ...).await?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HeaderIdentity(Option<OrgId>);

impl<S> FromRequestParts<S> for HeaderIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let org = parts
            .headers
            .get(ORG_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(OrgId::from);
        Ok(Self(org))
    }
}

impl IdentityProvider for HeaderIdentity {
    fn current_invoker(&self) -> Result<OrgId, CoreError> {
        self.0.clone().ok_or_else(|| {
            CoreError::IdentityResolution(format!("Missing {ORG_ID_HEADER} header"))
        })
    }
}
