//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: order }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Body of count endpoints.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Body of existence checks.
#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}
