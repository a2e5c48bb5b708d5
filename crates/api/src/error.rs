use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use threadline_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for ledger and validation errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `threadline_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Status, error code, and client-facing message for a [`CoreError`].
///
/// Storage, encoding, and policy failures are logged and reported as a
/// sanitized 500.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    let message = err.to_string();
    match err {
        CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", message),
        CoreError::AlreadyExists { .. } => (StatusCode::CONFLICT, "ALREADY_EXISTS", message),
        CoreError::AssetAlreadyContained { .. } => {
            (StatusCode::CONFLICT, "ASSET_ALREADY_CONTAINED", message)
        }
        CoreError::Unauthorized { .. } => (StatusCode::FORBIDDEN, "UNAUTHORIZED", message),
        CoreError::OwnerNotEligible { .. } => {
            (StatusCode::FORBIDDEN, "OWNER_NOT_ELIGIBLE", message)
        }
        CoreError::IdentityResolution(_) => {
            (StatusCode::UNAUTHORIZED, "IDENTITY_RESOLUTION", message)
        }
        CoreError::PreconditionNotMet { .. } => (
            StatusCode::PRECONDITION_FAILED,
            "PRECONDITION_NOT_MET",
            message,
        ),
        CoreError::LedgerAccess(_) | CoreError::Serialization(_) | CoreError::InvalidPolicy(_) => {
            tracing::error!(error = %err, "Internal ledger error");
            internal()
        }
        CoreError::InvalidIdentifier { .. }
        | CoreError::InvalidFlagState(_)
        | CoreError::ChronologyViolation { .. }
        | CoreError::EmptyComposition { .. }
        | CoreError::DuplicateInComposition { .. }
        | CoreError::CompositionTypeMismatch { .. }
        | CoreError::ConstituentNotApproved { .. }
        | CoreError::ConstituentFlagged { .. }
        | CoreError::InvalidStatus { .. }
        | CoreError::InvalidInput(_)
        | CoreError::UnknownAssetKind(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, validation_code(err), message)
        }
    }
}

fn validation_code(err: &CoreError) -> &'static str {
    match err {
        CoreError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
        CoreError::InvalidFlagState(_) => "INVALID_FLAG_STATE",
        CoreError::ChronologyViolation { .. } => "CHRONOLOGY_VIOLATION",
        CoreError::EmptyComposition { .. } => "EMPTY_COMPOSITION",
        CoreError::DuplicateInComposition { .. } => "DUPLICATE_IN_COMPOSITION",
        CoreError::CompositionTypeMismatch { .. } => "COMPOSITION_TYPE_MISMATCH",
        CoreError::ConstituentNotApproved { .. } => "CONSTITUENT_NOT_APPROVED",
        CoreError::ConstituentFlagged { .. } => "CONSTITUENT_FLAGGED",
        CoreError::InvalidStatus { .. } => "INVALID_STATUS",
        CoreError::InvalidInput(_) => "INVALID_INPUT",
        CoreError::UnknownAssetKind(_) => "UNKNOWN_ASSET_KIND",
        _ => "VALIDATION_ERROR",
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
