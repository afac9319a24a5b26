use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use sexyboom_auth::AuthError;
use sexyboom_core::DomainError;

/// Error returned by handlers; rendered as `{"error": code, "message": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::Domain(e) => domain_error_to_response(e),
            ApiError::Auth(AuthError::SessionStoreUnavailable) => {
                tracing::error!("session store unavailable");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "session_store_error",
                    AuthError::SessionStoreUnavailable.to_string(),
                )
            }
            ApiError::Auth(e) => json_error(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string()),
            ApiError::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => {
            tracing::warn!(%message, "rejected input");
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
        DomainError::InsufficientStock { .. } => {
            tracing::warn!(%message, "rejected sale");
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "insufficient_stock", message)
        }
        DomainError::InvariantViolation(_) => {
            tracing::error!(%message, "invariant violation");
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", message)
        }
        DomainError::Unauthorized => json_error(StatusCode::UNAUTHORIZED, "unauthorized", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
