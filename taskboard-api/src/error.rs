/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>`, which converts automatically to the wire format
/// `{ "error": "<message>" }` with the appropriate status code:
///
/// - 400 validation (missing/invalid fields)
/// - 404 not found
/// - 409 conflict (duplicate email, duplicate membership)
/// - 500 unhandled (generic message; details only logged)
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use taskboard_shared::store::StoreError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) — missing or invalid input
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) — e.g., duplicate membership
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

/// Error response format: `{ "error": "<message>" }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Convert storage errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::Database(db_err) => match db_err {
                sqlx::Error::RowNotFound => {
                    ApiError::NotFound("Resource not found".to_string())
                }
                sqlx::Error::Database(e) => {
                    // Unique constraint violations that slipped past the
                    // explicit pre-checks still surface as conflicts
                    if let Some(constraint) = e.constraint() {
                        if constraint.contains("email") {
                            return ApiError::Conflict(
                                "User with this email already exists".to_string(),
                            );
                        }
                        if constraint.contains("board_members") {
                            return ApiError::Conflict(
                                "User is already a member of this board".to_string(),
                            );
                        }
                    }
                    ApiError::Internal(format!("Database error: {}", e))
                }
                other => ApiError::Internal(format!("Database error: {}", other)),
            },
        }
    }
}

/// Convert request-payload validation failures to 400 responses
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let detail = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {detail}")
            })
            .collect::<Vec<_>>()
            .join(", ");
        ApiError::BadRequest(message)
    }
}
