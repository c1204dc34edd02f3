// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 502 Bad Gateway (external service issues)
    BadGateway(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
            ApiError::BadGateway(_) => 502,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        ApiError::BadGateway(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// One translation step per boundary: taxonomy member -> HTTP class.

impl From<crate::query::QueryError> for ApiError {
    fn from(err: crate::query::QueryError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<crate::database::DataError> for ApiError {
    fn from(err: crate::database::DataError) -> Self {
        use crate::database::DataError;
        match err {
            DataError::NotFound(what) => ApiError::not_found(format!("{} not found", what)),
            DataError::ForeignKey(constraint) => {
                ApiError::bad_request(format!("invalid reference ({})", constraint))
            }
            DataError::Unique(constraint) => {
                ApiError::conflict(format!("already exists ({})", constraint))
            }
            DataError::Check(constraint) => {
                ApiError::bad_request(format!("constraint violated ({})", constraint))
            }
            DataError::Transport(msg) => {
                tracing::error!("database transport error: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DataError::Internal(err) => {
                // Log the real error but return a generic message
                tracing::error!("database error: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::auth::AuthError> for ApiError {
    fn from(err: crate::auth::AuthError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl From<crate::services::identity::IdentityError> for ApiError {
    fn from(err: crate::services::identity::IdentityError) -> Self {
        use crate::services::identity::IdentityError;
        match err {
            IdentityError::Provider { status, message } => {
                // Relay the provider's own verdict on client errors
                match status {
                    400 => ApiError::bad_request(message),
                    401 | 403 => ApiError::unauthorized(message),
                    404 => ApiError::not_found(message),
                    409 | 422 => ApiError::conflict(message),
                    _ => {
                        tracing::error!("identity provider error {}: {}", status, message);
                        ApiError::bad_gateway("Identity provider request failed")
                    }
                }
            }
            IdentityError::Transport(err) => {
                tracing::error!("identity provider unreachable: {}", err);
                ApiError::bad_gateway("Identity provider unreachable")
            }
        }
    }
}

impl From<crate::services::storage::StorageError> for ApiError {
    fn from(err: crate::services::storage::StorageError) -> Self {
        tracing::error!("object storage error: {}", err);
        ApiError::bad_gateway("Object storage request failed")
    }
}

impl From<crate::services::mailer::MailError> for ApiError {
    fn from(err: crate::services::mailer::MailError) -> Self {
        tracing::error!("email delivery error: {}", err);
        ApiError::bad_gateway("Email delivery failed")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
