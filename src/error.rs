//! Application error taxonomy and wire-format rendering.
//!
//! Every fallible operation in the service funnels into [`AppError`]. At the
//! API boundary the error is rendered as the uniform JSON envelope used by
//! all endpoints:
//!
//! ```json
//! {"result": "error", "msg": "Invalid playground"}
//! ```
//!
//! Permission, validation, and not-found outcomes are all client errors (400)
//! on the wire; only authentication failures (401) and unexpected internal
//! failures (500) differ.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON error envelope shared by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    result: &'static str,
    msg: String,
}

#[derive(Debug)]
pub enum AppError {
    /// Malformed input or a uniqueness conflict. Rendered as 400.
    Validation { message: String },
    /// Caller lacks the required realm role. Rendered as 400.
    Permission { message: String },
    /// Target record does not exist within the caller's realm. Rendered as 400.
    NotFound { message: String },
    /// Missing, invalid, or revoked credentials. Rendered as 401.
    Unauthorized { message: String },
    /// Unexpected failure (database, channel). Rendered as 500.
    Internal { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn permission(message: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// User-visible message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::Permission { message }
            | AppError::NotFound { message }
            | AppError::Unauthorized { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Validation { message }
            | AppError::Permission { message }
            | AppError::NotFound { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized { message } => (StatusCode::UNAUTHORIZED, message),
            AppError::Internal { message } => {
                tracing::error!(error = %message, "internal error");
                // The caller gets a generic message; details stay in the log.
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            result: "error",
            msg,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal(format!("Database error: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::validation(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_passthrough() {
        let err = AppError::not_found("Invalid playground");
        assert_eq!(err.message(), "Invalid playground");
        assert_eq!(err.to_string(), "Invalid playground");
    }

    #[test]
    fn test_client_errors_are_bad_request() {
        for err in [
            AppError::validation("url_prefix is not a URL"),
            AppError::permission("Must be an organization administrator"),
            AppError::not_found("Invalid playground"),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_unauthorized_status() {
        let response = AppError::unauthorized("Invalid API key").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internal_hides_details() {
        let err = AppError::internal("connection refused");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_validator_errors_picks_field_message() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "name cannot be blank"))]
            name: String,
        }

        let probe = Probe {
            name: String::new(),
        };
        let err: AppError = probe.validate().unwrap_err().into();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.message(), "name cannot be blank");
    }
}
