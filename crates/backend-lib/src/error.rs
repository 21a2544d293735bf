// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed submission fields; reported back to the submitter
    #[error("Validation error: {0}")]
    Validation(String),

    /// Merged login failure. Unknown account and wrong password surface the
    /// same text so responses never reveal which accounts exist.
    #[error("Invalid username or password")]
    AuthenticationFailed,

    /// A protected operation was requested without a resolvable session
    #[error("Authentication required")]
    Unauthenticated { redirect_to: &'static str },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Cryptographic primitive failure; fatal to the single operation.
    /// Never falls back to persisting an unset or plaintext password field.
    #[error("Password hashing failure: {0}")]
    Hashing(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationFailed | AppError::Unauthenticated { .. } => {
                StatusCode::UNAUTHORIZED
            },
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::AuthenticationFailed => "AUTH_001",
            AppError::Unauthenticated { .. } => "AUTH_002",
            AppError::NotFound(_) => "NF_001",
            AppError::Hashing(_) => "HASH_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            // Validation feedback is meant for the submitter
            AppError::Validation(_) => self.to_string(),
            AppError::AuthenticationFailed => "Invalid username or password".to_string(),
            AppError::Unauthenticated { .. } => "Authentication required".to_string(),
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::Hashing(_) | AppError::Internal(_) | AppError::Io(_) => {
                "An internal server error occurred".to_string()
            },
            AppError::Json(_) => "Invalid request format".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        // Create a JSON response with error details; guard denials also
        // carry the login entry point the caller should redirect to
        let body = match self {
            AppError::Unauthenticated { redirect_to } => serde_json::json!({
                "error": {
                    "code": error_code,
                    "message": message,
                },
                "redirect": redirect_to,
            }),
            _ => serde_json::json!({
                "error": {
                    "code": error_code,
                    "message": message,
                }
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        let validation = AppError::Validation("Email required".to_string());
        assert_eq!(validation.to_string(), "Validation error: Email required");

        let io_error = AppError::Io(IoError::new(ErrorKind::NotFound, "File not found"));
        assert!(io_error.to_string().contains("IO error"));

        let auth = AppError::AuthenticationFailed;
        assert_eq!(auth.to_string(), "Invalid username or password");
    }

    #[test]
    fn test_failure_variants_share_external_text() {
        // Both internal login-failure causes collapse into one variant, so
        // there is exactly one caller-facing message to compare against.
        let failed = AppError::AuthenticationFailed;
        assert_eq!(failed.to_string(), failed.sanitized_message());
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::Validation("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AuthenticationFailed.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Unauthenticated { redirect_to: "/users/login" }.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Hashing("entropy failure".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_app_error_error_codes() {
        assert_eq!(AppError::AuthenticationFailed.error_code(), "AUTH_001");
        assert_eq!(
            AppError::Unauthenticated { redirect_to: "/users/login" }.error_code(),
            "AUTH_002"
        );
        assert_eq!(AppError::Validation("test".to_string()).error_code(), "VAL_001");
        assert_eq!(AppError::Hashing("test".to_string()).error_code(), "HASH_001");

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        assert_eq!(AppError::Json(json_err).error_code(), "JSON_001");
    }

    #[test]
    fn test_app_error_into_response() {
        let error = AppError::NotFound("Resource not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unauthenticated_response_carries_redirect() {
        let error = AppError::Unauthenticated { redirect_to: "/users/login" };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["redirect"], "/users/login");
    }

    #[test]
    fn test_error_from_impls() {
        let io_err = IoError::new(ErrorKind::PermissionDenied, "Permission denied");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));

        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));

        let string_err = "String error".to_string();
        let app_err: AppError = string_err.into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }
}
