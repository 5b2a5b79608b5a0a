//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every variant renders the same JSON envelope the job board clients expect:
//! `{ "success": false, "message": ..., "error": ... }`, where `error` carries the
//! underlying cause for server-side failures.
//!
//! `AppError` implements `actix_web::error::ResponseError`, and provides `From`
//! implementations for `sqlx::Error`, `validator::ValidationErrors` and
//! `jsonwebtoken::errors::Error` so that the `?` operator can be used in handlers.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid credentials (HTTP 401).
    Unauthorized(String),
    /// Valid credentials without the required role (HTTP 403).
    Forbidden(String),
    /// Malformed request parameters (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Error originating from the data store (HTTP 500).
    DatabaseError(String),
    /// Request body failed validation (HTTP 422).
    ValidationError(String),
    /// A server-side failure summarised for a specific endpoint (HTTP 500).
    ///
    /// `message` is the endpoint summary, `error` the underlying cause.
    RequestFailed { message: String, error: String },
}

impl AppError {
    /// Attaches an endpoint summary to server-side failures.
    ///
    /// Client errors (400/401/403/404/422) are returned unchanged.
    pub fn with_message(self, message: &str) -> AppError {
        match self {
            AppError::DatabaseError(error) | AppError::InternalServerError(error) => {
                AppError::RequestFailed {
                    message: message.to_string(),
                    error,
                }
            }
            AppError::RequestFailed { error, .. } => AppError::RequestFailed {
                message: message.to_string(),
                error,
            },
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::RequestFailed { message, error } => write!(f, "{}: {}", message, error),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_)
            | AppError::DatabaseError(_)
            | AppError::RequestFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg) => json!({
                "success": false,
                "message": msg
            }),
            AppError::ValidationError(msg) => json!({
                "success": false,
                "message": "Validation failed",
                "error": msg
            }),
            // Server-side failures without an endpoint summary get a generic one.
            AppError::InternalServerError(msg) => json!({
                "success": false,
                "message": "Internal server error",
                "error": msg
            }),
            AppError::DatabaseError(msg) => json!({
                "success": false,
                "message": "Database error",
                "error": msg
            }),
            AppError::RequestFailed { message, error } => json!({
                "success": false,
                "message": message,
                "error": error
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `RowNotFound` maps to `NotFound`; everything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Token decoding failures are authentication failures.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_statuses() {
        assert_eq!(
            AppError::Unauthorized("Invalid token".into())
                .error_response()
                .status(),
            401
        );
        assert_eq!(
            AppError::Forbidden("Admins only".into())
                .error_response()
                .status(),
            403
        );
        assert_eq!(
            AppError::BadRequest("Invalid input".into())
                .error_response()
                .status(),
            400
        );
        assert_eq!(
            AppError::NotFound("Job not found".into())
                .error_response()
                .status(),
            404
        );
        assert_eq!(
            AppError::ValidationError("title".into())
                .error_response()
                .status(),
            422
        );
        assert_eq!(
            AppError::DatabaseError("connection reset".into())
                .error_response()
                .status(),
            500
        );
    }

    #[test]
    fn test_with_message_only_wraps_server_errors() {
        let wrapped = AppError::DatabaseError("pool timed out".into())
            .with_message("Failed to retrieve jobs");
        match wrapped {
            AppError::RequestFailed { message, error } => {
                assert_eq!(message, "Failed to retrieve jobs");
                assert_eq!(error, "pool timed out");
            }
            other => panic!("unexpected variant: {:?}", other),
        }

        let untouched = AppError::BadRequest("page must be a positive integer".into())
            .with_message("Failed to retrieve jobs");
        assert!(matches!(untouched, AppError::BadRequest(_)));
    }

    #[actix_rt::test]
    async fn test_request_failed_envelope() {
        let response = AppError::RequestFailed {
            message: "Failed to retrieve filter options".into(),
            error: "relation \"jobs\" does not exist".into(),
        }
        .error_response();
        assert_eq!(response.status(), 500);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to retrieve filter options");
        assert_eq!(json["error"], "relation \"jobs\" does not exist");
    }
}
