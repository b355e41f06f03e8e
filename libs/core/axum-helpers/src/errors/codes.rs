//! Type-safe error codes for API responses.
//!
//! This module provides a single source of truth for error codes used across
//! the application. Each error code includes:
//! - String representation for client consumption (e.g., "VALIDATION_ERROR")
//! - Integer code for logging and monitoring (e.g., 1001)
//! - Default human-readable message

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// This enum provides a type-safe way to represent error codes across the application.
/// It combines string identifiers (for clients), integer codes (for monitoring), and
/// default messages (for consistency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Invalid UUID format in path or query parameter
    InvalidUuid,

    /// Invalid JSON format in request body
    InvalidJson,

    /// Requested resource was not found
    NotFound,

    /// Authentication credentials are missing or invalid
    Unauthorized,

    /// Authenticated user lacks sufficient permissions
    Forbidden,

    /// Request conflicts with current resource state (e.g., duplicate resource)
    Conflict,

    /// Request payload is semantically incorrect
    UnprocessableEntity,

    /// JSON extraction from request body failed
    JsonExtraction,

    // Server errors (1500s)
    /// An unexpected internal server error occurred
    InternalError,

    /// JSON serialization failed on the server
    SerdeJsonError,

    /// I/O error on the server
    IoError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database connection or query error
    DatabaseError,

    /// Database query returned no results
    DatabaseNotFound,
}

impl ErrorCode {
    /// Integer code for logging and monitoring.
    pub fn code(&self) -> i32 {
        match self {
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidUuid => 1002,
            ErrorCode::InvalidJson => 1003,
            ErrorCode::NotFound => 1004,
            ErrorCode::Unauthorized => 1005,
            ErrorCode::Forbidden => 1006,
            ErrorCode::Conflict => 1008,
            ErrorCode::UnprocessableEntity => 1009,
            ErrorCode::JsonExtraction => 1010,
            ErrorCode::InternalError => 1500,
            ErrorCode::SerdeJsonError => 1501,
            ErrorCode::IoError => 1502,
            ErrorCode::ServiceUnavailable => 1503,
            ErrorCode::DatabaseError => 2000,
            ErrorCode::DatabaseNotFound => 2001,
        }
    }

    /// Machine-readable error identifier for clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::InvalidJson => "INVALID_JSON",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            ErrorCode::JsonExtraction => "JSON_EXTRACTION",
            ErrorCode::InternalError => "INTERNAL_ERROR",
            ErrorCode::SerdeJsonError => "SERDE_JSON_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::DatabaseNotFound => "DATABASE_NOT_FOUND",
        }
    }

    /// Default human-readable message.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "Request validation failed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::InvalidJson => "Invalid JSON in request body",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::Unauthorized => "Authentication required",
            ErrorCode::Forbidden => "Access forbidden",
            ErrorCode::Conflict => "Resource already exists",
            ErrorCode::UnprocessableEntity => "Request could not be processed",
            ErrorCode::JsonExtraction => "Failed to read JSON request body",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::SerdeJsonError => "Failed to serialize response",
            ErrorCode::IoError => "An I/O error occurred",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::DatabaseNotFound => "Database record not found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_round_trip() {
        let code = ErrorCode::ValidationError;
        assert_eq!(code.as_str(), "VALIDATION_ERROR");
        assert_eq!(code.code(), 1001);
        assert_eq!(code.default_message(), "Request validation failed");
    }

    #[test]
    fn test_client_errors_are_1000s() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::InvalidUuid,
            ErrorCode::NotFound,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::Conflict,
        ] {
            assert!((1000..2000).contains(&code.code()), "{:?}", code);
        }
    }

    #[test]
    fn test_database_errors_are_2000s() {
        assert!((2000..3000).contains(&ErrorCode::DatabaseError.code()));
        assert!((2000..3000).contains(&ErrorCode::DatabaseNotFound.code()));
    }
}
