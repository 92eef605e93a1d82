//! Error handling for the Quotebook API
//!
//! One error type for the whole service, built with thiserror. Resolvers
//! turn it into an `async_graphql::Error` with a stable `code` extension.
//! The HTTP status of each variant decides how loudly it is logged and
//! whether its details reach the client.

use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use thiserror::Error;

use crate::batch::LoadError;

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Authentication ==========
    /// A mutation that needs a viewer was called without one
    #[error("authentication required")]
    Unauthorized,

    // ========== Resource Errors ==========
    /// Requested resource not found
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Bad limit, cursor, vote direction or filter input
    #[error("validation error: {0}")]
    ValidationError(String),

    // ========== Database Errors ==========
    /// Database query or transaction failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A batch fetch returned a result that does not line up with its keys
    #[error("batch fetch returned {actual} values for {expected} keys")]
    BatchAlignment { expected: usize, actual: usize },

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Database(sqlx::Error::PoolTimedOut) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_)
            | Self::BatchAlignment { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Database(sqlx::Error::PoolTimedOut) => "DATABASE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::BatchAlignment { .. } => "BATCH_ALIGNMENT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }

    /// Convert into a GraphQL error, hiding server-side details from clients
    pub fn into_graphql(self) -> async_graphql::Error {
        self.log();

        let message = if self.status_code().is_server_error() {
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };
        let code = self.error_code();

        async_graphql::Error::new(message).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

// ========== Conversion Implementations ==========

impl From<LoadError> for ApiError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Database(e) => match std::sync::Arc::try_unwrap(e) {
                Ok(e) => Self::Database(e),
                Err(shared) => Self::Internal(format!("database error: {}", shared)),
            },
            LoadError::BatchAlignment { expected, actual } => {
                Self::BatchAlignment { expected, actual }
            }
            LoadError::Abandoned => Self::Internal(LoadError::Abandoned.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("quote", 12).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("bad cursor").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::BatchAlignment {
                expected: 3,
                actual: 2
            }
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(ApiError::not_found("quote", 1).error_code(), "NOT_FOUND");
        assert_eq!(
            ApiError::Database(sqlx::Error::PoolTimedOut).error_code(),
            "DATABASE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("quote", 42);
        assert_eq!(err.to_string(), "quote not found: 42");
    }

    #[test]
    fn test_load_error_conversion_keeps_alignment_details() {
        let err: ApiError = LoadError::BatchAlignment {
            expected: 4,
            actual: 1,
        }
        .into();
        assert!(matches!(
            err,
            ApiError::BatchAlignment {
                expected: 4,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_load_error_conversion_unwraps_unique_database_error() {
        let err: ApiError = LoadError::Database(Arc::new(sqlx::Error::RowNotFound)).into();
        assert!(matches!(err, ApiError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_graphql_error_hides_server_details() {
        let err = ApiError::Internal("pool exploded".to_string()).into_graphql();
        assert_eq!(err.message, "An unexpected error occurred");

        let err = ApiError::Unauthorized.into_graphql();
        assert_eq!(err.message, "authentication required");
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from("UNAUTHORIZED")));
    }
}
