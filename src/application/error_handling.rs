// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-facing responses
// - Every response carries one of the two failure kinds
// - Never exposes storage internals; logs them instead

use serde::{Deserialize, Serialize};

use crate::error::{AppError, FailureKind};

/// Standard error response for a caller of the command layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub kind: FailureKind,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input (400)
    Validation,

    /// Record invariant violated (422)
    DomainError,

    /// No signed-in administrator (401)
    Unauthenticated,

    /// Another writer got there first (409)
    Conflict,

    /// Local storage failure (500)
    Database,

    /// Hosted backend rejected the call or was unreachable (502)
    ExternalService,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    fn new(kind: FailureKind, error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            kind,
            error_type,
            message,
            details,
        }
    }

    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let kind = error.kind();
        match error {
            AppError::NotFound => Self::new(
                kind,
                ErrorType::NotFound,
                "Resource not found".to_string(),
                None,
            ),

            AppError::Validation(message) => {
                Self::new(kind, ErrorType::Validation, message, None)
            }

            AppError::Domain(domain_error) => Self::new(
                kind,
                ErrorType::DomainError,
                "Record validation failed".to_string(),
                Some(domain_error.to_string()),
            ),

            AppError::Unauthenticated => Self::new(
                kind,
                ErrorType::Unauthenticated,
                "Sign in to use the admin".to_string(),
                None,
            ),

            e @ AppError::SequenceNotInitialized(_) => {
                Self::new(kind, ErrorType::Validation, e.to_string(), None)
            }

            e @ AppError::SequenceFetch { .. } => {
                log::error!("{}", e);
                Self::new(
                    kind,
                    ErrorType::ExternalService,
                    "Could not determine the next number".to_string(),
                    Some(e.to_string()),
                )
            }

            AppError::Conflict(message) => Self::new(
                kind,
                ErrorType::Conflict,
                "Someone else saved a record with the same number; reload and try again"
                    .to_string(),
                Some(message),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    kind,
                    ErrorType::Database,
                    "Database operation failed".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(
                    kind,
                    ErrorType::Database,
                    "Database connection failed".to_string(),
                    None,
                )
            }

            AppError::Http(http_error) => {
                log::error!("HTTP error: {:?}", http_error);
                Self::new(
                    kind,
                    ErrorType::ExternalService,
                    "Backend unreachable".to_string(),
                    Some(http_error.to_string()),
                )
            }

            AppError::Rejected { status, message } => Self::new(
                kind,
                ErrorType::ExternalService,
                format!("Backend rejected the request ({})", status),
                Some(message),
            ),

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);
                Self::new(
                    kind,
                    ErrorType::Internal,
                    "Data serialization failed".to_string(),
                    None,
                )
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);
                Self::new(
                    kind,
                    ErrorType::FileSystem,
                    "File system operation failed".to_string(),
                    Some(io_error.to_string()),
                )
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);
                Self::new(kind, ErrorType::Internal, message, None)
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self::new(
            FailureKind::ValidationFailure,
            ErrorType::Validation,
            message,
            None,
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).to_json())
    }
}

/// Macro to wrap command results with error handling
#[macro_export]
macro_rules! handle_command {
    ($expr:expr) => {
        match $expr {
            Ok(value) => Ok(value),
            Err(e) => Err($crate::application::ErrorResponse::from_app_error(e).to_json()),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, Table};

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert_eq!(error.kind, FailureKind::RemoteOperationFailure);
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.kind, FailureKind::ValidationFailure);
        assert!(!error.success);
    }

    #[test]
    fn test_domain_error_keeps_details() {
        let error = ErrorResponse::from_app_error(AppError::Domain(DomainError::MissingField {
            field: "name",
        }));
        assert_eq!(error.error_type, ErrorType::DomainError);
        assert_eq!(error.kind, FailureKind::ValidationFailure);
        assert_eq!(error.details.as_deref(), Some("Field 'name' is required"));
    }

    #[test]
    fn test_sequence_errors() {
        let refused =
            ErrorResponse::from_app_error(AppError::SequenceNotInitialized(Table::Products));
        assert_eq!(refused.kind, FailureKind::ValidationFailure);

        let fetch = ErrorResponse::from_app_error(AppError::SequenceFetch {
            table: Table::Products,
            reason: "timeout".to_string(),
        });
        assert_eq!(fetch.kind, FailureKind::RemoteOperationFailure);
        assert_eq!(fetch.error_type, ErrorType::ExternalService);
    }

    #[test]
    fn test_result_conversion_is_json() {
        let result: Result<(), AppError> = Err(AppError::Conflict("dup".to_string()));
        let json = result.to_error_response().unwrap_err();

        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error_type, ErrorType::Conflict);
        assert_eq!(parsed.kind, FailureKind::RemoteOperationFailure);
    }
}
