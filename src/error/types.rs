// src/error/types.rs
use crate::domain::{DomainError, Table};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two failure categories the admin distinguishes.
///
/// Validation failures are caught before any network call; remote failures
/// come from the persistence layer (rejected request or broken transport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ValidationFailure,
    RemoteOperationFailure,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("No active admin session")]
    Unauthenticated,

    #[error("Sequence for '{0}' has not been initialized")]
    SequenceNotInitialized(Table),

    #[error("Failed to fetch sequence for '{table}': {reason}")]
    SequenceFetch { table: Table, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Validation(_)
            | AppError::Domain(_)
            | AppError::Unauthenticated
            | AppError::SequenceNotInitialized(_) => FailureKind::ValidationFailure,
            AppError::SequenceFetch { .. }
            | AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Http(_)
            | AppError::Rejected { .. }
            | AppError::Conflict(_)
            | AppError::NotFound
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => FailureKind::RemoteOperationFailure,
        }
    }

    /// True when the storage layer refused a write because of a uniqueness rule.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("Invalid UUID: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
