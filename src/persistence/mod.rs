// src/persistence/mod.rs
//
// Persistence layer
//
// RULES:
// - Backends are DUMB data mappers over named tables
// - NO business logic, NO invariant enforcement, NO event emission
// - Records are opaque JSON objects keyed by an `id` column
// - Every screen talks to storage only through `PersistenceLayer`

pub mod query;
pub mod rest;
pub mod sqlite;

pub use query::{validate_column, Condition, Filter, Order, Query};
pub use rest::RestBackend;
pub use sqlite::{LocalStorage, SqliteBackend};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Record, Table};
use crate::error::AppResult;

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
}

/// A file to be stored in a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub bucket: String,
    /// Object path inside the bucket, `/`-separated
    pub path: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FileUpload {
    /// Object paths are relative and never climb out of the bucket.
    pub fn validate_path(&self) -> AppResult<()> {
        let valid_bucket = !self.bucket.is_empty()
            && self
                .bucket
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_bucket {
            return Err(crate::error::AppError::Validation(format!(
                "Invalid bucket name '{}'",
                self.bucket
            )));
        }

        let valid_path = !self.path.is_empty()
            && !self.path.starts_with('/')
            && self
                .path
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..");
        if !valid_path {
            return Err(crate::error::AppError::Validation(format!(
                "Invalid object path '{}'",
                self.path
            )));
        }
        Ok(())
    }
}

/// Generic table/storage/session surface of the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersistenceLayer: Send + Sync {
    async fn select(&self, table: Table, query: Query) -> AppResult<Vec<Record>>;

    /// Inserts the records and returns them as stored (with ids assigned).
    async fn insert(&self, table: Table, records: Vec<Record>) -> AppResult<Vec<Record>>;

    /// Merges `patch` into every row matching `filter`.
    async fn update(&self, table: Table, patch: Record, filter: Filter) -> AppResult<()>;

    async fn delete(&self, table: Table, filter: Filter) -> AppResult<()>;

    /// Stores the file and returns its public URL.
    async fn upload_file(&self, upload: FileUpload) -> AppResult<String>;

    async fn get_session(&self) -> AppResult<Option<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(bucket: &str, path: &str) -> FileUpload {
        FileUpload {
            bucket: bucket.to_string(),
            path: path.to_string(),
            bytes: vec![1],
            content_type: "image/png".to_string(),
        }
    }

    #[test]
    fn test_upload_paths() {
        assert!(upload("product-images", "products/a.png").validate_path().is_ok());
        assert!(upload("product-images", "../etc/passwd").validate_path().is_err());
        assert!(upload("product-images", "/abs.png").validate_path().is_err());
        assert!(upload("product-images", "a//b.png").validate_path().is_err());
        assert!(upload("", "a.png").validate_path().is_err());
        assert!(upload("../x", "a.png").validate_path().is_err());
    }
}
