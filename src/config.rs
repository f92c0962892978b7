// src/config.rs
//
// Runtime configuration read from `STOREFRONT_*` environment variables.
// Unset variables fall back to defaults and are logged; malformed values are
// errors. Loading does not validate: the binary applies its flags first and
// then calls `validate`. Default paths are resolved only when a local store
// is actually opened.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::db::get_database_path;
use crate::error::{AppError, AppResult};
use crate::services::{Locale, DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Local SQLite file with uploads on disk
    Sqlite,
    /// Hosted PostgREST-compatible backend
    Rest,
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "local" => Ok(BackendKind::Sqlite),
            "rest" | "remote" => Ok(BackendKind::Rest),
            other => Err(AppError::Validation(format!("Unknown backend '{}'", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub backend: BackendKind,
    /// Explicit database file; `None` means the per-user data directory
    pub database_path: Option<PathBuf>,
    /// Explicit uploads directory; `None` means next to the database file
    pub uploads_dir: Option<PathBuf>,
    pub public_base_url: String,
    pub rest_url: Option<String>,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    /// Administrator signed in automatically against the local store
    pub admin_email: Option<String>,
    pub locale: Locale,
    pub media_bucket: String,
    pub max_upload_bytes: usize,
}

impl AdminConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            backend: try_load(&lookup, "STOREFRONT_BACKEND", "sqlite")?,
            database_path: lookup("STOREFRONT_DATABASE_PATH").map(PathBuf::from),
            uploads_dir: lookup("STOREFRONT_UPLOADS_DIR").map(PathBuf::from),
            public_base_url: try_load(
                &lookup,
                "STOREFRONT_PUBLIC_BASE_URL",
                "http://localhost:8080/uploads",
            )?,
            rest_url: lookup("STOREFRONT_REST_URL"),
            api_key: lookup("STOREFRONT_API_KEY"),
            access_token: lookup("STOREFRONT_ACCESS_TOKEN"),
            admin_email: lookup("STOREFRONT_ADMIN_EMAIL"),
            locale: try_load(&lookup, "STOREFRONT_LOCALE", "en")?,
            media_bucket: try_load(&lookup, "STOREFRONT_MEDIA_BUCKET", DEFAULT_BUCKET)?,
            max_upload_bytes: try_load(
                &lookup,
                "STOREFRONT_MAX_UPLOAD_BYTES",
                &DEFAULT_MAX_UPLOAD_BYTES.to_string(),
            )?,
        };

        Ok(config)
    }

    /// The database file, creating the default data directory when no path
    /// was configured.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => get_database_path(),
        }
    }

    pub fn uploads_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.uploads_dir {
            return Ok(dir.clone());
        }
        let database_path = self.database_path()?;
        Ok(database_path
            .parent()
            .map(|parent| parent.join("uploads"))
            .unwrap_or_else(|| PathBuf::from("uploads")))
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.backend == BackendKind::Rest {
            if self.rest_url.is_none() {
                return Err(AppError::Validation(
                    "STOREFRONT_REST_URL is required for the rest backend".to_string(),
                ));
            }
            if self.api_key.is_none() {
                return Err(AppError::Validation(
                    "STOREFRONT_API_KEY is required for the rest backend".to_string(),
                ));
            }
        }

        if self.max_upload_bytes == 0 {
            return Err(AppError::Validation(
                "STOREFRONT_MAX_UPLOAD_BYTES must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        log::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });

    raw.parse().map_err(|e| {
        log::warn!("Invalid {} value: {}", key, e);
        AppError::Validation(format!("Invalid {}: {}", key, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> AppResult<AdminConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = AdminConfig::from_lookup(|key| vars.get(key).cloned())?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("STOREFRONT_DATABASE_PATH", "/tmp/shop/admin.db")]).unwrap();

        assert_eq!(config.backend, BackendKind::Sqlite);
        assert_eq!(config.uploads_dir().unwrap(), PathBuf::from("/tmp/shop/uploads"));
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.media_bucket, "media");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn test_rest_requires_url_and_key() {
        let err = load(&[
            ("STOREFRONT_DATABASE_PATH", "/tmp/a.db"),
            ("STOREFRONT_BACKEND", "rest"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_REST_URL"));

        let config = load(&[
            ("STOREFRONT_DATABASE_PATH", "/tmp/a.db"),
            ("STOREFRONT_BACKEND", "rest"),
            ("STOREFRONT_REST_URL", "https://db.example.com"),
            ("STOREFRONT_API_KEY", "anon"),
            ("STOREFRONT_LOCALE", "de"),
        ])
        .unwrap();
        assert_eq!(config.backend, BackendKind::Rest);
        assert_eq!(config.locale, Locale::De);
    }

    #[test]
    fn test_flags_applied_before_validation() {
        let mut config = AdminConfig::from_lookup(|key| {
            (key == "STOREFRONT_BACKEND").then(|| "rest".to_string())
        })
        .unwrap();
        assert!(config.validate().is_err());
        assert!(config.database_path.is_none());

        config.backend = BackendKind::Sqlite;
        config.database_path = Some(PathBuf::from("/tmp/override.db"));
        assert!(config.validate().is_ok());
        assert_eq!(config.uploads_dir().unwrap(), PathBuf::from("/tmp/uploads"));
    }

    #[test]
    fn test_malformed_values_are_errors() {
        assert!(load(&[
            ("STOREFRONT_DATABASE_PATH", "/tmp/a.db"),
            ("STOREFRONT_MAX_UPLOAD_BYTES", "lots"),
        ])
        .is_err());
        assert!(load(&[
            ("STOREFRONT_DATABASE_PATH", "/tmp/a.db"),
            ("STOREFRONT_BACKEND", "mongo"),
        ])
        .is_err());
    }
}
