use super::entity::{GallerySettings, SiteSetting};
use crate::domain::validation::require_text;
use crate::domain::{DomainError, DomainResult};

const MAX_GALLERY_COLUMNS: i64 = 6;

pub fn validate_gallery_settings(settings: &GallerySettings) -> DomainResult<()> {
    if !(1..=MAX_GALLERY_COLUMNS).contains(&settings.columns) {
        return Err(DomainError::MalformedField {
            field: "columns",
            reason: format!("must be between 1 and {}", MAX_GALLERY_COLUMNS),
        });
    }
    if settings.interval_seconds < 1 {
        return Err(DomainError::MalformedField {
            field: "interval_seconds",
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(())
}

pub fn validate_site_setting(setting: &SiteSetting) -> DomainResult<()> {
    require_text("key", &setting.key)
}
