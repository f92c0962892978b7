use super::entity::SeoSetting;
use crate::domain::validation::{optional_url, require_text};
use crate::domain::{DomainError, DomainResult};

pub fn validate_seo_setting(setting: &SeoSetting) -> DomainResult<()> {
    if !setting.page_path.starts_with('/') {
        return Err(DomainError::MalformedField {
            field: "page_path",
            reason: format!("'{}' must start with '/'", setting.page_path),
        });
    }
    require_text("title", &setting.title)?;
    if setting.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(DomainError::MalformedField {
            field: "keywords",
            reason: "keywords cannot be blank".to_string(),
        });
    }
    optional_url("og_image_url", setting.og_image_url.as_deref())
}
