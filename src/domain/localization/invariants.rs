use super::entity::Translation;
use crate::domain::validation::{require_language, require_text};
use crate::domain::DomainResult;

pub fn validate_translation(translation: &Translation) -> DomainResult<()> {
    require_text("key", &translation.key)?;
    require_language("language", &translation.language)?;
    Ok(())
}
