// src/domain/validation.rs
//
// Field checks shared by the entity invariants.

use regex::Regex;
use std::sync::OnceLock;

use super::{DomainError, DomainResult};

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap())
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn language_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z]{2}(?:-[A-Z]{2})?$").unwrap())
}

fn hex_color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap())
}

pub(crate) fn require_text(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingField { field });
    }
    Ok(())
}

pub(crate) fn require_slug(field: &'static str, value: &str) -> DomainResult<()> {
    require_text(field, value)?;
    if !slug_pattern().is_match(value) {
        return Err(DomainError::MalformedField {
            field,
            reason: "use lowercase letters, digits and single dashes".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn require_email(field: &'static str, value: &str) -> DomainResult<()> {
    require_text(field, value)?;
    if !email_pattern().is_match(value.trim()) {
        return Err(DomainError::MalformedField {
            field,
            reason: format!("'{}' is not an email address", value),
        });
    }
    Ok(())
}

pub(crate) fn require_language(field: &'static str, value: &str) -> DomainResult<()> {
    if !language_pattern().is_match(value) {
        return Err(DomainError::MalformedField {
            field,
            reason: format!("'{}' is not a language tag like 'en' or 'en-US'", value),
        });
    }
    Ok(())
}

pub(crate) fn require_hex_color(field: &'static str, value: &str) -> DomainResult<()> {
    if !hex_color_pattern().is_match(value) {
        return Err(DomainError::MalformedField {
            field,
            reason: format!("'{}' is not a #RRGGBB color", value),
        });
    }
    Ok(())
}

/// Sequence columns start at 1 once a record is written.
pub(crate) fn require_sequence(field: &'static str, value: i64) -> DomainResult<()> {
    if value < 1 {
        return Err(DomainError::MalformedField {
            field,
            reason: format!("must be at least 1, got {}", value),
        });
    }
    Ok(())
}

pub(crate) fn optional_url(field: &'static str, value: Option<&str>) -> DomainResult<()> {
    if let Some(url) = value {
        let url = url.trim();
        let looks_valid = url.starts_with("https://")
            || url.starts_with("http://")
            || url.starts_with('/')
            || url.starts_with("mailto:")
            || url.starts_with("tel:");
        if !looks_valid {
            return Err(DomainError::MalformedField {
                field,
                reason: format!("'{}' is not a link", url),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert!(require_slug("slug", "summer-sale-2024").is_ok());
        assert!(require_slug("slug", "Summer Sale").is_err());
        assert!(require_slug("slug", "double--dash").is_err());
        assert!(require_slug("slug", "").is_err());
    }

    #[test]
    fn test_email() {
        assert!(require_email("email", "team@example.com").is_ok());
        assert!(require_email("email", "not-an-email").is_err());
    }

    #[test]
    fn test_language() {
        assert!(require_language("language", "en").is_ok());
        assert!(require_language("language", "pt-BR").is_ok());
        assert!(require_language("language", "english").is_err());
    }

    #[test]
    fn test_hex_color() {
        assert!(require_hex_color("hex_code", "#1A2b3C").is_ok());
        assert!(require_hex_color("hex_code", "1A2B3C").is_err());
    }

    #[test]
    fn test_urls() {
        assert!(optional_url("url", Some("https://shop.example")).is_ok());
        assert!(optional_url("url", Some("/about")).is_ok());
        assert!(optional_url("url", Some("javascript:alert(1)")).is_err());
        assert!(optional_url("url", None).is_ok());
    }
}
