use super::entity::{AboutFeature, AboutSection, FooterContent, FooterLink, HomepageContent};
use crate::domain::validation::{
    optional_url, require_email, require_sequence, require_slug, require_text,
};
use crate::domain::DomainResult;

pub fn validate_about_section(section: &AboutSection) -> DomainResult<()> {
    require_text("title", &section.title)?;
    optional_url("image_url", section.image_url.as_deref())?;
    require_sequence("display_order", section.display_order)
}

pub fn validate_about_feature(feature: &AboutFeature) -> DomainResult<()> {
    require_text("title", &feature.title)?;
    require_sequence("display_order", feature.display_order)
}

/// Section keys double as anchors, so they follow the slug format
pub fn validate_homepage_content(content: &HomepageContent) -> DomainResult<()> {
    require_slug("section_key", &content.section_key)?;
    optional_url("image_url", content.image_url.as_deref())?;
    optional_url("cta_url", content.cta_url.as_deref())
}

pub fn validate_footer_content(footer: &FooterContent) -> DomainResult<()> {
    if let Some(email) = footer.email.as_deref().filter(|e| !e.trim().is_empty()) {
        require_email("email", email)?;
    }
    Ok(())
}

pub fn validate_footer_link(link: &FooterLink) -> DomainResult<()> {
    require_text("label", &link.label)?;
    require_text("url", &link.url)?;
    optional_url("url", Some(&link.url))?;
    require_sequence("display_order", link.display_order)
}
