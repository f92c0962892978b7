pub mod entity;
pub mod invariants;

pub use entity::{AboutFeature, AboutSection, FooterContent, FooterLink, HomepageContent};
pub use invariants::{
    validate_about_feature, validate_about_section, validate_footer_content, validate_footer_link,
    validate_homepage_content,
};
