pub mod entity;
pub mod invariants;

pub use entity::{GallerySettings, SiteSetting};
pub use invariants::{validate_gallery_settings, validate_site_setting};
