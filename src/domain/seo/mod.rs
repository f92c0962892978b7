pub mod entity;
pub mod invariants;

pub use entity::SeoSetting;
pub use invariants::validate_seo_setting;
