// src/domain/mod.rs
//
// Domain Root
//
// Declares every storefront entity and re-exports the public API.
// Other modules import from `crate::domain::*`.

/// Implements `TableEntity` for a record ordered by `display_order`.
macro_rules! impl_ordered_entity {
    ($entity:ty, $table:expr, $validator:path) => {
        impl $crate::domain::TableEntity for $entity {
            const TABLE: $crate::domain::Table = $table;

            fn id(&self) -> uuid::Uuid {
                self.id
            }

            fn validate(&self) -> $crate::domain::DomainResult<()> {
                $validator(self)
            }

            fn sequence_value(&self) -> Option<i64> {
                Some(self.display_order)
            }

            fn assign_sequence(&mut self, value: i64) {
                self.display_order = value;
            }
        }
    };
}

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod blog;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod design;
pub mod localization;
pub mod product;
pub mod record;
pub mod seo;
pub mod settings;
pub mod story_ring;
pub mod table;
pub(crate) mod validation;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use blog::{validate_blog_category, validate_blog_post, BlogCategory, BlogPost};
pub use catalog::{
    validate_jersey_color, validate_jersey_type, validate_order_quantity, validate_price_range,
    JerseyColor, JerseyType, OrderQuantity, PriceRange,
};
pub use contact::{validate_contact_message, ContactMessage};
pub use content::{
    validate_about_feature, validate_about_section, validate_footer_content,
    validate_footer_link, validate_homepage_content, AboutFeature, AboutSection, FooterContent,
    FooterLink, HomepageContent,
};
pub use design::{validate_design_option, validate_design_template, DesignOption, DesignTemplate};
pub use localization::{validate_translation, Translation};
pub use product::{validate_product, Product};
pub use record::{from_record, sequence_number, to_record, Record, ID_COLUMN};
pub use seo::{validate_seo_setting, SeoSetting};
pub use settings::{validate_gallery_settings, validate_site_setting, GallerySettings, SiteSetting};
pub use story_ring::{validate_story_ring, StoryRing};
pub use table::{Table, DISPLAY_ID_COLUMN, DISPLAY_ORDER_COLUMN};

// ============================================================================
// ENTITY CONTRACT
// ============================================================================

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// A typed row of one collection.
///
/// Entities carrying a sequence column expose it through `sequence_value`
/// and accept a freshly allocated value through `assign_sequence`.
pub trait TableEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TABLE: Table;

    fn id(&self) -> Uuid;

    fn validate(&self) -> DomainResult<()>;

    fn sequence_value(&self) -> Option<i64> {
        None
    }

    fn assign_sequence(&mut self, _value: i64) {}

    /// Refresh the modification timestamp, for entities that keep one.
    fn touch(&mut self) {}
}

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Violations of the rules a record must satisfy before it is written.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Field '{field}' is required")]
    MissingField { field: &'static str },

    #[error("Field '{field}' is malformed: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
