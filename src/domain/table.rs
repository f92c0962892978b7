// src/domain/table.rs
//
// The closed set of collections the admin edits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Column holding the display identifier of a product.
pub const DISPLAY_ID_COLUMN: &str = "display_id";

/// Column holding the position of a record in an ordered list.
pub const DISPLAY_ORDER_COLUMN: &str = "display_order";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Products,
    BlogPosts,
    BlogCategories,
    AboutSections,
    AboutFeatures,
    FooterContent,
    FooterLinks,
    HomepageContent,
    DesignOptions,
    DesignTemplates,
    StoryRings,
    Translations,
    SeoSettings,
    ContactMessages,
    GallerySettings,
    JerseyTypes,
    PriceRanges,
    OrderQuantities,
    JerseyColors,
    SiteSettings,
}

impl Table {
    pub const ALL: [Table; 20] = [
        Table::Products,
        Table::BlogPosts,
        Table::BlogCategories,
        Table::AboutSections,
        Table::AboutFeatures,
        Table::FooterContent,
        Table::FooterLinks,
        Table::HomepageContent,
        Table::DesignOptions,
        Table::DesignTemplates,
        Table::StoryRings,
        Table::Translations,
        Table::SeoSettings,
        Table::ContactMessages,
        Table::GallerySettings,
        Table::JerseyTypes,
        Table::PriceRanges,
        Table::OrderQuantities,
        Table::JerseyColors,
        Table::SiteSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Products => "products",
            Table::BlogPosts => "blog_posts",
            Table::BlogCategories => "blog_categories",
            Table::AboutSections => "about_sections",
            Table::AboutFeatures => "about_features",
            Table::FooterContent => "footer_content",
            Table::FooterLinks => "footer_links",
            Table::HomepageContent => "homepage_content",
            Table::DesignOptions => "design_options",
            Table::DesignTemplates => "design_templates",
            Table::StoryRings => "story_rings",
            Table::Translations => "translations",
            Table::SeoSettings => "seo_settings",
            Table::ContactMessages => "contact_messages",
            Table::GallerySettings => "gallery_settings",
            Table::JerseyTypes => "jersey_types",
            Table::PriceRanges => "price_ranges",
            Table::OrderQuantities => "order_quantities",
            Table::JerseyColors => "jersey_colors",
            Table::SiteSettings => "site_settings",
        }
    }

    /// Column carrying the sequential display identifier, if the table has one.
    pub fn sequence_column(&self) -> Option<&'static str> {
        match self {
            Table::Products => Some(DISPLAY_ID_COLUMN),
            Table::BlogCategories
            | Table::AboutSections
            | Table::AboutFeatures
            | Table::FooterLinks
            | Table::DesignOptions
            | Table::DesignTemplates
            | Table::StoryRings
            | Table::JerseyTypes
            | Table::PriceRanges
            | Table::OrderQuantities
            | Table::JerseyColors => Some(DISPLAY_ORDER_COLUMN),
            Table::BlogPosts
            | Table::FooterContent
            | Table::HomepageContent
            | Table::Translations
            | Table::SeoSettings
            | Table::ContactMessages
            | Table::GallerySettings
            | Table::SiteSettings => None,
        }
    }

    /// Tables edited as a single settings row rather than a list.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Table::FooterContent | Table::GallerySettings)
    }

    /// Creation timestamp column, for tables listed newest first.
    pub fn timestamp_column(&self) -> Option<&'static str> {
        match self {
            Table::Products | Table::BlogPosts | Table::ContactMessages => Some("created_at"),
            _ => None,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Table {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .iter()
            .copied()
            .find(|table| table.as_str() == s)
            .ok_or_else(|| DomainError::InvariantViolation(format!("Unknown table '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_every_table_name() {
        for table in Table::ALL {
            assert_eq!(table.as_str().parse::<Table>().unwrap(), table);
        }
    }

    #[test]
    fn test_unknown_table_rejected() {
        assert!("orders".parse::<Table>().is_err());
    }

    #[test]
    fn test_sequence_columns() {
        assert_eq!(Table::Products.sequence_column(), Some("display_id"));
        assert_eq!(Table::FooterLinks.sequence_column(), Some("display_order"));
        assert_eq!(Table::ContactMessages.sequence_column(), None);
    }

    #[test]
    fn test_serde_uses_table_name() {
        let json = serde_json::to_string(&Table::SeoSettings).unwrap();
        assert_eq!(json, "\"seo_settings\"");
    }
}
