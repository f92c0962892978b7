use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// Layout of the product gallery. Edited as a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GallerySettings {
    pub id: Uuid,
    pub columns: i64,
    #[serde(default)]
    pub autoplay: bool,
    pub interval_seconds: i64,
    #[serde(default)]
    pub show_captions: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            columns: 3,
            autoplay: false,
            interval_seconds: 5,
            show_captions: true,
        }
    }
}

/// Free-form key/value switch (maintenance mode, banner text, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSetting {
    pub id: Uuid,
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl SiteSetting {
    pub fn new(key: String, value: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            value,
        }
    }
}

impl TableEntity for GallerySettings {
    const TABLE: Table = Table::GallerySettings;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_gallery_settings(self)
    }
}

impl TableEntity for SiteSetting {
    const TABLE: Table = Table::SiteSettings;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_site_setting(self)
    }
}
