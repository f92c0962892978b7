use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// Meta tags for one storefront page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoSetting {
    pub id: Uuid,
    /// Route the tags apply to, e.g. `/products`
    pub page_path: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub og_image_url: Option<String>,
}

impl SeoSetting {
    pub fn new(page_path: String, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            page_path,
            title,
            description: None,
            keywords: Vec::new(),
            og_image_url: None,
        }
    }
}

impl TableEntity for SeoSetting {
    const TABLE: Table = Table::SeoSettings;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_seo_setting(self)
    }
}
