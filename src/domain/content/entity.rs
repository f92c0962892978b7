// Page copy edited from the content screens: about page, homepage blocks, footer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutSection {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl AboutSection {
    pub fn new(title: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            body,
            image_url: None,
            display_order: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutFeature {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Icon name from the storefront icon set
    pub icon: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl AboutFeature {
    pub fn new(title: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            icon: None,
            display_order: 0,
        }
    }
}

/// One block of the homepage, addressed by `section_key` ("hero", "cta", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageContent {
    pub id: Uuid,
    pub section_key: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub image_url: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
}

impl HomepageContent {
    pub fn new(section_key: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            section_key,
            title: None,
            subtitle: None,
            body: None,
            image_url: None,
            cta_label: None,
            cta_url: None,
        }
    }
}

/// Footer contact block. Edited as a single row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterContent {
    pub id: Uuid,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub copyright: Option<String>,
}

impl Default for FooterContent {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            description: None,
            email: None,
            phone: None,
            address: None,
            copyright: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub id: Uuid,
    pub label: String,
    pub url: String,
    /// Column heading the link is listed under
    pub group: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl FooterLink {
    pub fn new(label: String, url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            url,
            group: None,
            display_order: 0,
        }
    }
}

impl_ordered_entity!(AboutSection, Table::AboutSections, super::validate_about_section);
impl_ordered_entity!(AboutFeature, Table::AboutFeatures, super::validate_about_feature);
impl_ordered_entity!(FooterLink, Table::FooterLinks, super::validate_footer_link);

impl TableEntity for HomepageContent {
    const TABLE: Table = Table::HomepageContent;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_homepage_content(self)
    }
}

impl TableEntity for FooterContent {
    const TABLE: Table = Table::FooterContent;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_footer_content(self)
    }
}
