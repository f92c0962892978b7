use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// An article shown on the storefront blog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub cover_image_url: Option<String>,
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn new(title: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            excerpt: None,
            content: String::new(),
            cover_image_url: None,
            category_id: None,
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the post visible. The first publication date is kept on re-publish.
    pub fn publish(&mut self) {
        self.published = true;
        if self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }

    pub fn unpublish(&mut self) {
        self.published = false;
        self.updated_at = Utc::now();
    }
}

impl TableEntity for BlogPost {
    const TABLE: Table = Table::BlogPosts;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_blog_post(self)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub display_order: i64,
}

impl BlogCategory {
    pub fn new(name: String, slug: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            slug,
            display_order: 0,
        }
    }
}

impl_ordered_entity!(BlogCategory, Table::BlogCategories, super::validate_blog_category);
