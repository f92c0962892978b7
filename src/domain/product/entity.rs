use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// A catalog product.
///
/// `display_id` is the human-facing number shown as "Product #7"; `id` is the
/// opaque key used for lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,

    /// Sequential display identifier, 0 until allocated
    #[serde(default)]
    pub display_id: i64,

    pub name: String,

    pub description: Option<String>,

    /// Unit price in the shop currency
    pub price: Option<f64>,

    pub category: Option<String>,

    pub image_url: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Product {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            display_id: 0,
            name,
            description: None,
            price: None,
            category: None,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// "Product #7"
    pub fn label(&self) -> String {
        format!("Product #{}", self.display_id)
    }
}

impl TableEntity for Product {
    const TABLE: Table = Table::Products;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_product(self)
    }

    fn sequence_value(&self) -> Option<i64> {
        Some(self.display_id)
    }

    fn assign_sequence(&mut self, value: i64) {
        self.display_id = value;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
