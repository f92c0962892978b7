use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Table;

/// A customization choice shown in the jersey designer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignOption {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl DesignOption {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description: None,
            image_url: None,
            display_order: 0,
        }
    }
}

/// A ready-made layout, optionally tied to one design option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignTemplate {
    pub id: Uuid,
    pub name: String,
    pub design_option_id: Option<Uuid>,
    pub preview_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

impl DesignTemplate {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            design_option_id: None,
            preview_url: None,
            display_order: 0,
        }
    }
}

impl_ordered_entity!(DesignOption, Table::DesignOptions, super::validate_design_option);
impl_ordered_entity!(DesignTemplate, Table::DesignTemplates, super::validate_design_template);
