use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Table;

/// A circular "story" thumbnail in the homepage carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryRing {
    pub id: Uuid,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i64,
}

fn default_active() -> bool {
    true
}

impl StoryRing {
    pub fn new(title: String, image_url: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            image_url,
            link_url: None,
            is_active: true,
            display_order: 0,
        }
    }
}

impl_ordered_entity!(StoryRing, Table::StoryRings, super::validate_story_ring);
