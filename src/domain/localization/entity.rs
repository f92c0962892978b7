use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// One translated string: `key` in `language`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,
    pub key: String,
    pub language: String,
    #[serde(default)]
    pub value: String,
}

impl Translation {
    pub fn new(key: String, language: String, value: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            key,
            language,
            value,
        }
    }
}

impl TableEntity for Translation {
    const TABLE: Table = Table::Translations;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_translation(self)
    }
}
