use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainResult, Table, TableEntity};

/// A message sent through the storefront contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            subject: None,
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

impl TableEntity for ContactMessage {
    const TABLE: Table = Table::ContactMessages;

    fn id(&self) -> Uuid {
        self.id
    }

    fn validate(&self) -> DomainResult<()> {
        super::validate_contact_message(self)
    }
}
