// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are caller-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::db::DatabaseStats;
use crate::domain::{ContactMessage, Product, Table};
use crate::services::Notification;

// ============================================================================
// PRODUCT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: String,
    pub display_id: i64,
    pub label: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            display_id: product.display_id,
            label: product.label(),
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category,
            image_url: product.image_url,
            is_active: product.is_active,
            created_at: product.created_at.to_rfc3339(),
            updated_at: product.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

/// Fields left `None` keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductDto {
    pub product: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub is_active: Option<bool>,
}

// ============================================================================
// INBOX DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessageDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub received_at: String,
}

impl From<ContactMessage> for ContactMessageDto {
    fn from(message: ContactMessage) -> Self {
        Self {
            id: message.id.to_string(),
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            is_read: message.is_read,
            received_at: message.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxDto {
    pub unread_count: usize,
    pub messages: Vec<ContactMessageDto>,
}

// ============================================================================
// SEQUENCE & DATABASE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceDto {
    pub table: Table,
    pub column: String,
    pub next_value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCountDto {
    pub table: Table,
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseStatsDto {
    pub path: String,
    pub size_bytes: i64,
    pub tables: Vec<TableCountDto>,
}

impl DatabaseStatsDto {
    pub fn new(path: String, stats: DatabaseStats) -> Self {
        Self {
            path,
            size_bytes: stats.size_bytes,
            tables: stats
                .row_counts
                .into_iter()
                .map(|(table, rows)| TableCountDto { table, rows })
                .collect(),
        }
    }
}

// ============================================================================
// COMMAND OUTPUT
// ============================================================================

/// What a command returns to its caller, plus the notifications it raised.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    pub result: T,
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_dto_carries_label() {
        let mut product = Product::new("Retro kit".to_string());
        product.display_id = 12;

        let dto = ProductDto::from(product);
        assert_eq!(dto.label, "Product #12");
        assert_eq!(dto.display_id, 12);
    }

    #[test]
    fn test_message_dto() {
        let message = ContactMessage::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "Hello".to_string(),
        );
        let id = message.id.to_string();

        let dto = ContactMessageDto::from(message);
        assert_eq!(dto.id, id);
        assert!(!dto.is_read);
    }
}
