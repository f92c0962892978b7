// Lookup lists offered in the order form: jersey types, colors, price bands
// and quantity tiers. All of them are ordered by `display_order`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JerseyType {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub display_order: i64,
}

impl JerseyType {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            display_order: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JerseyColor {
    pub id: Uuid,
    pub name: String,
    /// `#RRGGBB`
    pub hex_code: String,
    #[serde(default)]
    pub display_order: i64,
}

impl JerseyColor {
    pub fn new(name: String, hex_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            hex_code,
            display_order: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub id: Uuid,
    pub label: String,
    #[serde(default)]
    pub min_price: f64,
    /// Open-ended when absent
    pub max_price: Option<f64>,
    #[serde(default)]
    pub display_order: i64,
}

impl PriceRange {
    pub fn new(label: String, min_price: f64, max_price: Option<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            min_price,
            max_price,
            display_order: 0,
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min_price && self.max_price.map_or(true, |max| price <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderQuantity {
    pub id: Uuid,
    pub label: String,
    pub min_quantity: i64,
    pub max_quantity: Option<i64>,
    #[serde(default)]
    pub display_order: i64,
}

impl OrderQuantity {
    pub fn new(label: String, min_quantity: i64, max_quantity: Option<i64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            min_quantity,
            max_quantity,
            display_order: 0,
        }
    }
}

impl_ordered_entity!(JerseyType, Table::JerseyTypes, super::validate_jersey_type);
impl_ordered_entity!(JerseyColor, Table::JerseyColors, super::validate_jersey_color);
impl_ordered_entity!(PriceRange, Table::PriceRanges, super::validate_price_range);
impl_ordered_entity!(OrderQuantity, Table::OrderQuantities, super::validate_order_quantity);
