use super::entity::{JerseyColor, JerseyType, OrderQuantity, PriceRange};
use crate::domain::validation::{require_hex_color, require_sequence, require_text};
use crate::domain::{DomainError, DomainResult};

pub fn validate_jersey_type(jersey_type: &JerseyType) -> DomainResult<()> {
    require_text("name", &jersey_type.name)?;
    require_sequence("display_order", jersey_type.display_order)
}

pub fn validate_jersey_color(color: &JerseyColor) -> DomainResult<()> {
    require_text("name", &color.name)?;
    require_hex_color("hex_code", &color.hex_code)?;
    require_sequence("display_order", color.display_order)
}

pub fn validate_price_range(range: &PriceRange) -> DomainResult<()> {
    require_text("label", &range.label)?;
    if !range.min_price.is_finite() || range.min_price < 0.0 {
        return Err(DomainError::MalformedField {
            field: "min_price",
            reason: format!("{} is not a valid price", range.min_price),
        });
    }
    if let Some(max) = range.max_price {
        if !max.is_finite() || max < range.min_price {
            return Err(DomainError::InvariantViolation(format!(
                "Price range upper bound {} is below lower bound {}",
                max, range.min_price
            )));
        }
    }
    require_sequence("display_order", range.display_order)
}

pub fn validate_order_quantity(quantity: &OrderQuantity) -> DomainResult<()> {
    require_text("label", &quantity.label)?;
    if quantity.min_quantity < 1 {
        return Err(DomainError::MalformedField {
            field: "min_quantity",
            reason: "must be at least 1".to_string(),
        });
    }
    if let Some(max) = quantity.max_quantity {
        if max < quantity.min_quantity {
            return Err(DomainError::InvariantViolation(format!(
                "Quantity tier upper bound {} is below lower bound {}",
                max, quantity.min_quantity
            )));
        }
    }
    require_sequence("display_order", quantity.display_order)
}
