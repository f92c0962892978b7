use super::entity::Product;
use crate::domain::validation::{optional_url, require_sequence, require_text};
use crate::domain::{DomainError, DomainResult};

/// Validates all Product invariants
pub fn validate_product(product: &Product) -> DomainResult<()> {
    require_text("name", &product.name)?;
    require_sequence("display_id", product.display_id)?;
    validate_price(product.price)?;
    optional_url("image_url", product.image_url.as_deref())?;
    Ok(())
}

fn validate_price(price: Option<f64>) -> DomainResult<()> {
    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::MalformedField {
                field: "price",
                reason: format!("{} is not a valid price", price),
            });
        }
    }
    Ok(())
}

/// Invariants that must hold true for Product:
///
/// 1. Name cannot be empty
/// 2. display_id is allocated (>= 1) before the product is written
/// 3. display_id is unique within products and never reused
/// 4. Price, when set, is a finite non-negative amount
