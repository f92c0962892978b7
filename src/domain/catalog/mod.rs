pub mod entity;
pub mod invariants;

pub use entity::{JerseyColor, JerseyType, OrderQuantity, PriceRange};
pub use invariants::{
    validate_jersey_color, validate_jersey_type, validate_order_quantity, validate_price_range,
};
