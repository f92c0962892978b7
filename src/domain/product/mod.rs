pub mod entity;
pub mod invariants;

pub use entity::Product;
pub use invariants::validate_product;
