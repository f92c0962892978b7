pub mod entity;
pub mod invariants;

pub use entity::Translation;
pub use invariants::validate_translation;
