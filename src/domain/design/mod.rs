pub mod entity;
pub mod invariants;

pub use entity::{DesignOption, DesignTemplate};
pub use invariants::{validate_design_option, validate_design_template};
