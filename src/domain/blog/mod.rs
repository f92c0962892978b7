pub mod entity;
pub mod invariants;

pub use entity::{BlogCategory, BlogPost};
pub use invariants::{validate_blog_category, validate_blog_post};
