pub mod entity;
pub mod invariants;

pub use entity::ContactMessage;
pub use invariants::validate_contact_message;
