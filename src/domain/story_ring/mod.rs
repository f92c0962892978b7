pub mod entity;
pub mod invariants;

pub use entity::StoryRing;
pub use invariants::validate_story_ring;
