use super::entity::StoryRing;
use crate::domain::validation::{optional_url, require_sequence, require_text};
use crate::domain::DomainResult;

pub fn validate_story_ring(ring: &StoryRing) -> DomainResult<()> {
    require_text("title", &ring.title)?;
    require_text("image_url", &ring.image_url)?;
    optional_url("image_url", Some(&ring.image_url))?;
    optional_url("link_url", ring.link_url.as_deref())?;
    require_sequence("display_order", ring.display_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_requires_image() {
        let mut ring = StoryRing::new("New kits".to_string(), "".to_string());
        ring.display_order = 1;
        assert!(validate_story_ring(&ring).is_err());

        ring.image_url = "https://cdn.example/kits.webp".to_string();
        assert!(validate_story_ring(&ring).is_ok());
    }
}
