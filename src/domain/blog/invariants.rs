use super::entity::{BlogCategory, BlogPost};
use crate::domain::validation::{optional_url, require_sequence, require_slug, require_text};
use crate::domain::{DomainError, DomainResult};

pub fn validate_blog_post(post: &BlogPost) -> DomainResult<()> {
    require_text("title", &post.title)?;
    require_slug("slug", &post.slug)?;
    optional_url("cover_image_url", post.cover_image_url.as_deref())?;

    if post.published && post.published_at.is_none() {
        return Err(DomainError::InvariantViolation(
            "Published post must carry a publication date".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_blog_category(category: &BlogCategory) -> DomainResult<()> {
    require_text("name", &category.name)?;
    require_slug("slug", &category.slug)?;
    require_sequence("display_order", category.display_order)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let post = BlogPost::new("Kit launch".to_string(), "kit-launch".to_string());
        assert!(validate_blog_post(&post).is_ok());
    }

    #[test]
    fn test_bad_slug_fails() {
        let post = BlogPost::new("Kit launch".to_string(), "Kit Launch!".to_string());
        assert!(validate_blog_post(&post).is_err());
    }

    #[test]
    fn test_publish_sets_date_once() {
        let mut post = BlogPost::new("Kit launch".to_string(), "kit-launch".to_string());
        post.publish();
        let first = post.published_at;
        assert!(first.is_some());

        post.unpublish();
        post.publish();
        assert_eq!(post.published_at, first);
        assert!(validate_blog_post(&post).is_ok());
    }

    #[test]
    fn test_published_without_date_fails() {
        let mut post = BlogPost::new("Kit launch".to_string(), "kit-launch".to_string());
        post.published = true;
        assert!(validate_blog_post(&post).is_err());
    }

    #[test]
    fn test_category_needs_order() {
        let mut category = BlogCategory::new("News".to_string(), "news".to_string());
        assert!(validate_blog_category(&category).is_err());
        category.display_order = 1;
        assert!(validate_blog_category(&category).is_ok());
    }
}
