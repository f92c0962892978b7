// src/services/blog_service.rs
//
// Blog screen: publishing workflow on top of the generic editor.

use uuid::Uuid;

use crate::domain::BlogPost;
use crate::error::{AppError, AppResult};
use crate::events::Operation;
use crate::services::collection_editor::CollectionEditor;

impl CollectionEditor<BlogPost> {
    pub async fn publish(&mut self, post_id: Uuid) -> AppResult<()> {
        let Some(mut post) = self.find(post_id).cloned() else {
            return Err(self.fail(Operation::Update, AppError::NotFound));
        };
        post.publish();
        self.update(post).await
    }

    pub async fn unpublish(&mut self, post_id: Uuid) -> AppResult<()> {
        let Some(mut post) = self.find(post_id).cloned() else {
            return Err(self.fail(Operation::Update, AppError::NotFound));
        };
        post.unpublish();
        self.update(post).await
    }

    pub fn published(&self) -> impl Iterator<Item = &BlogPost> {
        self.records().iter().filter(|p| p.published)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&BlogPost> {
        self.records().iter().find(|p| p.slug == slug)
    }
}
