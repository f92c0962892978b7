// src/services/product_service.rs
//
// Product screen: the generic editor plus image handling.

use uuid::Uuid;

use crate::domain::Product;
use crate::error::{AppError, AppResult};
use crate::events::Operation;
use crate::services::collection_editor::CollectionEditor;
use crate::services::media_service::{MediaFile, MediaService};

/// Storage folder for product images.
pub const PRODUCT_IMAGE_FOLDER: &str = "products";

impl CollectionEditor<Product> {
    pub fn find_by_display_id(&self, display_id: i64) -> Option<&Product> {
        self.records().iter().find(|p| p.display_id == display_id)
    }

    /// Upload an image and point the product at it.
    ///
    /// The product keeps its old image when either step fails.
    pub async fn attach_image(
        &mut self,
        media: &MediaService,
        product_id: Uuid,
        file: MediaFile,
    ) -> AppResult<Product> {
        let Some(product) = self.find(product_id).cloned() else {
            return Err(self.fail(Operation::Upload, AppError::NotFound));
        };

        let url = media.upload(PRODUCT_IMAGE_FOLDER, file).await?;

        let mut updated = product;
        updated.image_url = Some(url);
        self.update(updated).await?;

        self.find(product_id).cloned().ok_or(AppError::NotFound)
    }
}
