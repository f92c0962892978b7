// src/application/commands/product_commands.rs
//
// Product Command Handlers
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use std::path::PathBuf;
use uuid::Uuid;

use crate::application::{
    commands::record_commands::parse_id, dto::*, error_handling::ToErrorResponse,
    state::AdminState,
};
use crate::domain::Product;
use crate::error::{AppError, AppResult};
use crate::services::{CollectionEditor, MediaFile};

/// A product is addressed either by its id or by its display number
/// (`7` or `#7`).
fn resolve_product(editor: &CollectionEditor<Product>, reference: &str) -> AppResult<Uuid> {
    let trimmed = reference.trim();
    if let Ok(display_id) = trimmed.trim_start_matches('#').parse::<i64>() {
        return editor
            .find_by_display_id(display_id)
            .map(|p| p.id)
            .ok_or(AppError::NotFound);
    }

    let id = parse_id(trimmed)?;
    editor.find(id).map(|p| p.id).ok_or(AppError::NotFound)
}

/// List all products in display order
pub async fn list_products(state: &AdminState) -> Result<Vec<ProductDto>, String> {
    let result: AppResult<Vec<ProductDto>> = async {
        let editor = state.open::<Product>().await?;
        Ok(editor.records().iter().cloned().map(ProductDto::from).collect())
    }
    .await;
    result.to_error_response()
}

/// Create a new product; it receives the next display number
pub async fn create_product(
    state: &AdminState,
    dto: CreateProductDto,
) -> Result<ProductDto, String> {
    let result: AppResult<ProductDto> = async {
        let mut editor = state.open::<Product>().await?;

        let mut product = Product::new(dto.name);
        product.description = dto.description;
        product.price = dto.price;
        product.category = dto.category;

        let created = editor.create(product).await?;
        Ok(ProductDto::from(created))
    }
    .await;
    result.to_error_response()
}

/// Update product fields
pub async fn update_product(
    state: &AdminState,
    dto: UpdateProductDto,
) -> Result<ProductDto, String> {
    let result: AppResult<ProductDto> = async {
        let mut editor = state.open::<Product>().await?;
        let id = resolve_product(&editor, &dto.product)?;
        let mut product = editor.find(id).cloned().ok_or(AppError::NotFound)?;

        if let Some(name) = dto.name {
            product.name = name;
        }
        if let Some(description) = dto.description {
            product.description = Some(description);
        }
        if let Some(price) = dto.price {
            product.price = Some(price);
        }
        if let Some(category) = dto.category {
            product.category = Some(category);
        }
        if let Some(is_active) = dto.is_active {
            product.is_active = is_active;
        }

        editor.update(product).await?;
        editor
            .find(id)
            .cloned()
            .map(ProductDto::from)
            .ok_or(AppError::NotFound)
    }
    .await;
    result.to_error_response()
}

/// Delete a product. Its display number is not handed out again by the same
/// session; a later command rescans, so deleting the highest product frees
/// its number.
pub async fn delete_product(state: &AdminState, product: String) -> Result<(), String> {
    let result: AppResult<()> = async {
        let mut editor = state.open::<Product>().await?;
        let id = resolve_product(&editor, &product)?;
        editor.delete(id).await
    }
    .await;
    result.to_error_response()
}

/// Upload an image file from disk and attach it to a product
pub async fn upload_product_image(
    state: &AdminState,
    product: String,
    file: PathBuf,
) -> Result<ProductDto, String> {
    let result: AppResult<ProductDto> = async {
        let mut editor = state.open::<Product>().await?;
        let id = resolve_product(&editor, &product)?;
        let media_file = MediaFile::from_path(&file).await?;

        let updated = editor.attach_image(&state.media, id, media_file).await?;
        Ok(ProductDto::from(updated))
    }
    .await;
    result.to_error_response()
}
