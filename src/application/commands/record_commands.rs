// src/application/commands/record_commands.rs
//
// Table-generic commands. The table is chosen at runtime, so each call is
// dispatched to the typed editor of that table.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::application::{dto::*, error_handling::ToErrorResponse, state::AdminState};
use crate::domain::*;
use crate::error::{AppError, AppResult};
use crate::services::SequentialIdAllocator;

/// Run `$body` with `$entity` bound to the entity type of `$table`.
macro_rules! with_entity {
    ($table:expr, $entity:ident => $body:expr) => {
        match $table {
            Table::Products => { type $entity = Product; $body }
            Table::BlogPosts => { type $entity = BlogPost; $body }
            Table::BlogCategories => { type $entity = BlogCategory; $body }
            Table::AboutSections => { type $entity = AboutSection; $body }
            Table::AboutFeatures => { type $entity = AboutFeature; $body }
            Table::FooterContent => { type $entity = FooterContent; $body }
            Table::FooterLinks => { type $entity = FooterLink; $body }
            Table::HomepageContent => { type $entity = HomepageContent; $body }
            Table::DesignOptions => { type $entity = DesignOption; $body }
            Table::DesignTemplates => { type $entity = DesignTemplate; $body }
            Table::StoryRings => { type $entity = StoryRing; $body }
            Table::Translations => { type $entity = Translation; $body }
            Table::SeoSettings => { type $entity = SeoSetting; $body }
            Table::ContactMessages => { type $entity = ContactMessage; $body }
            Table::GallerySettings => { type $entity = GallerySettings; $body }
            Table::JerseyTypes => { type $entity = JerseyType; $body }
            Table::PriceRanges => { type $entity = PriceRange; $body }
            Table::OrderQuantities => { type $entity = OrderQuantity; $body }
            Table::JerseyColors => { type $entity = JerseyColor; $body }
            Table::SiteSettings => { type $entity = SiteSetting; $body }
        }
    };
}

pub(crate) fn parse_table(name: &str) -> AppResult<Table> {
    Ok(name.parse::<Table>()?)
}

pub(crate) fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id.trim())
        .map_err(|e| AppError::Validation(format!("Invalid id '{}': {}", id, e)))
}

fn to_values<T: Serialize>(records: &[T]) -> AppResult<Vec<Value>> {
    records
        .iter()
        .map(|r| serde_json::to_value(r).map_err(AppError::from))
        .collect()
}

async fn list(state: &AdminState, table: Table) -> AppResult<Vec<Value>> {
    with_entity!(table, E => {
        let editor = state.open::<E>().await?;
        to_values(editor.records())
    })
}

async fn get(state: &AdminState, table: Table, id: Uuid) -> AppResult<Option<Value>> {
    with_entity!(table, E => {
        let editor = state.open::<E>().await?;
        match editor.get(id).await? {
            Some(record) => Ok(Some(serde_json::to_value(record)?)),
            None => Ok(None),
        }
    })
}

async fn delete(state: &AdminState, table: Table, id: Uuid) -> AppResult<()> {
    with_entity!(table, E => {
        let mut editor = state.open::<E>().await?;
        if editor.find(id).is_none() {
            return Err(AppError::NotFound);
        }
        editor.delete(id).await
    })
}

async fn next_sequence(state: &AdminState, table: Table) -> AppResult<SequenceDto> {
    crate::services::require_session(state.backend.as_ref()).await?;

    let mut allocator = SequentialIdAllocator::new(state.backend.clone(), table)?;
    let next_value = allocator.initialize().await?;

    Ok(SequenceDto {
        table,
        column: allocator.column().to_string(),
        next_value,
    })
}

/// List every record of a table in screen order
pub async fn list_records(state: &AdminState, table: String) -> Result<Vec<Value>, String> {
    let result = async { list(state, parse_table(&table)?).await }.await;
    result.to_error_response()
}

/// Get a single record by id
pub async fn get_record(
    state: &AdminState,
    table: String,
    id: String,
) -> Result<Option<Value>, String> {
    let result = async { get(state, parse_table(&table)?, parse_id(&id)?).await }.await;
    result.to_error_response()
}

/// Delete a record by id
pub async fn delete_record(state: &AdminState, table: String, id: String) -> Result<(), String> {
    let result = async { delete(state, parse_table(&table)?, parse_id(&id)?).await }.await;
    result.to_error_response()
}

/// Next display identifier / position a creation in `table` would receive
pub async fn get_next_sequence(state: &AdminState, table: String) -> Result<SequenceDto, String> {
    let result = async { next_sequence(state, parse_table(&table)?).await }.await;
    result.to_error_response()
}
