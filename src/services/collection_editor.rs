// src/services/collection_editor.rs
//
// Collection Editor - one admin screen over one table
//
// RESPONSIBILITIES:
// - Hold the local list of records shown on the screen
// - Drive the sequence allocator for tables that carry a sequence column
// - Validate before any remote call
// - Apply a mutation locally ONLY after the backend accepted it
// - Report every failure (log + OperationFailed) and leave local state as it was

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{from_record, to_record, Record, Table, TableEntity, ID_COLUMN};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, Operation, OperationFailed, RecordCreated, RecordDeleted, RecordUpdated,
    SequenceInitialized,
};
use crate::persistence::{Filter, Order, PersistenceLayer, Query};
use crate::services::sequence_allocator::SequentialIdAllocator;

/// Listing order of a table: by position when it has one, newest first when
/// it is timestamped, storage order otherwise.
pub fn default_query(table: Table) -> Query {
    if let Some(column) = table.sequence_column() {
        Query::all().order_by(Order::asc(column))
    } else if let Some(column) = table.timestamp_column() {
        Query::all().order_by(Order::desc(column))
    } else {
        Query::all()
    }
}

/// Decode rows returned by the backend.
pub(crate) fn decode_rows<T: TableEntity>(rows: Vec<Record>) -> AppResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            from_record::<T>(row)
                .map_err(|e| AppError::Other(format!("{}: {}", T::TABLE, e)))
        })
        .collect()
}

pub struct CollectionEditor<T: TableEntity> {
    backend: Arc<dyn PersistenceLayer>,
    event_bus: Arc<EventBus>,
    allocator: Option<SequentialIdAllocator>,
    records: Vec<T>,
}

impl<T: TableEntity> CollectionEditor<T> {
    /// Load the screen.
    ///
    /// Fails only when the list cannot be loaded. A failed sequence scan is
    /// reported and leaves creation disabled until `refresh` succeeds.
    pub async fn open(
        backend: Arc<dyn PersistenceLayer>,
        event_bus: Arc<EventBus>,
    ) -> AppResult<Self> {
        let allocator = match T::TABLE.sequence_column() {
            Some(_) => Some(SequentialIdAllocator::new(backend.clone(), T::TABLE)?),
            None => None,
        };

        let mut editor = Self {
            backend,
            event_bus,
            allocator,
            records: Vec::new(),
        };

        editor.refresh().await?;
        Ok(editor)
    }

    pub fn table(&self) -> Table {
        T::TABLE
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn find(&self, id: Uuid) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Next sequence value a creation would receive, if the table has one and
    /// the last scan succeeded.
    pub fn next_sequence(&self) -> Option<i64> {
        self.allocator.as_ref().and_then(|a| a.peek())
    }

    /// Reload the list and rescan the sequence.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let rows = match self.backend.select(T::TABLE, default_query(T::TABLE)).await {
            Ok(rows) => rows,
            Err(e) => return Err(self.fail(Operation::Load, e)),
        };
        let records = match decode_rows::<T>(rows) {
            Ok(records) => records,
            Err(e) => return Err(self.fail(Operation::Load, e)),
        };
        self.records = records;
        log::debug!("Loaded {} record(s) from {}", self.records.len(), T::TABLE);

        if let Some(allocator) = self.allocator.as_mut() {
            match allocator.initialize().await {
                Ok(next) => self
                    .event_bus
                    .emit(SequenceInitialized::new(T::TABLE, next)),
                Err(e) => {
                    self.fail(Operation::Load, e);
                }
            }
        }

        Ok(())
    }

    /// Create a record, assigning the next sequence value when the table has one.
    pub async fn create(&mut self, mut entity: T) -> AppResult<T> {
        if let Some(allocator) = self.allocator.as_mut() {
            match allocator.allocate() {
                Ok(value) => entity.assign_sequence(value),
                Err(e) => return Err(self.fail(Operation::Create, e)),
            }
        }

        let result = self.insert_one(&entity).await;

        if let Some(allocator) = self.allocator.as_mut() {
            match &result {
                Ok(_) => allocator.on_create_success(),
                Err(e) => allocator.on_create_failure(e),
            }
        }

        let created = match result {
            Ok(created) => created,
            Err(e) => return Err(self.fail(Operation::Create, e)),
        };

        log::info!("Created {} record {}", T::TABLE, created.id());
        self.event_bus.emit(RecordCreated::new(
            T::TABLE,
            created.id(),
            created.sequence_value(),
        ));
        self.records.push(created.clone());
        Ok(created)
    }

    async fn insert_one(&self, entity: &T) -> AppResult<T> {
        entity.validate()?;
        let record = to_record(entity)?;

        let stored = self
            .backend
            .insert(T::TABLE, vec![record])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::Other(format!("{}: backend returned no row for insert", T::TABLE))
            })?;

        decode_rows::<T>(vec![stored])?
            .pop()
            .ok_or_else(|| AppError::Other(format!("{}: empty insert result", T::TABLE)))
    }

    /// Save changes to a record already on the screen.
    pub async fn update(&mut self, mut entity: T) -> AppResult<()> {
        let id = entity.id();
        let Some(position) = self.records.iter().position(|r| r.id() == id) else {
            return Err(self.fail(Operation::Update, AppError::NotFound));
        };

        entity.touch();
        let result = self.write_patch(&entity).await;
        if let Err(e) = result {
            return Err(self.fail(Operation::Update, e));
        }

        log::info!("Updated {} record {}", T::TABLE, id);
        self.event_bus.emit(RecordUpdated::new(T::TABLE, id));
        self.records[position] = entity;
        Ok(())
    }

    async fn write_patch(&self, entity: &T) -> AppResult<()> {
        entity.validate()?;
        let mut patch = to_record(entity)?;
        patch.remove(ID_COLUMN);

        self.backend
            .update(T::TABLE, patch, Filter::by_id(entity.id()))
            .await
    }

    /// Delete a record. The sequence is left alone, so this editor never hands
    /// the number out again; a `refresh` rescans and may.
    pub async fn delete(&mut self, id: Uuid) -> AppResult<()> {
        if let Err(e) = self.backend.delete(T::TABLE, Filter::by_id(id)).await {
            return Err(self.fail(Operation::Delete, e));
        }

        log::info!("Deleted {} record {}", T::TABLE, id);
        self.event_bus.emit(RecordDeleted::new(T::TABLE, id));
        self.records.retain(|r| r.id() != id);
        Ok(())
    }

    /// Fetch one record straight from the backend.
    pub async fn get(&self, id: Uuid) -> AppResult<Option<T>> {
        let query = Query::all().filter(Filter::by_id(id)).limit(1);
        let rows = match self.backend.select(T::TABLE, query).await {
            Ok(rows) => rows,
            Err(e) => return Err(self.fail(Operation::Load, e)),
        };

        match decode_rows::<T>(rows) {
            Ok(mut records) => Ok(records.pop()),
            Err(e) => Err(self.fail(Operation::Load, e)),
        }
    }

    /// Log the failure and tell observers; hands the error back to the caller.
    pub(crate) fn fail(&self, operation: Operation, error: AppError) -> AppError {
        log::error!("{} on {} failed: {}", operation, T::TABLE, error);
        self.event_bus.emit(OperationFailed::new(
            Some(T::TABLE),
            operation,
            error.kind(),
            error.to_string(),
        ));
        error
    }
}

impl<T: TableEntity + Default> CollectionEditor<T> {
    /// The settings row of a singleton table, or defaults when none exists yet.
    pub fn singleton(&self) -> T {
        self.records.first().cloned().unwrap_or_default()
    }

    /// Save the settings row: update it when it exists, create it otherwise.
    pub async fn upsert_singleton(&mut self, entity: T) -> AppResult<T> {
        if !T::TABLE.is_singleton() {
            return Err(self.fail(
                Operation::Update,
                AppError::Validation(format!("{} is not a settings table", T::TABLE)),
            ));
        }

        if self.find(entity.id()).is_some() {
            self.update(entity.clone()).await?;
            return Ok(self.find(entity.id()).cloned().unwrap_or(entity));
        }

        if !self.records.is_empty() {
            return Err(self.fail(
                Operation::Update,
                AppError::Validation(format!("{} already holds its settings row", T::TABLE)),
            ));
        }

        self.create(entity).await
    }
}
