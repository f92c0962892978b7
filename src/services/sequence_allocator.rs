// src/services/sequence_allocator.rs
//
// Sequential display-identifier allocation
//
// The next identifier is computed client-side: scan the collection's sequence
// column, take the maximum, add one. The value is then cached for the session
// and each `allocate` hands out the cached value and moves the cache forward.
// A failed creation gives its value back; deleted identifiers are never
// reused within a session because the cache never moves below what was
// handed out and kept.
//
// Two sessions that scan the same state get the same next value. The local
// backend turns the second write into a `Conflict` through a unique index;
// after a conflict the allocator forgets its cache so the next attempt has
// to rescan.

use std::sync::Arc;

use crate::domain::{sequence_number, Record, Table};
use crate::error::{AppError, AppResult};
use crate::persistence::{PersistenceLayer, Query};

/// `max + 1` over the sequence column of `records`, or 1 for none.
///
/// `None` when the maximum is already `i64::MAX`.
pub fn next_sequence_value(records: &[Record], column: &str) -> Option<i64> {
    records
        .iter()
        .map(|record| sequence_number(record.get(column)))
        .max()
        .unwrap_or(0)
        .checked_add(1)
}

pub struct SequentialIdAllocator {
    backend: Arc<dyn PersistenceLayer>,
    table: Table,
    column: &'static str,
    /// Cached next value; `None` until a scan succeeds
    next: Option<i64>,
    /// Last value handed out by `allocate` whose creation has not settled
    pending: Option<i64>,
}

impl SequentialIdAllocator {
    /// Allocator for the table's own sequence column.
    pub fn new(backend: Arc<dyn PersistenceLayer>, table: Table) -> AppResult<Self> {
        let column = table.sequence_column().ok_or_else(|| {
            AppError::Validation(format!("Table '{}' has no sequence column", table))
        })?;
        Ok(Self::for_column(backend, table, column))
    }

    pub fn for_column(
        backend: Arc<dyn PersistenceLayer>,
        table: Table,
        column: &'static str,
    ) -> Self {
        Self {
            backend,
            table,
            column,
            next: None,
            pending: None,
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn is_initialized(&self) -> bool {
        self.next.is_some()
    }

    /// The value the next `allocate` would hand out, without reserving it.
    pub fn peek(&self) -> Option<i64> {
        self.next
    }

    /// Scan the collection and cache `max + 1`.
    ///
    /// Only the sequence column is fetched. On failure the cache is cleared,
    /// so `allocate` refuses until a later scan succeeds.
    pub async fn initialize(&mut self) -> AppResult<i64> {
        self.pending = None;

        let query = Query::all().columns([self.column]);
        let records = match self.backend.select(self.table, query).await {
            Ok(records) => records,
            Err(e) => {
                self.next = None;
                return Err(AppError::SequenceFetch {
                    table: self.table,
                    reason: e.to_string(),
                });
            }
        };

        let Some(next) = next_sequence_value(&records, self.column) else {
            self.next = None;
            return Err(AppError::SequenceFetch {
                table: self.table,
                reason: format!("{} has reached its largest value", self.column),
            });
        };

        log::debug!(
            "Sequence {}.{} scanned {} row(s), next is {}",
            self.table,
            self.column,
            records.len(),
            next
        );
        self.next = Some(next);
        Ok(next)
    }

    /// Hand out the cached next value and move the cache forward.
    ///
    /// No rescan happens here; two calls in one session never return the
    /// same value unless the first creation was reported as failed.
    pub fn allocate(&mut self) -> AppResult<i64> {
        let value = self
            .next
            .ok_or(AppError::SequenceNotInitialized(self.table))?;
        let following = value.checked_add(1).ok_or_else(|| {
            AppError::Validation(format!(
                "{}.{} has no numbers left to hand out",
                self.table, self.column
            ))
        })?;

        self.next = Some(following);
        self.pending = Some(value);
        Ok(value)
    }

    /// The creation using the allocated value was accepted by the backend.
    pub fn on_create_success(&mut self) {
        self.pending = None;
    }

    /// The creation failed; its value goes back so the next `allocate`
    /// returns it again.
    ///
    /// A uniqueness conflict means another session took the value, so the
    /// cache is dropped and the caller has to `initialize` again.
    pub fn on_create_failure(&mut self, error: &AppError) {
        let released = self.pending.take();
        if error.is_conflict() {
            log::warn!(
                "Sequence {}.{} collided with another writer; rescan required",
                self.table,
                self.column
            );
            self.next = None;
            return;
        }

        if let (Some(value), Some(next)) = (released, self.next) {
            if next == value + 1 {
                self.next = Some(value);
            }
        }
    }
}
