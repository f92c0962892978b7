// src/events/types.rs
//
// Events emitted by the screens after a remote call settles.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react (notifications, logs)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Table;
use crate::error::FailureKind;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

/// What the admin was trying to do when an operation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Load,
    Create,
    Update,
    Delete,
    Upload,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Load => "load",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Upload => "upload",
        };
        f.write_str(name)
    }
}

// ============================================================================
// SEQUENCE EVENTS
// ============================================================================

/// Emitted when a screen has scanned its collection for the next identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceInitialized {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub table: Table,
    pub next_value: i64,
}

impl SequenceInitialized {
    pub fn new(table: Table, next_value: i64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            table,
            next_value,
        }
    }
}

domain_event!(SequenceInitialized);

// ============================================================================
// RECORD EVENTS
// ============================================================================

/// Emitted after the backend accepted a new record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub table: Table,
    pub record_id: Uuid,
    /// Display identifier or position assigned to the record, if any
    pub sequence_value: Option<i64>,
}

impl RecordCreated {
    pub fn new(table: Table, record_id: Uuid, sequence_value: Option<i64>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            table,
            record_id,
            sequence_value,
        }
    }
}

domain_event!(RecordCreated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub table: Table,
    pub record_id: Uuid,
}

impl RecordUpdated {
    pub fn new(table: Table, record_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            table,
            record_id,
        }
    }
}

domain_event!(RecordUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub table: Table,
    pub record_id: Uuid,
}

impl RecordDeleted {
    pub fn new(table: Table, record_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            table,
            record_id,
        }
    }
}

domain_event!(RecordDeleted);

// ============================================================================
// STORAGE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub bucket: String,
    pub path: String,
    pub public_url: String,
}

impl FileUploaded {
    pub fn new(bucket: String, path: String, public_url: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            bucket,
            path,
            public_url,
        }
    }
}

domain_event!(FileUploaded);

// ============================================================================
// FAILURES
// ============================================================================

/// Emitted whenever a screen operation fails; local state was left untouched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub table: Option<Table>,
    pub operation: Operation,
    pub kind: FailureKind,
    pub message: String,
}

impl OperationFailed {
    pub fn new(
        table: Option<Table>,
        operation: Operation,
        kind: FailureKind,
        message: String,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            table,
            operation,
            kind,
            message,
        }
    }
}

domain_event!(OperationFailed);
