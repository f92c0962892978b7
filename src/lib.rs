// src/lib.rs
// Storefront Admin - back office for the jersey storefront
//
// Architecture:
// - Domain-centric: every collection is a typed entity with its own invariants
// - Event-driven: screens emit events, the notifier and logs observe them
// - Explicit: local state changes only after the backend accepted a write
// - Backend-neutral: screens talk to storage only through PersistenceLayer
// - Application Layer: the boundary a UI or the CLI calls

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod persistence;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    AboutFeature,
    AboutSection,
    // Blog
    BlogCategory,
    BlogPost,
    // Inbox
    ContactMessage,
    // Design
    DesignOption,
    DesignTemplate,
    DomainError,
    FooterContent,
    FooterLink,
    GallerySettings,
    HomepageContent,
    // Catalog
    JerseyColor,
    JerseyType,
    OrderQuantity,
    PriceRange,
    // Products
    Product,
    Record,
    SeoSetting,
    SiteSetting,
    StoryRing,
    // Collections
    Table,
    TableEntity,
    Translation,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult, FailureKind};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, DomainEvent, EventBus, EventLogEntry, FileUploaded, Operation,
    OperationFailed, RecordCreated, RecordDeleted, RecordUpdated, SequenceInitialized,
};

// ============================================================================
// PUBLIC API - Persistence
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use persistence::{
    FileUpload, Filter, LocalStorage, Order, PersistenceLayer, Query, RestBackend,
    SqliteBackend, User,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    require_session, CollectionEditor, Locale, MediaFile, MediaService, Notification,
    NotificationLevel, Notifier, SequentialIdAllocator,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AdminState;
pub use config::{AdminConfig, BackendKind};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
