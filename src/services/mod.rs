// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Screens are `CollectionEditor<T>` values; table-specific behavior lives in
// inherent impls next to the generic editor.

pub mod blog_service;
pub mod collection_editor;
pub mod contact_inbox;
pub mod media_service;
pub mod notifier;
pub mod product_service;
pub mod sequence_allocator;
pub mod session_gate;
pub mod translation_service;

#[cfg(test)]
mod collection_editor_tests;

pub use collection_editor::{default_query, CollectionEditor};
pub use media_service::{
    content_type_for_extension, object_path, MediaFile, MediaService, ALLOWED_IMAGE_TYPES,
    DEFAULT_BUCKET, DEFAULT_MAX_UPLOAD_BYTES,
};
pub use notifier::{table_label, Locale, Notification, NotificationLevel, Notifier};
pub use product_service::PRODUCT_IMAGE_FOLDER;
pub use sequence_allocator::{next_sequence_value, SequentialIdAllocator};
pub use session_gate::require_session;
