// src/services/contact_inbox.rs
//
// Contact inbox: messages arrive from the storefront form and are only ever
// read, marked and deleted here. Listed newest first.

use uuid::Uuid;

use crate::domain::ContactMessage;
use crate::error::{AppError, AppResult};
use crate::events::Operation;
use crate::services::collection_editor::CollectionEditor;

impl CollectionEditor<ContactMessage> {
    pub fn unread(&self) -> impl Iterator<Item = &ContactMessage> {
        self.records().iter().filter(|m| !m.is_read)
    }

    pub fn unread_count(&self) -> usize {
        self.unread().count()
    }

    /// Mark a message read. Already-read messages are left untouched.
    pub async fn mark_read(&mut self, message_id: Uuid) -> AppResult<()> {
        self.set_read(message_id, true).await
    }

    pub async fn mark_unread(&mut self, message_id: Uuid) -> AppResult<()> {
        self.set_read(message_id, false).await
    }

    async fn set_read(&mut self, message_id: Uuid, is_read: bool) -> AppResult<()> {
        let Some(mut message) = self.find(message_id).cloned() else {
            return Err(self.fail(Operation::Update, AppError::NotFound));
        };
        if message.is_read == is_read {
            return Ok(());
        }
        message.is_read = is_read;
        self.update(message).await
    }
}
