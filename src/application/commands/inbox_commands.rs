// src/application/commands/inbox_commands.rs

use crate::application::{
    commands::record_commands::parse_id, dto::*, error_handling::ToErrorResponse,
    state::AdminState,
};
use crate::domain::ContactMessage;
use crate::error::AppResult;

/// Messages newest first, optionally only the unread ones
pub async fn list_messages(state: &AdminState, unread_only: bool) -> Result<InboxDto, String> {
    let result: AppResult<InboxDto> = async {
        let inbox = state.open::<ContactMessage>().await?;

        let messages = inbox
            .records()
            .iter()
            .filter(|m| !unread_only || !m.is_read)
            .cloned()
            .map(ContactMessageDto::from)
            .collect();

        Ok(InboxDto {
            unread_count: inbox.unread_count(),
            messages,
        })
    }
    .await;
    result.to_error_response()
}

/// Mark a message as read
pub async fn mark_message_read(state: &AdminState, message_id: String) -> Result<(), String> {
    let result: AppResult<()> = async {
        let id = parse_id(&message_id)?;
        let mut inbox = state.open::<ContactMessage>().await?;
        inbox.mark_read(id).await
    }
    .await;
    result.to_error_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use crate::domain::{to_record, Table};
    use crate::persistence::{PersistenceLayer, SqliteBackend, User};
    use std::sync::Arc;

    async fn state_with_messages(count: usize) -> AdminState {
        let backend = SqliteBackend::in_memory().unwrap();
        backend
            .sign_in(User {
                id: "admin".to_string(),
                email: Some("admin@example.com".to_string()),
            })
            .unwrap();

        let rows = (0..count)
            .map(|i| {
                let message = ContactMessage::new(
                    format!("Customer {}", i),
                    format!("c{}@example.com", i),
                    "Is the retro kit back in stock?".to_string(),
                );
                to_record(&message).unwrap()
            })
            .collect();
        backend.insert(Table::ContactMessages, rows).await.unwrap();

        let config = AdminConfig::from_lookup(|key| {
            (key == "STOREFRONT_DATABASE_PATH").then(|| "/tmp/unused.db".to_string())
        })
        .unwrap();
        AdminState::new(config, Arc::new(backend))
    }

    #[tokio::test]
    async fn test_mark_read_filters_unread_listing() {
        let state = state_with_messages(2).await;

        let inbox = list_messages(&state, false).await.unwrap();
        assert_eq!(inbox.unread_count, 2);
        assert_eq!(inbox.messages.len(), 2);

        mark_message_read(&state, inbox.messages[0].id.clone())
            .await
            .unwrap();

        let unread = list_messages(&state, true).await.unwrap();
        assert_eq!(unread.unread_count, 1);
        assert_eq!(unread.messages.len(), 1);
        assert_ne!(unread.messages[0].id, inbox.messages[0].id);
    }

    #[tokio::test]
    async fn test_bad_id_is_rejected() {
        let state = state_with_messages(0).await;
        assert!(mark_message_read(&state, "not-a-uuid".to_string()).await.is_err());
    }
}
