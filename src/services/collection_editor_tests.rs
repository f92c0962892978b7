// src/services/collection_editor_tests.rs
//
// Screen behavior: local state follows the backend, never leads it.

#[cfg(test)]
mod editor_tests {
    use crate::domain::{
        to_record, BlogPost, ContactMessage, FooterContent, GallerySettings, Product, Record,
        StoryRing, Table, Translation,
    };
    use crate::error::{AppError, FailureKind};
    use crate::events::{EventBus, OperationFailed};
    use crate::persistence::{
        Filter, LocalStorage, MockPersistenceLayer, PersistenceLayer, Query, SqliteBackend,
    };
    use crate::services::{
        CollectionEditor, Locale, MediaFile, MediaService, NotificationLevel, Notifier,
    };
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    fn setup() -> (Arc<SqliteBackend>, Arc<EventBus>) {
        (
            Arc::new(SqliteBackend::in_memory().unwrap()),
            Arc::new(EventBus::new()),
        )
    }

    fn product_row(display_id: i64, name: &str) -> Record {
        let mut product = Product::new(name.to_string());
        product.display_id = display_id;
        to_record(&product).unwrap()
    }

    async fn seed_products(backend: &SqliteBackend, ids: &[i64]) {
        let rows = ids
            .iter()
            .map(|id| product_row(*id, &format!("Jersey {}", id)))
            .collect();
        backend.insert(Table::Products, rows).await.unwrap();
    }

    #[tokio::test]
    async fn test_open_lists_by_display_id_and_scans_sequence() {
        let (backend, bus) = setup();
        seed_products(&backend, &[4, 1, 3]).await;

        let editor = CollectionEditor::<Product>::open(backend, bus.clone()).await.unwrap();

        let ids: Vec<i64> = editor.records().iter().map(|p| p.display_id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        assert_eq!(editor.next_sequence(), Some(5));
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "SequenceInitialized"));
    }

    #[tokio::test]
    async fn test_create_assigns_consecutive_display_ids() {
        let (backend, bus) = setup();
        seed_products(&backend, &[1, 3, 4]).await;

        let mut editor = CollectionEditor::<Product>::open(backend.clone(), bus)
            .await
            .unwrap();

        let created = editor.create(Product::new("Home kit".to_string())).await.unwrap();
        assert_eq!(created.display_id, 5);
        assert_eq!(created.label(), "Product #5");
        assert_eq!(editor.records().len(), 4);

        let second = editor.create(Product::new("Away kit".to_string())).await.unwrap();
        assert_eq!(second.display_id, 6);

        // gap 2 is never filled, even after a fresh scan
        editor.refresh().await.unwrap();
        assert_eq!(editor.next_sequence(), Some(7));
        assert!(editor.find_by_display_id(2).is_none());
    }

    #[tokio::test]
    async fn test_empty_collection_starts_at_one() {
        let (backend, bus) = setup();
        let mut editor = CollectionEditor::<Product>::open(backend.clone(), bus.clone())
            .await
            .unwrap();

        assert_eq!(editor.next_sequence(), Some(1));
        editor.create(Product::new("First".to_string())).await.unwrap();

        let reopened = CollectionEditor::<Product>::open(backend, bus).await.unwrap();
        assert_eq!(reopened.next_sequence(), Some(2));
    }

    #[tokio::test]
    async fn test_invalid_entity_fails_before_backend_and_keeps_value() {
        let mut mock = MockPersistenceLayer::new();
        mock.expect_select().returning(|_, _| Ok(Vec::new()));
        mock.expect_insert().times(0);

        let bus = Arc::new(EventBus::new());
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&failures);
        bus.subscribe::<OperationFailed, _>(move |event| {
            assert_eq!(event.kind, FailureKind::ValidationFailure);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut editor = CollectionEditor::<Product>::open(Arc::new(mock), bus)
            .await
            .unwrap();

        let err = editor.create(Product::new("   ".to_string())).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::ValidationFailure);
        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert!(editor.records().is_empty());
        assert_eq!(editor.next_sequence(), Some(1));
    }

    #[tokio::test]
    async fn test_rejected_insert_leaves_list_and_sequence() {
        let mut mock = MockPersistenceLayer::new();
        mock.expect_select().returning(|_, _| Ok(Vec::new()));
        mock.expect_insert().times(1).returning(|_, _| {
            Err(AppError::Rejected {
                status: 500,
                message: "internal".to_string(),
            })
        });

        let bus = Arc::new(EventBus::new());
        let notifier = Notifier::attach(&bus, Locale::En);
        let mut editor = CollectionEditor::<Product>::open(Arc::new(mock), bus)
            .await
            .unwrap();

        let err = editor.create(Product::new("Kit".to_string())).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::RemoteOperationFailure);
        assert!(editor.records().is_empty());
        assert_eq!(editor.next_sequence(), Some(1));

        let notes = notifier.drain();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);
    }

    #[tokio::test]
    async fn test_failed_sequence_scan_disables_creation() {
        let mut mock = MockPersistenceLayer::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        mock.expect_select().returning(move |_, query| {
            // list load succeeds, the column-only scan fails
            seen.fetch_add(1, Ordering::SeqCst);
            if query.columns.is_some() {
                Err(AppError::Other("timeout".to_string()))
            } else {
                Ok(Vec::new())
            }
        });
        mock.expect_insert().times(0);

        let mut editor = CollectionEditor::<Product>::open(Arc::new(mock), Arc::new(EventBus::new()))
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(editor.next_sequence(), None);

        let err = editor.create(Product::new("Kit".to_string())).await.unwrap_err();
        assert!(matches!(err, AppError::SequenceNotInitialized(Table::Products)));
    }

    #[tokio::test]
    async fn test_failed_load_is_reported() {
        let mut mock = MockPersistenceLayer::new();
        mock.expect_select()
            .returning(|_, _| Err(AppError::Other("offline".to_string())));

        let bus = Arc::new(EventBus::new());
        let result = CollectionEditor::<ContactMessage>::open(Arc::new(mock), bus.clone()).await;

        assert!(result.is_err());
        assert_eq!(bus.get_event_log()[0].event_type, "OperationFailed");
    }

    #[tokio::test]
    async fn test_update_and_delete_follow_backend() {
        let (backend, bus) = setup();
        seed_products(&backend, &[1, 2]).await;

        let mut editor = CollectionEditor::<Product>::open(backend.clone(), bus)
            .await
            .unwrap();

        let mut first = editor.records()[0].clone();
        first.price = Some(59.9);
        editor.update(first.clone()).await.unwrap();
        assert_eq!(editor.find(first.id).unwrap().price, Some(59.9));

        let stored = editor.get(first.id).await.unwrap().unwrap();
        assert_eq!(stored.price, Some(59.9));
        assert_eq!(stored.display_id, 1);

        let second_id = editor.records()[1].id;
        editor.delete(second_id).await.unwrap();
        assert!(editor.find(second_id).is_none());
        assert!(editor.get(second_id).await.unwrap().is_none());

        // deleting the highest number does not give it back
        assert_eq!(editor.next_sequence(), Some(3));
    }

    #[tokio::test]
    async fn test_update_unknown_record_is_not_found() {
        let (backend, bus) = setup();
        let mut editor = CollectionEditor::<Product>::open(backend, bus).await.unwrap();

        let mut ghost = Product::new("Ghost".to_string());
        ghost.display_id = 1;
        assert!(matches!(editor.update(ghost).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_second_session_conflicts_then_recovers_after_refresh() {
        let (backend, bus) = setup();
        let mut first = CollectionEditor::<StoryRing>::open(backend.clone(), bus.clone())
            .await
            .unwrap();
        let mut second = CollectionEditor::<StoryRing>::open(backend.clone(), bus)
            .await
            .unwrap();

        let ring = || StoryRing::new("Drop".to_string(), "https://cdn.example.com/r.png".to_string());

        assert_eq!(first.create(ring()).await.unwrap().display_order, 1);

        let err = second.create(ring()).await.unwrap_err();
        assert!(err.is_conflict());
        assert!(second.records().is_empty());

        // the second screen must rescan before it may create again
        assert!(second.create(ring()).await.is_err());
        second.refresh().await.unwrap();
        assert_eq!(second.create(ring()).await.unwrap().display_order, 2);
    }

    #[tokio::test]
    async fn test_blog_publish_workflow() {
        let (backend, bus) = setup();
        let mut editor = CollectionEditor::<BlogPost>::open(backend, bus).await.unwrap();

        let post = editor
            .create(BlogPost::new("Season preview".to_string(), "season-preview".to_string()))
            .await
            .unwrap();
        assert_eq!(editor.published().count(), 0);

        editor.publish(post.id).await.unwrap();
        let published_at = editor.find(post.id).unwrap().published_at;
        assert!(published_at.is_some());
        assert_eq!(editor.published().count(), 1);

        editor.unpublish(post.id).await.unwrap();
        editor.publish(post.id).await.unwrap();
        assert_eq!(editor.find(post.id).unwrap().published_at, published_at);
        assert_eq!(editor.find_by_slug("season-preview").unwrap().id, post.id);
    }

    #[tokio::test]
    async fn test_contact_inbox_newest_first_and_mark_read() {
        let (backend, bus) = setup();
        let now = Utc::now();
        let rows: Vec<Record> = (0..3)
            .map(|i| {
                let mut message = ContactMessage::new(
                    format!("Sender {}", i),
                    format!("s{}@example.com", i),
                    "Do you ship abroad?".to_string(),
                );
                message.created_at = now - Duration::minutes(10 - i);
                to_record(&message).unwrap()
            })
            .collect();
        backend.insert(Table::ContactMessages, rows).await.unwrap();

        let mut inbox = CollectionEditor::<ContactMessage>::open(backend.clone(), bus)
            .await
            .unwrap();

        let names: Vec<&str> = inbox.records().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Sender 2", "Sender 1", "Sender 0"]);
        assert_eq!(inbox.unread_count(), 3);

        let newest = inbox.records()[0].id;
        inbox.mark_read(newest).await.unwrap();
        assert_eq!(inbox.unread_count(), 2);

        let stored = backend
            .select(
                Table::ContactMessages,
                Query::all().filter(Filter::eq("is_read", true)),
            )
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);

        inbox.mark_unread(newest).await.unwrap();
        assert_eq!(inbox.unread_count(), 3);

        assert!(inbox.mark_read(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_translation_lookups() {
        let (backend, bus) = setup();
        let rows = vec![
            Translation::new("cart.title".into(), "en".into(), "Cart".into()),
            Translation::new("cart.title".into(), "de".into(), "Warenkorb".into()),
            Translation::new("cart.empty".into(), "en".into(), "Your cart is empty".into()),
        ]
        .iter()
        .map(|t| to_record(t).unwrap())
        .collect();
        backend.insert(Table::Translations, rows).await.unwrap();

        let editor = CollectionEditor::<Translation>::open(backend, bus).await.unwrap();

        assert_eq!(editor.value_for("cart.title", "de"), Some("Warenkorb"));
        assert_eq!(editor.value_for("cart.title", "de-AT"), Some("Warenkorb"));
        assert_eq!(editor.value_for("cart.empty", "de"), None);
        assert_eq!(editor.languages(), vec!["de".to_string(), "en".to_string()]);
        assert_eq!(editor.missing_keys("en", "de"), vec!["cart.empty"]);
    }

    #[tokio::test]
    async fn test_singleton_upsert() {
        let (backend, bus) = setup();
        let mut editor = CollectionEditor::<GallerySettings>::open(backend.clone(), bus.clone())
            .await
            .unwrap();

        let mut settings = editor.singleton();
        assert_eq!(settings.columns, 3);
        settings.columns = 4;
        editor.upsert_singleton(settings.clone()).await.unwrap();

        settings.autoplay = true;
        editor.upsert_singleton(settings.clone()).await.unwrap();
        assert_eq!(editor.records().len(), 1);

        let reopened = CollectionEditor::<GallerySettings>::open(backend.clone(), bus.clone())
            .await
            .unwrap();
        assert_eq!(reopened.singleton().columns, 4);
        assert!(reopened.singleton().autoplay);

        // a second, unrelated row is refused
        let mut footer = CollectionEditor::<FooterContent>::open(backend, bus).await.unwrap();
        footer.upsert_singleton(FooterContent::default()).await.unwrap();
        let err = footer
            .upsert_singleton(FooterContent::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_attach_image_updates_product() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(
            SqliteBackend::in_memory()
                .unwrap()
                .with_storage(LocalStorage {
                    root: dir.path().to_path_buf(),
                    public_base_url: "http://localhost:8080/uploads".to_string(),
                }),
        );
        let bus = Arc::new(EventBus::new());
        seed_products(&backend, &[1]).await;

        let media = MediaService::new(backend.clone(), bus.clone(), "media");
        let mut editor = CollectionEditor::<Product>::open(backend, bus).await.unwrap();
        let id = editor.records()[0].id;

        let product = editor
            .attach_image(&media, id, MediaFile::new(vec![0x89, 0x50, 0x4e, 0x47], "image/png"))
            .await
            .unwrap();

        let url = product.image_url.unwrap();
        assert!(url.starts_with("http://localhost:8080/uploads/media/products/"));
        assert!(url.ends_with(".png"));

        let rejected = editor
            .attach_image(&media, id, MediaFile::new(vec![1], "application/pdf"))
            .await;
        assert!(rejected.is_err());
        assert_eq!(editor.find(id).unwrap().image_url.as_deref(), Some(url.as_str()));
    }

    #[tokio::test]
    async fn test_notifications_for_successful_operations() {
        let (backend, bus) = setup();
        let notifier = Notifier::attach(&bus, Locale::De);
        let mut editor = CollectionEditor::<Product>::open(backend, bus).await.unwrap();

        let product = editor.create(Product::new("Torwarttrikot".to_string())).await.unwrap();
        editor.delete(product.id).await.unwrap();

        let messages: Vec<String> = notifier.drain().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec![
                "Produkt #1 angelegt".to_string(),
                "Eintrag aus Produkte gelöscht".to_string()
            ]
        );
    }
}
