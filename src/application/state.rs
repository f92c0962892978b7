// src/application/state.rs

use std::sync::Arc;

use crate::config::{AdminConfig, BackendKind};
use crate::db::{create_connection_pool, get_connection, initialize_database};
use crate::domain::TableEntity;
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::persistence::{LocalStorage, PersistenceLayer, RestBackend, SqliteBackend, User};
use crate::services::{require_session, CollectionEditor, MediaService, Notification, Notifier};

/// Everything a command needs, built once at startup.
/// Shared pieces are Arc-wrapped so editors and services can hold them.
pub struct AdminState {
    pub config: AdminConfig,
    pub backend: Arc<dyn PersistenceLayer>,
    pub event_bus: Arc<EventBus>,
    pub notifier: Notifier,
    pub media: MediaService,
}

impl AdminState {
    pub fn new(config: AdminConfig, backend: Arc<dyn PersistenceLayer>) -> Self {
        let event_bus = Arc::new(EventBus::new());
        let notifier = Notifier::attach(&event_bus, config.locale);
        let media = MediaService::new(
            backend.clone(),
            event_bus.clone(),
            config.media_bucket.clone(),
        )
        .with_max_bytes(config.max_upload_bytes);

        Self {
            config,
            backend,
            event_bus,
            notifier,
            media,
        }
    }

    /// Connect to the configured backend.
    pub fn from_config(config: AdminConfig) -> AppResult<Self> {
        config.validate()?;
        let backend = connect(&config)?;
        Ok(Self::new(config, backend))
    }

    /// Open a screen. Refused without a signed-in administrator.
    pub async fn open<T: TableEntity>(&self) -> AppResult<CollectionEditor<T>> {
        require_session(self.backend.as_ref()).await?;
        CollectionEditor::open(self.backend.clone(), self.event_bus.clone()).await
    }

    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifier.drain()
    }
}

fn connect(config: &AdminConfig) -> AppResult<Arc<dyn PersistenceLayer>> {
    match config.backend {
        BackendKind::Sqlite => {
            let database_path = config.database_path()?;
            let pool = create_connection_pool(&database_path)?;
            {
                let conn = get_connection(&pool)?;
                initialize_database(&conn)?;
            }

            let backend = SqliteBackend::new(Arc::new(pool)).with_storage(LocalStorage {
                root: config.uploads_dir()?,
                public_base_url: config.public_base_url.clone(),
            });

            if let Some(email) = &config.admin_email {
                backend.sign_in(User {
                    id: email.clone(),
                    email: Some(email.clone()),
                })?;
            }

            log::info!("Using local store at {}", database_path.display());
            Ok(Arc::new(backend))
        }
        BackendKind::Rest => {
            let url = config
                .rest_url
                .as_deref()
                .ok_or_else(|| AppError::Validation("No REST URL configured".to_string()))?;
            let key = config
                .api_key
                .as_deref()
                .ok_or_else(|| AppError::Validation("No API key configured".to_string()))?;

            log::info!("Using hosted backend at {}", url);
            Ok(Arc::new(RestBackend::new(url, key, config.access_token.clone())?))
        }
    }
}
