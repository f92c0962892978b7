// src/persistence/sqlite/backend.rs
//
// Local backend: one SQLite document table per collection, files on disk.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use super::sql::{order_clause, where_clause};
use crate::db::{create_memory_pool, get_connection, initialize_database, ConnectionPool};
use crate::domain::{Record, Table, ID_COLUMN};
use crate::error::{AppError, AppResult};
use crate::persistence::{FileUpload, Filter, PersistenceLayer, Query, User};

/// Directory uploads are written to, and the URL prefix they are served under.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    pub root: PathBuf,
    pub public_base_url: String,
}

pub struct SqliteBackend {
    pool: Arc<ConnectionPool>,
    storage: Option<LocalStorage>,
    session: RwLock<Option<User>>,
}

impl SqliteBackend {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            pool,
            storage: None,
            session: RwLock::new(None),
        }
    }

    /// Fresh in-memory database with the schema applied.
    pub fn in_memory() -> AppResult<Self> {
        let pool = create_memory_pool()?;
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }
        Ok(Self::new(Arc::new(pool)))
    }

    pub fn with_storage(mut self, storage: LocalStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn sign_in(&self, user: User) -> AppResult<()> {
        log::info!("Admin session opened for {}", user.email.as_deref().unwrap_or(&user.id));
        *self.session_lock_mut()? = Some(user);
        Ok(())
    }

    pub fn sign_out(&self) -> AppResult<()> {
        *self.session_lock_mut()? = None;
        Ok(())
    }

    fn session_lock_mut(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Option<User>>> {
        self.session
            .write()
            .map_err(|_| AppError::Other("Session lock poisoned".to_string()))
    }

    /// Run `f` on a pooled connection off the async executor.
    async fn blocking<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = get_connection(&pool)?;
            f(&conn)
        })
        .await?
    }
}

/// Uniqueness violations become `Conflict`; everything else stays a database error.
fn map_write_error(table: Table, err: rusqlite::Error) -> AppError {
    match &err {
        rusqlite::Error::SqliteFailure(e, message)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            AppError::Conflict(format!(
                "{}: {}",
                table,
                message.as_deref().unwrap_or("constraint violated")
            ))
        }
        _ => AppError::Database(err),
    }
}

fn parse_document(table: Table, raw: &str) -> AppResult<Record> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::Other(format!(
            "Row in {} does not hold a JSON object",
            table
        ))),
    }
}

fn project(record: Record, columns: &Option<Vec<String>>) -> Record {
    match columns {
        None => record,
        Some(columns) => record
            .into_iter()
            .filter(|(key, _)| columns.iter().any(|c| c == key))
            .collect(),
    }
}

/// Take the record's id, assigning a fresh one when absent.
fn ensure_id(record: &mut Record) -> AppResult<String> {
    match record.get(ID_COLUMN) {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        None | Some(Value::Null) => {
            let id = Uuid::new_v4().to_string();
            record.insert(ID_COLUMN.to_string(), Value::String(id.clone()));
            Ok(id)
        }
        Some(other) => Err(AppError::Validation(format!(
            "Record id must be a string, got {}",
            other
        ))),
    }
}

fn select_rows(
    conn: &Connection,
    table: Table,
    filter: &Filter,
    tail: &str,
) -> AppResult<Vec<(String, Record)>> {
    let mut params: Vec<SqlValue> = Vec::new();
    let sql = format!(
        "SELECT id, data FROM {}{}{}",
        table.as_str(),
        where_clause(filter, &mut params),
        tail
    );

    let mut stmt = conn.prepare(&sql)?;
    let raw: Vec<(String, String)> = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    raw.into_iter()
        .map(|(id, data)| Ok((id, parse_document(table, &data)?)))
        .collect()
}

#[async_trait]
impl PersistenceLayer for SqliteBackend {
    async fn select(&self, table: Table, query: Query) -> AppResult<Vec<Record>> {
        query.validate()?;

        self.blocking(move |conn| {
            let mut tail = order_clause(&query.order);
            if let Some(limit) = query.limit {
                tail.push_str(&format!(" LIMIT {}", limit));
            }

            let rows = select_rows(conn, table, &query.filter, &tail)?;
            Ok(rows
                .into_iter()
                .map(|(_, record)| project(record, &query.columns))
                .collect())
        })
        .await
    }

    async fn insert(&self, table: Table, records: Vec<Record>) -> AppResult<Vec<Record>> {
        self.blocking(move |conn| {
            let tx = conn.unchecked_transaction()?;
            let mut stored = Vec::with_capacity(records.len());

            for mut record in records {
                let id = ensure_id(&mut record)?;
                let data = serde_json::to_string(&record)?;
                tx.execute(
                    &format!(
                        "INSERT INTO {} (id, data, created_at) VALUES (?1, ?2, ?3)",
                        table.as_str()
                    ),
                    rusqlite::params![id, data, Utc::now().to_rfc3339()],
                )
                .map_err(|e| map_write_error(table, e))?;
                stored.push(record);
            }

            tx.commit()?;
            log::debug!("Inserted {} row(s) into {}", stored.len(), table);
            Ok(stored)
        })
        .await
    }

    async fn update(&self, table: Table, mut patch: Record, filter: Filter) -> AppResult<()> {
        filter.require_targeted()?;
        if let Some(id) = patch.remove(ID_COLUMN) {
            let targets_same_row = filter
                .conditions
                .iter()
                .any(|c| c.column == ID_COLUMN && c.value == id);
            if !targets_same_row {
                return Err(AppError::Validation("Record id cannot be changed".to_string()));
            }
        }

        self.blocking(move |conn| {
            let tx = conn.unchecked_transaction()?;
            let rows = select_rows(&tx, table, &filter, "")?;

            for (id, mut record) in rows {
                for (key, value) in &patch {
                    record.insert(key.clone(), value.clone());
                }
                tx.execute(
                    &format!("UPDATE {} SET data = ?1 WHERE id = ?2", table.as_str()),
                    rusqlite::params![serde_json::to_string(&record)?, id],
                )
                .map_err(|e| map_write_error(table, e))?;
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn delete(&self, table: Table, filter: Filter) -> AppResult<()> {
        filter.require_targeted()?;

        self.blocking(move |conn| {
            let mut params: Vec<SqlValue> = Vec::new();
            let sql = format!(
                "DELETE FROM {}{}",
                table.as_str(),
                where_clause(&filter, &mut params)
            );
            let removed = conn.execute(&sql, params_from_iter(params.iter()))?;
            log::debug!("Deleted {} row(s) from {}", removed, table);
            Ok(())
        })
        .await
    }

    async fn upload_file(&self, upload: FileUpload) -> AppResult<String> {
        upload.validate_path()?;
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AppError::Other("File storage is not configured".to_string()))?;

        let target = upload
            .path
            .split('/')
            .fold(storage.root.join(&upload.bucket), |dir, segment| dir.join(segment));

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if tokio::fs::try_exists(&target).await? {
            return Err(AppError::Conflict(format!(
                "{}/{} already exists",
                upload.bucket, upload.path
            )));
        }
        tokio::fs::write(&target, &upload.bytes).await?;

        Ok(format!(
            "{}/{}/{}",
            storage.public_base_url.trim_end_matches('/'),
            upload.bucket,
            upload.path
        ))
    }

    async fn get_session(&self) -> AppResult<Option<User>> {
        self.session
            .read()
            .map(|session| session.clone())
            .map_err(|_| AppError::Other("Session lock poisoned".to_string()))
    }
}
