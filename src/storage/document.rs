// src/storage/document.rs
//! Whole-document snapshot persistence keyed by a fixed storage key

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Mutex;
use tracing::debug;

use crate::error::StorageError;
use crate::types::ResumeDocument;

#[async_trait]
pub trait DocumentPersistence: Send + Sync {
    async fn load(&self) -> Result<Option<ResumeDocument>, StorageError>;
    async fn save(&self, document: &ResumeDocument) -> Result<(), StorageError>;
}

/// JSON blob in the `documents` table, rewritten on every mutation.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    storage_key: String,
}

impl SqliteDocumentStore {
    pub fn new(pool: SqlitePool, storage_key: impl Into<String>) -> Self {
        Self {
            pool,
            storage_key: storage_key.into(),
        }
    }
}

#[async_trait]
impl DocumentPersistence for SqliteDocumentStore {
    async fn load(&self) -> Result<Option<ResumeDocument>, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE storage_key = ?")
                .bind(&self.storage_key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((body,)) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, document: &ResumeDocument) -> Result<(), StorageError> {
        let body = serde_json::to_string(document)?;

        sqlx::query(
            r#"
            INSERT INTO documents (storage_key, body, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(storage_key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.storage_key)
        .bind(&body)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;

        debug!("Persisted document under key {}", self.storage_key);
        Ok(())
    }
}

/// Keeps the serialized blob in memory; used for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    body: Mutex<Option<String>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.body.lock().ok().and_then(|body| body.clone())
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, StorageError> {
        self.body
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentPersistence for MemoryDocumentStore {
    async fn load(&self) -> Result<Option<ResumeDocument>, StorageError> {
        let body = self.guard()?.clone();
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, document: &ResumeDocument) -> Result<(), StorageError> {
        let body = serde_json::to_string(document)?;
        *self.guard()? = Some(body);
        Ok(())
    }
}
