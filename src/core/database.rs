// src/core/database.rs
//! SQLite connection management and schema for the local resume database

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

use crate::core::FsOps;

/// One durable table per resume section, matching the section repositories.
pub const SECTION_TABLES: [&str; 6] = [
    "personal_info",
    "education",
    "experience",
    "projects",
    "skills_and_languages",
    "certifications",
];

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database file and run migrations
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!("Database connection established: {}", database_path.display());

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database; a single connection keeps every query on the same data
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        for table in SECTION_TABLES {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    profile_id TEXT NOT NULL,
                    records TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    updated_at INTEGER NOT NULL
                );
                "#
            ))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to create table {}", table))?;

            // one record per profile and section
            sqlx::query(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_{table}_profile_id ON {table}(profile_id);"
            ))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to index table {}", table))?;
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                storage_key TEXT PRIMARY KEY,
                body TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create documents table")?;

        info!("Database migrations completed");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Database health check failed")?;
        Ok(())
    }

    /// Close the pool; later operations fail with a pool-closed error
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database_is_migrated() {
        let db = Database::in_memory().await.unwrap();
        db.health_check().await.unwrap();

        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
                .fetch_all(db.pool())
                .await
                .unwrap();
        let names: Vec<String> = tables.into_iter().map(|(n,)| n).collect();

        for table in SECTION_TABLES {
            assert!(names.contains(&table.to_string()), "missing {}", table);
        }
        assert!(names.contains(&"documents".to_string()));
    }

    #[tokio::test]
    async fn test_file_database_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("resume.db");

        let db = Database::new(&path).await.unwrap();
        db.health_check().await.unwrap();
        assert!(path.exists());
    }
}
