use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::application::ports::outbound::{SnapshotStorePort, StorageError};
use crate::domain::entities::Character;

/// Key the character being edited is stored under
pub const SNAPSHOT_KEY: &str = "savageWorldsCharacter";

pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS snapshots (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Stored JSON exactly as written
    pub async fn raw(&self) -> Result<Option<String>, StorageError> {
        sqlx::query_scalar("SELECT value FROM snapshots WHERE key = ?")
            .bind(SNAPSHOT_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))
    }
}

#[async_trait]
impl SnapshotStorePort for SqliteSnapshotStore {
    async fn load(&self) -> Result<Option<Character>, StorageError> {
        let Some(json) = self.raw().await? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save(&self, character: &Character) -> Result<(), StorageError> {
        let json = serde_json::to_string(character)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query("INSERT OR REPLACE INTO snapshots (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(SNAPSHOT_KEY)
            .bind(json)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(())
    }

    async fn saved_at(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let updated_at: Option<String> =
            sqlx::query_scalar("SELECT updated_at FROM snapshots WHERE key = ?")
                .bind(SNAPSHOT_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StorageError::Database(e.to_string()))?;

        updated_at
            .map(|raw| {
                DateTime::parse_from_rfc3339(&raw)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| StorageError::Serialization(e.to_string()))
            })
            .transpose()
    }
}
