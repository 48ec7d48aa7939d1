use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::Character;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Local device storage holding one snapshot of the character being edited
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotStorePort: Send + Sync {
    async fn load(&self) -> Result<Option<Character>, StorageError>;
    async fn save(&self, character: &Character) -> Result<(), StorageError>;
    async fn saved_at(&self) -> Result<Option<DateTime<Utc>>, StorageError>;
}
