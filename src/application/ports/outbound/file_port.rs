use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::Character;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Error reading file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid character file {path}: {reason}")]
    InvalidCharacterFile { path: PathBuf, reason: String },
}

/// Export to and import from standalone character files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterFilePort: Send + Sync {
    /// Write the character into `dir` and return the file's path
    async fn export(&self, character: &Character, dir: &Path) -> Result<PathBuf, FileError>;

    /// Read and validate a character file
    async fn import(&self, path: &Path) -> Result<Character, FileError>;
}
