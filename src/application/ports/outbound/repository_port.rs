//! Repository ports - Interfaces to the remote data API
//!
//! These traits define the contracts that infrastructure repositories must implement.
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::Character;
use crate::domain::value_objects::{Language, RowId};

// =============================================================================
// Character Repository Port
// =============================================================================

/// Repository port for the character aggregate
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepositoryPort: Send + Sync {
    /// Load a character and all of its child collections
    async fn get_by_id(&self, id: RowId) -> Result<Option<Character>>;

    /// Write the main row, then every child row, and return the character's id
    async fn save(&self, character: &Character) -> Result<RowId>;

    /// Like `save`, but return the character rebuilt from the rows the backend
    /// acknowledged, carrying every server-assigned identifier
    async fn save_returning(&self, character: &Character) -> Result<Character>;
}

// =============================================================================
// Catalog Repository Port
// =============================================================================

/// Read-only lookups in a catalog of rulebook entries
#[async_trait]
pub trait CatalogRepositoryPort<E: Send + 'static>: Send + Sync {
    /// All entries written in the given language
    async fn list_for_language(&self, language: Language) -> Result<Vec<E>>;

    /// First entry with this exact name and language; `None` when nothing matches
    async fn find_by_name(&self, name: &str, language: Language) -> Result<Option<E>>;
}
