//! Persistence adapters
//!
//! The remote character database is reached through PostgREST; the local
//! snapshot of the character being edited lives in SQLite.

mod catalog_repository;
mod character_repository;
mod snapshot_repository;

pub use catalog_repository::{
    CatalogEntity, EdgeCatalog, GearCatalog, HindranceCatalog, PostgrestCatalogRepository,
    PowerCatalog, SkillCatalog, WeaponCatalog,
};
pub use character_repository::PostgrestCharacterRepository;
pub use snapshot_repository::{SqliteSnapshotStore, SNAPSHOT_KEY};

use thiserror::Error;

use crate::application::mappers::MappingError;
use crate::infrastructure::postgrest::{PostgrestClient, RestError};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Rest(#[from] RestError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("{resource} returned a row without an id")]
    MissingIdentifier { resource: &'static str },
}

/// Combined repository providing access to every PostgREST-backed repository
#[derive(Clone)]
pub struct PostgrestRepository {
    client: PostgrestClient,
}

impl PostgrestRepository {
    pub fn new(base_url: &str) -> Result<Self, RestError> {
        Ok(Self {
            client: PostgrestClient::new(base_url)?,
        })
    }

    pub fn characters(&self) -> PostgrestCharacterRepository {
        PostgrestCharacterRepository::new(self.client.clone())
    }

    pub fn skills(&self) -> SkillCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }

    pub fn edges(&self) -> EdgeCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }

    pub fn hindrances(&self) -> HindranceCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }

    pub fn gear(&self) -> GearCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }

    pub fn weapons(&self) -> WeaponCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }

    pub fn powers(&self) -> PowerCatalog {
        PostgrestCatalogRepository::new(self.client.clone())
    }
}
