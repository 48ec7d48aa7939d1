//! Outbound ports - Interfaces that the application requires from external systems

mod file_port;
mod repository_port;
mod snapshot_port;

pub use file_port::{CharacterFilePort, FileError};
pub use repository_port::{CatalogRepositoryPort, CharacterRepositoryPort};
pub use snapshot_port::{SnapshotStorePort, StorageError};

#[cfg(test)]
pub use file_port::MockCharacterFilePort;
#[cfg(test)]
pub use repository_port::MockCharacterRepositoryPort;
#[cfg(test)]
pub use snapshot_port::MockSnapshotStorePort;
