//! Sheet Service - The editing session and its persistence use cases
//!
//! The service owns the one character being edited. Front ends read and mutate
//! it through the service, which also moves it between the remote data API,
//! the local snapshot store and standalone character files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{
    CharacterFilePort, CharacterRepositoryPort, FileError, SnapshotStorePort,
};
use crate::domain::entities::Character;
use crate::domain::value_objects::RowId;
use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Failed to save character: {0:#}")]
    Save(anyhow::Error),
    #[error("Failed to load character {id}: {error:#}")]
    Load { id: RowId, error: anyhow::Error },
    #[error("Character {0} not found")]
    NotFound(RowId),
    #[error("Failed to export character: {0}")]
    Export(#[source] FileError),
    #[error("Failed to import character: {0}")]
    Import(#[source] FileError),
    #[error(transparent)]
    Edit(#[from] DomainError),
}

impl SheetError {
    /// Short message suitable for an alert; carries no internal detail
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Save(_) => "Error saving character to database",
            Self::Load { .. } => "Error loading character from database",
            Self::NotFound(_) => "Character not found",
            Self::Export(_) => "Error exporting character",
            Self::Import(FileError::InvalidCharacterFile { .. }) => "Invalid character file",
            Self::Import(_) => "Error reading character file",
            Self::Edit(_) => "Invalid value",
        }
    }
}

pub struct SheetService {
    character: RwLock<Character>,
    repository: Arc<dyn CharacterRepositoryPort>,
    snapshots: Arc<dyn SnapshotStorePort>,
    files: Arc<dyn CharacterFilePort>,
}

impl SheetService {
    pub fn new(
        repository: Arc<dyn CharacterRepositoryPort>,
        snapshots: Arc<dyn SnapshotStorePort>,
        files: Arc<dyn CharacterFilePort>,
    ) -> Self {
        Self {
            character: RwLock::new(Character::default()),
            repository,
            snapshots,
            files,
        }
    }

    /// Copy of the character being edited
    pub async fn current(&self) -> Character {
        self.character.read().await.clone()
    }

    pub async fn replace(&self, character: Character) {
        *self.character.write().await = character;
    }

    /// Apply an edit to the character in place
    pub async fn update<F, R>(&self, edit: F) -> R
    where
        F: FnOnce(&mut Character) -> R,
    {
        let mut character = self.character.write().await;
        edit(&mut character)
    }

    /// Like `update`, for edits that can reject their input
    pub async fn try_update<F, R>(&self, edit: F) -> Result<R, SheetError>
    where
        F: FnOnce(&mut Character) -> Result<R, DomainError>,
    {
        let mut character = self.character.write().await;
        Ok(edit(&mut character)?)
    }

    /// Discard the current character and start from the blank template
    pub async fn new_character(&self) {
        self.replace(Character::default()).await;
        debug!("Started a new character");
    }

    /// Seed the session from the local snapshot, if one exists.
    ///
    /// Storage failures are logged and the session keeps its current character.
    #[instrument(skip(self))]
    pub async fn restore_snapshot(&self) -> bool {
        match self.snapshots.load().await {
            Ok(Some(character)) => {
                info!("Restored character '{}' from local snapshot", character.name);
                self.replace(character).await;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read local snapshot: {}", e);
                false
            }
        }
    }

    /// Write the current character to the local snapshot store; failures are dropped
    pub async fn snapshot(&self) {
        let character = self.current().await;
        if let Err(e) = self.snapshots.save(&character).await {
            warn!("Failed to write local snapshot: {}", e);
        }
    }

    #[instrument(skip(self))]
    pub async fn export_file(&self, dir: &Path) -> Result<PathBuf, SheetError> {
        let character = self.current().await;
        let path = self
            .files
            .export(&character, dir)
            .await
            .map_err(SheetError::Export)?;
        info!("Exported character to {}", path.display());
        Ok(path)
    }

    /// Replace the whole character with the contents of a file
    #[instrument(skip(self))]
    pub async fn import_file(&self, path: &Path) -> Result<(), SheetError> {
        let character = self.files.import(path).await.map_err(SheetError::Import)?;
        info!("Imported character '{}'", character.name);
        self.replace(character).await;
        Ok(())
    }

    /// Save the character remotely and adopt the identifiers the backend assigned.
    ///
    /// When the character was edited while the save was in flight only the
    /// character's own id is adopted, so the newer edits survive.
    #[instrument(skip(self))]
    pub async fn save_remote(&self) -> Result<RowId, SheetError> {
        let sent = self.current().await;
        let saved = self
            .repository
            .save_returning(&sent)
            .await
            .map_err(SheetError::Save)?;
        let id = saved
            .id
            .ok_or_else(|| SheetError::Save(anyhow::anyhow!("saved character has no id")))?;

        let mut character = self.character.write().await;
        if *character == sent {
            *character = saved;
        } else {
            debug!("Character changed during save; adopting id only");
            character.id = Some(id);
        }

        info!("Saved character {}", id);
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn load_remote(&self, id: RowId) -> Result<(), SheetError> {
        let character = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|error| SheetError::Load { id, error })?
            .ok_or(SheetError::NotFound(id))?;
        info!("Loaded character '{}' ({})", character.name, id);
        self.replace(character).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{
        MockCharacterFilePort, MockCharacterRepositoryPort, MockSnapshotStorePort, StorageError,
    };
    use crate::domain::entities::Skill;
    use crate::domain::value_objects::{AttributeName, Language, Rank, Tracker};

    fn service(
        repository: MockCharacterRepositoryPort,
        snapshots: MockSnapshotStorePort,
        files: MockCharacterFilePort,
    ) -> SheetService {
        SheetService::new(Arc::new(repository), Arc::new(snapshots), Arc::new(files))
    }

    fn with_repository(repository: MockCharacterRepositoryPort) -> SheetService {
        service(
            repository,
            MockSnapshotStorePort::new(),
            MockCharacterFilePort::new(),
        )
    }

    #[tokio::test]
    async fn test_new_session_starts_from_template() {
        let sheet = with_repository(MockCharacterRepositoryPort::new());
        assert_eq!(sheet.current().await, Character::default());
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let sheet = with_repository(MockCharacterRepositoryPort::new());
        let stepped = sheet.update(|c| c.increment_tracker(Tracker::Wounds)).await;
        assert!(stepped);
        assert_eq!(sheet.current().await.wounds, 1);

        let err = sheet.try_update(|c| c.remove_skill(3)).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid value");
    }

    #[tokio::test]
    async fn test_save_remote_adopts_assigned_ids() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository.expect_save_returning().times(1).returning(|c| {
            let mut saved = c.clone();
            saved.id = Some(RowId::new(42));
            for skill in &mut saved.skills {
                skill.id = Some(RowId::new(7));
            }
            Ok(saved)
        });
        let sheet = with_repository(repository);
        sheet
            .replace(
                Character::new("Korvak")
                    .with_skill(Skill::new("Fighting", AttributeName::Agility, Language::En)),
            )
            .await;

        let id = sheet.save_remote().await.expect("save should succeed");

        assert_eq!(id, RowId::new(42));
        let current = sheet.current().await;
        assert_eq!(current.id, Some(RowId::new(42)));
        assert_eq!(current.skills[0].id, Some(RowId::new(7)));
    }

    #[tokio::test]
    async fn test_failed_save_reports_generic_message() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository
            .expect_save_returning()
            .returning(|_| Err(anyhow::anyhow!("write to characters failed with status 500")));
        let sheet = with_repository(repository);

        let err = sheet.save_remote().await.unwrap_err();

        assert!(matches!(err, SheetError::Save(_)));
        assert_eq!(err.user_message(), "Error saving character to database");
        assert_eq!(sheet.current().await.id, None);
    }

    #[tokio::test]
    async fn test_load_remote_replaces_character() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository
            .expect_get_by_id()
            .withf(|id| *id == RowId::new(42))
            .returning(|id| {
                let mut character = Character::new("Korvak").with_rank(Rank::Veteran);
                character.id = Some(id);
                Ok(Some(character))
            });
        let sheet = with_repository(repository);

        sheet.load_remote(RowId::new(42)).await.expect("load should succeed");

        let current = sheet.current().await;
        assert_eq!(current.name, "Korvak");
        assert_eq!(current.rank, Rank::Veteran);
    }

    #[tokio::test]
    async fn test_load_remote_absent_is_not_found() {
        let mut repository = MockCharacterRepositoryPort::new();
        repository.expect_get_by_id().returning(|_| Ok(None));
        let sheet = with_repository(repository);
        sheet.replace(Character::new("Keep me")).await;

        let err = sheet.load_remote(RowId::new(9)).await.unwrap_err();

        assert!(matches!(err, SheetError::NotFound(id) if id == RowId::new(9)));
        assert_eq!(sheet.current().await.name, "Keep me");
    }

    #[tokio::test]
    async fn test_snapshot_failures_are_swallowed() {
        let mut snapshots = MockSnapshotStorePort::new();
        snapshots
            .expect_load()
            .returning(|| Err(StorageError::Database("disk I/O error".to_string())));
        snapshots
            .expect_save()
            .times(1)
            .returning(|_| Err(StorageError::Database("database is locked".to_string())));
        let sheet = service(
            MockCharacterRepositoryPort::new(),
            snapshots,
            MockCharacterFilePort::new(),
        );

        assert!(!sheet.restore_snapshot().await);
        sheet.snapshot().await;
        assert_eq!(sheet.current().await, Character::default());
    }

    #[tokio::test]
    async fn test_restore_snapshot_seeds_session() {
        let mut snapshots = MockSnapshotStorePort::new();
        snapshots
            .expect_load()
            .returning(|| Ok(Some(Character::new("Restored"))));
        let sheet = service(
            MockCharacterRepositoryPort::new(),
            snapshots,
            MockCharacterFilePort::new(),
        );

        assert!(sheet.restore_snapshot().await);
        assert_eq!(sheet.current().await.name, "Restored");
    }

    #[tokio::test]
    async fn test_invalid_import_keeps_current_character() {
        let mut files = MockCharacterFilePort::new();
        files.expect_import().returning(|path| {
            Err(FileError::InvalidCharacterFile {
                path: path.to_path_buf(),
                reason: "missing field `rank`".to_string(),
            })
        });
        let sheet = service(
            MockCharacterRepositoryPort::new(),
            MockSnapshotStorePort::new(),
            files,
        );
        sheet.replace(Character::new("Current")).await;

        let err = sheet.import_file(Path::new("broken.json")).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid character file");
        assert_eq!(sheet.current().await.name, "Current");
    }
}
