use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::outbound::{CharacterFilePort, FileError};
use crate::domain::entities::Character;

/// Reads and writes `<name>.json` character files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCharacterFiles;

impl JsonCharacterFiles {
    pub fn new() -> Self {
        Self
    }

    /// File name for a character; path separators in the name become `_`
    pub fn file_name(character: &Character) -> String {
        let stem: String = character
            .file_stem()
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("{}.json", stem)
    }
}

#[async_trait]
impl CharacterFilePort for JsonCharacterFiles {
    async fn export(&self, character: &Character, dir: &Path) -> Result<PathBuf, FileError> {
        let path = dir.join(Self::file_name(character));
        let json = serde_json::to_string_pretty(character).map_err(|e| {
            FileError::InvalidCharacterFile {
                path: path.clone(),
                reason: e.to_string(),
            }
        })?;

        tokio::fs::write(&path, json)
            .await
            .map_err(|source| FileError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Wrote character file {}", path.display());
        Ok(path)
    }

    async fn import(&self, path: &Path) -> Result<Character, FileError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FileError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&json).map_err(|e| FileError::InvalidCharacterFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::application::ports::outbound::{
        MockCharacterRepositoryPort, MockSnapshotStorePort,
    };
    use crate::application::services::SheetService;
    use crate::domain::entities::{Gear, Skill};
    use crate::domain::value_objects::{AttributeName, DieType, Language, Rank};

    fn korvak_json() -> serde_json::Value {
        let attribute = |die: &str| json!({ "id": null, "die": die, "modifier": 0 });
        json!({
            "id": null,
            "name": "Korvak",
            "race": "Half-Orc",
            "rank": "Veteran",
            "experience": 30,
            "attributes": {
                "Agility": attribute("d6"),
                "Smarts": attribute("d4"),
                "Spirit": attribute("d6"),
                "Strength": attribute("d10"),
                "Vigor": attribute("d8")
            },
            "skills": [],
            "derivedStats": { "pace": 6, "parry": 5, "toughness": 8, "charisma": 0 },
            "edges": [],
            "hindrances": [],
            "gear": [],
            "weapons": [],
            "powers": [],
            "wounds": 0,
            "fatigue": 0,
            "powerPoints": 0,
            "bennies": 3
        })
    }

    #[test]
    fn test_file_name_falls_back_and_strips_separators() {
        assert_eq!(JsonCharacterFiles::file_name(&Character::default()), "character.json");
        assert_eq!(
            JsonCharacterFiles::file_name(&Character::new("Korvak/the\\Bold")),
            "Korvak_the_Bold.json"
        );
    }

    #[tokio::test]
    async fn test_export_then_import_reproduces_character() {
        let dir = tempfile::tempdir().unwrap();
        let mut character = Character::new("Korvak")
            .with_rank(Rank::Seasoned)
            .with_attribute(AttributeName::Smarts, DieType::D6, 1)
            .with_skill(Skill::new("Notice", AttributeName::Smarts, Language::En));
        character.add_gear(Gear::new("Torch"));

        let files = JsonCharacterFiles::new();
        let path = files.export(&character, dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("Korvak.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"name\": \"Korvak\""));
        assert_eq!(files.import(&path).await.unwrap(), character);
    }

    #[tokio::test]
    async fn test_import_rejects_wrong_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"name": "Korvak", "rank": "Overlord"}"#).unwrap();

        let err = JsonCharacterFiles::new().import(&path).await.unwrap_err();

        assert!(matches!(err, FileError::InvalidCharacterFile { .. }));
    }

    #[tokio::test]
    async fn test_import_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = JsonCharacterFiles::new()
            .import(&dir.path().join("nope.json"))
            .await
            .unwrap_err();

        assert!(matches!(err, FileError::Io { .. }));
    }

    #[tokio::test]
    async fn test_import_replaces_session_character_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("korvak.json");
        std::fs::write(&path, korvak_json().to_string()).unwrap();

        let sheet = SheetService::new(
            Arc::new(MockCharacterRepositoryPort::new()),
            Arc::new(MockSnapshotStorePort::new()),
            Arc::new(JsonCharacterFiles::new()),
        );
        sheet
            .replace(
                Character::new("Previous")
                    .with_skill(Skill::new("Stealth", AttributeName::Agility, Language::En)),
            )
            .await;

        sheet.import_file(&path).await.unwrap();

        let current = sheet.current().await;
        assert_eq!(current.name, "Korvak");
        assert_eq!(current.rank, Rank::Veteran);
        assert!(current.skills.is_empty());
        assert_eq!(current.derived_stats.toughness, 8);
    }
}
