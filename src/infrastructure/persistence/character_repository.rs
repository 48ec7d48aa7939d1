//! Character repository implementation for PostgREST

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RepositoryError;
use crate::application::dto::{CharacterChildRows, CharacterRow, CharacterRows, KeyedRow};
use crate::application::mappers::{assemble_character, disassemble_character};
use crate::application::ports::outbound::CharacterRepositoryPort;
use crate::domain::entities::Character;
use crate::domain::value_objects::RowId;
use crate::infrastructure::postgrest::{EqFilter, PostgrestClient, Resource, RestError};

/// Repository for the character aggregate, spread over `characters` and
/// the seven `character_*` child tables
#[derive(Clone)]
pub struct PostgrestCharacterRepository {
    client: PostgrestClient,
}

impl PostgrestCharacterRepository {
    pub fn new(client: PostgrestClient) -> Self {
        Self { client }
    }

    async fn fetch_children(&self, id: RowId) -> Result<CharacterChildRows, RestError> {
        let filter = [EqFilter::character_id(id)];
        let (attributes, skills, edges, hindrances, gear, weapons, powers) = tokio::try_join!(
            self.client.fetch_collection(Resource::CharacterAttributes, &filter),
            self.client.fetch_collection(Resource::CharacterSkills, &filter),
            self.client.fetch_collection(Resource::CharacterEdges, &filter),
            self.client.fetch_collection(Resource::CharacterHindrances, &filter),
            self.client.fetch_collection(Resource::CharacterGear, &filter),
            self.client.fetch_collection(Resource::CharacterWeapons, &filter),
            self.client.fetch_collection(Resource::CharacterPowers, &filter),
        )?;

        Ok(CharacterChildRows {
            attributes,
            skills,
            edges,
            hindrances,
            gear,
            weapons,
            powers,
        })
    }

    async fn upsert_all<R>(&self, resource: Resource, rows: Vec<R>) -> Result<Vec<R>, RestError>
    where
        R: KeyedRow + Serialize + DeserializeOwned,
    {
        try_join_all(rows.into_iter().map(|row| self.client.upsert_row(resource, row))).await
    }

    /// Upsert every child row as one unordered batch
    async fn upsert_children(
        &self,
        children: CharacterChildRows,
    ) -> Result<CharacterChildRows, RestError> {
        let CharacterChildRows {
            attributes,
            skills,
            edges,
            hindrances,
            gear,
            weapons,
            powers,
        } = children;

        let (attributes, skills, edges, hindrances, gear, weapons, powers) = tokio::try_join!(
            self.upsert_all(Resource::CharacterAttributes, attributes),
            self.upsert_all(Resource::CharacterSkills, skills),
            self.upsert_all(Resource::CharacterEdges, edges),
            self.upsert_all(Resource::CharacterHindrances, hindrances),
            self.upsert_all(Resource::CharacterGear, gear),
            self.upsert_all(Resource::CharacterWeapons, weapons),
            self.upsert_all(Resource::CharacterPowers, powers),
        )?;

        Ok(CharacterChildRows {
            attributes,
            skills,
            edges,
            hindrances,
            gear,
            weapons,
            powers,
        })
    }

    /// Write the parent row, then the children tagged with its id.
    ///
    /// Not atomic: a failed child write leaves the parent and any finished
    /// siblings in place.
    async fn persist(&self, character: &Character) -> Result<(RowId, Character)> {
        let CharacterRows { main, mut children } = disassemble_character(character);

        let main: CharacterRow = self
            .client
            .upsert_row(Resource::Characters, main)
            .await
            .map_err(RepositoryError::from)
            .context("Failed to save character row")?;
        let id = main.id.ok_or(RepositoryError::MissingIdentifier {
            resource: Resource::Characters.as_str(),
        })?;

        children.assign_character_id(id);
        let count = children.row_count();
        let children = self
            .upsert_children(children)
            .await
            .map_err(RepositoryError::from)
            .with_context(|| format!("Failed to save child rows of character {}", id))?;

        let saved = assemble_character(main, children).map_err(RepositoryError::from)?;
        tracing::debug!("Saved character {} with {} child rows", id, count);
        Ok((id, saved))
    }
}

#[async_trait]
impl CharacterRepositoryPort for PostgrestCharacterRepository {
    async fn get_by_id(&self, id: RowId) -> Result<Option<Character>> {
        let mains: Vec<CharacterRow> = self
            .client
            .fetch_collection(Resource::Characters, &[EqFilter::id(id)])
            .await
            .map_err(RepositoryError::from)
            .with_context(|| format!("Failed to fetch character {}", id))?;
        let Some(main) = mains.into_iter().next() else {
            return Ok(None);
        };

        let children = self
            .fetch_children(id)
            .await
            .map_err(RepositoryError::from)
            .with_context(|| format!("Failed to fetch child rows of character {}", id))?;

        let character = assemble_character(main, children)
            .map_err(RepositoryError::from)
            .with_context(|| format!("Failed to read character {}", id))?;
        Ok(Some(character))
    }

    async fn save(&self, character: &Character) -> Result<RowId> {
        let (id, _) = self.persist(character).await?;
        Ok(id)
    }

    async fn save_returning(&self, character: &Character) -> Result<Character> {
        let (_, saved) = self.persist(character).await?;
        Ok(saved)
    }
}
