//! Catalog repositories for the rulebook tables (skills, edges, weapons, ...)

use std::marker::PhantomData;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::RepositoryError;
use crate::application::mappers::RowMapper;
use crate::application::ports::outbound::CatalogRepositoryPort;
use crate::domain::entities::{Edge, Gear, Hindrance, Power, Skill, Weapon};
use crate::domain::value_objects::Language;
use crate::infrastructure::postgrest::{EqFilter, PostgrestClient, Resource};

/// An entry kind with its own catalog collection
pub trait CatalogEntity: RowMapper + Send + Sync + 'static {
    const RESOURCE: Resource;

    /// Whether catalog rows carry a `language` column to filter on
    const LOCALIZED: bool = true;
}

impl CatalogEntity for Skill {
    const RESOURCE: Resource = Resource::Skills;
}

impl CatalogEntity for Edge {
    const RESOURCE: Resource = Resource::Edges;
}

impl CatalogEntity for Hindrance {
    const RESOURCE: Resource = Resource::Hindrances;
}

impl CatalogEntity for Gear {
    const RESOURCE: Resource = Resource::Gear;
    const LOCALIZED: bool = false;
}

impl CatalogEntity for Weapon {
    const RESOURCE: Resource = Resource::Weapons;
}

impl CatalogEntity for Power {
    const RESOURCE: Resource = Resource::Powers;
}

pub type SkillCatalog = PostgrestCatalogRepository<Skill>;
pub type EdgeCatalog = PostgrestCatalogRepository<Edge>;
pub type HindranceCatalog = PostgrestCatalogRepository<Hindrance>;
pub type GearCatalog = PostgrestCatalogRepository<Gear>;
pub type WeaponCatalog = PostgrestCatalogRepository<Weapon>;
pub type PowerCatalog = PostgrestCatalogRepository<Power>;

/// Read-only repository over one catalog collection
pub struct PostgrestCatalogRepository<E> {
    client: PostgrestClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for PostgrestCatalogRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<E> PostgrestCatalogRepository<E> {
    pub fn new(client: PostgrestClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

impl<E> PostgrestCatalogRepository<E>
where
    E: CatalogEntity,
    E::Row: DeserializeOwned + Send,
{
    async fn fetch(&self, mut filters: Vec<EqFilter>, language: Language) -> Result<Vec<E>> {
        if E::LOCALIZED {
            filters.push(EqFilter::language(language));
        }
        let rows: Vec<E::Row> = self
            .client
            .fetch_collection(E::RESOURCE, &filters)
            .await
            .map_err(RepositoryError::from)
            .with_context(|| format!("Failed to fetch {}", E::RESOURCE))?;

        rows.into_iter()
            .map(|row| E::from_row(row).map_err(RepositoryError::from))
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("Failed to read {} rows", E::RESOURCE))
    }
}

#[async_trait]
impl<E> CatalogRepositoryPort<E> for PostgrestCatalogRepository<E>
where
    E: CatalogEntity,
    E::Row: DeserializeOwned + Send,
{
    async fn list_for_language(&self, language: Language) -> Result<Vec<E>> {
        let entries = self.fetch(Vec::new(), language).await?;
        tracing::debug!("Fetched {} {} ({})", entries.len(), E::RESOURCE, language);
        Ok(entries)
    }

    async fn find_by_name(&self, name: &str, language: Language) -> Result<Option<E>> {
        let entries = self.fetch(vec![EqFilter::name(name)], language).await?;
        Ok(entries.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn edge_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "source_id": "SWADE",
            "source_page": 38,
            "language": "ru"
        })
    }

    #[tokio::test]
    async fn test_list_for_language_filters_by_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/edges"))
            .and(query_param("language", "eq.ru"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([edge_json(1, "Alertness"), edge_json(2, "Brawny")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = EdgeCatalog::new(PostgrestClient::new(&server.uri()).unwrap());
        let edges = catalog.list_for_language(Language::Ru).await.unwrap();

        assert_eq!(edges.len(), 2);
        assert_eq!(edges[1].name, "Brawny");
        assert_eq!(edges[1].language, Language::Ru);
    }

    #[tokio::test]
    async fn test_find_by_name_absent_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/skills"))
            .and(query_param("name", "eq.Juggling"))
            .and(query_param("language", "eq.en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = SkillCatalog::new(PostgrestClient::new(&server.uri()).unwrap());
        let found = catalog.find_by_name("Juggling", Language::En).await.unwrap();

        assert!(found.is_none());
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("name=eq.Juggling&language=eq.en"));
    }

    #[tokio::test]
    async fn test_gear_catalog_ignores_language() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gear"))
            .and(query_param_is_missing("language"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 5,
                "name": "Rope (10\")",
                "weight": 5.0,
                "notes": null,
                "source_id": "SWADE",
                "source_page": null
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let catalog = GearCatalog::new(PostgrestClient::new(&server.uri()).unwrap());
        let gear = catalog.list_for_language(Language::Ru).await.unwrap();

        assert_eq!(gear.len(), 1);
        assert_eq!(gear[0].weight, Some(5.0));
        assert_eq!(gear[0].notes, None);
    }

    #[tokio::test]
    async fn test_bad_catalog_row_fails_the_lookup() {
        let server = MockServer::start().await;
        let mut row = edge_json(3, "Quick");
        row["source_id"] = json!("UNKNOWN_BOOK");
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row])))
            .mount(&server)
            .await;

        let catalog = EdgeCatalog::new(PostgrestClient::new(&server.uri()).unwrap());
        let err = catalog.find_by_name("Quick", Language::Ru).await.unwrap_err();

        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("Invalid source tag")));
    }
}
