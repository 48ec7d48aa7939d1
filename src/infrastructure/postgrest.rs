//! PostgREST client for the character database
//!
//! Reads are equality-filtered GETs against a named collection. Writes are
//! POSTs that either merge into an existing row (row has an id) or insert a new
//! one and ask for the created row back.

use std::fmt;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::application::dto::KeyedRow;
use crate::domain::value_objects::{Language, RowId};

const PREFER: &str = "Prefer";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Collections exposed by the data API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Characters,
    CharacterAttributes,
    CharacterSkills,
    CharacterEdges,
    CharacterHindrances,
    CharacterGear,
    CharacterWeapons,
    CharacterPowers,
    Skills,
    Edges,
    Hindrances,
    Gear,
    Weapons,
    Powers,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::CharacterAttributes => "character_attributes",
            Self::CharacterSkills => "character_skills",
            Self::CharacterEdges => "character_edges",
            Self::CharacterHindrances => "character_hindrances",
            Self::CharacterGear => "character_gear",
            Self::CharacterWeapons => "character_weapons",
            Self::CharacterPowers => "character_powers",
            Self::Skills => "skills",
            Self::Edges => "edges",
            Self::Hindrances => "hindrances",
            Self::Gear => "gear",
            Self::Weapons => "weapons",
            Self::Powers => "powers",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns that reads may filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Id,
    CharacterId,
    Language,
    Name,
}

impl FilterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CharacterId => "character_id",
            Self::Language => "language",
            Self::Name => "name",
        }
    }
}

/// `field = value`, rendered as `field=eq.value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqFilter {
    pub field: FilterField,
    pub value: String,
}

impl EqFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    pub fn id(id: RowId) -> Self {
        Self::new(FilterField::Id, id.to_string())
    }

    pub fn character_id(id: RowId) -> Self {
        Self::new(FilterField::CharacterId, id.to_string())
    }

    pub fn language(language: Language) -> Self {
        Self::new(FilterField::Language, language.to_string())
    }

    pub fn name(name: &str) -> Self {
        Self::new(FilterField::Name, name)
    }
}

/// How a row is written: merged by identifier, or inserted fresh
#[derive(Debug, Clone, PartialEq)]
pub enum RowWrite<R> {
    New(R),
    Existing { id: RowId, row: R },
}

impl<R: KeyedRow> RowWrite<R> {
    pub fn from_row(row: R) -> Self {
        match row.id() {
            Some(id) => Self::Existing { id, row },
            None => Self::New(row),
        }
    }
}

impl<R> RowWrite<R> {
    pub fn row(&self) -> &R {
        match self {
            Self::New(row) | Self::Existing { row, .. } => row,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("fetch from {resource} failed with status {status}")]
    FetchStatus {
        resource: Resource,
        status: StatusCode,
    },
    #[error("write to {resource} failed with status {status}")]
    WriteStatus {
        resource: Resource,
        status: StatusCode,
    },
    #[error("invalid response from {resource}: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
    #[error("insert into {resource} returned no row")]
    MissingRepresentation { resource: Resource },
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Client for a PostgREST endpoint
#[derive(Clone)]
pub struct PostgrestClient {
    client: Client,
    base_url: String,
}

impl PostgrestClient {
    pub fn new(base_url: &str) -> Result<Self, RestError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, RestError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| RestError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, resource: Resource) -> Result<Url, RestError> {
        let url = format!("{}/{}", self.base_url, resource);
        Url::parse(&url).map_err(|e| RestError::InvalidBaseUrl {
            url,
            reason: e.to_string(),
        })
    }

    /// Fetch every row of `resource` matching all filters
    pub async fn fetch_collection<R>(
        &self,
        resource: Resource,
        filters: &[EqFilter],
    ) -> Result<Vec<R>, RestError>
    where
        R: DeserializeOwned,
    {
        let mut url = self.collection_url(resource)?;
        if !filters.is_empty() {
            let mut query = url.query_pairs_mut();
            for filter in filters {
                query.append_pair(filter.field.as_str(), &format!("eq.{}", filter.value));
            }
        }
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestError::FetchStatus { resource, status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| RestError::Decode { resource, source })
    }

    /// Insert or merge one row and return the row the server acknowledged.
    ///
    /// A merge answered without a JSON body yields the input row, whose id is
    /// already known. An insert answered without one is an error, since the
    /// assigned id would be lost.
    pub async fn upsert_row<R>(&self, resource: Resource, row: R) -> Result<R, RestError>
    where
        R: KeyedRow + Serialize + DeserializeOwned,
    {
        let write = RowWrite::from_row(row);
        let mut url = self.collection_url(resource)?;
        let prefer = match &write {
            RowWrite::Existing { id, .. } => {
                url.query_pairs_mut()
                    .append_pair(FilterField::Id.as_str(), &format!("eq.{}", id));
                MERGE_DUPLICATES
            }
            RowWrite::New(_) => RETURN_REPRESENTATION,
        };
        debug!("POST {} ({})", url, prefer);

        let response = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(PREFER, prefer)
            .json(write.row())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RestError::WriteStatus { resource, status });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let body = response.bytes().await?;

        let returned = if is_json {
            first_row(resource, &body)?
        } else {
            None
        };

        match (returned, write) {
            (Some(row), _) => Ok(row),
            (None, RowWrite::Existing { row, .. }) => Ok(row),
            (None, RowWrite::New(_)) => Err(RestError::MissingRepresentation { resource }),
        }
    }
}

/// The first row of a JSON array body, or the body itself when it is an object
fn first_row<R: DeserializeOwned>(resource: Resource, body: &[u8]) -> Result<Option<R>, RestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|source| RestError::Decode { resource, source })?;
    let row = match value {
        serde_json::Value::Array(rows) => match rows.into_iter().next() {
            Some(row) => row,
            None => return Ok(None),
        },
        serde_json::Value::Null => return Ok(None),
        other => other,
    };
    serde_json::from_value(row)
        .map(Some)
        .map_err(|source| RestError::Decode { resource, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::SkillRow;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn skill_row(id: Option<i64>) -> SkillRow {
        SkillRow {
            id: id.map(RowId::new),
            character_id: Some(RowId::new(42)),
            name: "Fighting".to_string(),
            die: "d8".to_string(),
            modifier: 0,
            linked_attribute: "Agility".to_string(),
            source_id: "SWADE".to_string(),
            source_page: None,
            language: "en".to_string(),
        }
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            PostgrestClient::new("not a url"),
            Err(RestError::InvalidBaseUrl { .. })
        ));
        let client = PostgrestClient::new("http://localhost:3000/").expect("valid url");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_fetch_renders_filters_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/skills"))
            .and(query_param("language", "eq.en"))
            .and(query_param("name", "eq.Fighting"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let rows: Vec<SkillRow> = client
            .fetch_collection(
                Resource::Skills,
                &[EqFilter::language(Language::En), EqFilter::name("Fighting")],
            )
            .await
            .unwrap();

        assert!(rows.is_empty());
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("language=eq.en&name=eq.Fighting"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/characters"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let err = client
            .fetch_collection::<SkillRow>(Resource::Characters, &[EqFilter::id(RowId::new(1))])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RestError::FetchStatus { resource: Resource::Characters, status }
                if status == StatusCode::SERVICE_UNAVAILABLE
        ));
    }

    #[tokio::test]
    async fn test_insert_asks_for_representation_and_omits_id() {
        let server = MockServer::start().await;
        let expected_body = serde_json::to_value(skill_row(None)).unwrap();
        Mock::given(method("POST"))
            .and(path("/character_skills"))
            .and(header("prefer", "return=representation"))
            .and(body_json(&expected_body))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([skill_row(Some(7))])))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let saved = client
            .upsert_row(Resource::CharacterSkills, skill_row(None))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(RowId::new(7)));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
        assert!(!String::from_utf8_lossy(&requests[0].body).contains("\"id\""));
    }

    #[tokio::test]
    async fn test_merge_targets_id_and_falls_back_to_input_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/character_skills"))
            .and(query_param("id", "eq.7"))
            .and(header("prefer", "resolution=merge-duplicates"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let saved = client
            .upsert_row(Resource::CharacterSkills, skill_row(Some(7)))
            .await
            .unwrap();

        assert_eq!(saved, skill_row(Some(7)));
    }

    #[tokio::test]
    async fn test_insert_without_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let err = client
            .upsert_row(Resource::CharacterSkills, skill_row(None))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RestError::MissingRepresentation { resource: Resource::CharacterSkills }
        ));
    }

    #[tokio::test]
    async fn test_write_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let err = client
            .upsert_row(Resource::CharacterSkills, skill_row(Some(7)))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "write to character_skills failed with status 409 Conflict");
    }

    #[tokio::test]
    async fn test_object_body_is_accepted_as_the_returned_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(skill_row(Some(9))))
            .mount(&server)
            .await;

        let client = PostgrestClient::new(&server.uri()).unwrap();
        let saved = client
            .upsert_row(Resource::CharacterSkills, skill_row(None))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(RowId::new(9)));
    }
}
