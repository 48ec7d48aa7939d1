//! Edge entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Language, RowId, SourceTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: Option<RowId>,
    pub name: String,
    pub description: String,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    pub language: Language,
}

impl Edge {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            source_id: SourceTag::Custom,
            source_page: None,
            language,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
