//! Hindrance entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{HindranceSeverity, Language, RowId, SourceTag};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hindrance {
    pub id: Option<RowId>,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub severity: HindranceSeverity,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    pub language: Language,
}

impl Hindrance {
    /// New hindrances start as Minor custom entries
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            severity: HindranceSeverity::Minor,
            source_id: SourceTag::Custom,
            source_page: None,
            language,
        }
    }

    pub fn with_severity(mut self, severity: HindranceSeverity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
