//! Power entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Language, RowId, SourceTag};

/// An arcane power and its activation cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Power {
    pub id: Option<RowId>,
    pub name: String,
    pub power_points: u32,
    pub range: String,
    pub duration: String,
    pub effect: String,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    pub language: Language,
}

impl Power {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            id: None,
            name: name.into(),
            power_points: 0,
            range: String::new(),
            duration: String::new(),
            effect: String::new(),
            source_id: SourceTag::Custom,
            source_page: None,
            language,
        }
    }
}
