//! Skill entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AttributeName, DieType, Language, RowId, SourceTag};

/// A trained skill rolled with its own die, linked to one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Option<RowId>,
    pub name: String,
    pub die: DieType,
    pub modifier: i32,
    pub linked_attribute: AttributeName,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    pub language: Language,
}

impl Skill {
    /// A blank custom skill, as added from the sheet's "add skill" action
    pub fn new(
        name: impl Into<String>,
        linked_attribute: AttributeName,
        language: Language,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            die: DieType::D4,
            modifier: 0,
            linked_attribute,
            source_id: SourceTag::Custom,
            source_page: None,
            language,
        }
    }

    pub fn with_die(mut self, die: DieType) -> Self {
        self.die = die;
        self
    }

    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn with_source(mut self, source: SourceTag, page: Option<u32>) -> Self {
        self.source_id = source;
        self.source_page = page;
        self
    }
}
