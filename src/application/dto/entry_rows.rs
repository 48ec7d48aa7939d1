//! Rows shared by the catalog tables and the `character_*` child tables
//!
//! Catalog rows have no `character_id`; it is omitted from request bodies when unset.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RowId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    pub die: String,
    pub modifier: i32,
    pub linked_attribute: String,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    pub description: String,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HindranceRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    pub description: String,
    pub hindrance_type: String,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GearRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    pub damage: String,
    pub range: String,
    pub ap: i32,
    pub weight: f64,
    pub notes: String,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<RowId>,
    pub name: String,
    pub power_points: u32,
    pub range: String,
    pub duration: String,
    pub effect: String,
    pub source_id: String,
    #[serde(default)]
    pub source_page: Option<u32>,
    pub language: String,
}
