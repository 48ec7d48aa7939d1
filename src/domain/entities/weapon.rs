//! Weapon entity and its editable fields

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Language, RowId, SourceTag};
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: Option<RowId>,
    pub name: String,
    /// Damage expression, e.g. "Str+d6"
    pub damage: String,
    pub range: String,
    /// Armor piercing
    pub ap: i32,
    pub weight: f64,
    pub notes: String,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
    pub language: Language,
}

/// Fields of a weapon that can be edited from raw text input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponField {
    Name,
    Damage,
    Range,
    ArmorPiercing,
    Weight,
    Notes,
    SourcePage,
}

impl std::str::FromStr for WeaponField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "damage" => Ok(Self::Damage),
            "range" => Ok(Self::Range),
            "ap" => Ok(Self::ArmorPiercing),
            "weight" => Ok(Self::Weight),
            "notes" => Ok(Self::Notes),
            "page" | "source_page" => Ok(Self::SourcePage),
            _ => Err(DomainError::unknown("weapon field", s)),
        }
    }
}

impl Weapon {
    pub fn new(name: impl Into<String>, language: Language) -> Self {
        Self {
            id: None,
            name: name.into(),
            damage: String::new(),
            range: String::new(),
            ap: 0,
            weight: 0.0,
            notes: String::new(),
            source_id: SourceTag::Custom,
            source_page: None,
            language,
        }
    }

    pub fn with_damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = damage.into();
        self
    }

    /// Set one field from text; numeric fields must parse
    pub fn set_field(&mut self, field: WeaponField, raw: &str) -> Result<(), DomainError> {
        match field {
            WeaponField::Name => self.name = raw.to_string(),
            WeaponField::Damage => self.damage = raw.to_string(),
            WeaponField::Range => self.range = raw.to_string(),
            WeaponField::Notes => self.notes = raw.to_string(),
            WeaponField::ArmorPiercing => self.ap = parse_number("ap", raw)?,
            WeaponField::Weight => self.weight = parse_decimal("weight", raw)?,
            WeaponField::SourcePage => self.source_page = Some(parse_number("source page", raw)?),
        }
        Ok(())
    }
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<T, DomainError> {
    raw.trim().parse().map_err(|_| DomainError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Like `parse_number`, but NaN and infinities are rejected since JSON cannot carry them
pub(crate) fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    let value: f64 = parse_number(field, raw)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
    }
}
