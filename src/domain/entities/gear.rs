//! Gear entity

use serde::{Deserialize, Serialize};

use super::weapon::{parse_decimal, parse_number};
use crate::domain::value_objects::{RowId, SourceTag};
use crate::domain::DomainError;

/// Carried equipment. Gear is not localized, so it has no language tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gear {
    pub id: Option<RowId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub source_id: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearField {
    Name,
    Weight,
    Notes,
    SourcePage,
}

impl std::str::FromStr for GearField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "weight" => Ok(Self::Weight),
            "notes" => Ok(Self::Notes),
            "page" | "source_page" => Ok(Self::SourcePage),
            _ => Err(DomainError::unknown("gear field", s)),
        }
    }
}

impl Gear {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            weight: Some(0.0),
            notes: Some(String::new()),
            source_id: SourceTag::Custom,
            source_page: None,
        }
    }

    /// Set one field from text. An empty string clears the optional fields.
    pub fn set_field(&mut self, field: GearField, raw: &str) -> Result<(), DomainError> {
        match field {
            GearField::Name => self.name = raw.to_string(),
            GearField::Notes if raw.is_empty() => self.notes = None,
            GearField::Notes => self.notes = Some(raw.to_string()),
            GearField::Weight if raw.trim().is_empty() => self.weight = None,
            GearField::Weight => self.weight = Some(parse_decimal("weight", raw)?),
            GearField::SourcePage if raw.trim().is_empty() => self.source_page = None,
            GearField::SourcePage => self.source_page = Some(parse_number("source page", raw)?),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_clears_optional_fields() {
        let mut gear = Gear::new("Rope");
        gear.set_field(GearField::Weight, "").unwrap();
        gear.set_field(GearField::Notes, "").unwrap();
        assert_eq!(gear.weight, None);
        assert_eq!(gear.notes, None);
    }

    #[test]
    fn test_weight_must_be_numeric() {
        let mut gear = Gear::new("Rope");
        gear.set_field(GearField::Weight, "10").unwrap();
        assert_eq!(gear.weight, Some(10.0));
        assert!(gear.set_field(GearField::Weight, "ten").is_err());
        assert_eq!(gear.weight, Some(10.0));
    }

    #[test]
    fn test_weight_must_be_finite() {
        let mut gear = Gear::new("Rope");
        gear.set_field(GearField::Weight, "10").unwrap();
        assert!(gear.set_field(GearField::Weight, "NaN").is_err());
        assert!(gear.set_field(GearField::Weight, "-inf").is_err());
        assert_eq!(gear.weight, Some(10.0));
    }
}
