//! Trait dice and the five fixed attributes

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Die rolled for an attribute or skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DieType {
    #[serde(rename = "d4")]
    D4,
    #[serde(rename = "d6")]
    D6,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d10")]
    D10,
    #[serde(rename = "d12")]
    D12,
}

impl DieType {
    pub const ALL: [DieType; 5] = [Self::D4, Self::D6, Self::D8, Self::D10, Self::D12];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D4 => "d4",
            Self::D6 => "d6",
            Self::D8 => "d8",
            Self::D10 => "d10",
            Self::D12 => "d12",
        }
    }
}

impl std::fmt::Display for DieType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DieType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|die| die.as_str() == s)
            .ok_or_else(|| DomainError::unknown("die type", s))
    }
}

/// The five attributes every character has exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttributeName {
    Agility,
    Smarts,
    Spirit,
    Strength,
    Vigor,
}

impl AttributeName {
    pub const ALL: [AttributeName; 5] = [
        Self::Agility,
        Self::Smarts,
        Self::Spirit,
        Self::Strength,
        Self::Vigor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agility => "Agility",
            Self::Smarts => "Smarts",
            Self::Spirit => "Spirit",
            Self::Strength => "Strength",
            Self::Vigor => "Vigor",
        }
    }
}

impl std::fmt::Display for AttributeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributeName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DomainError::unknown("attribute", s))
    }
}
