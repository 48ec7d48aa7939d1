//! Advancement rank and hindrance severity

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Character rank, ordered from Novice to Legendary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Novice,
    Seasoned,
    Veteran,
    Heroic,
    Legendary,
}

impl Rank {
    pub const ALL: [Rank; 5] = [
        Self::Novice,
        Self::Seasoned,
        Self::Veteran,
        Self::Heroic,
        Self::Legendary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Seasoned => "Seasoned",
            Self::Veteran => "Veteran",
            Self::Heroic => "Heroic",
            Self::Legendary => "Legendary",
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Self::Novice
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| DomainError::unknown("rank", s))
    }
}

/// Hindrance severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HindranceSeverity {
    Major,
    Minor,
}

impl HindranceSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }
}

impl std::fmt::Display for HindranceSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HindranceSeverity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Major" => Ok(Self::Major),
            "Minor" => Ok(Self::Minor),
            _ => Err(DomainError::unknown("hindrance severity", s)),
        }
    }
}
