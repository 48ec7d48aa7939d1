//! Rulebook source tags

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Which book (or custom origin) a sheet entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceTag {
    /// Savage Worlds Adventure Edition core rules
    Swade,
    SwadeCompanion,
    FantasyCompanion,
    HorrorCompanion,
    SciFiCompanion,
    SuperPowersCompanion,
    /// House rules and user-authored entries
    Custom,
    /// Community content
    Homebrew,
}

impl SourceTag {
    pub const ALL: [SourceTag; 8] = [
        Self::Swade,
        Self::SwadeCompanion,
        Self::FantasyCompanion,
        Self::HorrorCompanion,
        Self::SciFiCompanion,
        Self::SuperPowersCompanion,
        Self::Custom,
        Self::Homebrew,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swade => "SWADE",
            Self::SwadeCompanion => "SWADE_COMPANION",
            Self::FantasyCompanion => "FANTASY_COMPANION",
            Self::HorrorCompanion => "HORROR_COMPANION",
            Self::SciFiCompanion => "SCI_FI_COMPANION",
            Self::SuperPowersCompanion => "SUPER_POWERS_COMPANION",
            Self::Custom => "CUSTOM",
            Self::Homebrew => "HOMEBREW",
        }
    }
}

impl Default for SourceTag {
    fn default() -> Self {
        Self::Custom
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DomainError::unknown("source tag", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_wire_names() {
        for tag in SourceTag::ALL {
            let json = serde_json::to_string(&tag).expect("serialization should succeed");
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        assert_eq!("SCI_FI_COMPANION".parse(), Ok(SourceTag::SciFiCompanion));
        assert!("PULP".parse::<SourceTag>().is_err());
    }
}
