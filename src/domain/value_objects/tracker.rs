//! Combat trackers adjusted during play

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A counter the sheet steps up and down one point at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tracker {
    Wounds,
    Fatigue,
    Bennies,
}

impl Tracker {
    /// Highest value an increment may reach
    pub fn max(&self) -> u32 {
        match self {
            Self::Wounds | Self::Fatigue => 6,
            Self::Bennies => 4,
        }
    }
}

impl std::fmt::Display for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wounds => write!(f, "wounds"),
            Self::Fatigue => write!(f, "fatigue"),
            Self::Bennies => write!(f, "bennies"),
        }
    }
}

impl std::str::FromStr for Tracker {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wounds" | "wound" => Ok(Self::Wounds),
            "fatigue" => Ok(Self::Fatigue),
            "bennies" | "benny" => Ok(Self::Bennies),
            _ => Err(DomainError::unknown("tracker", s)),
        }
    }
}
