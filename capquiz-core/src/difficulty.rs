//! Difficulty levels as population buckets.
//!
//! Each level maps to exactly one population range. Bounds are exclusive on
//! both ends, so populations of exactly 10,000,000 or 40,000,000 fall into
//! no bucket; the selector reports that as a missing candidate rather than
//! retrying forever.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for unrecognized difficulty names.
#[derive(Debug, Error)]
#[error("Unknown difficulty level: {0}")]
pub struct ParseDifficultyError(String);

/// Quiz difficulty, from most to least populous countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
    Insane,
}

/// A population interval with exclusive bounds.
///
/// `to == None` means unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopulationRange {
    pub from: u64,
    pub to: Option<u64>,
}

impl PopulationRange {
    /// Strict membership test: `from < population < to`.
    pub fn contains(&self, population: u64) -> bool {
        population > self.from && self.to.map_or(true, |to| population < to)
    }
}

impl Difficulty {
    /// The population range countries must fall in for this level.
    pub fn range(&self) -> PopulationRange {
        match self {
            Difficulty::Easy => PopulationRange {
                from: 40_000_000,
                to: None,
            },
            Difficulty::Hard => PopulationRange {
                from: 10_000_000,
                to: Some(40_000_000),
            },
            Difficulty::Insane => PopulationRange {
                from: 0,
                to: Some(10_000_000),
            },
        }
    }

    /// Whether a country with the given population belongs to this level.
    pub fn accepts(&self, population: u64) -> bool {
        self.range().contains(population)
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Hard, Difficulty::Insane]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            "insane" => Ok(Difficulty::Insane),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}
