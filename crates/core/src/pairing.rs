//! How fragments of a stitched input are labelled with versions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fragment-to-version pairing.
///
/// Parsing is shared by config files, environment overrides and the CLI:
/// case and surrounding whitespace are ignored and `-` reads as `_`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PairingStrategy {
    /// Each fragment is labelled by the first version token in its own text,
    /// falling back to its position.
    #[default]
    PerFragment,
    /// The n-th fragment gets the n-th smallest version.
    Positional,
}

impl PairingStrategy {
    pub const ALL: [PairingStrategy; 2] = [PairingStrategy::PerFragment, PairingStrategy::Positional];

    pub fn as_str(self) -> &'static str {
        match self {
            PairingStrategy::PerFragment => "per_fragment",
            PairingStrategy::Positional => "positional",
        }
    }
}

impl fmt::Display for PairingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown pairing strategy {0:?}, expected per_fragment or positional")]
pub struct ParsePairingError(pub String);

impl FromStr for PairingStrategy {
    type Err = ParsePairingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == normalized)
            .ok_or_else(|| ParsePairingError(s.to_string()))
    }
}

impl TryFrom<String> for PairingStrategy {
    type Error = ParsePairingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PairingStrategy> for String {
    fn from(strategy: PairingStrategy) -> Self {
        strategy.as_str().to_string()
    }
}
