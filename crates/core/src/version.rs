//! Release version identifiers.

use crate::error::PreconditionError;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Unanchored pattern for a version token: two digits, then three one-to-two
/// digit components.
pub const VERSION_TOKEN_PATTERN: &str = r"\d{2}\.\d{1,2}\.\d{1,2}\.\d{1,2}";

static EXACT_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{VERSION_TOKEN_PATTERN}$")).expect("static regex must compile")
});

/// A release version such as `45.1.15.0`.
///
/// Ordering is plain string ordering, so `45.1.9.0` sorts after `45.1.15.0`.
/// Callers that need semantic-version ordering must not rely on `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag(String);

impl VersionTag {
    /// Validate `s` as a complete version tag.
    pub fn parse(s: &str) -> Result<Self, PreconditionError> {
        if EXACT_VERSION_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(PreconditionError::MalformedVersionTag(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VersionTag {
    type Err = PreconditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionTag {
    type Error = PreconditionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if EXACT_VERSION_RE.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(PreconditionError::MalformedVersionTag(value))
        }
    }
}

impl From<VersionTag> for String {
    fn from(tag: VersionTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for VersionTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
