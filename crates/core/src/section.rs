//! Report sections, dialects, and the not-found sentinel.

use crate::headings;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered in place of a section that could not be located.
pub const SECTION_NOT_FOUND: &str = "*Section Not Found*";

/// The four report sections recovered from every fragment.
///
/// Variant order is the order of blocks in a harmonized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    ReleaseScope,
    CriticalMetrics,
    HealthTrends,
    KeyStakeholders,
}

impl SectionKey {
    /// Harmonized block order.
    pub const ALL: [SectionKey; 4] = [
        SectionKey::ReleaseScope,
        SectionKey::CriticalMetrics,
        SectionKey::HealthTrends,
        SectionKey::KeyStakeholders,
    ];

    /// Order in which sections appear in a fragment's combined text.
    pub const EXTRACTION_ORDER: [SectionKey; 4] = [
        SectionKey::ReleaseScope,
        SectionKey::KeyStakeholders,
        SectionKey::CriticalMetrics,
        SectionKey::HealthTrends,
    ];

    /// Snake-case identifier, matching the structured report's top-level keys.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::ReleaseScope => "release_scope",
            SectionKey::CriticalMetrics => "critical_metrics",
            SectionKey::HealthTrends => "health_trends",
            SectionKey::KeyStakeholders => "key_stakeholders",
        }
    }

    /// Human-readable section title.
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::ReleaseScope => "Release Scope",
            SectionKey::CriticalMetrics => "Critical Release Metrics",
            SectionKey::HealthTrends => "Release Health Trends",
            SectionKey::KeyStakeholders => "Key Stakeholders",
        }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The heading convention a fragment was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Level-2 emoji headings, one per section.
    Clean,
    /// Legacy layout: level-3 table headings plus bold `Label:` blocks
    /// whose tables were flattened into one value per line.
    Noisy,
}

impl Dialect {
    /// Check `text` for the clean Release Scope heading.
    pub fn detect(text: &str) -> Self {
        if text.contains(headings::clean_heading(SectionKey::ReleaseScope)) {
            Dialect::Clean
        } else {
            Dialect::Noisy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Clean => "clean",
            Dialect::Noisy => "noisy",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section body, or the marker for a section that was not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum ExtractedSection {
    Found(String),
    NotFound,
}

impl ExtractedSection {
    /// Interpret already-rendered section text, recognizing the sentinel.
    pub fn from_body(body: &str) -> Self {
        if body.trim() == SECTION_NOT_FOUND {
            ExtractedSection::NotFound
        } else {
            ExtractedSection::Found(body.to_string())
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ExtractedSection::Found(_))
    }

    /// The body, or [`SECTION_NOT_FOUND`].
    pub fn as_text(&self) -> &str {
        match self {
            ExtractedSection::Found(body) => body,
            ExtractedSection::NotFound => SECTION_NOT_FOUND,
        }
    }
}

impl fmt::Display for ExtractedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}
