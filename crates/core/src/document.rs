//! Fragments, per-fragment extraction results, and the harmonized document.

use crate::section::{Dialect, ExtractedSection, SectionKey};
use crate::version::VersionTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One version's slice of a stitched input. Trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentFragment(String);

impl DocumentFragment {
    /// Trim `text`; `None` if nothing remains.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for DocumentFragment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A section as it appears in a fragment's combined text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSection {
    /// `None` for auxiliary tables that map to no [`SectionKey`].
    pub key: Option<SectionKey>,
    pub heading: String,
    pub section: ExtractedSection,
}

impl RenderedSection {
    pub fn new(key: Option<SectionKey>, heading: impl Into<String>, section: ExtractedSection) -> Self {
        Self {
            key,
            heading: heading.into(),
            section,
        }
    }
}

static NOT_FOUND: ExtractedSection = ExtractedSection::NotFound;

/// Everything extracted from one fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSections {
    pub dialect: Dialect,
    pub entries: Vec<RenderedSection>,
    combined: String,
}

impl ExtractedSections {
    /// Render `entries` into the combined text: `heading\nbody\n\n` per entry.
    pub fn new(dialect: Dialect, entries: Vec<RenderedSection>) -> Self {
        let mut combined = String::new();
        for entry in &entries {
            combined.push_str(&format!("{}\n{}\n\n", entry.heading, entry.section.as_text()));
        }
        Self {
            dialect,
            entries,
            combined,
        }
    }

    /// The section for `key`; `NotFound` if the entry is missing.
    pub fn get(&self, key: SectionKey) -> &ExtractedSection {
        self.entries
            .iter()
            .find(|e| e.key == Some(key))
            .map(|e| &e.section)
            .unwrap_or(&NOT_FOUND)
    }

    /// Concatenated headings and bodies, the input format of the harmonizer.
    pub fn combined(&self) -> &str {
        &self.combined
    }

    /// Number of keyed sections that were found.
    pub fn found_count(&self) -> usize {
        SectionKey::ALL
            .iter()
            .filter(|&&key| self.get(key).is_found())
            .count()
    }
}

/// One version's body inside a harmonized block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedBody {
    pub version: VersionTag,
    pub body: ExtractedSection,
}

/// One top-level section of a harmonized document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonizedBlock {
    pub key: SectionKey,
    pub heading: String,
    /// Ascending by version.
    pub versions: Vec<VersionedBody>,
}

/// The merged cross-version document: four blocks in [`SectionKey::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonizedDocument {
    pub blocks: Vec<HarmonizedBlock>,
}

impl HarmonizedDocument {
    pub fn block(&self, key: SectionKey) -> Option<&HarmonizedBlock> {
        self.blocks.iter().find(|b| b.key == key)
    }

    /// Total `### Version` subsections across all blocks.
    pub fn subsection_count(&self) -> usize {
        self.blocks.iter().map(|b| b.versions.len()).sum()
    }

    /// Render as markdown, trimmed of surrounding whitespace.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&block.heading);
            out.push('\n');
            for entry in &block.versions {
                out.push_str(&format!("\n### Version {}\n{}\n", entry.version, entry.body));
            }
        }
        out.trim().to_string()
    }
}

impl fmt::Display for HarmonizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markdown())
    }
}
