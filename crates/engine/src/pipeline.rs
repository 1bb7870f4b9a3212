//! One analysis request, end to end.
//!
//! [`Analyzer::analyze`] sanitizes the request, short-circuits single
//! reports, and otherwise pairs fragments with versions, extracts each one
//! and harmonizes the lot. The outcome is returned as a value; nothing is
//! stashed in shared state.

use crate::extractor::extract_sections;
use crate::harmonizer::harmonize;
use crate::sanitize::{SanitizeOptions, sanitize_markdown};
use crate::splitter::{has_release_banner, split_into_fragments};
use crate::versions::{first_version, identify_versions};
use chrono::{DateTime, Utc};
use relharmony_core::{
    DocumentFragment, Error, ExtractedSections, HarmonizedDocument, PairingStrategy, Product,
    Result, VersionTag,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

// ── Settings ──────────────────────────────────────────────────────────

/// Knobs for [`Analyzer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerSettings {
    pub sanitize: SanitizeOptions,
    pub pairing: PairingStrategy,
    /// Characters of the harmonized document echoed to the log.
    pub preview_chars: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            sanitize: SanitizeOptions::default(),
            pairing: PairingStrategy::default(),
            preview_chars: 1000,
        }
    }
}

// ── Request / result ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub markdown_text: String,
    pub product: String,
}

impl AnalysisRequest {
    pub fn new(markdown_text: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            markdown_text: markdown_text.into(),
            product: product.into(),
        }
    }
}

/// What an analysis produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Analysis {
    /// No banner: the input is one report, returned sanitized for an
    /// external summarizer.
    SingleDocument { product: Product, text: String },
    MultiVersion(ReleaseAnalysis),
}

/// A harmonized multi-version run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseAnalysis {
    pub run_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub product: Product,
    /// Every version token found in the input.
    pub versions: BTreeSet<VersionTag>,
    /// Extracted fragments that made it into the harmonized document.
    pub fragments: Vec<PairedFragment>,
    pub harmonized: HarmonizedDocument,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairedFragment {
    pub version: VersionTag,
    /// Position of the fragment in the input.
    pub index: usize,
    pub sections: ExtractedSections,
}

// ── Analyzer ──────────────────────────────────────────────────────────

/// Runs the extraction and harmonization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    settings: AnalyzerSettings,
}

impl Analyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    /// Analyze one request.
    ///
    /// Fails only on an unknown product, or on banner-delimited input for a
    /// product without harmonized analysis.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis> {
        let product: Product = request.product.parse()?;
        let text = sanitize_markdown(&request.markdown_text, &self.settings.sanitize);

        if !has_release_banner(&text) {
            info!(%product, chars = text.len(), "no release banner, treating input as a single report");
            return Ok(Analysis::SingleDocument { product, text });
        }
        if !product.supports_harmonized_analysis() {
            return Err(Error::UnsupportedProduct(product));
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("analysis", %run_id, %product);
        let _enter = span.enter();

        let versions = identify_versions(&text);
        let fragments = split_into_fragments(&text);
        info!(
            versions = versions.len(),
            fragments = fragments.len(),
            pairing = %self.settings.pairing,
            "starting harmonized analysis"
        );

        let mut paired: Vec<PairedFragment> = Vec::new();
        let mut combined: BTreeMap<VersionTag, String> = BTreeMap::new();
        for (index, version, fragment) in pair_fragments(&versions, fragments, self.settings.pairing) {
            let sections = extract_sections(fragment.as_str());
            debug!(
                version = %version,
                index,
                dialect = ?sections.dialect,
                found = sections.found_count(),
                "fragment extracted"
            );
            if combined
                .insert(version.clone(), sections.combined().to_string())
                .is_some()
            {
                warn!(version = %version, index, "version labels more than one fragment, keeping the later one");
                paired.retain(|p| p.version != version);
            }
            paired.push(PairedFragment {
                version,
                index,
                sections,
            });
        }

        let harmonized = harmonize(&combined);
        let preview: String = harmonized
            .to_markdown()
            .chars()
            .take(self.settings.preview_chars)
            .collect();
        info!(
            subsections = harmonized.subsection_count(),
            preview = %preview,
            "harmonized document ready"
        );

        Ok(Analysis::MultiVersion(ReleaseAnalysis {
            run_id,
            analyzed_at: Utc::now(),
            product,
            versions,
            fragments: paired,
            harmonized,
        }))
    }
}

/// Label each fragment with a version.
///
/// Returns `(input index, version, fragment)` in input order. Fragments that
/// cannot be labelled are dropped with a warning.
pub fn pair_fragments(
    versions: &BTreeSet<VersionTag>,
    fragments: Vec<DocumentFragment>,
    strategy: PairingStrategy,
) -> Vec<(usize, VersionTag, DocumentFragment)> {
    let sorted: Vec<&VersionTag> = versions.iter().collect();

    match strategy {
        PairingStrategy::Positional => {
            if sorted.len() != fragments.len() {
                warn!(
                    versions = sorted.len(),
                    fragments = fragments.len(),
                    "version and fragment counts differ, pairing the shorter prefix"
                );
            }
            fragments
                .into_iter()
                .zip(sorted)
                .enumerate()
                .map(|(index, (fragment, version))| (index, version.clone(), fragment))
                .collect()
        }
        PairingStrategy::PerFragment => fragments
            .into_iter()
            .enumerate()
            .filter_map(|(index, fragment)| {
                let label = first_version(fragment.as_str())
                    .or_else(|| sorted.get(index).map(|v| (*v).clone()));
                match label {
                    Some(version) => Some((index, version, fragment)),
                    None => {
                        warn!(index, "fragment carries no version and has no positional fallback, skipping");
                        None
                    }
                }
            })
            .collect(),
    }
}
