//! The release-report extraction and harmonization engine.
//!
//! A stitched input holds several per-version release reports separated by
//! `End of Release Extract` banners. The engine recovers four fixed sections
//! from each report and merges them into one document grouped by section and
//! ordered by version.
//!
//! # Pipeline
//!
//! ```text
//!              ┌────────────────────┐
//!   raw ──────▶│ identify_versions  │──── versions ───┐
//!    │         └────────────────────┘                 ▼
//!    │         ┌────────────────────┐          ┌─────────────┐
//!    └────────▶│ split_into_fragments│──frags──▶│   pairing   │
//!              └────────────────────┘          └──────┬──────┘
//!                                                     ▼
//!                                          extract_sections (per fragment)
//!                                                     ▼
//!                                               harmonize (once)
//! ```
//!
//! Every stage is a pure function over text. Malformed input never fails:
//! missing sections become the not-found sentinel and short tables come out
//! partial.

mod capture;
pub mod extractor;
pub mod harmonizer;
pub mod pipeline;
pub mod sanitize;
pub mod splitter;
pub mod tables;
pub mod versions;

pub use extractor::extract_sections;
pub use harmonizer::{harmonize, inject_table_header};
pub use pipeline::{
    Analysis, AnalysisRequest, Analyzer, AnalyzerSettings, PairedFragment, ReleaseAnalysis,
    pair_fragments,
};
pub use relharmony_core::{PairingStrategy, ParsePairingError};
pub use sanitize::{SanitizeOptions, sanitize_markdown};
pub use splitter::{has_release_banner, split_into_fragments};
pub use versions::{first_version, identify_versions};
