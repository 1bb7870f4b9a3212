//! The heading table shared by the extractor and the harmonizer.
//!
//! Every heading string the engine knows about lives here, keyed by
//! `(SectionKey, Dialect)`. The harmonizer's candidate lists are derived from
//! the same table so the two stages cannot drift apart.

use crate::section::{Dialect, SectionKey};

/// How a heading delimits the body that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// A `##`/`###` markdown heading.
    Markdown,
    /// A bold `**Label:**` line underlined with dashes.
    BoldLabel,
}

/// Table reconstruction applied to a noisy bold-label block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRebuild {
    /// Three column lists separated by `Functional Group` / `Approver` /
    /// `Functional Lead` marker lines.
    Stakeholders,
    /// `**N**` items with five positional fields.
    CriticalMetrics,
    /// `**N**` items with six positional fields.
    HealthTrends,
}

/// One heading candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    pub marker: &'static str,
    pub style: HeadingStyle,
    pub rebuild: Option<TableRebuild>,
}

impl Heading {
    const fn markdown(marker: &'static str) -> Self {
        Self {
            marker,
            style: HeadingStyle::Markdown,
            rebuild: None,
        }
    }

    const fn bold(marker: &'static str, rebuild: TableRebuild) -> Self {
        Self {
            marker,
            style: HeadingStyle::BoldLabel,
            rebuild: Some(rebuild),
        }
    }

    /// The heading as written into a fragment's combined text.
    ///
    /// Bold labels are normalized to a level-3 heading:
    /// `**Key Stakeholders:**` becomes `### Key Stakeholders`.
    pub fn rendered(&self) -> String {
        match self.style {
            HeadingStyle::Markdown => self.marker.to_string(),
            HeadingStyle::BoldLabel => {
                format!("### {}", self.marker.replace("**", "").replace(':', "").trim())
            }
        }
    }
}

static CLEAN_RELEASE_SCOPE: [Heading; 1] = [Heading::markdown("## 📦 Release Scope")];
static CLEAN_CRITICAL_METRICS: [Heading; 1] = [Heading::markdown("## 📊 Critical Release Metrics")];
static CLEAN_HEALTH_TRENDS: [Heading; 1] = [Heading::markdown("## 📈 Release Health Trends")];
static CLEAN_KEY_STAKEHOLDERS: [Heading; 1] = [Heading::markdown("## 👥 Key Stakeholders")];

static NOISY_RELEASE_SCOPE: [Heading; 1] =
    [Heading::markdown("### 🧩 Release Scope Metrics (Epics, PIRs)")];
static NOISY_CRITICAL_METRICS: [Heading; 2] = [
    Heading::markdown("### 📊 Critical Release Metrics"),
    Heading::bold("**Critical Release Metrics:**", TableRebuild::CriticalMetrics),
];
static NOISY_HEALTH_TRENDS: [Heading; 1] = [Heading::bold(
    "**Release Health Trends:**",
    TableRebuild::HealthTrends,
)];
static NOISY_KEY_STAKEHOLDERS: [Heading; 1] = [Heading::bold(
    "**Key Stakeholders:**",
    TableRebuild::Stakeholders,
)];

/// Noisy tables that belong to no [`SectionKey`] but are kept in the
/// combined text for inspection.
static NOISY_AUXILIARY: [Heading; 1] = [Heading::markdown("### 📦 SFDC Defects Fixed")];

/// Ordered heading candidates for `key` in `dialect`. Never empty.
pub fn candidates(key: SectionKey, dialect: Dialect) -> &'static [Heading] {
    match (dialect, key) {
        (Dialect::Clean, SectionKey::ReleaseScope) => &CLEAN_RELEASE_SCOPE,
        (Dialect::Clean, SectionKey::CriticalMetrics) => &CLEAN_CRITICAL_METRICS,
        (Dialect::Clean, SectionKey::HealthTrends) => &CLEAN_HEALTH_TRENDS,
        (Dialect::Clean, SectionKey::KeyStakeholders) => &CLEAN_KEY_STAKEHOLDERS,
        (Dialect::Noisy, SectionKey::ReleaseScope) => &NOISY_RELEASE_SCOPE,
        (Dialect::Noisy, SectionKey::CriticalMetrics) => &NOISY_CRITICAL_METRICS,
        (Dialect::Noisy, SectionKey::HealthTrends) => &NOISY_HEALTH_TRENDS,
        (Dialect::Noisy, SectionKey::KeyStakeholders) => &NOISY_KEY_STAKEHOLDERS,
    }
}

/// Headings extracted alongside the keyed sections.
pub fn auxiliary(dialect: Dialect) -> &'static [Heading] {
    match dialect {
        Dialect::Clean => &[],
        Dialect::Noisy => &NOISY_AUXILIARY,
    }
}

/// The clean heading for `key`; also the block heading of a harmonized document.
pub fn clean_heading(key: SectionKey) -> &'static str {
    candidates(key, Dialect::Clean)[0].marker
}

/// Headings the harmonizer tries, in order, when recovering `key` from a
/// fragment's combined text: the clean heading, every noisy heading as
/// rendered, then every noisy heading as originally written.
pub fn harmonize_candidates(key: SectionKey) -> Vec<String> {
    let noisy = candidates(key, Dialect::Noisy);
    let ordered = std::iter::once(clean_heading(key).to_string())
        .chain(noisy.iter().map(Heading::rendered))
        .chain(noisy.iter().map(|h| h.marker.to_string()));

    let mut out: Vec<String> = Vec::new();
    for heading in ordered {
        if !out.contains(&heading) {
            out.push(heading);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_label_renders_as_level_three_heading() {
        let heading = candidates(SectionKey::KeyStakeholders, Dialect::Noisy)[0];
        assert_eq!(heading.rendered(), "### Key Stakeholders");
    }

    #[test]
    fn markdown_heading_renders_verbatim() {
        let heading = candidates(SectionKey::ReleaseScope, Dialect::Noisy)[0];
        assert_eq!(heading.rendered(), "### 🧩 Release Scope Metrics (Epics, PIRs)");
    }

    #[test]
    fn every_pair_has_candidates() {
        for key in SectionKey::ALL {
            for dialect in [Dialect::Clean, Dialect::Noisy] {
                assert!(!candidates(key, dialect).is_empty());
            }
        }
    }

    #[test]
    fn harmonize_candidates_cover_legacy_variants() {
        assert_eq!(
            harmonize_candidates(SectionKey::HealthTrends),
            vec![
                "## 📈 Release Health Trends",
                "### Release Health Trends",
                "**Release Health Trends:**",
            ]
        );
        assert_eq!(
            harmonize_candidates(SectionKey::CriticalMetrics),
            vec![
                "## 📊 Critical Release Metrics",
                "### 📊 Critical Release Metrics",
                "### Critical Release Metrics",
                "**Critical Release Metrics:**",
            ]
        );
        assert_eq!(
            harmonize_candidates(SectionKey::ReleaseScope),
            vec!["## 📦 Release Scope", "### 🧩 Release Scope Metrics (Epics, PIRs)"]
        );
    }

    #[test]
    fn only_noisy_has_auxiliary_tables() {
        assert!(auxiliary(Dialect::Clean).is_empty());
        assert_eq!(auxiliary(Dialect::Noisy)[0].marker, "### 📦 SFDC Defects Fixed");
    }
}
