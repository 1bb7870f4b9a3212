//! Cross-version harmonization.
//!
//! Re-reads each fragment's combined text, recovers the four sections with
//! the consolidated heading table, and lays them out section-major,
//! version-minor.

use crate::capture::capture_combined;
use relharmony_core::headings;
use relharmony_core::{
    ExtractedSection, HarmonizedBlock, HarmonizedDocument, SectionKey, VersionTag, VersionedBody,
};
use std::collections::BTreeMap;
use tracing::debug;

const RELEASE_SCOPE_TEMPLATE: &str =
    "| Scope Item | Total | Open | Comments |\n|------------|-------|------|----------|";

const CRITICAL_METRICS_TEMPLATE: &str = "| Functional Group | Type | Total | Open | Risk Status | Comments |\n|------------------|------|-------|------|-------------|----------|";

const HEALTH_TRENDS_TEMPLATE: &str = "| Metric | Criteria | Previous | Current | Status | Summary |\n|--------|----------|----------|---------|--------|---------|";

/// Merge per-version combined texts into one document.
///
/// Always yields four blocks in [`SectionKey::ALL`] order with one entry per
/// version, ascending. Sections missing from a version are kept as
/// [`ExtractedSection::NotFound`].
pub fn harmonize(combined: &BTreeMap<VersionTag, String>) -> HarmonizedDocument {
    let blocks = SectionKey::ALL
        .into_iter()
        .map(|key| {
            let candidates = headings::harmonize_candidates(key);
            let versions = combined
                .iter()
                .map(|(version, text)| {
                    let body = inject_table_header(key, recover_section(text, &candidates));
                    VersionedBody {
                        version: version.clone(),
                        body,
                    }
                })
                .collect();
            HarmonizedBlock {
                key,
                heading: headings::clean_heading(key).to_string(),
                versions,
            }
        })
        .collect();

    let document = HarmonizedDocument { blocks };
    debug!(
        versions = combined.len(),
        subsections = document.subsection_count(),
        "harmonized document"
    );
    document
}

/// First candidate heading that matches wins.
fn recover_section(text: &str, candidates: &[String]) -> ExtractedSection {
    candidates
        .iter()
        .find_map(|heading| capture_combined(text, heading))
        .map_or(ExtractedSection::NotFound, ExtractedSection::from_body)
}

fn header_template(key: SectionKey) -> Option<&'static str> {
    match key {
        SectionKey::ReleaseScope => Some(RELEASE_SCOPE_TEMPLATE),
        SectionKey::CriticalMetrics => Some(CRITICAL_METRICS_TEMPLATE),
        SectionKey::HealthTrends => Some(HEALTH_TRENDS_TEMPLATE),
        SectionKey::KeyStakeholders => None,
    }
}

/// Prepend the section's table header when a multi-line body lacks one.
///
/// Sentinel bodies, single-line bodies, bodies that already open with a
/// `|` row followed by a `---` row, and stakeholder bodies pass through.
pub fn inject_table_header(key: SectionKey, section: ExtractedSection) -> ExtractedSection {
    let ExtractedSection::Found(body) = section else {
        return section;
    };
    let Some(template) = header_template(key) else {
        return ExtractedSection::Found(body);
    };

    let mut lines = body.trim().split('\n');
    let (Some(first), Some(second)) = (lines.next(), lines.next()) else {
        return ExtractedSection::Found(body);
    };
    if first.contains('|') && second.contains("---") {
        return ExtractedSection::Found(body);
    }

    ExtractedSection::Found(format!("{template}\n{body}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relharmony_core::SECTION_NOT_FOUND;

    fn tag(s: &str) -> VersionTag {
        VersionTag::parse(s).unwrap()
    }

    fn clean_combined(marker: &str) -> String {
        format!(
            "## 📦 Release Scope\n| A | B |\n|---|---|\n| scope {marker} | 1 |\n\n\
             ## 👥 Key Stakeholders\n| G | A | L |\n|---|---|---|\n| QA | {marker} | Erin |\n\n\
             ## 📊 Critical Release Metrics\n| C | D |\n|---|---|\n| metric {marker} | 2 |\n\n\
             ## 📈 Release Health Trends\n| E | F |\n|---|---|\n| trend {marker} | 3 |\n\n"
        )
    }

    #[test]
    fn empty_mapping_renders_four_bare_blocks() {
        let doc = harmonize(&BTreeMap::new());
        assert_eq!(doc.blocks.len(), 4);
        assert_eq!(doc.subsection_count(), 0);
        assert_eq!(
            doc.to_markdown(),
            "## 📦 Release Scope\n\n## 📊 Critical Release Metrics\n\n## 📈 Release Health Trends\n\n## 👥 Key Stakeholders"
        );
    }

    #[test]
    fn versions_are_ascending_within_every_block() {
        let mut map = BTreeMap::new();
        map.insert(tag("45.1.16.0"), clean_combined("new"));
        map.insert(tag("45.1.15.0"), clean_combined("old"));

        let doc = harmonize(&map);
        assert_eq!(doc.subsection_count(), 8);
        for block in &doc.blocks {
            let order: Vec<&str> = block.versions.iter().map(|v| v.version.as_str()).collect();
            assert_eq!(order, vec!["45.1.15.0", "45.1.16.0"]);
            assert!(block.versions.iter().all(|v| v.body.is_found()));
        }

        let md = doc.to_markdown();
        let old = md.find("### Version 45.1.15.0").unwrap();
        let new = md.find("### Version 45.1.16.0").unwrap();
        assert!(old < new);
        assert!(md.contains("| metric new | 2 |"));
    }

    #[test]
    fn block_order_is_fixed() {
        let mut map = BTreeMap::new();
        map.insert(tag("45.1.15.0"), clean_combined("x"));
        let keys: Vec<SectionKey> = harmonize(&map).blocks.iter().map(|b| b.key).collect();
        assert_eq!(keys, SectionKey::ALL.to_vec());
    }

    #[test]
    fn recovers_sections_from_noisy_combined_text() {
        let combined = "### 🧩 Release Scope Metrics (Epics, PIRs)\n| Scope | Total |\n|---|---|\n| Epics | 9 |\n\n\
                        ### Key Stakeholders\n| Functional Group | Approver | Functional Lead |\n|---|---|---|\n| QA | Bob | Erin |\n\n\
                        ### Critical Release Metrics\n*Section Not Found*\n\n\
                        ### Release Health Trends\nUptime\nLatency\n\n";
        let mut map = BTreeMap::new();
        map.insert(tag("45.1.14.0"), combined.to_string());

        let doc = harmonize(&map);
        let body = |key| doc.block(key).unwrap().versions[0].body.clone();

        assert_eq!(
            body(SectionKey::ReleaseScope).as_text(),
            "| Scope | Total |\n|---|---|\n| Epics | 9 |"
        );
        assert_eq!(body(SectionKey::CriticalMetrics), ExtractedSection::NotFound);
        assert!(body(SectionKey::KeyStakeholders).as_text().contains("| QA | Bob | Erin |"));
        assert_eq!(
            body(SectionKey::HealthTrends).as_text(),
            format!("{HEALTH_TRENDS_TEMPLATE}\nUptime\nLatency")
        );
    }

    #[test]
    fn subsectioned_clean_scope_keeps_first_sub_table() {
        let combined = "## 📦 Release Scope\n### Release Epics\n| Total | Open |\n|---|---|\n| 12 | 1 |\n\
                        ### Release PIRs\n| Total | Open |\n|---|---|\n| 4 | 0 |\n\n\
                        ## 👥 Key Stakeholders\n| G | A | L |\n|---|---|---|\n| QA | Bob | Erin |\n\n";
        let mut map = BTreeMap::new();
        map.insert(tag("45.1.15.0"), combined.to_string());

        let doc = harmonize(&map);
        let scope = doc.block(SectionKey::ReleaseScope).unwrap().versions[0].body.as_text();
        assert_eq!(
            scope,
            format!("{RELEASE_SCOPE_TEMPLATE}\n### Release Epics\n| Total | Open |\n|---|---|\n| 12 | 1 |")
        );
        let stakeholders = doc.block(SectionKey::KeyStakeholders).unwrap().versions[0].body.as_text();
        assert!(stakeholders.contains("| QA | Bob | Erin |"));
    }

    #[test]
    fn missing_heading_is_sentinel_not_empty() {
        let mut map = BTreeMap::new();
        map.insert(tag("45.1.15.0"), "unrelated text".to_string());
        let doc = harmonize(&map);
        assert_eq!(doc.subsection_count(), 4);
        assert!(doc.blocks.iter().all(|b| b.versions[0].body == ExtractedSection::NotFound));
        assert!(doc.to_markdown().contains(&format!("### Version 45.1.15.0\n{SECTION_NOT_FOUND}")));
    }

    #[test]
    fn injects_header_into_plain_multi_line_body() {
        let out = inject_table_header(
            SectionKey::HealthTrends,
            ExtractedSection::Found("Uptime 99.9\nLatency 120ms".into()),
        );
        assert_eq!(
            out.as_text(),
            format!("{HEALTH_TRENDS_TEMPLATE}\nUptime 99.9\nLatency 120ms")
        );
        assert_eq!(HEALTH_TRENDS_TEMPLATE.lines().next().unwrap().matches('|').count(), 7);
    }

    #[test]
    fn existing_header_is_left_alone() {
        let body = "| Metric | Value |\n|---|---|\n| Uptime | 99.9 |";
        let out = inject_table_header(SectionKey::HealthTrends, ExtractedSection::Found(body.into()));
        assert_eq!(out.as_text(), body);
    }

    #[test]
    fn injection_skips_single_line_sentinel_and_stakeholders() {
        let single = ExtractedSection::Found("one line".into());
        assert_eq!(inject_table_header(SectionKey::ReleaseScope, single.clone()), single);
        assert_eq!(
            inject_table_header(SectionKey::CriticalMetrics, ExtractedSection::NotFound),
            ExtractedSection::NotFound
        );
        let plain = ExtractedSection::Found("a\nb".into());
        assert_eq!(inject_table_header(SectionKey::KeyStakeholders, plain.clone()), plain);
    }
}
