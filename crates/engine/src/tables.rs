//! Table reconstruction for noisy bold-label blocks.
//!
//! The legacy generator flattened tables into one value per line. These
//! functions rebuild markdown tables from that layout. Short or uneven input
//! degrades to a partial table rather than failing.

use regex_lite::Regex;
use relharmony_core::TableRebuild;
use std::sync::LazyLock;
use tracing::debug;

pub const STAKEHOLDER_HEADER: &str =
    "| Functional Group | Approver | Functional Lead |\n|---|---|---|\n";

pub const CRITICAL_METRICS_HEADER: &str = "| Item No | Metric | Release Criteria | Result | Risk Status | Summary |\n|---|---|---|---|---|---|\n";

pub const HEALTH_TRENDS_HEADER: &str = "| Item No | Metric | Release Criteria | Previous Release | Current Release | Status | Summary |\n|---|---|---|---|---|---|---|\n";

static STAKEHOLDER_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n+(Functional Group|Approver|Functional Lead)(?:\n+|$)")
        .expect("static regex must compile")
});

/// Apply the reconstruction `kind` to a captured block.
pub fn rebuild(kind: TableRebuild, block: &str) -> String {
    match kind {
        TableRebuild::Stakeholders => rebuild_stakeholders(block),
        TableRebuild::CriticalMetrics => rebuild_numbered(block, CRITICAL_METRICS_HEADER, 5),
        TableRebuild::HealthTrends => rebuild_numbered(block, HEALTH_TRENDS_HEADER, 6),
    }
}

/// Rebuild the stakeholder table from three column lists.
///
/// The block is split on marker lines; the text before the first marker and
/// between the first/second and second/third markers are the three columns.
/// Rows are zipped up to the shortest column. With fewer than two markers the
/// block is returned unchanged.
pub fn rebuild_stakeholders(block: &str) -> String {
    let parts = split_on_markers(block);
    if parts.len() < 5 {
        debug!(parts = parts.len(), "stakeholder markers missing; keeping block as-is");
        return block.to_string();
    }

    let groups: Vec<&str> = non_empty_lines(parts[0]).map(strip_bold).collect();
    let approvers: Vec<&str> = non_empty_lines(parts[2]).collect();
    let leads: Vec<&str> = non_empty_lines(parts[4]).collect();

    let longest = groups.len().max(approvers.len()).max(leads.len());
    let rows = groups.len().min(approvers.len()).min(leads.len());
    if rows < longest {
        debug!(rows, longest, "stakeholder columns uneven; truncating");
    }

    let mut table = String::from(STAKEHOLDER_HEADER);
    for ((group, approver), lead) in groups.iter().zip(&approvers).zip(&leads) {
        table.push_str(&format!("| {group} | {approver} | {lead} |\n"));
    }
    table
}

/// Rebuild an `**N**`-itemized block into a table with `width` fields per item.
fn rebuild_numbered(block: &str, header: &str, width: usize) -> String {
    let mut table = String::from(header);
    for (number, fields) in numbered_items(block) {
        let cells: Vec<&str> = (0..width)
            .map(|i| fields.get(i).copied().unwrap_or(""))
            .collect();
        table.push_str(&format!("| {number} | {} |\n", cells.join(" | ")));
    }
    table
}

/// Items introduced by `**N**` marker lines, each with its non-empty lines.
///
/// Text before the first marker is discarded.
fn numbered_items(block: &str) -> Vec<(&str, Vec<&str>)> {
    let mut items: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in block.lines().map(str::trim) {
        if let Some(number) = item_number(line) {
            items.push((number, Vec::new()));
        } else if !line.is_empty() {
            if let Some((_, fields)) = items.last_mut() {
                fields.push(line);
            }
        }
    }
    items
}

fn item_number(line: &str) -> Option<&str> {
    let inner = line.strip_prefix("**")?.strip_suffix("**")?;
    (!inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit())).then_some(inner)
}

/// Split like a capturing regex split: text pieces interleaved with markers.
fn split_on_markers(block: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;
    for caps in STAKEHOLDER_MARKER_RE.captures_iter(block) {
        let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parts.push(&block[last..whole.start()]);
        parts.push(marker.as_str());
        last = whole.end();
    }
    parts.push(&block[last..]);
    parts
}

fn non_empty_lines(block: &str) -> impl Iterator<Item = &str> {
    block.lines().map(str::trim).filter(|l| !l.is_empty())
}

fn strip_bold(line: &str) -> &str {
    let line = line.strip_prefix("**").unwrap_or(line);
    line.strip_suffix("**").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_rows(table: &str) -> Vec<&str> {
        table.lines().skip(2).collect()
    }

    const STAKEHOLDERS_3_3_3: &str = "**Engineering**\n**QA**\n**Operations**\n\nFunctional Group\nAlice\nBob\nCarol\n\nApprover\nDan\nErin\nFrank\nFunctional Lead\n";

    #[test]
    fn stakeholders_three_by_three() {
        let table = rebuild_stakeholders(STAKEHOLDERS_3_3_3);
        assert!(table.starts_with(STAKEHOLDER_HEADER));
        assert_eq!(
            data_rows(&table),
            vec![
                "| Engineering | Alice | Dan |",
                "| QA | Bob | Erin |",
                "| Operations | Carol | Frank |",
            ]
        );
    }

    #[test]
    fn stakeholders_truncate_to_shortest_column() {
        let block = "**Engineering**\n**QA**\nFunctional Group\nAlice\nBob\nCarol\nApprover\nDan\nErin\nFrank\nFunctional Lead\n";
        let table = rebuild_stakeholders(block);
        assert_eq!(data_rows(&table).len(), 2);
        assert_eq!(data_rows(&table)[1], "| QA | Bob | Erin |");
    }

    #[test]
    fn stakeholders_trailing_marker_at_end_of_block() {
        let block = "**Eng**\nFunctional Group\nAlice\nApprover\nDan\nFunctional Lead";
        let table = rebuild_stakeholders(block);
        assert_eq!(data_rows(&table), vec!["| Eng | Alice | Dan |"]);
    }

    #[test]
    fn stakeholders_without_markers_pass_through() {
        let block = "Alice\nBob";
        assert_eq!(rebuild_stakeholders(block), block);
        let one_marker = "**Eng**\nFunctional Group\nAlice";
        assert_eq!(rebuild_stakeholders(one_marker), one_marker);
    }

    #[test]
    fn critical_metrics_map_five_positional_fields() {
        let block = "**1**\nDefect backlog\n< 10 open\n7 open\nGreen\nOn track\n\n**2**\nTest pass rate\n>= 95%\n";
        let table = rebuild(TableRebuild::CriticalMetrics, block);
        assert!(table.starts_with(CRITICAL_METRICS_HEADER));
        assert_eq!(
            data_rows(&table),
            vec![
                "| 1 | Defect backlog | < 10 open | 7 open | Green | On track |",
                "| 2 | Test pass rate | >= 95% |  |  |  |",
            ]
        );
    }

    #[test]
    fn health_trends_map_six_positional_fields() {
        let block = "preamble is dropped\n**3**\nUptime\n99.9%\n99.5%\n99.95%\nImproved\nStable quarter\nextra line ignored";
        let table = rebuild(TableRebuild::HealthTrends, block);
        assert!(table.starts_with(HEALTH_TRENDS_HEADER));
        assert_eq!(
            data_rows(&table),
            vec!["| 3 | Uptime | 99.9% | 99.5% | 99.95% | Improved | Stable quarter |"]
        );
    }

    #[test]
    fn numbered_block_without_items_is_header_only() {
        assert_eq!(rebuild(TableRebuild::HealthTrends, "free text"), HEALTH_TRENDS_HEADER);
    }

    #[test]
    fn item_markers_must_be_whole_numeric_lines() {
        assert_eq!(item_number("**12**"), Some("12"));
        assert_eq!(item_number("**Engineering**"), None);
        assert_eq!(item_number("****"), None);
        assert_eq!(item_number("**1** trailing"), None);
    }
}
