//! Section boundary grammars.
//!
//! Each grammar locates a heading, decides where its body starts, and
//! captures text up to the next terminator or end of input. Bodies are
//! returned trimmed. A terminator found between the heading and the body
//! start yields an empty body.
//!
//! ```text
//! clean     heading ws* \n  body  (\n## | end)
//! combined  heading ws* \n  body  (\n## | \n### | end)
//! markdown  heading ws*     body  (\n## | \n### | \n** | end)
//! bold      heading \n -+ \n body  (\n**Label:** \n -+ | end)
//! ```

const CLEAN_TERMINATORS: [&str; 1] = ["\n## "];
const COMBINED_TERMINATORS: [&str; 2] = ["\n## ", "\n### "];
const MARKDOWN_TERMINATORS: [&str; 3] = ["\n## ", "\n### ", "\n**"];

/// Clean dialect: body up to the next level-2 heading.
pub(crate) fn capture_clean<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    capture_after_line_break(text, heading, &CLEAN_TERMINATORS)
}

/// A fragment's combined text, as re-read by the harmonizer.
pub(crate) fn capture_combined<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    capture_after_line_break(text, heading, &COMBINED_TERMINATORS)
}

/// Noisy markdown heading: the body may start on the heading's own line.
pub(crate) fn capture_noisy_markdown<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    let start = text.find(heading)?;
    let after = start + heading.len();
    let body_start = after + leading_whitespace(&text[after..]);
    let end = find_terminator(text, after, &MARKDOWN_TERMINATORS);
    Some(slice_body(text, body_start, end))
}

/// Noisy bold label: heading, a dash underline, then everything up to the
/// next underlined bold label.
pub(crate) fn capture_noisy_bold<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    for (start, _) in text.match_indices(heading) {
        let after = start + heading.len();
        let Some(underline) = underline_len(&text[after..]) else {
            continue;
        };
        let body_start = after + underline;
        let end = next_bold_label(text, body_start).unwrap_or(text.len());
        return Some(slice_body(text, body_start, end));
    }
    None
}

/// Shared by the clean and combined grammars: the whitespace after the
/// heading must contain a line break, and the body starts after the last one.
/// An occurrence followed by other text on the same line is skipped.
///
/// A body that opens with a `### ` subheading keeps that first line, so the
/// line break in front of it never ends the body.
fn capture_after_line_break<'a>(
    text: &'a str,
    heading: &str,
    terminators: &[&str],
) -> Option<&'a str> {
    for (start, _) in text.match_indices(heading) {
        let after = start + heading.len();
        let rest = &text[after..];
        let gap = &rest[..leading_whitespace(rest)];
        let Some(last_break) = gap.rfind('\n') else {
            continue;
        };
        let body_start = after + last_break + 1;
        let search_from = if text[body_start..].starts_with("### ") {
            text[body_start..]
                .find('\n')
                .map_or(text.len(), |i| body_start + i)
        } else {
            after
        };
        let end = find_terminator(text, search_from, terminators);
        return Some(slice_body(text, body_start, end));
    }
    None
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}

/// Earliest terminator at or after `from`, or the end of `text`.
fn find_terminator(text: &str, from: usize, terminators: &[&str]) -> usize {
    terminators
        .iter()
        .filter_map(|t| text[from..].find(t))
        .min()
        .map_or(text.len(), |i| from + i)
}

fn slice_body(text: &str, body_start: usize, end: usize) -> &str {
    if end <= body_start {
        ""
    } else {
        text[body_start..end].trim()
    }
}

/// Length of a `\n---\n` underline at the start of `s`.
fn underline_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\n')?;
    let dashes = rest.len() - rest.trim_start_matches('-').len();
    if dashes == 0 || !rest[dashes..].starts_with('\n') {
        return None;
    }
    Some(dashes + 2)
}

/// Position of the `\n` that precedes the next underlined bold label.
fn next_bold_label(text: &str, from: usize) -> Option<usize> {
    let mut offset = from;
    while let Some(i) = text[offset..].find("\n**") {
        let at = offset + i;
        let line_start = at + 1;
        if let Some(len) = text[line_start..].find('\n') {
            let line_end = line_start + len;
            let line = text[line_start..line_end].trim_end();
            if is_bold_label(line) && text[line_end + 1..].starts_with('-') {
                return Some(at);
            }
        }
        offset = line_start;
    }
    None
}

fn is_bold_label(line: &str) -> bool {
    line.starts_with("**") && (line.ends_with(":**") || line.ends_with(':'))
}
