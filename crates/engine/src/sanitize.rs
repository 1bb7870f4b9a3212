//! Request text normalization ahead of the pipeline.

use serde::{Deserialize, Serialize};

/// How raw request text is normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeOptions {
    /// Double every backslash.
    pub escape_backslashes: bool,
    /// Spaces substituted for each tab.
    pub tab_width: usize,
    /// Drop line feeds as well as other control characters.
    pub strip_newlines: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            escape_backslashes: true,
            tab_width: 4,
            strip_newlines: false,
        }
    }
}

/// Normalize `raw` in one pass.
///
/// Tabs are expanded, carriage returns and other ASCII control characters
/// are removed. Line feeds survive unless `strip_newlines` is set.
pub fn sanitize_markdown(raw: &str, opts: &SanitizeOptions) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' if opts.escape_backslashes => out.push_str("\\\\"),
            '\t' => out.extend(std::iter::repeat_n(' ', opts.tab_width)),
            '\n' if !opts.strip_newlines => out.push('\n'),
            c if c.is_ascii_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_line_structure() {
        let out = sanitize_markdown("a\tb\r\nc\\d\x07e", &SanitizeOptions::default());
        assert_eq!(out, "a    b\nc\\\\de");
    }

    #[test]
    fn legacy_mode_strips_newlines() {
        let opts = SanitizeOptions {
            strip_newlines: true,
            ..SanitizeOptions::default()
        };
        assert_eq!(sanitize_markdown("line one\nline two\r\n", &opts), "line oneline two");
    }

    #[test]
    fn backslash_escaping_and_tab_width_are_configurable() {
        let opts = SanitizeOptions {
            escape_backslashes: false,
            tab_width: 2,
            strip_newlines: false,
        };
        assert_eq!(sanitize_markdown("x\\y\tz", &opts), "x\\y  z");
    }

    #[test]
    fn non_ascii_text_is_untouched() {
        let text = "## 📦 Release Scope\n| Épics | 12 |";
        assert_eq!(sanitize_markdown(text, &SanitizeOptions::default()), text);
    }
}
