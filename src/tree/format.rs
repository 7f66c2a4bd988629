//! Input grammar detection for tree text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Box-drawing connectors (`├──`, `└──`) or their ASCII equivalents
/// (`|---`, `+---`, `\---`) emitted by `tree` on Unix and Windows.
static CLI_CONNECTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[├└]─+|[|+\\]---").expect("cli connector regex"));

/// The two grammars a tree text can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// One entry per line, nested by two-space indentation.
    Indented,
    /// Output of a `tree` command: a root path line followed by connector lines.
    CliDrawn,
}

impl TreeFormat {
    pub fn label(&self) -> &'static str {
        match self {
            TreeFormat::Indented => "indented",
            TreeFormat::CliDrawn => "cli",
        }
    }
}

/// Rewrite `\r\n` and lone `\r` line endings as `\n`.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Classify `text` by scanning for connector sequences. First match wins.
pub fn detect_format(text: &str) -> TreeFormat {
    if CLI_CONNECTOR_REGEX.is_match(text) {
        TreeFormat::CliDrawn
    } else {
        TreeFormat::Indented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_connectors_are_cli() {
        assert_eq!(detect_format("root\n├── a\n└── b"), TreeFormat::CliDrawn);
        assert_eq!(detect_format("D:\\P\n└───x"), TreeFormat::CliDrawn);
    }

    #[test]
    fn test_ascii_connectors_are_cli() {
        assert_eq!(detect_format("C:\\X\n+---src"), TreeFormat::CliDrawn);
        assert_eq!(detect_format("C:\\X\n\\---dist"), TreeFormat::CliDrawn);
        assert_eq!(detect_format("C:\\X\n|---lib"), TreeFormat::CliDrawn);
    }

    #[test]
    fn test_plain_indentation_is_indented() {
        assert_eq!(detect_format("a/\n  b\n  c"), TreeFormat::Indented);
        assert_eq!(detect_format("README.md"), TreeFormat::Indented);
        assert_eq!(detect_format(""), TreeFormat::Indented);
    }

    #[test]
    fn test_short_dash_runs_are_not_connectors() {
        // Two dashes are not enough to count as an ASCII connector.
        assert_eq!(detect_format("a\n  my--file.txt"), TreeFormat::Indented);
        assert_eq!(detect_format("a\n  +--b"), TreeFormat::Indented);
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
        assert!(matches!(normalize_line_endings("a\nb"), Cow::Borrowed(_)));
    }
}
