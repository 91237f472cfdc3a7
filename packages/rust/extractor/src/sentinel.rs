//! Sentinel tokens and the per-line tests built on them.
//!
//! All sentinels are case-sensitive substrings and may appear anywhere in a line,
//! typically after a comment leader such as `//` or `#`.

use std::sync::LazyLock;

use regex::Regex;

/// Opens a narrative block.
pub const RST_START: &str = ".rst_start";
/// Closes a narrative block.
pub const RST_END: &str = ".rst_end";
/// Opens a code block; may be followed by a language tag.
pub const CODE_BLOCK_START: &str = ".code_block_start";
/// Closes a code block.
pub const CODE_BLOCK_END: &str = ".code_block_end";

/// True if the line carries either narrative sentinel.
pub(crate) fn is_narrative_sentinel(line: &str) -> bool {
    line.contains(RST_START) || line.contains(RST_END)
}

/// Zero-based character column where `.rst_start` begins, if present.
pub(crate) fn narrative_column(line: &str) -> Option<usize> {
    line.find(RST_START).map(|byte| line[..byte].chars().count())
}

/// Language tag named on a `.code_block_start` line.
///
/// The tag is the first whitespace-delimited token after the sentinel. Lines that
/// name no tag get `default`.
pub fn language_tag(line: &str, default: &str) -> String {
    static LANG_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\.code_block_start\s+(\S+)").expect("valid regex")
    });

    LANG_RE
        .captures(line)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_tag_takes_first_token() {
        assert_eq!(language_tag("// .code_block_start python", "verilog"), "python");
        assert_eq!(language_tag("// .code_block_start  c++  extra", "verilog"), "c++");
    }

    #[test]
    fn language_tag_defaults_when_absent() {
        assert_eq!(language_tag("// .code_block_start", "verilog"), "verilog");
        assert_eq!(language_tag("// .code_block_start   ", "verilog"), "verilog");
        assert_eq!(language_tag(".code_block_start", "tcl"), "tcl");
    }

    #[test]
    fn language_tag_needs_whitespace_after_sentinel() {
        assert_eq!(language_tag(".code_block_start_x python", "verilog"), "verilog");
    }

    #[test]
    fn narrative_column_counts_characters() {
        assert_eq!(narrative_column("  // .rst_start"), Some(5));
        assert_eq!(narrative_column(".rst_start"), Some(0));
        assert_eq!(narrative_column("é // .rst_start"), Some(5));
        assert_eq!(narrative_column("  // nothing here"), None);
    }

    #[test]
    fn narrative_sentinels_match_anywhere() {
        assert!(is_narrative_sentinel("foo(); // .rst_start"));
        assert!(is_narrative_sentinel("#.rst_end"));
        assert!(!is_narrative_sentinel("// .RST_START"));
    }
}
