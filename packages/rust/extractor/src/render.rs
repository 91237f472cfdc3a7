//! Renderers that turn a completed block into document text.

use crate::sentinel::{is_narrative_sentinel, narrative_column};

/// Indent applied to every literal line inside a code block.
const CODE_INDENT: &str = "  ";

/// Left-align a captured narrative block.
///
/// The column of the first `.rst_start` sets the indent; that many leading
/// characters are dropped from every other line (fewer if the line is shorter).
/// Lines carrying either narrative sentinel are omitted. One blank line closes
/// the block.
pub fn normalize_narrative<S: AsRef<str>>(lines: &[S]) -> String {
    let indent = lines
        .iter()
        .find_map(|line| narrative_column(line.as_ref()))
        .unwrap_or(0);

    let mut out = String::new();
    for line in lines {
        let line = line.as_ref();
        if is_narrative_sentinel(line) {
            continue;
        }
        out.extend(line.chars().skip(indent));
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Wrap literal lines in a `code-block` directive.
///
/// Lines keep their own content and gain a two-space indent; two blank lines
/// close the block.
pub fn render_code_block<S: AsRef<str>>(language: &str, lines: &[S]) -> String {
    let mut out = format!(".. code-block :: {language}\n\n");
    for line in lines {
        out.push_str(CODE_INDENT);
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out.push_str("\n\n");
    out
}
