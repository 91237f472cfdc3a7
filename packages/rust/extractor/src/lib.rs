//! Extraction of embedded reStructuredText from annotated source files.
//!
//! Source comments carry two kinds of block:
//!
//! - narrative markup between `.rst_start` and `.rst_end`, left-aligned to the
//!   column of its start sentinel;
//! - literal excerpts between `.code_block_start [lang]` and `.code_block_end`,
//!   wrapped in a `.. code-block :: <lang>` directive and indented two spaces.
//!
//! Blocks are rendered in the order their end sentinel is met and concatenated
//! into a single [`Document`].

mod render;
mod scanner;
mod sentinel;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument};

use rstgrab_shared::{Document, ExtractOptions, Result, RstGrabError};

pub use render::{normalize_narrative, render_code_block};
pub use scanner::Scanner;
pub use sentinel::{CODE_BLOCK_END, CODE_BLOCK_START, RST_END, RST_START, language_tag};

/// Extract with default options, returning only the document text.
///
/// Unterminated blocks are dropped.
pub fn extract<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new(&ExtractOptions::default());
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish_lenient().text
}

/// Extract from a sequence of lines (without terminators).
pub fn extract_with<I, S>(lines: I, opts: &ExtractOptions) -> Result<Document>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new(opts);
    for line in lines {
        scanner.feed(line.as_ref());
    }
    scanner.finish()
}

/// Extract from in-memory text. Both `\n` and `\r\n` endings are accepted.
pub fn extract_str(text: &str, opts: &ExtractOptions) -> Result<Document> {
    extract_with(text.lines(), opts)
}

/// Extract from a file on disk.
///
/// Any failure to open or read the file (including invalid UTF-8) is a
/// [`RstGrabError::Resource`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn extract_file(path: &Path, opts: &ExtractOptions) -> Result<Document> {
    let file = File::open(path).map_err(|e| RstGrabError::resource(path, e))?;
    let reader = BufReader::new(file);

    let mut scanner = Scanner::new(opts);
    for line in reader.lines() {
        let line = line.map_err(|e| RstGrabError::resource(path, e))?;
        scanner.feed(&line);
    }

    let document = scanner.finish()?;
    debug!(
        blocks = document.blocks.len(),
        bytes = document.text.len(),
        "extraction complete"
    );
    Ok(document)
}
