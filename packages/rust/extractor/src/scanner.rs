//! Line-scanning state machine.
//!
//! The scanner is always in exactly one of three states. Narrative and code
//! capture never nest: while one is open, the other's sentinels are plain text.

use tracing::{debug, warn};

use rstgrab_shared::{
    BlockKind, BlockSummary, Document, ExtractOptions, MarkupBlock, Result, RstGrabError,
};

use crate::render::{normalize_narrative, render_code_block};
use crate::sentinel::{
    CODE_BLOCK_END, CODE_BLOCK_START, RST_END, RST_START, is_narrative_sentinel, language_tag,
};

/// Capture mode, owning the block being filled.
#[derive(Debug, Default)]
enum ScanState {
    #[default]
    Idle,
    Narrative(MarkupBlock),
    Code(MarkupBlock),
}

/// Single-pass extractor. Feed lines in order, then call [`Scanner::finish`].
#[derive(Debug)]
pub struct Scanner {
    state: ScanState,
    document: Document,
    default_language: String,
    strict: bool,
    line_no: usize,
}

impl Scanner {
    pub fn new(opts: &ExtractOptions) -> Self {
        Self {
            state: ScanState::Idle,
            document: Document::default(),
            default_language: opts.default_language.clone(),
            strict: opts.strict,
            line_no: 0,
        }
    }

    /// Consume one source line (without its terminator).
    pub fn feed(&mut self, line: &str) {
        self.line_no += 1;
        let line_no = self.line_no;

        self.state = match std::mem::take(&mut self.state) {
            ScanState::Idle if line.contains(RST_START) => {
                ScanState::Narrative(MarkupBlock::narrative(line_no, line))
            }
            ScanState::Idle => self.idle_or_code(line),
            ScanState::Narrative(mut block) => {
                block.push(line);
                if line.contains(RST_END) {
                    self.emit_narrative(block);
                    // The closing line may itself open a code block.
                    self.idle_or_code(line)
                } else {
                    ScanState::Narrative(block)
                }
            }
            ScanState::Code(mut block) => {
                if line.contains(CODE_BLOCK_END) {
                    self.emit_code(block);
                    ScanState::Idle
                } else {
                    block.push(line);
                    ScanState::Code(block)
                }
            }
        };
    }

    /// End of input. An open block is an error in strict mode, otherwise dropped.
    pub fn finish(self) -> Result<Document> {
        if self.strict {
            if let Some(block) = self.open_block() {
                return Err(RstGrabError::UnterminatedBlock {
                    kind: block.kind,
                    line: block.start_line,
                });
            }
        }
        Ok(self.finish_lenient())
    }

    /// End of input, silently discarding any open block.
    pub fn finish_lenient(self) -> Document {
        if let Some(block) = self.open_block() {
            warn!(
                kind = %block.kind,
                start_line = block.start_line,
                captured = block.lines.len(),
                "dropping unterminated block"
            );
        }
        self.document
    }

    fn open_block(&self) -> Option<&MarkupBlock> {
        match &self.state {
            ScanState::Idle => None,
            ScanState::Narrative(block) | ScanState::Code(block) => Some(block),
        }
    }

    fn idle_or_code(&self, line: &str) -> ScanState {
        if line.contains(CODE_BLOCK_START) {
            let language = language_tag(line, &self.default_language);
            ScanState::Code(MarkupBlock::code(self.line_no, language))
        } else {
            ScanState::Idle
        }
    }

    fn emit_narrative(&mut self, block: MarkupBlock) {
        let rendered = normalize_narrative(&block.lines);
        let line_count = block
            .lines
            .iter()
            .filter(|l| !is_narrative_sentinel(l))
            .count();
        self.append(rendered, block, line_count);
    }

    fn emit_code(&mut self, block: MarkupBlock) {
        let language = block.language.as_deref().unwrap_or(&self.default_language);
        let rendered = render_code_block(language, &block.lines);
        let line_count = block.lines.len();
        self.append(rendered, block, line_count);
    }

    fn append(&mut self, rendered: String, block: MarkupBlock, line_count: usize) {
        debug!(
            kind = %block.kind,
            start_line = block.start_line,
            end_line = self.line_no,
            line_count,
            "block extracted"
        );
        self.document.append(
            &rendered,
            BlockSummary {
                kind: block.kind,
                language: block.language,
                start_line: block.start_line,
                end_line: self.line_no,
                line_count,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(lines: &[&str], opts: &ExtractOptions) -> Result<Document> {
        let mut scanner = Scanner::new(opts);
        for line in lines {
            scanner.feed(line);
        }
        scanner.finish()
    }

    fn strict() -> ExtractOptions {
        ExtractOptions {
            strict: true,
            ..ExtractOptions::default()
        }
    }

    #[test]
    fn text_outside_blocks_is_ignored() {
        let doc = scan(&["module top;", "endmodule"], &ExtractOptions::default()).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.text, "");
    }

    #[test]
    fn narrative_block_summary() {
        let doc = scan(
            &["x", "  // .rst_start", "  // Hello", "  // World", "  // .rst_end"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, "Hello\nWorld\n\n");
        assert_eq!(
            doc.blocks,
            vec![BlockSummary {
                kind: BlockKind::Narrative,
                language: None,
                start_line: 2,
                end_line: 5,
                line_count: 2,
            }]
        );
    }

    #[test]
    fn code_start_line_is_not_captured() {
        let doc = scan(
            &["// .code_block_start python", "x = 1", "// .code_block_end"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, ".. code-block :: python\n\n  x = 1\n\n\n");
        assert_eq!(doc.blocks[0].language.as_deref(), Some("python"));
        assert_eq!(doc.blocks[0].line_count, 1);
    }

    #[test]
    fn configured_default_language_is_used() {
        let opts = ExtractOptions {
            default_language: "systemverilog".into(),
            strict: false,
        };
        let doc = scan(&[".code_block_start", "logic a;", ".code_block_end"], &opts).unwrap();
        assert!(doc.text.starts_with(".. code-block :: systemverilog\n\n"));
    }

    #[test]
    fn narrative_sentinels_inside_code_are_literal() {
        let doc = scan(
            &[
                ".code_block_start text",
                "// .rst_start",
                "// .rst_end",
                ".code_block_end",
            ],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(
            doc.text,
            ".. code-block :: text\n\n  // .rst_start\n  // .rst_end\n\n\n"
        );
        assert_eq!(doc.blocks.len(), 1);
    }

    #[test]
    fn code_sentinels_inside_narrative_are_plain_text() {
        let doc = scan(
            &[
                ".rst_start",
                "Use .code_block_start to open a listing.",
                ".rst_end",
            ],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, "Use .code_block_start to open a listing.\n\n");
    }

    #[test]
    fn narrative_end_line_can_open_code_block() {
        let doc = scan(
            &[".rst_start", "Intro", ".rst_end .code_block_start c", "int x;", ".code_block_end"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, "Intro\n\n.. code-block :: c\n\n  int x;\n\n\n");
        assert_eq!(doc.blocks.len(), 2);
    }

    #[test]
    fn start_line_that_also_closes_stays_open() {
        // The start line is never tested for the end sentinel.
        let doc = scan(
            &[".rst_start .rst_end", "body", ".rst_end"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, "body\n\n");
    }

    #[test]
    fn unterminated_narrative_is_dropped() {
        let doc = scan(
            &[".rst_start", "lost", ".code_block_start", "also lost"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.text, "");
    }

    #[test]
    fn unterminated_code_keeps_earlier_blocks() {
        let doc = scan(
            &[".rst_start", "kept", ".rst_end", ".code_block_start", "lost"],
            &ExtractOptions::default(),
        )
        .unwrap();
        assert_eq!(doc.text, "kept\n\n");
    }

    #[test]
    fn strict_mode_reports_unterminated_block() {
        let err = scan(&["a", "// .code_block_start", "b"], &strict()).unwrap_err();
        match err {
            RstGrabError::UnterminatedBlock { kind, line } => {
                assert_eq!(kind, BlockKind::Code);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn strict_mode_accepts_well_formed_input() {
        let doc = scan(&[".rst_start", "ok", ".rst_end"], &strict()).unwrap();
        assert_eq!(doc.text, "ok\n\n");
    }
}
