//! Core domain types for extracted markup.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BlockKind
// ---------------------------------------------------------------------------

/// The two kinds of capturable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Markup text between `.rst_start` and `.rst_end`.
    Narrative,
    /// Literal excerpt between `.code_block_start` and `.code_block_end`.
    Code,
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Narrative => f.write_str("narrative"),
            Self::Code => f.write_str("code"),
        }
    }
}

// ---------------------------------------------------------------------------
// MarkupBlock
// ---------------------------------------------------------------------------

/// A block under capture: created at its start sentinel, filled until its end sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupBlock {
    /// Narrative or code.
    pub kind: BlockKind,
    /// Language tag for code blocks; always `None` for narrative blocks.
    pub language: Option<String>,
    /// Raw captured lines, without line terminators.
    ///
    /// Narrative blocks keep both sentinel lines here (normalization drops them);
    /// code blocks hold interior lines only.
    pub lines: Vec<String>,
    /// 1-based line number of the start sentinel.
    pub start_line: usize,
}

impl MarkupBlock {
    /// Open a narrative block at its start sentinel line.
    pub fn narrative(start_line: usize, sentinel_line: &str) -> Self {
        Self {
            kind: BlockKind::Narrative,
            language: None,
            lines: vec![sentinel_line.to_string()],
            start_line,
        }
    }

    /// Open a code block with the given language tag.
    pub fn code(start_line: usize, language: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Code,
            language: Some(language.into()),
            lines: Vec::new(),
            start_line,
        }
    }

    /// Append one raw source line.
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// What was emitted for one completed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub kind: BlockKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// 1-based line of the start sentinel.
    pub start_line: usize,
    /// 1-based line of the end sentinel.
    pub end_line: usize,
    /// Number of lines rendered into the document (excluding sentinels and padding).
    pub line_count: usize,
}

/// The result of one extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Concatenated rendered blocks, in the order their end sentinel was met.
    pub text: String,
    /// One summary per rendered block, same order as `text`.
    pub blocks: Vec<BlockSummary>,
}

impl Document {
    /// Append a rendered block. Documents only grow.
    pub fn append(&mut self, rendered: &str, summary: BlockSummary) {
        self.text.push_str(rendered);
        self.blocks.push(summary);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
