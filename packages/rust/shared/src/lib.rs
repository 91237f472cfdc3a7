//! Shared types, error model, and configuration for rstgrab.
//!
//! This crate is the foundation depended on by the extractor and the CLI.
//! It provides:
//! - [`RstGrabError`] — the unified error type
//! - Domain types ([`BlockKind`], [`MarkupBlock`], [`BlockSummary`], [`Document`])
//! - Configuration ([`AppConfig`], [`ExtractOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_LANGUAGE, ExtractConfig, ExtractOptions, OutputConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, RstGrabError};
pub use types::{BlockKind, BlockSummary, Document, MarkupBlock};
