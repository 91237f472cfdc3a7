//! Error types for rstgrab.
//!
//! Library crates use [`RstGrabError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::BlockKind;

/// Top-level error type for all rstgrab operations.
#[derive(Debug, thiserror::Error)]
pub enum RstGrabError {
    /// Input could not be opened or read, or output could not be written.
    #[error("cannot access {path:?}: {source}")]
    Resource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Missing required input, or an unreadable/unparsable config file.
    #[error("config error: {message}")]
    Config { message: String },

    /// A block start sentinel with no matching end sentinel (strict mode only).
    #[error("unterminated {kind} block starting at line {line}")]
    UnterminatedBlock { kind: BlockKind, line: usize },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RstGrabError>;

impl RstGrabError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with the path it happened on.
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resource {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = RstGrabError::config("an input file was not specified");
        assert_eq!(err.to_string(), "config error: an input file was not specified");

        let err = RstGrabError::UnterminatedBlock {
            kind: BlockKind::Code,
            line: 12,
        };
        assert_eq!(err.to_string(), "unterminated code block starting at line 12");
    }

    #[test]
    fn resource_error_names_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = RstGrabError::resource("missing.v", source);
        let msg = err.to_string();
        assert!(msg.contains("missing.v"));
        assert!(msg.contains("no such file"));
    }
}
