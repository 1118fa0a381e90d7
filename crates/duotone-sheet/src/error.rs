//! Error types for the sheet crate.

use thiserror::Error;

/// Errors that can occur while parsing a style sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The input is not a well-formed style sheet.
    #[error("CSS parse error at {line}:{column}: {message}")]
    Parse {
        /// 1-based line of the offending token.
        line: u32,
        /// 1-based column of the offending token.
        column: u32,
        /// What the parser expected or found.
        message: String,
    },
}

/// Result type for sheet operations.
pub type Result<T> = std::result::Result<T, SheetError>;
