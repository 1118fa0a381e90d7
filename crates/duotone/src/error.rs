//! Error types for the duotone crate.

use std::path::PathBuf;

use duotone_sheet::SheetError;
use thiserror::Error;

/// Errors raised while building a transform or running it over a document.
///
/// Per-declaration problems (unknown groups, missing nesting support) are not
/// errors; they surface as warnings in the process output.
#[derive(Debug, Error)]
pub enum Error {
    /// The lookup function or a group name produced an invalid pattern.
    #[error("invalid reference pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The input could not be parsed as CSS.
    #[error(transparent)]
    Sheet(#[from] SheetError),

    /// Configuration text could not be deserialized.
    #[error("invalid {format} configuration: {message}")]
    Format {
        format: &'static str,
        message: String,
    },

    /// A configuration file had invalid content or an unknown extension.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// A configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for duotone operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_names_the_file() {
        let err = Error::Config {
            path: PathBuf::from("theme.yaml"),
            message: "unknown field `colours`".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration in theme.yaml: unknown field `colours`"
        );
    }

    #[test]
    fn test_sheet_error_is_transparent() {
        let err: Error = SheetError::Parse {
            line: 1,
            column: 5,
            message: "Unknown word `x`".into(),
        }
        .into();
        assert_eq!(err.to_string(), "CSS parse error at 1:5: Unknown word `x`");
    }
}
