//! Error types for reading and writing INI files.

use std::path::PathBuf;

use cfgreg_common::ConfigError;
use thiserror::Error;

/// Error type for INI parsing and file operations.
#[derive(Debug, Error)]
pub enum IniError {
    /// An option line appeared before any `[section]` header.
    #[error("line {line_no}: empty section name not allowed: {line}")]
    BlankSection { line_no: usize, line: String },

    /// The line is neither a comment, a header, an option nor a continuation.
    #[error("line {line_no}: could not parse line: {line}")]
    CouldNotParse { line_no: usize, line: String },

    /// The underlying reader failed before end of input.
    #[error("failed to read configuration: {0}")]
    Read(#[from] std::io::Error),

    /// Opening, creating or writing the backing file failed.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<IniError> for ConfigError {
    fn from(err: IniError) -> Self {
        ConfigError::provider(err)
    }
}
