//! Fatal error kinds raised by the pipeline.
//!
//! Recoverable conditions (an unreadable source file, a catalog message
//! without a `<source>`) never surface here: they are skipped where they
//! occur and only reported as warnings in verbose mode.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// A required input file does not exist.
    #[error("{what} not found: {}", path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    /// A mapping table line has no TAB separator.
    #[error("Line {line} in {} is missing a TAB separator: {content:?}", path.display())]
    MalformedMappingLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// The catalog is not a well-formed XML document.
    #[error("Failed to parse catalog {}: {message}", path.display())]
    MalformedCatalog { path: PathBuf, message: String },
}
