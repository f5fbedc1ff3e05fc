//! Graph loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading ontology sources into a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The source file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported serialization.
    #[error("cannot guess RDF syntax of {0} (expected .ttl or .nt)")]
    UnknownFormat(PathBuf),

    /// The parser rejected the document.
    #[error("parse error: {0}")]
    Parse(String),

    /// The prefix-declaration scanner failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}
