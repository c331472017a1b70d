//! Unified error type for codegraph-core.

use std::path::PathBuf;

/// Errors raised by individual components.
///
/// `Initialize` (see `pipeline::ingest`) never lets one of these escape to
/// its caller — per-file variants are logged and turned into a skipped
/// file; only a root-walk failure ever reaches the top, and even that is
/// caught there and converted into an empty `Graph`.
#[derive(thiserror::Error, Debug)]
pub enum CodegraphError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {file}: {message}")]
    Parse { file: String, message: String },

    #[error("failed to walk root {path}: {source}")]
    WalkRoot {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, CodegraphError>;
