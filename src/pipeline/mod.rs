//! Ingest pipeline and concurrency model.

pub mod ingest;

pub use ingest::{initialize, ProgressCallback, StartCallback};
