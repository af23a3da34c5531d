//! Error types surfaced by the library.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failures that stop a whole batch from being normalized.
///
/// Malformed per-title fields never produce one of these; they degrade to
/// display fallbacks instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The payload has no `titles` array to normalize.
    #[error("batch has no titles array")]
    MissingTitles,
    /// The payload is not a JSON object.
    #[error("batch is not valid JSON: {0}")]
    InvalidBatch(#[from] serde_json::Error),
}

/// Failures while obtaining a raw batch from a snapshot directory or over HTTP.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The snapshot directory holds no `output_<epoch>.json` files.
    #[error("no snapshot files found in {}", .0.display())]
    NoSnapshots(PathBuf),
    /// Reading or writing a snapshot failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A snapshot file does not contain a JSON batch.
    #[error("failed to parse snapshot {}: {source}", .path.display())]
    Snapshot {
        /// Offending snapshot file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with HTTP {status}")]
    Status {
        /// Response status code.
        status: u16,
    },
    /// The response body is not a JSON batch.
    #[error("invalid batch payload: {0}")]
    Payload(#[source] serde_json::Error),
    /// No origin is configured to build the request URL from.
    #[error("no allowed origin configured")]
    NoOrigin,
}

/// Failures while loading or initialising configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Layered configuration could not be built or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    /// Default configuration could not be serialized.
    #[error("failed to serialize default configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Default configuration could not be written.
    #[error("failed to write configuration {}: {source}", .path.display())]
    Write {
        /// Target configuration file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The platform reports no configuration directory.
    #[error("could not determine the user configuration directory")]
    NoConfigDir,
}
