#![warn(clippy::all, missing_docs)]

//! Core logic for the playdeck game-library dashboard.
//!
//! This crate turns raw play-history batches from the upstream provider into
//! display-ready view models, and hosts the configuration and batch sources
//! used by the command-line frontend.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod pipeline;
pub mod source;

pub use chrono::Locale;
pub use crate::config::AppConfig;
pub use error::{ConfigError, PipelineError, SourceError};
pub use format::DateStyle;
pub use models::{Badge, Batch, NormalizedTitle, RawBatch, RawConcept, RawTitle};
pub use pipeline::{BatchAssembler, TitleNormalizer};
pub use source::{HttpSource, SnapshotEntry, SnapshotStore};
