//! Raw batch to display model transform.
//!
//! The pipeline is pure: it performs no I/O and keeps no state between
//! invocations, so independent batches can be normalized concurrently.

/// Batch-level assembly and metadata pass-through.
pub mod batch;
/// Category filtering.
pub mod filter;
/// Per-title normalization.
pub mod normalize;

pub use batch::BatchAssembler;
pub use filter::{filter_game_entries, filter_games, filter_games_indexed, is_game};
pub use normalize::TitleNormalizer;
