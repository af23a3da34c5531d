//! Leaf formatters that turn machine-encoded upstream fields into display text.
//!
//! None of these functions fail: inputs they cannot interpret come back as
//! `None` (for the `parse_*` helpers) so the caller can substitute [`UNKNOWN`].

/// Service code to badge lookup.
pub mod badge;
/// Timestamp parsing and date labels.
pub mod date;
/// Play duration parsing.
pub mod duration;
/// Genre tag compaction.
pub mod genre;

pub use badge::resolve_badge;
pub use date::{
    format_instant, format_ordinal_date, format_played_date, format_short_date, ordinal_suffix,
    parse_timestamp, resolve_locale, DateStyle,
};
pub use duration::{format_duration, parse_duration, PlayDuration};
pub use genre::{compact_genre, genre_label};

/// Display fallback for any field that could not be parsed.
pub const UNKNOWN: &str = "Unknown";
