//! Shared domain models.

mod raw;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use raw::{RawBatch, RawConcept, RawLocalizedName, RawTitle};

/// Small indicator shown next to a title, derived from its service code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge {
    /// Title is available through the subscription tier.
    PsPlus,
    /// Physical or otherwise sourced copy.
    GenericDisc,
    /// No badge.
    #[default]
    None,
}

impl Badge {
    /// Identifier consumed by the rendering layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::PsPlus => "ps-plus",
            Badge::GenericDisc => "generic-disc",
            Badge::None => "none",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-ready view of one played title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTitle {
    /// Stable key: the upstream title id, or the title's position in the batch.
    pub key: String,
    /// Name shown on the card.
    pub name: String,
    /// Cover art; `None` when upstream sent no image and a placeholder should be used.
    pub image_url: Option<String>,
    /// Number of recorded play sessions.
    pub play_count: u64,
    /// `"{h}h {m}m"` or `"Unknown"`.
    pub duration: String,
    /// Formatted first-played date or `"Unknown"`.
    pub first_played: String,
    /// Formatted last-played date or `"Unknown"`.
    pub last_played: String,
    /// Compacted genre tags in upstream order.
    pub genres: Vec<String>,
    /// Compacted genres joined with `", "`.
    pub genre_label: String,
    /// Badge resolved from the service code.
    pub badge: Badge,
}

/// One normalized page of titles plus its pass-through metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    /// When the batch was captured, formatted for display.
    pub last_updated_display: String,
    /// Opaque cursor for the following page.
    pub next_offset: String,
    /// Opaque cursor for the preceding page.
    pub previous_offset: String,
    /// Upstream item count, before category filtering.
    pub total_item_count: u64,
    /// Game titles in upstream order.
    pub titles: Vec<NormalizedTitle>,
}
