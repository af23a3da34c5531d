use tracing::{debug, info};

use crate::{
    error::PipelineError,
    format::{format_instant, UNKNOWN},
    models::{Batch, RawBatch},
};

use super::{filter::filter_game_entries, normalize::TitleNormalizer};

/// Filters a raw batch down to games and normalizes each one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchAssembler {
    normalizer: TitleNormalizer,
}

impl BatchAssembler {
    /// Assembler using `normalizer` for titles and its locale for the batch timestamp.
    pub fn new(normalizer: TitleNormalizer) -> Self {
        Self { normalizer }
    }

    /// The per-title normalizer in use.
    pub fn normalizer(&self) -> &TitleNormalizer {
        &self.normalizer
    }

    /// Build the display batch.
    ///
    /// Only a batch without a `titles` array is rejected; missing metadata
    /// degrades to placeholders.
    pub fn assemble(&self, raw: &RawBatch) -> Result<Batch, PipelineError> {
        let titles = raw.titles.as_deref().ok_or(PipelineError::MissingTitles)?;

        let normalized: Vec<_> = filter_game_entries(raw.indexed_titles())
            .into_iter()
            .map(|(position, title)| self.normalizer.normalize(position, title))
            .collect();

        let last_updated_display = match raw
            .timestamp
            .and_then(|epoch| format_instant(epoch, self.normalizer.locale()))
        {
            Some(label) => label,
            None => {
                debug!(timestamp = ?raw.timestamp, "Batch timestamp unavailable");
                UNKNOWN.to_string()
            }
        };

        let total_item_count = raw.total_item_count.unwrap_or_else(|| {
            debug!("Batch total item count missing, using raw title count");
            titles.len() as u64
        });

        info!(
            raw = titles.len(),
            games = normalized.len(),
            total = total_item_count,
            "Batch assembled"
        );

        Ok(Batch {
            last_updated_display,
            next_offset: raw.next_offset.clone().unwrap_or_default(),
            previous_offset: raw.previous_offset.clone().unwrap_or_default(),
            total_item_count,
            titles: normalized,
        })
    }

    /// Decode and assemble a batch from JSON bytes.
    pub fn assemble_json(&self, bytes: &[u8]) -> Result<Batch, PipelineError> {
        let raw = RawBatch::from_slice(bytes)?;
        self.assemble(&raw)
    }

    /// Decode and assemble a batch from an already parsed JSON value.
    pub fn assemble_value(&self, value: serde_json::Value) -> Result<Batch, PipelineError> {
        let raw: RawBatch = serde_json::from_value(value)?;
        self.assemble(&raw)
    }
}
