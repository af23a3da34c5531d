#![allow(missing_docs)]

//! Upstream play-history records as delivered by the provider.
//!
//! Every field is optional and decoded leniently: a value of the wrong JSON
//! type is coerced where that is unambiguous and otherwise treated as absent,
//! so one bad field never rejects the whole batch.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// One page of upstream titles plus pagination metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBatch {
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub next_offset: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cursor")]
    pub previous_offset: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_item_count: Option<u64>,
    /// Capture time in epoch seconds. Older payloads omit it or send it as a string.
    #[serde(default, deserialize_with = "deserialize_epoch")]
    pub timestamp: Option<i64>,
    /// `None` when the payload has no usable `titles` array. Entries that are
    /// not title objects stay in place as `None` so positions match the payload.
    #[serde(default, deserialize_with = "deserialize_titles")]
    pub titles: Option<Vec<Option<RawTitle>>>,
}

impl RawBatch {
    /// Decode a batch from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Decoded titles paired with their index in the payload's `titles` array.
    pub fn indexed_titles(&self) -> impl Iterator<Item = (usize, &RawTitle)> + '_ {
        self.titles
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(index, entry)| entry.as_ref().map(|title| (index, title)))
    }
}

/// A single upstream title record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTitle {
    #[serde(default, deserialize_with = "lenient")]
    pub title_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localized_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localized_image_url: Option<String>,
    /// Legacy image field, used when `localizedImageUrl` is absent.
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub play_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub play_duration: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_played_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub last_played_date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub concept: Option<RawConcept>,
}

impl RawTitle {
    /// Genre tags from the nested concept, empty when there are none.
    pub fn genres(&self) -> &[String] {
        self.concept
            .as_ref()
            .map(|concept| concept.genres.as_slice())
            .unwrap_or(&[])
    }
}

/// Provider-level grouping of related titles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConcept {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub localized_name: Option<RawLocalizedName>,
    #[serde(default, deserialize_with = "deserialize_genres")]
    pub genres: Vec<String>,
}

impl RawConcept {
    /// Name in the concept's default language, if provided.
    pub fn default_language_name(&self) -> Option<&str> {
        let localized = self.localized_name.as_ref()?;
        let language = localized.default_language.as_deref()?;
        localized.metadata.get(language).map(String::as_str)
    }
}

/// Locale-keyed name map.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLocalizedName {
    #[serde(default)]
    pub default_language: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(num) => num.as_u64().or_else(|| {
            num.as_f64()
                .filter(|value| *value >= 0.0 && value.fract() == 0.0 && *value <= u64::MAX as f64)
                .map(|value| value as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    })
}

fn deserialize_epoch<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(num) => num.as_i64().or_else(|| {
            num.as_f64()
                .filter(|value| value.is_finite() && value.abs() <= i64::MAX as f64)
                .map(|value| value.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    })
}

fn deserialize_cursor<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(num) => Some(num.to_string()),
        _ => None,
    })
}

fn deserialize_genres<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(genre) => Some(genre),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn deserialize_titles<'de, D>(deserializer: D) -> Result<Option<Vec<Option<RawTitle>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(None),
    };

    let titles = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match serde_json::from_value::<RawTitle>(item) {
            Ok(title) => Some(title),
            Err(err) => {
                warn!(index, "Ignoring malformed title entry: {err}");
                None
            }
        })
        .collect();
    Ok(Some(titles))
}
