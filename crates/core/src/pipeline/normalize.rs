use chrono::Locale;
use tracing::debug;

use crate::{
    format::{
        compact_genre, date::FALLBACK_LOCALE, format_played_date, parse_duration, parse_timestamp,
        resolve_badge, DateStyle, UNKNOWN,
    },
    models::{Badge, NormalizedTitle, RawTitle},
};

/// Name shown when upstream provides none at all.
pub const UNTITLED: &str = "Untitled";

/// Turns one raw title into its display record.
///
/// Total over any [`RawTitle`]: unparseable fields become [`UNKNOWN`],
/// unrecognised services resolve to [`Badge::None`].
#[derive(Debug, Clone, Copy)]
pub struct TitleNormalizer {
    locale: Locale,
    date_style: DateStyle,
}

impl Default for TitleNormalizer {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

impl TitleNormalizer {
    /// Normalizer rendering months for `locale` in the ordinal date style.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            date_style: DateStyle::default(),
        }
    }

    /// Switch how played dates are rendered.
    pub fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    /// Locale used for month names.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Active played-date style.
    pub fn date_style(&self) -> DateStyle {
        self.date_style
    }

    /// Normalize `title`, which sits at `position` in its raw batch.
    pub fn normalize(&self, position: usize, title: &RawTitle) -> NormalizedTitle {
        let key = first_present([title.title_id.as_deref()])
            .map(str::to_string)
            .unwrap_or_else(|| format!("title-{position}"));

        let concept = title.concept.as_ref();
        let name = first_present([
            title.name.as_deref(),
            title.localized_name.as_deref(),
            concept.and_then(|concept| concept.default_language_name()),
            concept.and_then(|concept| concept.name.as_deref()),
        ])
        .unwrap_or(UNTITLED)
        .to_string();

        let image_url = first_present([
            title.localized_image_url.as_deref(),
            title.image_url.as_deref(),
        ])
        .map(str::to_string);

        let duration = match title.play_duration.as_deref().map(parse_duration) {
            Some(Some(duration)) => duration.to_string(),
            raw => {
                debug!(%key, ?raw, "Play duration unavailable");
                UNKNOWN.to_string()
            }
        };

        let genres: Vec<String> = title
            .genres()
            .iter()
            .map(|genre| compact_genre(genre))
            .collect();
        let genre_label = genres.join(", ");

        let badge = title
            .service
            .as_deref()
            .map(resolve_badge)
            .unwrap_or(Badge::None);

        NormalizedTitle {
            first_played: self.played_date(&key, "first", title.first_played_date_time.as_deref()),
            last_played: self.played_date(&key, "last", title.last_played_date_time.as_deref()),
            key,
            name,
            image_url,
            play_count: title.play_count.unwrap_or(0),
            duration,
            genres,
            genre_label,
            badge,
        }
    }

    fn played_date(&self, key: &str, which: &str, raw: Option<&str>) -> String {
        match raw.and_then(parse_timestamp) {
            Some(value) => format_played_date(&value, self.date_style, self.locale),
            None => {
                debug!(%key, which, ?raw, "Played date unavailable");
                UNKNOWN.to_string()
            }
        }
    }
}

fn first_present<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawTitle {
        serde_json::from_value(value).expect("raw title")
    }

    #[test]
    fn normalizes_complete_title() {
        let title = raw(json!({
            "titleId": "CUSA01234_00",
            "category": "ps4_game",
            "name": "Sample Quest",
            "localizedImageUrl": "https://img.example/local.png",
            "imageUrl": "https://img.example/legacy.png",
            "playCount": 12,
            "playDuration": "PT1H5M",
            "firstPlayedDateTime": "2023-11-01T09:30:00.000Z",
            "lastPlayedDateTime": "2024-01-22T23:59:59Z",
            "service": "ps_plus",
            "concept": { "genres": ["role_playing", "action"] }
        }));

        let normalized = TitleNormalizer::default().normalize(3, &title);
        assert_eq!(
            normalized,
            NormalizedTitle {
                key: "CUSA01234_00".to_string(),
                name: "Sample Quest".to_string(),
                image_url: Some("https://img.example/local.png".to_string()),
                play_count: 12,
                duration: "1h 5m".to_string(),
                first_played: "1st Nov 2023".to_string(),
                last_played: "22nd Jan 2024".to_string(),
                genres: vec!["rp".to_string(), "action".to_string()],
                genre_label: "rp, action".to_string(),
                badge: Badge::PsPlus,
            }
        );
    }

    #[test]
    fn degrades_malformed_fields() {
        let title = raw(json!({
            "category": "ps5_native_game",
            "name": "Broken",
            "playDuration": "forever",
            "firstPlayedDateTime": "not a date",
            "service": "mystery_tier"
        }));

        let normalized = TitleNormalizer::default().normalize(0, &title);
        assert_eq!(normalized.key, "title-0");
        assert_eq!(normalized.duration, UNKNOWN);
        assert_eq!(normalized.first_played, UNKNOWN);
        assert_eq!(normalized.last_played, UNKNOWN);
        assert_eq!(normalized.badge, Badge::None);
        assert_eq!(normalized.play_count, 0);
        assert!(normalized.genres.is_empty());
        assert_eq!(normalized.genre_label, "");
        assert_eq!(normalized.image_url, None);
    }

    #[test]
    fn resolves_fallback_fields_in_order() {
        let legacy = raw(json!({
            "category": "ps4_game",
            "localizedName": "Localized",
            "imageUrl": "https://img.example/legacy.png",
            "service": "other"
        }));
        let normalized = TitleNormalizer::default().normalize(5, &legacy);
        assert_eq!(normalized.name, "Localized");
        assert_eq!(
            normalized.image_url.as_deref(),
            Some("https://img.example/legacy.png")
        );
        assert_eq!(normalized.badge, Badge::GenericDisc);
        assert_eq!(normalized.key, "title-5");

        let concept_only = raw(json!({
            "category": "ps4_game",
            "name": "  ",
            "localizedImageUrl": "",
            "concept": {
                "name": "Concept Name",
                "localizedName": { "defaultLanguage": "en-GB", "metadata": { "en-GB": "Colour Quest" } }
            }
        }));
        let normalized = TitleNormalizer::default().normalize(1, &concept_only);
        assert_eq!(normalized.name, "Colour Quest");
        assert_eq!(normalized.image_url, None);

        let nameless = raw(json!({ "category": "ps4_game" }));
        assert_eq!(TitleNormalizer::default().normalize(0, &nameless).name, UNTITLED);
    }

    #[test]
    fn passes_name_and_image_through_unchanged() {
        let title = raw(json!({
            "titleId": " CUSA0001_00 ",
            "category": "ps4_game",
            "name": "  Spaced  ",
            "localizedImageUrl": " https://img.example/cover.png\n"
        }));
        let normalized = TitleNormalizer::default().normalize(0, &title);
        assert_eq!(normalized.key, " CUSA0001_00 ");
        assert_eq!(normalized.name, "  Spaced  ");
        assert_eq!(
            normalized.image_url.as_deref(),
            Some(" https://img.example/cover.png\n")
        );
    }

    #[test]
    fn short_date_style() {
        let title = raw(json!({
            "category": "ps4_game",
            "firstPlayedDateTime": "2023-11-01T09:30:00Z"
        }));
        let normalizer = TitleNormalizer::new(Locale::en_US).with_date_style(DateStyle::Short);
        assert_eq!(normalizer.date_style(), DateStyle::Short);
        let first = normalizer.normalize(0, &title).first_played;
        assert!(first.contains("2023"), "{first}");
        assert!(!first.contains("1st"), "{first}");
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let title = raw(json!({
            "category": "ps4_game",
            "name": "Again",
            "playDuration": "PT3H",
            "concept": { "genres": ["first_person_shooter"] }
        }));
        let normalizer = TitleNormalizer::default();
        let first = normalizer.normalize(0, &title);
        assert_eq!(normalizer.normalize(0, &title), first);

        let recompacted: Vec<_> = first.genres.iter().map(|g| compact_genre(g)).collect();
        assert_eq!(recompacted, first.genres);
    }

    #[test]
    fn formatted_fields_are_never_reformatted() {
        let title = raw(json!({
            "category": "ps4_game",
            "name": "Display",
            "playDuration": "PT1H5M",
            "firstPlayedDateTime": "2023-11-01T10:00:00Z",
            "lastPlayedDateTime": "2023-11-02T10:00:00Z",
            "service": "ps_plus",
            "concept": { "genres": ["role_playing", "action"] }
        }));
        let normalized = TitleNormalizer::default().normalize(0, &title);
        assert_eq!(normalized.duration, "1h 5m");
        assert_eq!(normalized.first_played, "1st Nov 2023");
        assert_eq!(normalized.badge, Badge::PsPlus);

        // Compacted genres are a fixed point of compaction.
        let recompacted: Vec<_> = normalized.genres.iter().map(|g| compact_genre(g)).collect();
        assert_eq!(recompacted, normalized.genres);
        assert_eq!(recompacted.join(", "), normalized.genre_label);

        // Display strings are not upstream codes: the parsers reject them, so
        // the only way to carry them forward is verbatim.
        assert_eq!(parse_duration(&normalized.duration), None);
        assert_eq!(parse_timestamp(&normalized.first_played), None);
        assert_eq!(parse_timestamp(&normalized.last_played), None);
        assert_eq!(resolve_badge(normalized.badge.as_str()), Badge::None);

        // Carrying them verbatim through the output shape changes nothing.
        let encoded = serde_json::to_value(&normalized).expect("serialize");
        let decoded: NormalizedTitle = serde_json::from_value(encoded).expect("deserialize");
        assert_eq!(decoded, normalized);
    }
}
