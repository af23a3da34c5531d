use chrono::{DateTime, Datelike, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

/// Locale used when a configured locale name is not recognised.
pub const FALLBACK_LOCALE: Locale = Locale::en_US;

/// How per-title played dates are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `"3rd Jan 2024"`.
    #[default]
    Ordinal,
    /// The locale's short date (`%x`), as older dashboards showed it.
    Short,
}

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day % 10 {
        1 if day != 11 => "st",
        2 if day != 12 => "nd",
        3 if day != 13 => "rd",
        _ => "th",
    }
}

/// Parse an upstream date-time string into UTC.
///
/// Accepts RFC 3339 (`2023-11-01T10:20:30.47Z`), naive date-times which are
/// taken as UTC, and bare `YYYY-MM-DD` dates.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// `"{day}{suffix} {Mon} {year}"` with the month abbreviated for `locale`.
pub fn format_ordinal_date(value: &DateTime<Utc>, locale: Locale) -> String {
    let day = value.day();
    format!(
        "{}{} {} {}",
        day,
        ordinal_suffix(day),
        value.format_localized("%b", locale),
        value.year()
    )
}

/// Locale short date without ordinal handling.
pub fn format_short_date(value: &DateTime<Utc>, locale: Locale) -> String {
    value.format_localized("%x", locale).to_string()
}

/// Render a played date in the requested style.
pub fn format_played_date(value: &DateTime<Utc>, style: DateStyle, locale: Locale) -> String {
    match style {
        DateStyle::Ordinal => format_ordinal_date(value, locale),
        DateStyle::Short => format_short_date(value, locale),
    }
}

/// Generic date-time label for an epoch-seconds instant, rendered in UTC.
pub fn format_instant(epoch_secs: i64, locale: Locale) -> Option<String> {
    let instant = Utc.timestamp_opt(epoch_secs, 0).single()?;
    Some(instant.format_localized("%x %X", locale).to_string())
}

/// Resolve a POSIX-style locale name (`en_GB`, `de-DE`), falling back to
/// [`FALLBACK_LOCALE`].
pub fn resolve_locale(name: &str) -> Locale {
    let normalized = name.trim().replace('-', "_");
    Locale::try_from(normalized.as_str()).unwrap_or_else(|_| {
        warn!(locale = %name, "Unknown locale, falling back to en_US");
        FALLBACK_LOCALE
    })
}
