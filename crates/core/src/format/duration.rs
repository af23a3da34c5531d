use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::UNKNOWN;

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?$")
        .expect("failed to compile duration regex")
});

/// Hour/minute view of an upstream play duration. Seconds are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayDuration {
    /// Whole hours.
    pub hours: u64,
    /// Minutes component as reported upstream (not carried into hours).
    pub minutes: u64,
}

impl fmt::Display for PlayDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Parse a `PT[<n>H][<n>M][<n>S]` duration string.
///
/// Returns `None` when the input does not follow the pattern or a component
/// overflows `u64`.
pub fn parse_duration(input: &str) -> Option<PlayDuration> {
    let caps = DURATION_RE.captures(input.trim())?;
    let component = |index: usize| -> Option<u64> {
        match caps.get(index) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    Some(PlayDuration {
        hours: component(1)?,
        minutes: component(2)?,
    })
}

/// Format a duration string as `"{h}h {m}m"`, or [`UNKNOWN`] when it cannot be parsed.
pub fn format_duration(input: &str) -> String {
    parse_duration(input)
        .map(|duration| duration.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hours_and_minutes() {
        assert_eq!(
            parse_duration("PT2H15M"),
            Some(PlayDuration {
                hours: 2,
                minutes: 15
            })
        );
        assert_eq!(format_duration("PT2H15M"), "2h 15m");
        assert_eq!(format_duration("PT1H5M"), "1h 5m");
    }

    #[test]
    fn missing_components_default_to_zero() {
        assert_eq!(format_duration("PT45M"), "0h 45m");
        assert_eq!(format_duration("PT3H"), "3h 0m");
        assert_eq!(format_duration("PT"), "0h 0m");
    }

    #[test]
    fn seconds_are_discarded() {
        assert_eq!(format_duration("PT30S"), "0h 0m");
        assert_eq!(format_duration("PT10H2M59S"), "10h 2m");
        assert_eq!(format_duration("PT1M12.5S"), "0h 1m");
    }

    #[test]
    fn minutes_are_not_carried() {
        assert_eq!(format_duration("PT90M"), "0h 90m");
    }

    #[test]
    fn malformed_input_is_unknown() {
        assert_eq!(format_duration("garbage"), UNKNOWN);
        assert_eq!(format_duration(""), UNKNOWN);
        assert_eq!(format_duration("2H15M"), UNKNOWN);
        assert_eq!(format_duration("PT2X"), UNKNOWN);
        assert_eq!(format_duration("PT99999999999999999999999H"), UNKNOWN);
        assert_eq!(parse_duration("P1DT2H"), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(format_duration("  PT4H20M\n"), "4h 20m");
    }
}
