use crate::models::Badge;

/// Upstream service codes that carry a badge. Anything else has none.
const BADGE_TABLE: &[(&str, Badge)] = &[("ps_plus", Badge::PsPlus), ("other", Badge::GenericDisc)];

/// Map a service code to its badge. Unknown codes resolve to [`Badge::None`].
pub fn resolve_badge(code: &str) -> Badge {
    BADGE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, badge)| *badge)
        .unwrap_or(Badge::None)
}
