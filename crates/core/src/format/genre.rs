/// Separator between words in an upstream genre tag.
pub const GENRE_SEPARATOR: char = '_';

/// Shorten an underscore-joined genre tag to the first letter of each word.
///
/// `"role_playing"` becomes `"rp"`; tags without a separator are returned as-is.
pub fn compact_genre(token: &str) -> String {
    if !token.contains(GENRE_SEPARATOR) {
        return token.to_string();
    }

    token
        .split(GENRE_SEPARATOR)
        .filter_map(|segment| segment.chars().next())
        .collect()
}

/// Compact every genre and join them for display.
pub fn genre_label(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| compact_genre(genre))
        .collect::<Vec<_>>()
        .join(", ")
}
