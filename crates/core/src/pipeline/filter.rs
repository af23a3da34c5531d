use crate::models::RawTitle;

/// Substring a category must contain for the title to count as a game.
pub const GAME_CATEGORY_MARKER: &str = "game";

/// Whether the title's category marks it as a game (case-sensitive).
pub fn is_game(title: &RawTitle) -> bool {
    title
        .category
        .as_deref()
        .map(|category| category.contains(GAME_CATEGORY_MARKER))
        .unwrap_or(false)
}

/// Keep the game entries of `(position, title)` pairs, in iteration order.
pub fn filter_game_entries<'a, I>(entries: I) -> Vec<(usize, &'a RawTitle)>
where
    I: IntoIterator<Item = (usize, &'a RawTitle)>,
{
    entries
        .into_iter()
        .filter(|(_, title)| is_game(title))
        .collect()
}

/// Game titles paired with their position in the input, in input order.
pub fn filter_games_indexed(titles: &[RawTitle]) -> Vec<(usize, &RawTitle)> {
    filter_game_entries(titles.iter().enumerate())
}

/// Ordered sub-sequence of `titles` whose category contains `"game"`.
pub fn filter_games(titles: &[RawTitle]) -> Vec<&RawTitle> {
    filter_games_indexed(titles)
        .into_iter()
        .map(|(_, title)| title)
        .collect()
}
