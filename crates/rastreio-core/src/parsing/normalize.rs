use regex::Regex;
use std::sync::LazyLock;

/// `DD/MM/YYYY HH:MM:SS`, date and time separated by any whitespace run.
pub(crate) static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{4}\s+\d{2}:\d{2}:\d{2}").expect("timestamp pattern is valid")
});

/// Collapse every whitespace run (newlines included) into a single space
/// and trim both ends.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of timestamp-shaped substrings in `text`.
pub fn count_timestamps(text: &str) -> usize {
    TIMESTAMP.find_iter(text).count()
}

/// Lowercase a token and strip the Portuguese diacritics that appear in
/// report labels, so "POSIÇÃO" and "posicao" compare equal.
pub fn fold_marker(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'ç' => 'c',
            'ã' | 'á' | 'â' | 'à' => 'a',
            'õ' | 'ó' | 'ô' => 'o',
            'é' | 'ê' => 'e',
            'í' => 'i',
            'ú' | 'ü' => 'u',
            other => other,
        })
        .collect()
}
