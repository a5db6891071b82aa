use regex::Regex;
use std::sync::LazyLock;

static PLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Placa:\s*([A-Z0-9-]{5,10})").expect("plate pattern is valid")
});

/// Find the vehicle plate in the first page of a report.
///
/// Looks for a `Placa:` label (any case) followed by 5 to 10 characters of
/// letters, digits or hyphens.
pub fn extract_plate(first_page_text: &str) -> Option<String> {
    PLATE
        .captures(first_page_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|plate| !plate.is_empty())
}
