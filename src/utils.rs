// Utility functions
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

// Optional `+`, then either a parenthesised area code or a bare digit run;
// digit groups are split by at most one space, dot or dash.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?(?:\(\d{1,4}\)[\s.\-]?\d(?:[\s.\-]?\d){5,12}|\d(?:[\s.\-]?\d){6,14})")
        .expect("valid phone regex")
});

static COORDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(-?\d+\.\d+),(-?\d+\.\d+)").expect("valid coordinates regex"));

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Turns a free-text query into a filesystem-safe slug.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-` and strips leading/trailing hyphens.
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    SLUG_RE.replace_all(&lower, "-").trim_matches('-').to_string()
}

/// First phone-like substring of `text` carrying at least 7 digits.
///
/// A parenthesised group right after another number (`4.5 (120) ...`) is a
/// review count, not an area code, and is skipped.
pub fn extract_phone(text: &str) -> Option<String> {
    let mut from = 0;
    while let Some(m) = PHONE_RE.find_at(text, from) {
        let follows_number = text[..m.start()]
            .trim_end()
            .ends_with(|c: char| c.is_ascii_digit());
        if !(m.as_str().starts_with('(') && follows_number) {
            return Some(m.as_str().trim().to_string());
        }
        from = m.start() + 1;
    }
    None
}

/// Latitude/longitude pair from the `@lat,lon` segment of a maps URL.
pub fn extract_coordinates(url: &str) -> Option<(String, String)> {
    let caps = COORDS_RE.captures(url)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Cuts `name` to `limit` characters, appending `...` when something was dropped.
pub fn truncate_name(name: &str, limit: usize) -> String {
    if name.chars().count() <= limit {
        return name.to_string();
    }
    let mut out: String = name.chars().take(limit).collect();
    out.push_str("...");
    out
}

/// Text of an element with each text node trimmed and joined by a single space.
pub fn flatten_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_matches_international_number_exactly() {
        let text = "+212 5 37 77 12 34";
        assert_eq!(extract_phone(text).as_deref(), Some(text));
    }

    #[test]
    fn phone_is_found_inside_item_text() {
        let text = "Dar Naji · Moroccan · Open ⋅ Closes 11 PM · 0537-76-19-27 Dine-in";
        assert_eq!(extract_phone(text).as_deref(), Some("0537-76-19-27"));
    }

    #[test]
    fn rating_and_review_count_stay_out_of_the_number() {
        assert_eq!(
            extract_phone("4.5 (120) 0537 70 12 34").as_deref(),
            Some("0537 70 12 34")
        );
        assert_eq!(
            extract_phone("Le Dhow 4.1 (3,002) Seafood +212 5 37 70 12 34").as_deref(),
            Some("+212 5 37 70 12 34")
        );
    }

    #[test]
    fn parenthesised_area_code_is_kept() {
        assert_eq!(
            extract_phone("Café Maure (0537) 77-12-34").as_deref(),
            Some("(0537) 77-12-34")
        );
    }

    #[test]
    fn short_digit_runs_are_not_phones() {
        assert_eq!(extract_phone("Open 24 hours, rated 4.5 (1234)"), None);
        assert_eq!(extract_phone("Call 123-45"), None);
        assert_eq!(extract_phone("no digits at all"), None);
    }

    #[test]
    fn coordinates_from_place_url() {
        let url = "https://www.google.com/maps/place/X/@34.020100,-6.841200,17z";
        assert_eq!(
            extract_coordinates(url),
            Some(("34.020100".to_string(), "-6.841200".to_string()))
        );
    }

    #[test]
    fn coordinates_missing_segment() {
        assert_eq!(extract_coordinates("https://www.google.com/maps/place/X/data=!4m7"), None);
        assert_eq!(extract_coordinates(""), None);
    }

    #[test]
    fn slug_collapses_and_trims() {
        assert_eq!(slugify("Restaurants In Rabat!"), "restaurants-in-rabat");
        assert_eq!(slugify("  cafés -- near   me  "), "caf-s-near-me");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn truncation_appends_marker() {
        let long = "A".repeat(60);
        let cut = truncate_name(&long, 50);
        assert_eq!(cut, format!("{}...", "A".repeat(50)));
        assert_eq!(truncate_name("Short name", 50), "Short name");
        assert_eq!(truncate_name(&"é".repeat(50), 50), "é".repeat(50));
    }
}
