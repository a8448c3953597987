//! City extraction and matching for origin locations.

use std::sync::OnceLock;

use regex::Regex;

/// Ordered patterns for "City - ST", "City/ST", "City, ST", then a bare
/// leading city run. First hit wins.
fn city_patterns() -> &'static [Regex; 4] {
    static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)^([^-]+)\s*-\s*[A-Z]{2}$").expect("static city pattern"),
            Regex::new(r"(?i)^([^/]+)\s*/\s*[A-Z]{2}$").expect("static city pattern"),
            Regex::new(r"(?i)^([^,]+)\s*,\s*[A-Z]{2}$").expect("static city pattern"),
            Regex::new(r"(?i)^([^-,/]+)").expect("static city pattern"),
        ]
    })
}

/// Extract the city name from a free-form origin location.
///
/// Tries each pattern in order and returns the first capture, trimmed.
/// Falls back to the trimmed input when nothing matches, so the result is
/// always usable as a comparison key. Never fails.
pub fn extract_city(origin: &str) -> String {
    if origin.is_empty() {
        return String::new();
    }
    for pattern in city_patterns() {
        if let Some(captures) = pattern.captures(origin)
            && let Some(city) = captures.get(1)
        {
            return city.as_str().trim().to_string();
        }
    }
    origin.trim().to_string()
}

/// Loose city comparison used for operation areas: lowercase containment in
/// either direction, or exact equality.
pub fn cities_match(card_city: &str, area_city: &str) -> bool {
    let card = card_city.to_lowercase();
    let area = area_city.to_lowercase();
    card.contains(&area) || area.contains(&card) || card == area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_city_from_hyphen_state_format() {
        assert_eq!(extract_city("São Paulo - SP"), "São Paulo");
        assert_eq!(extract_city("Santo André-SP"), "Santo André");
    }

    #[test]
    fn extracts_city_from_slash_state_format() {
        assert_eq!(extract_city("Rio de Janeiro/RJ"), "Rio de Janeiro");
        assert_eq!(extract_city("Niterói / RJ"), "Niterói");
    }

    #[test]
    fn extracts_city_from_comma_state_format() {
        assert_eq!(extract_city("Curitiba, PR"), "Curitiba");
    }

    #[test]
    fn state_code_match_is_case_insensitive() {
        assert_eq!(extract_city("guarulhos - sp"), "guarulhos");
    }

    #[test]
    fn bare_city_passes_through_trimmed() {
        assert_eq!(extract_city("Belo Horizonte"), "Belo Horizonte");
        assert_eq!(extract_city("  Santos  "), "Santos");
    }

    #[test]
    fn multi_separator_input_keeps_leading_run() {
        // The anchored state patterns cannot match, so the leading-run
        // pattern takes the text before the first separator.
        assert_eq!(
            extract_city("Mogi das Cruzes - Brás Cubas - SP"),
            "Mogi das Cruzes"
        );
        assert_eq!(extract_city("Osasco, Centro, SP"), "Osasco");
    }

    #[test]
    fn unmatchable_input_falls_back_to_trimmed_original() {
        assert_eq!(extract_city("- SP"), "- SP");
        assert_eq!(extract_city(""), "");
    }

    #[test]
    fn cities_match_is_case_insensitive() {
        assert!(cities_match("santos", "SANTOS"));
        assert!(cities_match("São Paulo", "são paulo"));
    }

    #[test]
    fn cities_match_accepts_containment_both_ways() {
        assert!(cities_match("São Paulo", "Paulo"));
        assert!(cities_match("Paulo", "São Paulo"));
        assert!(!cities_match("Santos", "Campinas"));
    }
}
