//! Presentation helpers for card fields.
//!
//! Upstream data is inconsistently cased and frequently missing, so the
//! API normalizes names, dates, and blank fields before they reach a
//! client.

use std::sync::OnceLock;

use regex::Regex;

use crate::sla;

fn formatted_date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{2}/\d{2}/\d{4} \d{2}:\d{2}$").expect("static date pattern")
    })
}

/// Title-case a person's name, or `"N/A"` when absent.
///
/// Every alphanumeric run starts uppercase and continues lowercase, so
/// `"MARIA DOS SANTOS"` and `"maria dos santos"` both render as
/// `"Maria Dos Santos"`.
pub fn format_person_name(name: Option<&str>) -> String {
    let Some(name) = name else {
        return "N/A".to_string();
    };
    if name.is_empty() || name == "N/A" {
        return "N/A".to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Pass a value through, or `"N/A"` when absent or empty.
pub fn or_na(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => "N/A".to_string(),
    }
}

/// Render an upstream timestamp as `dd/mm/yyyy hh:mm` in UTC.
///
/// Already-formatted values and `"N/A"` pass through untouched, as does
/// anything unparseable. Absent and empty values render as `"N/A"`.
pub fn format_display_date(value: Option<&str>) -> String {
    let Some(value) = value else {
        return "N/A".to_string();
    };
    if value.is_empty() {
        return "N/A".to_string();
    }
    if value == "N/A" || formatted_date_pattern().is_match(value) {
        return value.to_string();
    }
    match sla::parse_created_at(value) {
        Some(instant) => instant.format("%d/%m/%Y %H:%M").to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_title_cased_per_word() {
        assert_eq!(format_person_name(Some("joão silva")), "João Silva");
        assert_eq!(
            format_person_name(Some("MARIA DOS SANTOS")),
            "Maria Dos Santos"
        );
        assert_eq!(format_person_name(Some("josé")), "José");
        assert_eq!(format_person_name(Some("andré luís")), "André Luís");
    }

    #[test]
    fn hyphenated_names_capitalize_both_parts() {
        assert_eq!(format_person_name(Some("joão-pedro")), "João-Pedro");
    }

    #[test]
    fn absent_names_render_as_na() {
        assert_eq!(format_person_name(None), "N/A");
        assert_eq!(format_person_name(Some("")), "N/A");
        assert_eq!(format_person_name(Some("N/A")), "N/A");
    }

    #[test]
    fn or_na_defaults_blank_values() {
        assert_eq!(or_na(Some("ABC-1234")), "ABC-1234");
        assert_eq!(or_na(Some("")), "N/A");
        assert_eq!(or_na(None), "N/A");
    }

    #[test]
    fn iso_dates_render_in_day_first_utc() {
        assert_eq!(
            format_display_date(Some("2024-03-05T14:30:00Z")),
            "05/03/2024 14:30"
        );
        assert_eq!(
            format_display_date(Some("2024-03-05T14:30:00-03:00")),
            "05/03/2024 17:30"
        );
    }

    #[test]
    fn naive_and_date_only_inputs_are_accepted() {
        assert_eq!(
            format_display_date(Some("2024-03-05T14:30:00")),
            "05/03/2024 14:30"
        );
        assert_eq!(
            format_display_date(Some("2024-03-05 14:30:00")),
            "05/03/2024 14:30"
        );
        assert_eq!(format_display_date(Some("2024-03-05")), "05/03/2024 00:00");
    }

    #[test]
    fn formatted_and_unparseable_dates_pass_through() {
        assert_eq!(
            format_display_date(Some("05/03/2024 14:30")),
            "05/03/2024 14:30"
        );
        assert_eq!(format_display_date(Some("N/A")), "N/A");
        assert_eq!(format_display_date(Some("amanhã")), "amanhã");
    }

    #[test]
    fn absent_dates_render_as_na() {
        assert_eq!(format_display_date(None), "N/A");
        assert_eq!(format_display_date(Some("")), "N/A");
    }
}
