//! SLA classification: elapsed days since card creation, and tier labels.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::card::{Card, CardWithSla};

/// SLA tier, serialized with the board's display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlaTier {
    #[serde(rename = "No Prazo")]
    OnTime,
    #[serde(rename = "Em Alerta")]
    Alert,
    #[serde(rename = "Atrasado")]
    Overdue,
}

impl SlaTier {
    /// Classify an elapsed-day count: 0-1 on time, 2-5 alert, 6+ overdue.
    pub fn classify(days: i64) -> Self {
        if days <= 1 {
            SlaTier::OnTime
        } else if days <= 5 {
            SlaTier::Alert
        } else {
            SlaTier::Overdue
        }
    }

    /// Display label (pt-BR, as shown on the board).
    pub fn label(self) -> &'static str {
        match self {
            SlaTier::OnTime => "No Prazo",
            SlaTier::Alert => "Em Alerta",
            SlaTier::Overdue => "Atrasado",
        }
    }
}

/// Parse an upstream timestamp into UTC.
///
/// Accepts RFC 3339, a naive datetime (assumed UTC), or a bare date.
pub(crate) fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    None
}

/// Whole 24-hour periods elapsed since `created_at`, clamped at zero.
///
/// Missing, unparseable, and future timestamps all count as zero days.
pub fn elapsed_days(created_at: Option<&str>) -> i64 {
    elapsed_days_at(created_at, Utc::now())
}

/// Same as [`elapsed_days`] with an explicit clock.
pub fn elapsed_days_at(created_at: Option<&str>, now: DateTime<Utc>) -> i64 {
    let Some(created) = created_at.and_then(parse_created_at) else {
        return 0;
    };
    (now - created).num_days().max(0)
}

/// Annotate a card with its SLA, evaluated at call time.
pub fn annotate(card: Card) -> CardWithSla {
    annotate_at(card, Utc::now())
}

/// Same as [`annotate`] with an explicit clock.
pub fn annotate_at(card: Card, now: DateTime<Utc>) -> CardWithSla {
    let days = elapsed_days_at(card.created_at.as_deref(), now);
    CardWithSla {
        card,
        sla: days,
        sla_text: SlaTier::classify(days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s)
            .expect("test timestamp")
            .with_timezone(&Utc)
    }

    #[test]
    fn missing_or_invalid_timestamps_count_as_zero() {
        let now = at("2024-01-08T12:00:00Z");
        assert_eq!(elapsed_days_at(None, now), 0);
        assert_eq!(elapsed_days_at(Some(""), now), 0);
        assert_eq!(elapsed_days_at(Some("   "), now), 0);
        assert_eq!(elapsed_days_at(Some("invalid-date"), now), 0);
        assert_eq!(elapsed_days_at(Some("15/01/2024"), now), 0);
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let now = at("2024-01-08T12:00:00Z");
        assert_eq!(elapsed_days_at(Some("2024-01-18T12:00:00Z"), now), 0);
        assert_eq!(elapsed_days_at(Some("2024-01-08T12:00:01Z"), now), 0);
    }

    #[test]
    fn counts_whole_elapsed_periods_only() {
        let now = at("2024-01-08T12:00:00Z");
        assert_eq!(elapsed_days_at(Some("2024-01-08T11:00:00Z"), now), 0);
        assert_eq!(elapsed_days_at(Some("2024-01-07T12:00:00Z"), now), 1);
        assert_eq!(elapsed_days_at(Some("2024-01-06T12:00:01Z"), now), 1);
        assert_eq!(elapsed_days_at(Some("2024-01-06T12:00:00Z"), now), 2);
        assert_eq!(elapsed_days_at(Some("2024-01-01T10:00:00Z"), now), 7);
    }

    #[test]
    fn sundays_are_ordinary_days() {
        // 2024-01-07 was a Sunday; it still counts.
        let now = at("2024-01-09T00:00:00Z");
        assert_eq!(elapsed_days_at(Some("2024-01-05T00:00:00Z"), now), 4);
    }

    #[test]
    fn accepts_naive_and_date_only_formats() {
        let now = at("2024-01-10T00:00:00Z");
        assert_eq!(elapsed_days_at(Some("2024-01-08T00:00:00"), now), 2);
        assert_eq!(elapsed_days_at(Some("2024-01-08 00:00:00"), now), 2);
        assert_eq!(elapsed_days_at(Some("2024-01-08"), now), 2);
        assert_eq!(elapsed_days_at(Some("2024-01-08T00:00:00.500"), now), 1);
    }

    #[test]
    fn offset_timestamps_convert_to_utc() {
        // 00:00 at -03:00 is 03:00 UTC, so only 23h have elapsed.
        let now = at("2024-01-02T02:00:00Z");
        assert_eq!(elapsed_days_at(Some("2024-01-01T00:00:00-03:00"), now), 0);
        assert_eq!(elapsed_days_at(Some("2024-01-01T00:00:00+00:00"), now), 1);
    }

    #[test]
    fn elapsed_days_never_decrease_as_time_passes() {
        let created = Some("2024-01-01T00:00:00Z");
        let mut previous = 0;
        for hour in 0..72 {
            let now = Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .unwrap()
                + chrono::Duration::hours(hour);
            let days = elapsed_days_at(created, now);
            assert!(days >= previous);
            previous = days;
        }
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(SlaTier::classify(0), SlaTier::OnTime);
        assert_eq!(SlaTier::classify(1), SlaTier::OnTime);
        assert_eq!(SlaTier::classify(2), SlaTier::Alert);
        assert_eq!(SlaTier::classify(5), SlaTier::Alert);
        assert_eq!(SlaTier::classify(6), SlaTier::Overdue);
        assert_eq!(SlaTier::classify(30), SlaTier::Overdue);
    }

    #[test]
    fn tier_serializes_with_display_labels() {
        assert_eq!(
            serde_json::to_string(&SlaTier::OnTime).expect("serialize"),
            r#""No Prazo""#
        );
        assert_eq!(
            serde_json::to_string(&SlaTier::Alert).expect("serialize"),
            r#""Em Alerta""#
        );
        assert_eq!(
            serde_json::to_string(&SlaTier::Overdue).expect("serialize"),
            r#""Atrasado""#
        );
    }

    #[test]
    fn annotate_reflects_age_at_the_given_instant() {
        let card = Card {
            id: "1".into(),
            plate: "ABC1D23".into(),
            driver_name: None,
            chofer_name: None,
            phase: "Fila de Recolha".into(),
            created_at: Some("2024-01-01T10:00:00Z".into()),
            chofer_email: None,
            responsible_company: None,
            vehicle_model: None,
            contact_phone: None,
            secondary_phone: None,
            client_email: None,
            registered_address: None,
            collection_address: None,
            map_link: None,
            origin_location: None,
            collection_value: None,
            additional_km_cost: None,
            public_url: None,
        };

        let fresh = annotate_at(card.clone(), at("2024-01-02T09:00:00Z"));
        assert_eq!(fresh.sla, 0);
        assert_eq!(fresh.sla_text, SlaTier::OnTime);

        let stale = annotate_at(card, at("2024-01-08T12:00:00Z"));
        assert_eq!(stale.sla, 7);
        assert_eq!(stale.sla_text, SlaTier::Overdue);
    }
}
