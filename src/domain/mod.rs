pub mod importance;
pub mod item;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

pub fn new_item_id() -> String {
    Uuid::now_v7().to_string()
}

pub fn now_utc_rfc3339() -> String {
    format_rfc3339(OffsetDateTime::now_utc())
}

pub fn format_rfc3339(instant: OffsetDateTime) -> String {
    instant
        .format(&Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

pub fn parse_rfc3339(raw: &str) -> Option<OffsetDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    OffsetDateTime::parse(trimmed, &Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::{format_rfc3339, new_item_id, parse_rfc3339};

    #[test]
    fn rfc3339_round_trips() {
        let parsed = parse_rfc3339("2024-07-12T09:30:00Z").expect("timestamp should parse");
        assert_eq!(format_rfc3339(parsed), "2024-07-12T09:30:00Z");
    }

    #[test]
    fn blank_and_invalid_timestamps_parse_to_none() {
        assert!(parse_rfc3339("").is_none());
        assert!(parse_rfc3339("   ").is_none());
        assert!(parse_rfc3339("yesterday").is_none());
    }

    #[test]
    fn item_ids_are_unique() {
        assert_ne!(new_item_id(), new_item_id());
    }
}
