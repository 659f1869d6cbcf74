use time::{Month, OffsetDateTime};

/// Narrow seam for calendar rendering so the sectioning algorithm stays
/// testable independent of any locale data.
pub trait DayFormatter {
    /// Day-level grouping key for a deadline. Year is deliberately not part
    /// of the key: same-day items from different years share a section.
    fn bucket_key(&self, instant: OffsetDateTime) -> String;

    /// Short two-line section header label: day number, then month name.
    fn display_label(&self, instant: OffsetDateTime) -> String;

    /// Reads a bucket key back into (month, day) for ordering.
    fn parse_key(&self, key: &str) -> Option<(Month, u8)>;
}

/// English month names, fixed independent of process locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDayFormatter;

impl DayFormatter for CalendarDayFormatter {
    fn bucket_key(&self, instant: OffsetDateTime) -> String {
        format!("{} {}", instant.day(), month_name(instant.month()))
    }

    fn display_label(&self, instant: OffsetDateTime) -> String {
        format!("{}\n{}", instant.day(), month_name(instant.month()))
    }

    fn parse_key(&self, key: &str) -> Option<(Month, u8)> {
        let (day, month) = key.split_once(' ')?;
        let day: u8 = day.parse().ok()?;
        if !(1..=31).contains(&day) {
            return None;
        }
        Some((parse_month_name(month)?, day))
    }
}

pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

fn parse_month_name(name: &str) -> Option<Month> {
    let month = match name.trim().to_ascii_lowercase().as_str() {
        "january" => Month::January,
        "february" => Month::February,
        "march" => Month::March,
        "april" => Month::April,
        "may" => Month::May,
        "june" => Month::June,
        "july" => Month::July,
        "august" => Month::August,
        "september" => Month::September,
        "october" => Month::October,
        "november" => Month::November,
        "december" => Month::December,
        _ => return None,
    };
    Some(month)
}
