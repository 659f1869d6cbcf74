use std::cmp::Ordering;
use std::collections::HashMap;

use crate::dates::DayFormatter;
use crate::domain::item::TodoItem;

/// Sentinel bucket for items with no deadline. Always sorts last.
pub const UNDATED_LABEL: &str = "uncategorized";

#[derive(Debug, Clone, PartialEq)]
pub struct DateSection {
    pub label: String,
    pub items: Vec<TodoItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionedView {
    pub sections: Vec<DateSection>,
    pub labels: Vec<String>,
}

/// Partitions the flat collection into date-labeled sections with parallel
/// short display labels. Full recomputation on every call; holds no state.
pub fn rebuild(items: &[TodoItem], formatter: &impl DayFormatter) -> SectionedView {
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<TodoItem>> = HashMap::new();

    for item in items {
        let key = bucket_key_for(item, formatter);
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(item.clone());
    }

    order.sort_by(|left, right| compare_bucket_keys(left, right, formatter));

    let mut sections = Vec::with_capacity(order.len());
    let mut labels = Vec::with_capacity(order.len());
    for key in order {
        let bucket = buckets.remove(&key).unwrap_or_default();
        labels.push(short_label(&key, &bucket, formatter));
        sections.push(DateSection {
            label: key,
            items: bucket,
        });
    }

    SectionedView { sections, labels }
}

fn bucket_key_for(item: &TodoItem, formatter: &impl DayFormatter) -> String {
    let Some(deadline) = item.deadline else {
        return UNDATED_LABEL.to_string();
    };

    let key = formatter.bucket_key(deadline);
    if key.trim().is_empty() {
        return UNDATED_LABEL.to_string();
    }
    key
}

fn short_label(key: &str, bucket: &[TodoItem], formatter: &impl DayFormatter) -> String {
    if key == UNDATED_LABEL {
        return UNDATED_LABEL.to_string();
    }

    bucket
        .iter()
        .find_map(|item| item.deadline)
        .map(|deadline| formatter.display_label(deadline))
        .unwrap_or_else(|| key.to_string())
}

/// The undated bucket sorts last regardless of its text; dated buckets sort
/// by the calendar day they name, month first. Keys that fail to re-parse
/// fall back to comparing as plain strings.
fn compare_bucket_keys(left: &str, right: &str, formatter: &impl DayFormatter) -> Ordering {
    match (left == UNDATED_LABEL, right == UNDATED_LABEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => match (formatter.parse_key(left), formatter.parse_key(right)) {
            (Some((left_month, left_day)), Some((right_month, right_day))) => {
                (u8::from(left_month), left_day).cmp(&(u8::from(right_month), right_day))
            }
            _ => left.cmp(right),
        },
    }
}
