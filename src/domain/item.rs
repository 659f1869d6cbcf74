use serde_json::{json, Value};
use time::OffsetDateTime;

use crate::record::{escape_field, split_row, CsvRecord, JsonRecord};

use super::importance::Importance;
use super::{format_rfc3339, new_item_id, parse_rfc3339};

#[derive(Debug, Clone, PartialEq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub importance: Importance,
    pub deadline: Option<OffsetDateTime>,
    pub done: bool,
    pub created_at: OffsetDateTime,
    pub modified_at: Option<OffsetDateTime>,
}

impl TodoItem {
    pub fn new(text: impl Into<String>, importance: Importance, deadline: Option<OffsetDateTime>) -> Self {
        Self {
            id: new_item_id(),
            text: text.into(),
            importance,
            deadline,
            done: false,
            created_at: OffsetDateTime::now_utc(),
            modified_at: None,
        }
    }

    pub fn touch(&mut self) {
        self.modified_at = Some(OffsetDateTime::now_utc());
    }
}

impl JsonRecord for TodoItem {
    fn to_json(&self) -> Value {
        let mut value = json!({
            "id": self.id,
            "text": self.text,
            "importance": self.importance.as_str(),
            "done": self.done,
            "created_at": format_rfc3339(self.created_at),
        });
        if let Some(deadline) = self.deadline {
            value["deadline"] = Value::String(format_rfc3339(deadline));
        }
        if let Some(modified_at) = self.modified_at {
            value["modified_at"] = Value::String(format_rfc3339(modified_at));
        }
        value
    }

    fn parse_json(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let id = map.get("id")?.as_str()?.to_string();
        let text = map.get("text")?.as_str()?.to_string();
        let importance = map.get("importance")?.as_str()?.parse().ok()?;
        let done = map.get("done")?.as_bool()?;
        let created_at = parse_rfc3339(map.get("created_at")?.as_str()?)?;
        let deadline = match map.get("deadline") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_rfc3339(raw.as_str()?)?),
        };
        let modified_at = match map.get("modified_at") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(parse_rfc3339(raw.as_str()?)?),
        };

        Some(Self {
            id,
            text,
            importance,
            deadline,
            done,
            created_at,
            modified_at,
        })
    }
}

impl CsvRecord for TodoItem {
    const CSV_HEADER: &'static str = "id,text,importance,deadline,done,created_at,modified_at";

    fn to_csv_row(&self) -> String {
        [
            escape_field(&self.id),
            escape_field(&self.text),
            self.importance.as_str().to_string(),
            self.deadline.map(format_rfc3339).unwrap_or_default(),
            self.done.to_string(),
            format_rfc3339(self.created_at),
            self.modified_at.map(format_rfc3339).unwrap_or_default(),
        ]
        .join(",")
    }

    fn parse_csv(line: &str) -> Option<Self> {
        let trimmed = line.trim_end_matches('\r');
        if trimmed.trim().is_empty() {
            return None;
        }

        let fields = split_row(trimmed);
        if fields.len() != 7 {
            return None;
        }

        let done = match fields[4].as_str() {
            "true" => true,
            "false" => false,
            _ => return None,
        };
        let deadline = match fields[3].as_str() {
            "" => None,
            raw => Some(parse_rfc3339(raw)?),
        };
        let modified_at = match fields[6].as_str() {
            "" => None,
            raw => Some(parse_rfc3339(raw)?),
        };

        Some(Self {
            id: fields[0].clone(),
            text: fields[1].clone(),
            importance: fields[2].parse().ok()?,
            deadline,
            done,
            created_at: parse_rfc3339(&fields[5])?,
            modified_at,
        })
    }
}
