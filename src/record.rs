use serde_json::Value;

/// Canonical key-value form of one record. A type implementing this can be
/// persisted to and reconstructed from the JSON store payload.
pub trait JsonRecord: Sized {
    fn to_json(&self) -> Value;
    fn parse_json(value: &Value) -> Option<Self>;
}

/// Canonical single-row form of one record for the line-delimited CSV
/// payload. Field escaping is owned by the implementor; the store writes
/// rows verbatim.
pub trait CsvRecord: Sized {
    const CSV_HEADER: &'static str;
    fn to_csv_row(&self) -> String;
    fn parse_csv(line: &str) -> Option<Self>;
}

pub fn escape_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

pub fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
            continue;
        }

        match ch {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}
