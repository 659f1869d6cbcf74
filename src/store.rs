use std::error::Error;
use std::fmt;
use std::path::Path;

use serde_json::Value;

use crate::record::{CsvRecord, JsonRecord};

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Decode(serde_json::Error),
    Encode(serde_json::Error),
    Text(std::string::FromUtf8Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
            StoreError::Decode(err) => write!(f, "JSON decode error: {}", err),
            StoreError::Encode(err) => write!(f, "JSON encode error: {}", err),
            StoreError::Text(err) => write!(f, "resource is not valid UTF-8 text: {}", err),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Decode(err) => Some(err),
            StoreError::Encode(err) => Some(err),
            StoreError::Text(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        StoreError::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Decode(value)
    }
}

impl From<std::string::FromUtf8Error> for StoreError {
    fn from(value: std::string::FromUtf8Error) -> Self {
        StoreError::Text(value)
    }
}

/// Serializes the collection as a single JSON array and overwrites `target`.
/// An empty collection writes an empty array, not an error.
pub fn save_json<T: JsonRecord>(items: &[T], target: &Path) -> Result<(), StoreError> {
    let payload = Value::Array(items.iter().map(JsonRecord::to_json).collect());
    let bytes = serde_json::to_vec_pretty(&payload).map_err(StoreError::Encode)?;
    std::fs::write(target, bytes)?;
    Ok(())
}

/// Reads `source` as a JSON array of canonical maps. Entries that fail to
/// parse are dropped; only an unreadable resource or an outer document that
/// is not valid JSON is an error. A root that is not an array loads as an
/// empty collection.
pub fn load_json<T: JsonRecord>(source: &Path) -> Result<Vec<T>, StoreError> {
    let payload = std::fs::read(source)?;
    let document: Value = serde_json::from_slice(&payload)?;
    let Some(entries) = document.as_array() else {
        return Ok(Vec::new());
    };
    Ok(entries.iter().filter_map(T::parse_json).collect())
}

/// Writes the header line followed by one row per item, overwriting `target`.
pub fn save_csv<T: CsvRecord>(items: &[T], target: &Path) -> Result<(), StoreError> {
    let mut payload = String::from(T::CSV_HEADER);
    for item in items {
        payload.push('\n');
        payload.push_str(&item.to_csv_row());
    }
    payload.push('\n');
    std::fs::write(target, payload)?;
    Ok(())
}

/// Reads `source` as newline-delimited text, discards the first line as the
/// header (by position, never by content), and parses the remaining lines.
/// Unparsable rows are dropped. A header-only or empty resource loads as an
/// empty collection.
pub fn load_csv<T: CsvRecord>(source: &Path) -> Result<Vec<T>, StoreError> {
    let payload = std::fs::read(source)?;
    let text = String::from_utf8(payload)?;
    Ok(text.split('\n').skip(1).filter_map(T::parse_csv).collect())
}
