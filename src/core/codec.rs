//! Value conversion applied to every interpolated SQL parameter
//!
//! [`convert`] normalizes in-memory values into the representation that is
//! written into SQL text (and assigned back onto records when rows are
//! loaded). [`sql_text`] renders a value as the text placed between the
//! quotes of a statement.

use super::value::DatabaseValue;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Normalize a value for SQL interpolation
///
/// - strings pass through unescaped
/// - booleans become `1` / `0`
/// - dates become `Y-MM-DD HH:MM:SS` strings
/// - bytes are decoded into text
/// - numbers and null pass through
pub fn convert(value: &DatabaseValue) -> DatabaseValue {
    match value {
        DatabaseValue::Bool(v) => DatabaseValue::Int(i32::from(*v)),
        DatabaseValue::DateTime(v) => DatabaseValue::String(format_datetime(v)),
        DatabaseValue::Bytes(b) => DatabaseValue::String(String::from_utf8_lossy(b).into_owned()),
        other => other.clone(),
    }
}

/// Format a date as `Y-MM-DD HH:MM:SS` using its calendar fields
///
/// Month, day, hour, minute and second are zero-padded to two digits; the
/// year is printed as-is.
pub fn format_datetime(value: &NaiveDateTime) -> String {
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        value.year(),
        value.month(),
        value.day(),
        value.hour(),
        value.minute(),
        value.second()
    )
}

/// Render a value as SQL text after conversion
pub fn sql_text(value: &DatabaseValue) -> String {
    match convert(value) {
        DatabaseValue::Null => "NULL".to_string(),
        DatabaseValue::Bool(v) => u8::from(v).to_string(),
        DatabaseValue::Int(v) => v.to_string(),
        DatabaseValue::Long(v) => v.to_string(),
        DatabaseValue::Float(v) => v.to_string(),
        DatabaseValue::Double(v) => v.to_string(),
        DatabaseValue::String(s) => s,
        // convert() never yields these two
        DatabaseValue::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
        DatabaseValue::DateTime(v) => format_datetime(&v),
    }
}

/// Double every embedded `"` so the text can sit inside a `"..."` literal
pub fn escape_quotes(text: &str) -> String {
    text.replace('"', "\"\"")
}

/// Quoted, escaped literal for assignments and equality terms
///
/// `Null` is emitted as a bare `NULL` keyword rather than a quoted string.
pub fn quoted_literal(value: &DatabaseValue) -> String {
    if value.is_null() {
        return "NULL".to_string();
    }
    format!("\"{}\"", escape_quotes(&sql_text(value)))
}

/// Backtick-quote an identifier
pub fn quote_identifier(name: &str) -> String {
    format!("`{name}`")
}
