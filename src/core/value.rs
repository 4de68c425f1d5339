//! Database value types
//!
//! This module defines the values a model field can hold and the row types
//! exchanged with the database capability.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Database value that can hold different types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatabaseValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    Int(i32),
    /// 64-bit integer
    Long(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// String value
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Calendar date and time, without timezone
    DateTime(NaiveDateTime),
}

impl DatabaseValue {
    /// Get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DatabaseValue::Bool(v) => Some(*v),
            DatabaseValue::Int(v) => Some(*v != 0),
            DatabaseValue::Long(v) => Some(*v != 0),
            DatabaseValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the value as an i64
    pub fn as_long(&self) -> Option<i64> {
        match self {
            DatabaseValue::Long(v) => Some(*v),
            DatabaseValue::Int(v) => Some(i64::from(*v)),
            DatabaseValue::Float(v) => Some(*v as i64),
            DatabaseValue::Double(v) => Some(*v as i64),
            DatabaseValue::String(s) => s.parse().ok(),
            DatabaseValue::Bool(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Get the value as a string (zero-copy for String values)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DatabaseValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the value as a date and time
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            DatabaseValue::DateTime(v) => Some(*v),
            DatabaseValue::String(s) => {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
            }
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DatabaseValue::Null)
    }

    /// Whether the value counts as "set" in a boolean context
    ///
    /// `Null`, `false`, zero, `NaN` and the empty string are falsy; bytes and
    /// dates are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            DatabaseValue::Null => false,
            DatabaseValue::Bool(v) => *v,
            DatabaseValue::Int(v) => *v != 0,
            DatabaseValue::Long(v) => *v != 0,
            DatabaseValue::Float(v) => *v != 0.0 && !v.is_nan(),
            DatabaseValue::Double(v) => *v != 0.0 && !v.is_nan(),
            DatabaseValue::String(s) => !s.is_empty(),
            DatabaseValue::Bytes(_) | DatabaseValue::DateTime(_) => true,
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            DatabaseValue::Null => "null",
            DatabaseValue::Bool(_) => "bool",
            DatabaseValue::Int(_) => "int",
            DatabaseValue::Long(_) => "long",
            DatabaseValue::Float(_) => "float",
            DatabaseValue::Double(_) => "double",
            DatabaseValue::String(_) => "string",
            DatabaseValue::Bytes(_) => "bytes",
            DatabaseValue::DateTime(_) => "datetime",
        }
    }

    /// Convert a JSON scalar into a database value
    ///
    /// Arrays and objects have no column representation and are rejected.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => Some(DatabaseValue::Null),
            serde_json::Value::Bool(b) => Some(DatabaseValue::Bool(*b)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(DatabaseValue::Long)
                .or_else(|| n.as_f64().map(DatabaseValue::Double)),
            serde_json::Value::String(s) => Some(DatabaseValue::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    /// Convert into a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            DatabaseValue::Null => serde_json::Value::Null,
            DatabaseValue::Bool(v) => serde_json::Value::Bool(*v),
            DatabaseValue::Int(v) => serde_json::Value::from(*v),
            DatabaseValue::Long(v) => serde_json::Value::from(*v),
            DatabaseValue::Float(v) => serde_json::Value::from(f64::from(*v)),
            DatabaseValue::Double(v) => serde_json::Value::from(*v),
            DatabaseValue::String(s) => serde_json::Value::String(s.clone()),
            DatabaseValue::Bytes(b) => {
                serde_json::Value::String(String::from_utf8_lossy(b).into_owned())
            }
            DatabaseValue::DateTime(_) => {
                serde_json::Value::String(super::codec::sql_text(self))
            }
        }
    }
}

impl From<bool> for DatabaseValue {
    fn from(v: bool) -> Self {
        DatabaseValue::Bool(v)
    }
}

impl From<i32> for DatabaseValue {
    fn from(v: i32) -> Self {
        DatabaseValue::Int(v)
    }
}

impl From<i64> for DatabaseValue {
    fn from(v: i64) -> Self {
        DatabaseValue::Long(v)
    }
}

impl From<u64> for DatabaseValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(DatabaseValue::Long)
            .unwrap_or(DatabaseValue::Double(v as f64))
    }
}

impl From<f32> for DatabaseValue {
    fn from(v: f32) -> Self {
        DatabaseValue::Float(v)
    }
}

impl From<f64> for DatabaseValue {
    fn from(v: f64) -> Self {
        DatabaseValue::Double(v)
    }
}

impl From<String> for DatabaseValue {
    fn from(v: String) -> Self {
        DatabaseValue::String(v)
    }
}

impl From<&str> for DatabaseValue {
    fn from(v: &str) -> Self {
        DatabaseValue::String(v.to_string())
    }
}

impl From<Vec<u8>> for DatabaseValue {
    fn from(v: Vec<u8>) -> Self {
        DatabaseValue::Bytes(v)
    }
}

impl From<NaiveDateTime> for DatabaseValue {
    fn from(v: NaiveDateTime) -> Self {
        DatabaseValue::DateTime(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DatabaseValue {
    /// Keeps the local calendar fields; the offset is discarded.
    fn from(v: DateTime<Tz>) -> Self {
        DatabaseValue::DateTime(v.with_timezone(&Local).naive_local())
    }
}

impl<T: Into<DatabaseValue>> From<Option<T>> for DatabaseValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => DatabaseValue::Null,
        }
    }
}

/// A row of database results (column name -> value mapping, in column order)
pub type DatabaseRow = IndexMap<String, DatabaseValue>;

/// Multiple rows returned from a query
pub type DatabaseResult = Vec<DatabaseRow>;

/// Outcome of a single statement sent to the database capability
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Statement produced a result set
    Rows(DatabaseResult),
    /// Statement modified data
    Affected {
        affected_rows: u64,
        insert_id: Option<u64>,
    },
}

impl QueryOutput {
    /// Rows of a result set; a data-modification outcome is a type mismatch
    pub fn into_rows(self) -> super::error::Result<DatabaseResult> {
        match self {
            QueryOutput::Rows(rows) => Ok(rows),
            QueryOutput::Affected { .. } => Err(super::error::DatabaseError::type_mismatch(
                "rows",
                "affected row count",
            )),
        }
    }

    /// Affected row count; a result set reports zero
    pub fn affected_rows(&self) -> u64 {
        match self {
            QueryOutput::Rows(_) => 0,
            QueryOutput::Affected { affected_rows, .. } => *affected_rows,
        }
    }

    /// Auto-generated id of the inserted row, if any
    pub fn insert_id(&self) -> Option<u64> {
        match self {
            QueryOutput::Rows(_) => None,
            QueryOutput::Affected { insert_id, .. } => *insert_id,
        }
    }
}
