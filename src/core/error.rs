//! Error types for the ORM layer
//!
//! This module defines every error a model, filter or query operation can surface.

/// Result type alias for ORM operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Failure reported by the underlying database capability
///
/// The fields mirror what MySQL drivers report for a failed statement. The
/// `Display` form is the line written to the rotated error log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[{errno}.{code}] {name} -- {message}")]
pub struct DriverError {
    /// Numeric error code (e.g. 1064)
    pub errno: u32,
    /// Symbolic code or SQL state (e.g. `ER_PARSE_ERROR`)
    pub code: String,
    /// Error class name
    pub name: String,
    /// Human-readable message
    pub message: String,
}

impl DriverError {
    /// Create a new driver error
    pub fn new(
        errno: u32,
        code: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            errno,
            code: code.into(),
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Error types for ORM operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Model used before registration, or without a primary key where one is required
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A declared link points at a model without a primary key
    #[error("Cannot link {source_model}.{foreign_key} to {destination}: tables without primary key cannot be linked")]
    LinkIntegrity {
        source_model: String,
        foreign_key: String,
        destination: String,
    },

    /// `$in` filter whose array is empty once falsy entries are dropped
    #[error("Cannot use $in with empty array (field `{field}`)")]
    EmptyFilterSet { field: String },

    /// Malformed filter definition
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The database capability rejected a statement
    #[error("Query failed: {source} (query: {query})")]
    QueryFailed {
        #[source]
        source: DriverError,
        query: String,
    },

    /// Connection error (generic, including unresolved deferred connections)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Operation on a record that was already deleted
    #[error("Record of model {0} was deleted")]
    RecordDeleted(String),

    /// Type conversion error
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// MySQL driver error outside of statement execution (pool, URL)
    #[cfg(feature = "mysql")]
    #[error("MySQL error: {0}")]
    MysqlError(String),
}

impl DatabaseError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        DatabaseError::Configuration(msg.into())
    }

    /// Create a link integrity error
    pub fn link_integrity(
        source_model: impl Into<String>,
        foreign_key: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        DatabaseError::LinkIntegrity {
            source_model: source_model.into(),
            foreign_key: foreign_key.into(),
            destination: destination.into(),
        }
    }

    /// Create an empty `$in` set error
    pub fn empty_filter_set<S: Into<String>>(field: S) -> Self {
        DatabaseError::EmptyFilterSet {
            field: field.into(),
        }
    }

    /// Create an invalid filter error
    pub fn invalid_filter<S: Into<String>>(msg: S) -> Self {
        DatabaseError::InvalidFilter(msg.into())
    }

    /// Wrap a driver failure together with the statement that caused it
    pub fn query_failed(source: DriverError, query: impl Into<String>) -> Self {
        DatabaseError::QueryFailed {
            source,
            query: query.into(),
        }
    }

    /// Create a new connection error (generic)
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        DatabaseError::ConnectionError(msg.into())
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(expected: &str, actual: &str) -> Self {
        DatabaseError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Whether this is the distinguished empty `$in` error
    pub fn is_empty_filter_set(&self) -> bool {
        matches!(self, DatabaseError::EmptyFilterSet { .. })
    }

    /// The SQL text attached to a query failure, if any
    pub fn query_text(&self) -> Option<&str> {
        match self {
            DatabaseError::QueryFailed { query, .. } => Some(query),
            _ => None,
        }
    }
}
