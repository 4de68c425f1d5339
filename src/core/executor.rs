//! Query execution with bounded query and error logs
//!
//! [`Executor`] is the handle models and record tables issue SQL through. It
//! records every statement, forwards it to the [`Database`] capability and
//! records failures before surfacing them.

use super::database::Database;
use super::error::{DatabaseError, DriverError, Result};
use super::query_log::{Rotation, RotatingLog, DEFAULT_LOG_CAPACITY};
use super::value::QueryOutput;
use parking_lot::Mutex;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Executor configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Emit every statement on the `rust_orm_system::sql` tracing target
    pub sql_debug: bool,
    /// File the query log rotates into
    pub query_log_path: PathBuf,
    /// File the error log rotates into
    pub error_log_path: PathBuf,
    /// Entries kept in memory per log before rotation
    pub log_capacity: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            sql_debug: false,
            query_log_path: PathBuf::from("sql-query.log"),
            error_log_path: PathBuf::from("sql-error.log"),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl ExecutorConfig {
    /// Parse a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable or disable SQL debug output
    pub fn with_sql_debug(mut self, enabled: bool) -> Self {
        self.sql_debug = enabled;
        self
    }

    /// Set the query log file
    pub fn with_query_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.query_log_path = path.into();
        self
    }

    /// Set the error log file
    pub fn with_error_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.error_log_path = path.into();
        self
    }

    /// Set the in-memory log capacity
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }
}

struct ExecutorInner {
    database: Arc<dyn Database>,
    sql_debug: bool,
    log: Mutex<RotatingLog<String>>,
    error_log: Mutex<RotatingLog<DriverError>>,
}

/// Cloneable handle issuing SQL against a database capability
///
/// Clones share the capability and both logs.
#[derive(Clone)]
pub struct Executor {
    inner: Arc<ExecutorInner>,
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("backend", &self.inner.database.backend_name())
            .field("sql_debug", &self.inner.sql_debug)
            .finish()
    }
}

impl Executor {
    /// Create an executor with the default configuration
    pub fn new(database: Arc<dyn Database>) -> Self {
        Self::with_config(database, ExecutorConfig::default())
    }

    /// Create an executor with a custom configuration
    pub fn with_config(database: Arc<dyn Database>, config: ExecutorConfig) -> Self {
        let log = RotatingLog::new(config.query_log_path, config.log_capacity, String::clone);
        let error_log = RotatingLog::new(
            config.error_log_path,
            config.log_capacity,
            DriverError::to_string,
        );

        Self {
            inner: Arc::new(ExecutorInner {
                database,
                sql_debug: config.sql_debug,
                log: Mutex::new(log),
                error_log: Mutex::new(error_log),
            }),
        }
    }

    /// Execute a statement and return the raw outcome
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::QueryFailed`] carrying the driver error and
    /// the statement text when the capability rejects it.
    pub async fn query(&self, sql: &str) -> Result<QueryOutput> {
        self.record_query(sql).await;
        if self.inner.sql_debug {
            tracing::debug!(target: "rust_orm_system::sql", "[DEBUG] {}", sql);
        }

        match self.inner.database.execute(sql).await {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::warn!(query = sql, error = %err, "query failed");
                self.record_error(err.clone()).await;
                Err(DatabaseError::query_failed(err, sql))
            }
        }
    }

    /// Execute a statement and map the raw outcome
    pub async fn query_map<T, F>(&self, sql: &str, mapper: F) -> Result<T>
    where
        F: FnOnce(QueryOutput) -> Result<T> + Send,
    {
        let output = self.query(sql).await?;
        mapper(output)
    }

    async fn record_query(&self, sql: &str) {
        let rotation = self.inner.log.lock().push(sql.to_string());
        if let Some(rotation) = rotation {
            write_rotation(rotation, "query").await;
        }
    }

    async fn record_error(&self, error: DriverError) {
        let rotation = self.inner.error_log.lock().push(error);
        if let Some(rotation) = rotation {
            write_rotation(rotation, "error").await;
        }
    }

    /// Most recently issued statement
    pub fn last_query(&self) -> Option<String> {
        self.inner.log.lock().last().cloned()
    }

    /// Most recently recorded driver error
    pub fn last_error(&self) -> Option<DriverError> {
        self.inner.error_log.lock().last().cloned()
    }

    /// Copy of the buffered query log
    pub fn query_log(&self) -> Vec<String> {
        self.inner.log.lock().snapshot()
    }

    /// Copy of the buffered error log
    pub fn error_log(&self) -> Vec<DriverError> {
        self.inner.error_log.lock().snapshot()
    }

    /// Name of the backend behind this executor
    pub fn backend_name(&self) -> &'static str {
        self.inner.database.backend_name()
    }
}

/// Append a drained log batch off the async workers
///
/// A batch that cannot be written is dropped after one error event.
async fn write_rotation(rotation: Rotation, kind: &'static str) {
    let path = rotation.path().to_path_buf();
    let entries = rotation.entries();
    match tokio::task::spawn_blocking(move || rotation.write()).await {
        Ok(Ok(())) => tracing::info!(path = %path.display(), entries, "{} log rotated", kind),
        Ok(Err(err)) => tracing::error!(
            path = %path.display(),
            entries,
            error = %err,
            "failed to rotate {} log, batch dropped",
            kind
        ),
        Err(err) => tracing::error!(error = %err, "{} log rotation task failed", kind),
    }
}
