//! Database capability trait
//!
//! This module defines the single entry point every database backend must
//! implement. Pooling, transport and retries are the backend's concern.

use super::error::DriverError;
use super::value::QueryOutput;
use async_trait::async_trait;

/// Query-executing capability behind an [`Executor`](super::executor::Executor)
#[async_trait]
pub trait Database: Send + Sync {
    /// Short backend name, used in log events
    fn backend_name(&self) -> &'static str;

    /// Execute one raw SQL statement
    ///
    /// # Security Warning
    ///
    /// **SQL Injection Risk**: statements arrive fully interpolated. The ORM
    /// only doubles embedded quotes on assignment and equality values; never
    /// route untrusted input through operator or `$in` filters.
    ///
    /// # Thread Safety
    /// Safe to call concurrently from multiple tasks. Whether statements run in
    /// parallel is up to the backend.
    async fn execute(&self, sql: &str) -> std::result::Result<QueryOutput, DriverError>;
}
