//! In-memory scripted backend
//!
//! Records every statement it receives and answers with queued responses.
//! Used to exercise the ORM without a server.

use crate::core::database::Database;
use crate::core::error::DriverError;
use crate::core::value::{DatabaseResult, QueryOutput};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Scripted database capability
///
/// Responses are consumed in FIFO order. With the queue empty, `SELECT` and
/// `SHOW` statements return no rows and everything else affects no rows.
#[derive(Debug, Default)]
pub struct RecordingDatabase {
    statements: Mutex<Vec<String>>,
    responses: Mutex<VecDeque<std::result::Result<QueryOutput, DriverError>>>,
}

impl RecordingDatabase {
    /// Create a backend with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn push_response(&self, response: std::result::Result<QueryOutput, DriverError>) {
        self.responses.lock().push_back(response);
    }

    /// Queue a row set
    pub fn push_rows(&self, rows: DatabaseResult) {
        self.push_response(Ok(QueryOutput::Rows(rows)));
    }

    /// Queue a write outcome
    pub fn push_affected(&self, affected_rows: u64, insert_id: Option<u64>) {
        self.push_response(Ok(QueryOutput::Affected {
            affected_rows,
            insert_id,
        }));
    }

    /// Queue a driver failure
    pub fn push_error(&self, error: DriverError) {
        self.push_response(Err(error));
    }

    /// Statements received so far, oldest first
    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().clone()
    }

    /// Most recent statement
    pub fn last_statement(&self) -> Option<String> {
        self.statements.lock().last().cloned()
    }

    /// Forget recorded statements and queued responses
    pub fn clear(&self) {
        self.statements.lock().clear();
        self.responses.lock().clear();
    }

    fn fallback(sql: &str) -> QueryOutput {
        let verb = sql
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();
        match verb.as_str() {
            "SELECT" | "SHOW" => QueryOutput::Rows(Vec::new()),
            _ => QueryOutput::Affected {
                affected_rows: 0,
                insert_id: None,
            },
        }
    }
}

#[async_trait]
impl Database for RecordingDatabase {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn execute(&self, sql: &str) -> std::result::Result<QueryOutput, DriverError> {
        self.statements.lock().push(sql.to_string());
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Self::fallback(sql)))
    }
}
