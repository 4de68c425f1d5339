//! Core ORM types and traits
//!
//! This module provides the building blocks of the ORM: value conversion,
//! the query executor and its logs, filter compilation, table-level CRUD,
//! model registration and model records.

pub mod codec;
pub mod database;
pub mod error;
pub mod executor;
pub mod filter;
pub mod model;
pub mod query_builder;
pub mod query_log;
pub mod record_table;
pub mod registry;
pub mod value;

// Re-export commonly used types
pub use database::Database;
pub use error::{DatabaseError, DriverError, Result};
pub use executor::{Executor, ExecutorConfig};
pub use filter::{Filter, Operand, Operator};
pub use model::{Entity, Record, RecordState, Repository};
pub use query_builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use registry::{
    model, ConnectionResolver, ConnectionSource, DeferredConnection, LinkSpec, ModelBuilder,
    ModelId, TableBinding,
};
pub use value::{DatabaseResult, DatabaseRow, DatabaseValue, QueryOutput};
