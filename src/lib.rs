//! # Rust ORM System
//!
//! A small object-relational mapper over a pluggable SQL capability. Model
//! types are bound to tables at startup; records are plain field maps that
//! save, delete and resolve their links to other models.
//!
//! ## Features
//!
//! - **Registration builder**: bind a type to a table, a primary key and links
//! - **Structured filters**: equality, comparison and `$in` terms compiled to SQL
//! - **Query logs**: every statement and driver error is buffered and rotated
//!   to disk
//! - **Async Support**: Async/await support with Tokio
//! - **Backends**: MySQL via `mysql_async`, plus an in-memory recording
//!   backend for tests
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! rust_orm_system = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ### Basic Usage
//!
//! ```rust,no_run
//! use rust_orm_system::prelude::*;
//!
//! struct User;
//! impl Entity for User {}
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let executor = connect("localhost", "app", "secret", "shop")?;
//!     model::<User>(executor, "user").primary("id").register()?;
//!
//!     let mut user = User::create()?;
//!     user.set("name", "Ann").set("admin", true);
//!     user.save().await?;
//!
//!     let admins = User::find(&Filter::new().eq("admin", true)).await?;
//!     println!("{} admins", admins.len());
//!
//!     if let Some(mut user) = User::get(7).await? {
//!         user.set_null("email");
//!         user.save().await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Project Structure
//!
//! ```text
//! src/
//! ├── core/
//! │   ├── codec.rs         # Value conversion and quoting
//! │   ├── database.rs      # Database capability trait
//! │   ├── error.rs         # Error types
//! │   ├── executor.rs      # Query executor and configuration
//! │   ├── filter.rs        # Filter compilation
//! │   ├── model.rs         # Records, repositories, Entity trait
//! │   ├── query_builder.rs # Statement builders
//! │   ├── query_log.rs     # Rotating logs
//! │   ├── record_table.rs  # Table-level CRUD
//! │   ├── registry.rs      # Model registration
//! │   └── value.rs         # Value types
//! ├── backends/
//! │   ├── mysql.rs         # MySQL implementation
//! │   └── recording.rs     # In-memory scripted implementation
//! └── lib.rs
//! ```

/// Core ORM types and traits
pub mod core;

/// Database backend implementations
pub mod backends;

/// Prelude for convenient imports
///
/// ```rust
/// use rust_orm_system::prelude::*;
/// use std::sync::Arc;
///
/// let executor = Executor::new(Arc::new(RecordingDatabase::new()));
/// assert_eq!(executor.backend_name(), "recording");
/// ```
pub mod prelude {
    pub use crate::core::{
        model, ConnectionResolver, Database, DatabaseError, DatabaseResult, DatabaseRow,
        DatabaseValue, DeferredConnection, DriverError, Entity, Executor, ExecutorConfig, Filter,
        QueryOutput, Record, RecordState, Repository, Result,
    };

    pub use crate::backends::RecordingDatabase;

    #[cfg(feature = "mysql")]
    pub use crate::backends::{connect, MysqlDatabase};
}

// Re-export at root level for convenience
pub use core::{
    model, Database, DatabaseError, DatabaseResult, DatabaseRow, DatabaseValue, DriverError,
    Entity, Executor, ExecutorConfig, Filter, QueryOutput, Record, Repository, Result,
};

pub use backends::RecordingDatabase;

#[cfg(feature = "mysql")]
pub use backends::{connect, MysqlDatabase};
