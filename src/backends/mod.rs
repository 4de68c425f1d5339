//! Database backend implementations
//!
//! This module contains concrete implementations of the Database trait.

#[cfg(feature = "mysql")]
pub mod mysql;
pub mod recording;

#[cfg(feature = "mysql")]
pub use mysql::{connect, connect_with_config, ConnectionBuilder, MysqlDatabase};
pub use recording::RecordingDatabase;
