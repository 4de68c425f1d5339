//! MySQL database backend implementation
//!
//! This module provides a MySQL implementation of the Database trait using
//! `mysql_async`. Statements run over the text protocol on pooled
//! connections; every new connection is switched to `utf8` first.

use crate::core::database::Database;
use crate::core::error::{DatabaseError, DriverError, Result};
use crate::core::executor::{Executor, ExecutorConfig};
use crate::core::value::{DatabaseRow, DatabaseValue, QueryOutput};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use mysql_async::consts::ColumnType;
use mysql_async::prelude::Queryable;
use mysql_async::{Column, Opts, OptsBuilder, Pool, Row, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Statement sent on every new connection
const CHARSET_INIT: &str = "SET NAMES utf8";

const DEFAULT_PORT: u16 = 3306;

/// Builder for MySQL connection options
#[derive(Debug, Clone, Default)]
pub struct ConnectionBuilder {
    host: Option<String>,
    port: Option<u16>,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    options: HashMap<String, String>,
}

impl ConnectionBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the database host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the database port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database name
    pub fn database<S: Into<String>>(mut self, database: S) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the username
    pub fn username<S: Into<String>>(mut self, username: S) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    pub fn password<S: Into<String>>(mut self, password: S) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Add a URL query option (e.g. `pool_max`)
    pub fn option<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Build the `mysql://` connection URL
    pub fn build_connection_string(&self) -> String {
        let host = self.host.as_deref().unwrap_or("localhost");
        let port = self.port.unwrap_or(DEFAULT_PORT);
        let database = self.database.as_deref().unwrap_or("");
        let username = self.username.as_deref().unwrap_or("root");
        let password = self.password.as_deref().unwrap_or("");
        let mut url = format!("mysql://{username}:{password}@{host}:{port}/{database}");

        if !self.options.is_empty() {
            let mut options: Vec<String> = self
                .options
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            options.sort();
            url.push('?');
            url.push_str(&options.join("&"));
        }
        url
    }

    /// Build driver options without going through a URL
    ///
    /// Credentials are passed verbatim, so they need no percent-encoding.
    /// URL options are ignored.
    pub fn build_opts(&self) -> OptsBuilder {
        OptsBuilder::default()
            .ip_or_hostname(self.host.clone().unwrap_or_else(|| "localhost".to_string()))
            .tcp_port(self.port.unwrap_or(DEFAULT_PORT))
            .user(Some(self.username.clone().unwrap_or_else(|| "root".to_string())))
            .pass(self.password.clone())
            .db_name(self.database.clone())
    }
}

/// MySQL database implementation
///
/// Connections are taken from the pool per statement and returned on
/// completion, so concurrent statements may run on different connections.
#[derive(Debug, Clone)]
pub struct MysqlDatabase {
    pool: Pool,
}

impl MysqlDatabase {
    /// Create a pool from a `mysql://` URL
    ///
    /// No connection is opened until the first statement.
    pub fn new(url: &str) -> Result<Self> {
        let opts = Opts::from_url(url)
            .map_err(|e| DatabaseError::connection(format!("invalid MySQL URL: {e}")))?;
        Ok(Self::from_opts(OptsBuilder::from_opts(opts)))
    }

    /// Create a pool from driver options
    pub fn from_opts(opts: OptsBuilder) -> Self {
        let opts = opts.init(vec![CHARSET_INIT]);
        Self {
            pool: Pool::new(Opts::from(opts)),
        }
    }

    /// Create a pool from a [`ConnectionBuilder`]
    pub fn from_builder(builder: &ConnectionBuilder) -> Self {
        Self::from_opts(builder.build_opts())
    }

    /// Close every pooled connection
    pub async fn disconnect(&self) -> Result<()> {
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| DatabaseError::MysqlError(e.to_string()))
    }

    async fn run(&self, sql: &str) -> std::result::Result<QueryOutput, mysql_async::Error> {
        let mut conn = self.pool.get_conn().await?;
        let mut result = conn.query_iter(sql).await?;

        let has_rows = result
            .columns()
            .map(|columns| !columns.is_empty())
            .unwrap_or(false);
        let output = if has_rows {
            let rows: Vec<Row> = result.collect().await?;
            QueryOutput::Rows(rows.iter().map(row_to_database_row).collect())
        } else {
            QueryOutput::Affected {
                affected_rows: result.affected_rows(),
                insert_id: result.last_insert_id(),
            }
        };
        result.drop_result().await?;
        Ok(output)
    }
}

/// Convert a mysql_async Row to a DatabaseRow
fn row_to_database_row(row: &Row) -> DatabaseRow {
    row.columns_ref()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = row
                .as_ref(idx)
                .map(|value| convert_value(column, value))
                .unwrap_or(DatabaseValue::Null);
            (column.name_str().into_owned(), value)
        })
        .collect()
}

fn convert_value(column: &Column, value: &Value) -> DatabaseValue {
    match value {
        Value::NULL => DatabaseValue::Null,
        Value::Int(v) => DatabaseValue::Long(*v),
        Value::UInt(v) => DatabaseValue::from(*v),
        Value::Float(v) => DatabaseValue::Float(*v),
        Value::Double(v) => DatabaseValue::Double(*v),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                        *micros,
                    )
                })
                .map(DatabaseValue::DateTime)
                .unwrap_or(DatabaseValue::Null)
        }
        Value::Time(..) => DatabaseValue::String(value.as_sql(true).trim_matches('\'').to_string()),
        Value::Bytes(raw) => convert_text(column.column_type(), raw),
    }
}

/// Text-protocol values arrive as bytes; type them by column
fn convert_text(column_type: ColumnType, raw: &[u8]) -> DatabaseValue {
    let Ok(text) = std::str::from_utf8(raw) else {
        return DatabaseValue::Bytes(raw.to_vec());
    };

    let typed = match column_type {
        ColumnType::MYSQL_TYPE_TINY
        | ColumnType::MYSQL_TYPE_SHORT
        | ColumnType::MYSQL_TYPE_LONG
        | ColumnType::MYSQL_TYPE_INT24
        | ColumnType::MYSQL_TYPE_LONGLONG
        | ColumnType::MYSQL_TYPE_YEAR => text.parse::<i64>().ok().map(DatabaseValue::Long),
        ColumnType::MYSQL_TYPE_FLOAT
        | ColumnType::MYSQL_TYPE_DOUBLE
        | ColumnType::MYSQL_TYPE_DECIMAL
        | ColumnType::MYSQL_TYPE_NEWDECIMAL => text.parse::<f64>().ok().map(DatabaseValue::Double),
        ColumnType::MYSQL_TYPE_DATETIME | ColumnType::MYSQL_TYPE_TIMESTAMP => {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(DatabaseValue::DateTime)
        }
        ColumnType::MYSQL_TYPE_DATE => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(DatabaseValue::DateTime),
        _ => None,
    };

    typed.unwrap_or_else(|| DatabaseValue::String(text.to_string()))
}

fn driver_error(err: mysql_async::Error) -> DriverError {
    match err {
        mysql_async::Error::Server(server) => {
            DriverError::new(u32::from(server.code), server.state, "ServerError", server.message)
        }
        mysql_async::Error::Io(e) => DriverError::new(0, "IO", "IoError", e.to_string()),
        mysql_async::Error::Url(e) => DriverError::new(0, "URL", "UrlError", e.to_string()),
        mysql_async::Error::Driver(e) => DriverError::new(0, "DRIVER", "DriverError", e.to_string()),
        other => DriverError::new(0, "OTHER", "Error", other.to_string()),
    }
}

#[async_trait]
impl Database for MysqlDatabase {
    fn backend_name(&self) -> &'static str {
        "mysql"
    }

    async fn execute(&self, sql: &str) -> std::result::Result<QueryOutput, DriverError> {
        self.run(sql).await.map_err(driver_error)
    }
}

/// Open a MySQL pool and wrap it in an [`Executor`]
///
/// ```no_run
/// # fn main() -> rust_orm_system::Result<()> {
/// let executor = rust_orm_system::connect("localhost", "app", "secret", "shop")?;
/// # Ok(())
/// # }
/// ```
pub fn connect(host: &str, user: &str, password: &str, database: &str) -> Result<Executor> {
    connect_with_config(host, user, password, database, ExecutorConfig::default())
}

/// [`connect`] with a custom executor configuration
///
/// Must be called from within a tokio runtime.
pub fn connect_with_config(
    host: &str,
    user: &str,
    password: &str,
    database: &str,
    config: ExecutorConfig,
) -> Result<Executor> {
    if host.is_empty() {
        return Err(DatabaseError::connection("MySQL host must not be empty"));
    }
    let builder = ConnectionBuilder::new()
        .host(host)
        .username(user)
        .password(password)
        .database(database);
    let db = MysqlDatabase::from_builder(&builder);
    tracing::debug!(host, database, "mysql pool created");
    Ok(Executor::with_config(Arc::new(db), config))
}
