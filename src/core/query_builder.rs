//! SQL statement builders
//!
//! Values are interpolated directly into the statement text: each value is
//! converted, its embedded double quotes are doubled, and it is wrapped in
//! double quotes. There is no parameter binding.

use super::codec::{quote_identifier, quoted_literal};
use super::value::DatabaseValue;

/// INSERT IGNORE query builder
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<DatabaseValue>,
}

impl InsertBuilder {
    /// Create a new INSERT query builder
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Add a column-value pair
    #[must_use]
    pub fn value(mut self, column: &str, value: impl Into<DatabaseValue>) -> Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
        self
    }

    /// Whether no column has been added
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Build the SQL query string
    ///
    /// ```
    /// use rust_orm_system::core::query_builder::InsertBuilder;
    ///
    /// let sql = InsertBuilder::new("user").value("name", "Ann").build();
    /// assert_eq!(sql, "INSERT IGNORE INTO `user` (`name`) VALUES (\"Ann\")");
    /// ```
    pub fn build(&self) -> String {
        let columns: Vec<String> = self.columns.iter().map(|c| quote_identifier(c)).collect();
        let values: Vec<String> = self.values.iter().map(quoted_literal).collect();
        format!(
            "INSERT IGNORE INTO {} ({}) VALUES ({})",
            quote_identifier(&self.table),
            columns.join(", "),
            values.join(", ")
        )
    }
}

/// UPDATE query builder
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    table: String,
    assignments: Vec<String>,
    where_clause: Option<String>,
}

impl UpdateBuilder {
    /// Create a new UPDATE query builder
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Set a column value
    #[must_use]
    pub fn set(mut self, column: &str, value: impl Into<DatabaseValue>) -> Self {
        let value = value.into();
        self.assignments
            .push(format!("{} = {}", quote_identifier(column), quoted_literal(&value)));
        self
    }

    /// Force a column to NULL
    #[must_use]
    pub fn set_null(mut self, column: &str) -> Self {
        self.assignments
            .push(format!("{} = NULL", quote_identifier(column)));
        self
    }

    /// Set the raw WHERE clause (without the keyword)
    #[must_use]
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    /// Build the SQL query string, or `None` when nothing is assigned
    pub fn build(&self) -> Option<String> {
        if self.assignments.is_empty() {
            return None;
        }

        let mut sql = format!(
            "UPDATE {} SET {}",
            quote_identifier(&self.table),
            self.assignments.join(", ")
        );
        if let Some(clause) = &self.where_clause {
            sql.push_str(&format!(" WHERE {}", clause));
        }
        Some(sql)
    }
}

/// SELECT * query builder
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    table: String,
    clause: Option<String>,
}

impl SelectBuilder {
    /// Create a new SELECT query builder
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            clause: None,
        }
    }

    /// Append a raw trailing clause (`WHERE ...`, `LIMIT ...`)
    #[must_use]
    pub fn clause(mut self, clause: impl Into<String>) -> Self {
        let clause = clause.into();
        self.clause = if clause.trim().is_empty() {
            None
        } else {
            Some(clause)
        };
        self
    }

    /// Build the SQL query string
    pub fn build(&self) -> String {
        match &self.clause {
            Some(clause) => format!("SELECT * FROM {} {}", quote_identifier(&self.table), clause),
            None => format!("SELECT * FROM {}", quote_identifier(&self.table)),
        }
    }
}

/// DELETE query builder
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    table: String,
    where_clause: String,
}

impl DeleteBuilder {
    /// Create a new DELETE query builder with a raw WHERE clause
    pub fn new(table: impl Into<String>, where_clause: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            where_clause: where_clause.into(),
        }
    }

    /// Build the SQL query string
    pub fn build(&self) -> String {
        format!(
            "DELETE FROM {} WHERE {}",
            quote_identifier(&self.table),
            self.where_clause
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_basic() {
        let query = SelectBuilder::new("users").build();
        assert_eq!(query, "SELECT * FROM `users`");

        let query = SelectBuilder::new("users").clause("").build();
        assert_eq!(query, "SELECT * FROM `users`");
    }

    #[test]
    fn test_select_clause() {
        let query = SelectBuilder::new("users")
            .clause("WHERE `id` = \"1\"")
            .build();
        assert_eq!(query, "SELECT * FROM `users` WHERE `id` = \"1\"");
    }

    #[test]
    fn test_insert() {
        let builder = InsertBuilder::new("users")
            .value("name", "Alice \"Al\"")
            .value("age", 30)
            .value("active", true);

        assert_eq!(
            builder.build(),
            "INSERT IGNORE INTO `users` (`name`, `age`, `active`) VALUES (\"Alice \"\"Al\"\"\", \"30\", \"1\")"
        );
    }

    #[test]
    fn test_update() {
        let sql = UpdateBuilder::new("users")
            .set("name", "Bob")
            .set_null("email")
            .where_clause("`id` = \"1\"")
            .build();

        assert_eq!(
            sql.as_deref(),
            Some("UPDATE `users` SET `name` = \"Bob\", `email` = NULL WHERE `id` = \"1\"")
        );
    }

    #[test]
    fn test_update_without_assignments() {
        let sql = UpdateBuilder::new("users").where_clause("`id` = \"1\"").build();
        assert!(sql.is_none());
    }

    #[test]
    fn test_delete() {
        let sql = DeleteBuilder::new("users", "`id` = \"42\"").build();
        assert_eq!(sql, "DELETE FROM `users` WHERE `id` = \"42\"");
    }
}
