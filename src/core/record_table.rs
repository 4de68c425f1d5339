//! Table-level CRUD primitives
//!
//! Row-oriented insert/update/select/delete statements issued through an
//! [`Executor`]. Callers pass table names and raw WHERE clauses; values are
//! interpolated by the [`query_builder`](super::query_builder) types.

use super::error::{DatabaseError, Result};
use super::executor::Executor;
use super::query_builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
use super::value::{DatabaseResult, DatabaseRow, DatabaseValue};

/// Reserved field name a record's pending-null list may appear under
pub const PENDING_NULL_FIELD: &str = "key2null";

impl Executor {
    /// Insert a row, ignoring duplicate-key conflicts
    ///
    /// Returns the generated id when exactly one row was inserted, `None`
    /// otherwise (e.g. the row was dropped by `INSERT IGNORE`).
    pub async fn insert(&self, table: &str, fields: &DatabaseRow) -> Result<Option<u64>> {
        let builder = fields
            .iter()
            .filter(|(name, _)| name.as_str() != PENDING_NULL_FIELD)
            .fold(InsertBuilder::new(table), |builder, (name, value)| {
                builder.value(name, value.clone())
            });

        self.query_map(&builder.build(), |out| {
            Ok(if out.affected_rows() == 1 {
                out.insert_id()
            } else {
                None
            })
        })
        .await
    }

    /// Update rows matching `where_clause`
    ///
    /// Every field not in `ignored` is assigned, then every `null_fields`
    /// entry is set to NULL. Returns `Ok(None)` without issuing a statement
    /// when there is nothing to assign, otherwise the affected row count.
    pub async fn update(
        &self,
        table: &str,
        fields: &DatabaseRow,
        null_fields: &[String],
        where_clause: &str,
        ignored: &[String],
    ) -> Result<Option<u64>> {
        let builder = fields
            .iter()
            .filter(|(name, _)| name.as_str() != PENDING_NULL_FIELD)
            .filter(|(name, _)| !ignored.contains(*name))
            .fold(UpdateBuilder::new(table), |builder, (name, value)| {
                builder.set(name, value.clone())
            });
        let builder = null_fields
            .iter()
            .fold(builder, |builder, name| builder.set_null(name))
            .where_clause(where_clause);

        let Some(sql) = builder.build() else {
            tracing::debug!(table, "update skipped: nothing to set");
            return Ok(None);
        };

        self.query_map(&sql, |out| Ok(Some(out.affected_rows())))
            .await
    }

    /// Select every column of the rows matching an optional trailing clause
    pub async fn select(&self, table: &str, clause: Option<&str>) -> Result<DatabaseResult> {
        self.query_map(&select_sql(table, clause), |out| out.into_rows())
            .await
    }

    /// Select rows and map each one
    pub async fn select_map<T, F>(
        &self,
        table: &str,
        clause: Option<&str>,
        mapper: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(DatabaseRow) -> Result<T> + Send,
        T: Send,
    {
        self.query_map(&select_sql(table, clause), |out| {
            out.into_rows()?.into_iter().map(mapper).collect()
        })
        .await
    }

    /// Select the first matching row
    pub async fn select_one(&self, table: &str, clause: Option<&str>) -> Result<Option<DatabaseRow>> {
        Ok(self.select(table, clause).await?.into_iter().next())
    }

    /// Delete rows matching `where_clause`, returning the affected row count
    pub async fn delete(&self, table: &str, where_clause: &str) -> Result<u64> {
        let sql = DeleteBuilder::new(table, where_clause).build();
        self.query_map(&sql, |out| Ok(out.affected_rows())).await
    }

    /// Column names of a table
    pub async fn columns(&self, table: &str) -> Result<Vec<String>> {
        let sql = format!("SHOW COLUMNS FROM {table}");
        self.query_map(&sql, |out| {
            out.into_rows()?
                .into_iter()
                .map(|row| match row.get("Field") {
                    Some(DatabaseValue::String(name)) => Ok(name.clone()),
                    Some(DatabaseValue::Bytes(raw)) => Ok(String::from_utf8_lossy(raw).into_owned()),
                    Some(other) => Err(DatabaseError::type_mismatch("string", other.type_name())),
                    None => Err(DatabaseError::ColumnNotFound("Field".to_string())),
                })
                .collect()
        })
        .await
    }
}

fn select_sql(table: &str, clause: Option<&str>) -> String {
    match clause {
        Some(clause) => SelectBuilder::new(table).clause(clause).build(),
        None => SelectBuilder::new(table).build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::RecordingDatabase;
    use std::sync::Arc;

    fn setup() -> (Arc<RecordingDatabase>, Executor) {
        let db = Arc::new(RecordingDatabase::new());
        (db.clone(), Executor::new(db))
    }

    fn row(pairs: &[(&str, DatabaseValue)]) -> DatabaseRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_insert_returns_id_for_single_row() -> Result<()> {
        let (db, executor) = setup();
        db.push_affected(1, Some(17));

        let fields = row(&[
            ("name", "O\"Neil".into()),
            (PENDING_NULL_FIELD, DatabaseValue::Null),
            ("admin", true.into()),
        ]);
        let id = executor.insert("user", &fields).await?;

        assert_eq!(id, Some(17));
        assert_eq!(
            db.last_statement().as_deref(),
            Some("INSERT IGNORE INTO `user` (`name`, `admin`) VALUES (\"O\"\"Neil\", \"1\")")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_ignored_returns_none() -> Result<()> {
        let (db, executor) = setup();
        db.push_affected(0, Some(0));

        let id = executor.insert("user", &row(&[("name", "dup".into())])).await?;
        assert_eq!(id, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_builds_assignments_and_nulls() -> Result<()> {
        let (db, executor) = setup();
        db.push_affected(1, None);

        let fields = row(&[("id", 3.into()), ("name", "Ann".into())]);
        let affected = executor
            .update(
                "user",
                &fields,
                &["email".to_string()],
                "`id` = \"3\"",
                &["id".to_string()],
            )
            .await?;

        assert_eq!(affected, Some(1));
        assert_eq!(
            db.last_statement().as_deref(),
            Some("UPDATE `user` SET `name` = \"Ann\", `email` = NULL WHERE `id` = \"3\"")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_update_with_nothing_to_set_is_noop() -> Result<()> {
        let (db, executor) = setup();
        let fields = row(&[("id", 3.into())]);

        let result = executor
            .update("user", &fields, &[], "`id` = \"3\"", &["id".to_string()])
            .await?;

        assert_eq!(result, None);
        assert!(db.statements().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_select_and_select_one() -> Result<()> {
        let (db, executor) = setup();
        db.push_rows(vec![
            row(&[("id", 1.into())]),
            row(&[("id", 2.into())]),
        ]);
        db.push_rows(vec![]);

        let ids = executor
            .select_map("user", Some("WHERE `id` > \"0\""), |r| {
                Ok(r.get("id").and_then(DatabaseValue::as_long))
            })
            .await?;
        assert_eq!(ids, vec![Some(1), Some(2)]);
        assert_eq!(
            db.last_statement().as_deref(),
            Some("SELECT * FROM `user` WHERE `id` > \"0\"")
        );

        let first = executor.select_one("user", None).await?;
        assert!(first.is_none());
        assert_eq!(db.last_statement().as_deref(), Some("SELECT * FROM `user`"));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_returns_count() -> Result<()> {
        let (db, executor) = setup();
        db.push_affected(4, None);

        let count = executor.delete("user", "`age` < \"18\"").await?;
        assert_eq!(count, 4);
        assert_eq!(
            db.last_statement().as_deref(),
            Some("DELETE FROM `user` WHERE `age` < \"18\"")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_columns_extracts_field_names() -> Result<()> {
        let (db, executor) = setup();
        db.push_rows(vec![
            row(&[("Field", "id".into()), ("Type", "int".into())]),
            row(&[("Field", "name".into()), ("Type", "text".into())]),
        ]);

        let columns = executor.columns("user").await?;
        assert_eq!(columns, vec!["id", "name"]);
        assert_eq!(db.last_statement().as_deref(), Some("SHOW COLUMNS FROM user"));
        Ok(())
    }
}
