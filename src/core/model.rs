//! Model records and type-level CRUD
//!
//! A [`Record`] is one row of a registered model: an ordered field map plus
//! the fields queued for NULL and the records its links resolved to.
//! [`Repository`] and the [`Entity`] trait provide the type-level
//! operations (`all`, `find`, `find_one`, `get`, `remove`).

use super::codec::{convert, quote_identifier, quoted_literal, sql_text};
use super::error::{DatabaseError, Result};
use super::filter::Filter;
use super::registry::{binding_of, ModelId, TableBinding};
use super::value::{DatabaseRow, DatabaseValue};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// Lifecycle of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Constructed in memory, never written
    New,
    /// Inserted, updated or loaded from the database
    Saved,
    /// Row deleted; the record must not be reused
    Deleted,
}

/// One row of a registered model
#[derive(Debug, Clone)]
pub struct Record {
    binding: Arc<TableBinding>,
    fields: DatabaseRow,
    pending_nulls: Vec<String>,
    links: IndexMap<String, Record>,
    state: RecordState,
}

impl Record {
    /// Create an empty record of model `M`
    ///
    /// # Errors
    ///
    /// - [`DatabaseError::Configuration`] if `M` is not registered
    /// - [`DatabaseError::LinkIntegrity`] if a link targets a model without primary key
    pub fn new<M: 'static>() -> Result<Self> {
        Self::with_binding(binding_of::<M>()?)
    }

    /// Create a record of model `M` populated from a row
    pub fn from_row<M: 'static>(row: DatabaseRow) -> Result<Self> {
        let mut record = Self::new::<M>()?;
        record.propagate(row);
        Ok(record)
    }

    fn with_binding(binding: Arc<TableBinding>) -> Result<Self> {
        for link in binding.links() {
            link.validate()?;
        }
        Ok(Self {
            binding,
            fields: DatabaseRow::new(),
            pending_nulls: Vec::new(),
            links: IndexMap::new(),
            state: RecordState::New,
        })
    }

    fn loaded(binding: &Arc<TableBinding>, row: DatabaseRow) -> Result<Self> {
        let mut record = Self::with_binding(Arc::clone(binding))?;
        record.propagate(row);
        record.state = RecordState::Saved;
        Ok(record)
    }

    /// Assign every field of `row`, converting each value
    pub fn propagate(&mut self, row: DatabaseRow) -> &mut Self {
        for (field, value) in row {
            let value = convert(&value);
            self.fields.insert(field, value);
        }
        self
    }

    /// Assign the fields of a serializable data shape
    ///
    /// Nested arrays and objects have no column representation and are skipped.
    pub fn assign<T: Serialize>(&mut self, data: &T) -> Result<&mut Self> {
        let serde_json::Value::Object(object) = serde_json::to_value(data)? else {
            return Err(DatabaseError::type_mismatch("object", "non-object value"));
        };
        let row: DatabaseRow = object
            .iter()
            .filter_map(|(k, v)| DatabaseValue::from_json(v).map(|v| (k.clone(), v)))
            .collect();
        Ok(self.propagate(row))
    }

    /// Deserialize fields and resolved links into a data shape
    ///
    /// Linked records appear as nested objects under their link property.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.to_json())?)
    }

    /// Fields and resolved links as a JSON object
    pub fn to_json(&self) -> serde_json::Value {
        let mut object: serde_json::Map<String, serde_json::Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        for (property, linked) in &self.links {
            object.insert(property.clone(), linked.to_json());
        }
        serde_json::Value::Object(object)
    }

    /// Model this record belongs to
    pub fn model(&self) -> ModelId {
        self.binding.model()
    }

    /// Whether this record belongs to model `M`
    pub fn is<M: 'static>(&self) -> bool {
        self.binding.model() == ModelId::of::<M>()
    }

    /// Binding of this record's model
    pub fn binding(&self) -> &Arc<TableBinding> {
        &self.binding
    }

    /// Current lifecycle state
    pub fn state(&self) -> RecordState {
        self.state
    }

    /// Field value
    pub fn get(&self, field: &str) -> Option<&DatabaseValue> {
        self.fields.get(field)
    }

    /// Set a field value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<DatabaseValue>) -> &mut Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Remove a field, keeping the order of the remaining ones
    pub fn remove(&mut self, field: &str) -> Option<DatabaseValue> {
        self.fields.shift_remove(field)
    }

    /// All fields in assignment order
    pub fn fields(&self) -> &DatabaseRow {
        &self.fields
    }

    /// Record a link resolved to, by link property
    pub fn linked(&self, property: &str) -> Option<&Record> {
        self.links.get(property)
    }

    /// Value of the primary key field, if the model has one and it is set
    pub fn primary_key_value(&self) -> Option<&DatabaseValue> {
        self.binding
            .primary_key()
            .and_then(|pk| self.fields.get(pk))
    }

    /// Queue `field` to be written as NULL on the next save
    ///
    /// The local value is kept until the save; it is only removed when the
    /// save inserts.
    pub fn set_null(&mut self, field: impl Into<String>) -> &mut Self {
        self.pending_nulls.push(field.into());
        self
    }

    /// Fields queued for NULL
    pub fn pending_nulls(&self) -> &[String] {
        &self.pending_nulls
    }

    fn ensure_live(&self) -> Result<()> {
        if self.state == RecordState::Deleted {
            return Err(DatabaseError::RecordDeleted(self.model().name().to_string()));
        }
        Ok(())
    }

    /// Insert or update the row
    ///
    /// With a truthy primary key value the row is updated (primary key and
    /// link properties excluded, queued nulls applied); otherwise queued-null
    /// fields are dropped, the row is inserted and the generated id assigned
    /// to the primary key. Links are resolved afterwards.
    pub async fn save(&mut self) -> Result<()> {
        self.ensure_live()?;
        let executor = self.binding.connection()?;
        let table = self.binding.table_name().to_string();
        let pending = std::mem::take(&mut self.pending_nulls);

        match self.binding.primary_key().map(str::to_string) {
            Some(pk) if self.fields.get(&pk).is_some_and(DatabaseValue::is_truthy) => {
                let where_clause = self.primary_key_clause(&pk);
                let ignored: Vec<String> = std::iter::once(pk)
                    .chain(self.binding.links().iter().map(|l| l.property.clone()))
                    .collect();
                let result = executor
                    .update(&table, &self.fields, &pending, &where_clause, &ignored)
                    .await;
                if let Err(err) = result {
                    self.pending_nulls = pending;
                    return Err(err);
                }
            }
            primary_key => {
                for field in &pending {
                    self.fields.shift_remove(field);
                }
                let id = executor.insert(&table, &self.fields).await?;
                match (primary_key, id) {
                    (Some(pk), Some(id)) => {
                        self.fields.insert(pk, DatabaseValue::from(id));
                    }
                    (Some(_), None) => {
                        tracing::debug!(table = %table, "insert affected no row; primary key left unset");
                    }
                    (None, _) => {}
                }
            }
        }

        self.state = RecordState::Saved;
        self.process_links().await
    }

    /// Delete the row identified by the primary key
    ///
    /// Returns `Ok(None)` without a statement when the model has no primary
    /// key, otherwise the affected row count.
    pub async fn delete(&mut self) -> Result<Option<u64>> {
        self.ensure_live()?;
        let Some(pk) = self.binding.primary_key() else {
            return Ok(None);
        };
        if !self.fields.contains_key(pk) {
            return Err(DatabaseError::configuration(format!(
                "cannot delete {} record without a `{pk}` value",
                self.model().name()
            )));
        }

        let executor = self.binding.connection()?;
        let where_clause = self.primary_key_clause(pk);
        let affected = executor
            .delete(self.binding.table_name(), &where_clause)
            .await?;
        self.state = RecordState::Deleted;
        Ok(Some(affected))
    }

    fn primary_key_clause(&self, pk: &str) -> String {
        let value = self.fields.get(pk).cloned().unwrap_or(DatabaseValue::Null);
        format!("{} = {}", quote_identifier(pk), quoted_literal(&value))
    }

    /// Resolve every link whose foreign key is set, in declaration order
    ///
    /// Linked records have their own links resolved depth first. Each
    /// `(model, primary key)` row is fetched at most once per call; a link
    /// back to a row already reached is filled with a copy of that row
    /// without its links, so cycles and self references terminate.
    pub async fn process_links(&mut self) -> Result<()> {
        let root = Record {
            binding: Arc::clone(&self.binding),
            fields: self.fields.clone(),
            pending_nulls: Vec::new(),
            links: IndexMap::new(),
            state: self.state,
        };

        let mut seen = HashMap::new();
        if let Some(key) = self.primary_key_value().filter(|key| key.is_truthy()) {
            seen.insert((self.model(), sql_text(key)), 0);
        }
        let mut nodes = vec![root];
        let mut resolved: Vec<Vec<(String, Resolved)>> = vec![Vec::new()];
        let mut stack = vec![(0usize, 0usize)];

        while let Some((node, next)) = stack.pop() {
            let Some(link) = nodes[node].binding.links().get(next).cloned() else {
                continue;
            };
            stack.push((node, next + 1));

            let Some(key) = nodes[node].fields.get(&link.foreign_key).cloned() else {
                continue;
            };
            if !key.is_truthy() {
                continue;
            }

            let destination = link.validate()?;
            let identity = (destination.model(), sql_text(&key));
            let outcome = match seen.get(&identity).copied() {
                Some(index) => Resolved::Repeated(nodes[index].clone()),
                None => {
                    let pk = destination.require_primary_key("get")?;
                    let filter = Filter::new().eq(pk, key);
                    match load_one(&destination, &filter).await? {
                        Some(record) => {
                            let index = nodes.len();
                            nodes.push(record);
                            resolved.push(Vec::new());
                            seen.insert(identity, index);
                            stack.push((index, 0));
                            Resolved::Loaded(index)
                        }
                        None => Resolved::Missing,
                    }
                }
            };
            resolved[node].push((link.property, outcome));
        }

        // children always sit after their parent
        let mut built: Vec<Option<Record>> = nodes.into_iter().map(Some).collect();
        for index in (1..built.len()).rev() {
            let children = std::mem::take(&mut resolved[index]);
            if let Some(mut record) = built[index].take() {
                attach(&mut record.links, children, &mut built);
                built[index] = Some(record);
            }
        }
        let children = std::mem::take(&mut resolved[0]);
        attach(&mut self.links, children, &mut built);
        Ok(())
    }
}

/// Outcome of following one link
enum Resolved {
    Loaded(usize),
    Repeated(Record),
    Missing,
}

fn attach(
    links: &mut IndexMap<String, Record>,
    children: Vec<(String, Resolved)>,
    built: &mut [Option<Record>],
) {
    for (property, child) in children {
        match child {
            Resolved::Loaded(index) => {
                if let Some(record) = built[index].take() {
                    links.insert(property, record);
                }
            }
            Resolved::Repeated(record) => {
                links.insert(property, record);
            }
            Resolved::Missing => {
                links.shift_remove(&property);
            }
        }
    }
}

async fn get_in(binding: &Arc<TableBinding>, id: DatabaseValue) -> Result<Option<Record>> {
    let pk = binding.require_primary_key("get")?;
    let filter = Filter::new().eq(pk, id);
    find_one_in(binding, &filter).await
}

async fn find_one_in(binding: &Arc<TableBinding>, filter: &Filter) -> Result<Option<Record>> {
    match load_one(binding, filter).await? {
        Some(mut record) => {
            record.process_links().await?;
            Ok(Some(record))
        }
        None => Ok(None),
    }
}

/// First matching row, links left unresolved
async fn load_one(binding: &Arc<TableBinding>, filter: &Filter) -> Result<Option<Record>> {
    let clause = where_clause(&filter.compile()?);
    let executor = binding.connection()?;
    let row = executor
        .select_one(binding.table_name(), clause.as_deref())
        .await?;
    row.map(|row| Record::loaded(binding, row)).transpose()
}

fn where_clause(expression: &str) -> Option<String> {
    if expression.is_empty() {
        None
    } else {
        Some(format!("WHERE {expression}"))
    }
}

/// Type-level operations of model `M`
pub struct Repository<M: 'static> {
    binding: Arc<TableBinding>,
    _model: PhantomData<fn() -> M>,
}

impl<M: 'static> Clone for Repository<M> {
    fn clone(&self) -> Self {
        Self {
            binding: Arc::clone(&self.binding),
            _model: PhantomData,
        }
    }
}

impl<M: 'static> Repository<M> {
    /// Repository for registered model `M`
    pub fn new() -> Result<Self> {
        Ok(Self {
            binding: binding_of::<M>()?,
            _model: PhantomData,
        })
    }

    /// Binding of the model
    pub fn binding(&self) -> &Arc<TableBinding> {
        &self.binding
    }

    /// New empty record
    pub fn create(&self) -> Result<Record> {
        Record::with_binding(Arc::clone(&self.binding))
    }

    /// Every row, without link resolution
    pub async fn all(&self) -> Result<Vec<Record>> {
        let executor = self.binding.connection()?;
        let binding = &self.binding;
        executor
            .select_map(binding.table_name(), None, |row| Record::loaded(binding, row))
            .await
    }

    /// Rows matching `filter`, each with its links resolved
    ///
    /// An `$in` that filters down to nothing yields an empty list without
    /// touching the database.
    pub async fn find(&self, filter: &Filter) -> Result<Vec<Record>> {
        let expression = match filter.compile() {
            Ok(expression) => expression,
            Err(err) if err.is_empty_filter_set() => {
                tracing::debug!(model = self.binding.model().name(), "find skipped: {err}");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let executor = self.binding.connection()?;
        let binding = &self.binding;
        let clause = where_clause(&expression);
        let mut found = executor
            .select_map(binding.table_name(), clause.as_deref(), |row| {
                Record::loaded(binding, row)
            })
            .await?;

        for record in &mut found {
            record.process_links().await?;
        }
        Ok(found)
    }

    /// First row matching `filter`, with its links resolved
    ///
    /// Unlike [`find`](Self::find), an empty `$in` set is returned as
    /// [`DatabaseError::EmptyFilterSet`].
    pub async fn find_one(&self, filter: &Filter) -> Result<Option<Record>> {
        find_one_in(&self.binding, filter).await
    }

    /// Row with primary key `id`
    ///
    /// # Errors
    ///
    /// Fails without querying when the model has no primary key.
    pub async fn get(&self, id: impl Into<DatabaseValue> + Send) -> Result<Option<Record>> {
        get_in(&self.binding, id.into()).await
    }

    /// Delete every row matching `filter`, returning the affected row count
    ///
    /// An empty filter is rejected rather than deleting the whole table.
    pub async fn remove(&self, filter: &Filter) -> Result<u64> {
        let expression = filter.compile()?;
        if expression.is_empty() {
            return Err(DatabaseError::invalid_filter(
                "remove requires at least one condition",
            ));
        }
        let executor = self.binding.connection()?;
        executor.delete(self.binding.table_name(), &expression).await
    }

    /// Column names of the model's table
    pub async fn columns(&self) -> Result<Vec<String>> {
        let executor = self.binding.connection()?;
        executor.columns(self.binding.table_name()).await
    }
}

/// Registered model type
///
/// Implement it on the type used with [`model`](super::registry::model) to
/// get the type-level operations as associated functions:
///
/// ```no_run
/// use rust_orm_system::prelude::*;
///
/// struct User;
/// impl Entity for User {}
///
/// # async fn run() -> Result<()> {
/// if let Some(user) = User::get(7).await? {
///     println!("{:?}", user.get("name"));
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Entity: Sized + Send + Sync + 'static {
    /// Repository for this model
    fn repository() -> Result<Repository<Self>> {
        Repository::new()
    }

    /// Binding registered for this model
    fn binding() -> Result<Arc<TableBinding>> {
        binding_of::<Self>()
    }

    /// New empty record
    fn create() -> Result<Record> {
        Record::new::<Self>()
    }

    /// New record populated from a row
    fn from_row(row: DatabaseRow) -> Result<Record> {
        Record::from_row::<Self>(row)
    }

    /// Every row
    async fn all() -> Result<Vec<Record>> {
        Self::repository()?.all().await
    }

    /// Rows matching `filter`
    async fn find(filter: &Filter) -> Result<Vec<Record>> {
        Self::repository()?.find(filter).await
    }

    /// First row matching `filter`
    async fn find_one(filter: &Filter) -> Result<Option<Record>> {
        Self::repository()?.find_one(filter).await
    }

    /// Row with primary key `id`
    async fn get<V>(id: V) -> Result<Option<Record>>
    where
        V: Into<DatabaseValue> + Send,
    {
        Self::repository()?.get(id).await
    }

    /// Delete rows matching `filter`
    async fn remove(filter: &Filter) -> Result<u64> {
        Self::repository()?.remove(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::RecordingDatabase;
    use crate::core::executor::Executor;
    use crate::core::registry::model;

    fn row(pairs: &[(&str, DatabaseValue)]) -> DatabaseRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn setup() -> (Arc<RecordingDatabase>, Executor) {
        let db = Arc::new(RecordingDatabase::new());
        (db.clone(), Executor::new(db))
    }

    #[test]
    fn test_unregistered_model_cannot_be_constructed() {
        struct Ghost;
        let err = Record::new::<Ghost>().expect_err("unregistered");
        assert!(matches!(err, DatabaseError::Configuration(_)));
    }

    #[test]
    fn test_construction_validates_links() -> Result<()> {
        struct Tag;
        struct Label;
        let (_, executor) = setup();
        model::<Tag>(executor.clone(), "tag").register()?;
        model::<Label>(executor, "label")
            .primary("id")
            .link::<Tag>("tag", "tag_id")
            .register()?;

        let err = Record::new::<Label>().expect_err("link without primary key");
        assert!(matches!(err, DatabaseError::LinkIntegrity { .. }));
        Ok(())
    }

    #[test]
    fn test_propagate_converts_values() -> Result<()> {
        struct Flagged;
        let (_, executor) = setup();
        model::<Flagged>(executor, "flagged").primary("id").register()?;

        let record = Record::from_row::<Flagged>(row(&[
            ("active", true.into()),
            ("blob", b"abc".to_vec().into()),
        ]))?;
        assert_eq!(record.get("active"), Some(&DatabaseValue::Int(1)));
        assert_eq!(record.get("blob"), Some(&DatabaseValue::String("abc".into())));
        assert_eq!(record.state(), RecordState::New);
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_assigns_id() -> Result<()> {
        struct Note;
        let (db, executor) = setup();
        model::<Note>(executor, "note").primary("id").register()?;
        db.push_affected(1, Some(11));

        let mut note = Record::new::<Note>()?;
        note.set("body", "hello").set("draft", 1);
        note.set_null("draft");
        note.save().await?;

        assert_eq!(
            db.statements(),
            vec!["INSERT IGNORE INTO `note` (`body`) VALUES (\"hello\")"]
        );
        assert_eq!(note.get("id"), Some(&DatabaseValue::Long(11)));
        assert_eq!(note.get("draft"), None);
        assert!(note.pending_nulls().is_empty());
        assert_eq!(note.state(), RecordState::Saved);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_applies_nulls_and_keeps_local_value() -> Result<()> {
        struct Memo;
        let (db, executor) = setup();
        model::<Memo>(executor, "memo").primary("id").register()?;
        db.push_affected(1, None);

        let mut memo = Record::from_row::<Memo>(row(&[
            ("id", 5.into()),
            ("title", "t".into()),
            ("due", "2024-01-01 00:00:00".into()),
        ]))?;
        memo.set_null("due");
        memo.save().await?;

        assert_eq!(
            db.last_statement().as_deref(),
            Some("UPDATE `memo` SET `title` = \"t\", `due` = \"2024-01-01 00:00:00\", `due` = NULL WHERE `id` = \"5\"")
        );
        assert!(memo.get("due").is_some());
        assert!(memo.pending_nulls().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_without_primary_key_is_noop() -> Result<()> {
        struct Event;
        let (db, executor) = setup();
        model::<Event>(executor, "event").register()?;

        let mut event = Record::from_row::<Event>(row(&[("kind", "x".into())]))?;
        assert_eq!(event.delete().await?, None);
        assert!(db.statements().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_marks_record_deleted() -> Result<()> {
        struct Card;
        let (db, executor) = setup();
        model::<Card>(executor, "card").primary("id").register()?;
        db.push_affected(1, None);

        let mut card = Record::from_row::<Card>(row(&[("id", 2.into())]))?;
        assert_eq!(card.delete().await?, Some(1));
        assert_eq!(
            db.last_statement().as_deref(),
            Some("DELETE FROM `card` WHERE `id` = \"2\"")
        );
        assert_eq!(card.state(), RecordState::Deleted);

        let err = card.save().await.expect_err("deleted records are terminal");
        assert!(matches!(err, DatabaseError::RecordDeleted(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_process_links_fetches_shared_target_once() -> Result<()> {
        struct Person;
        struct Folder;
        let (db, executor) = setup();
        model::<Person>(executor.clone(), "person").primary("id").register()?;
        model::<Folder>(executor, "folder")
            .primary("id")
            .link::<Person>("owner", "owner_id")
            .link::<Person>("reviewer", "reviewer_id")
            .register()?;
        db.push_rows(vec![row(&[("id", 3.into()), ("name", "Kim".into())])]);

        let mut folder = Record::from_row::<Folder>(row(&[
            ("id", 1.into()),
            ("owner_id", 3.into()),
            ("reviewer_id", 3.into()),
        ]))?;
        folder.process_links().await?;
        assert_eq!(db.statements().len(), 1);
        assert!(folder.linked("owner").is_some_and(|p| p.is::<Person>()));
        assert_eq!(
            folder.linked("reviewer").and_then(|p| p.get("name")),
            Some(&DatabaseValue::String("Kim".into()))
        );

        // owner 4 does not exist; the stale owner link is dropped
        db.clear();
        folder.set("owner_id", 4);
        db.push_rows(Vec::new());
        db.push_rows(vec![row(&[("id", 3.into()), ("name", "Kim".into())])]);
        folder.process_links().await?;
        assert!(folder.linked("owner").is_none());
        assert!(folder.linked("reviewer").is_some());
        assert_eq!(
            db.statements(),
            vec![
                "SELECT * FROM `person` WHERE `id` = \"4\"",
                "SELECT * FROM `person` WHERE `id` = \"3\"",
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_update_keeps_pending_nulls() -> Result<()> {
        struct Draft;
        let (db, executor) = setup();
        model::<Draft>(executor, "draft").primary("id").register()?;
        db.push_error(crate::core::error::DriverError::new(1, "E", "Error", "boom"));

        let mut draft = Record::from_row::<Draft>(row(&[("id", 1.into()), ("a", 1.into())]))?;
        draft.set_null("a");
        assert!(draft.save().await.is_err());
        assert_eq!(draft.pending_nulls(), ["a".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_serde_bridge() -> Result<()> {
        #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Shape {
            id: i64,
            name: String,
        }
        struct Shaped;
        let (_, executor) = setup();
        model::<Shaped>(executor, "shaped").primary("id").register()?;

        let mut record = Record::new::<Shaped>()?;
        record.assign(&Shape {
            id: 3,
            name: "tri".into(),
        })?;
        assert_eq!(record.get("name"), Some(&DatabaseValue::String("tri".into())));

        let shape: Shape = record.deserialize()?;
        assert_eq!(
            shape,
            Shape {
                id: 3,
                name: "tri".into()
            }
        );
        Ok(())
    }
}
