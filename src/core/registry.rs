//! Model registration
//!
//! A model type is bound to its table once, at startup, through a
//! [`ModelBuilder`]:
//!
//! ```no_run
//! use rust_orm_system::prelude::*;
//! # fn setup(executor: Executor) -> Result<()> {
//! struct User;
//! impl Entity for User {}
//!
//! struct Post;
//! impl Entity for Post {}
//!
//! model::<User>(executor.clone(), "user").primary("id").register()?;
//! model::<Post>(executor, "post")
//!     .primary("id")
//!     .link::<User>("author", "author_id")
//!     .register()?;
//! # Ok(())
//! # }
//! ```
//!
//! Registration produces an immutable [`TableBinding`] stored in a
//! process-wide map keyed by the model's `TypeId`.

use super::error::{DatabaseError, Result};
use super::executor::Executor;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::{Mutex, RwLock};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::oneshot;

static REGISTRY: Lazy<RwLock<HashMap<TypeId, Arc<TableBinding>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Identity of a model type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId {
    type_id: TypeId,
    name: &'static str,
}

impl ModelId {
    /// Identity of `M`
    pub fn of<M: 'static>() -> Self {
        let full = type_name::<M>();
        let path = full.split('<').next().unwrap_or(full);
        Self {
            type_id: TypeId::of::<M>(),
            name: path.rsplit("::").next().unwrap_or(path),
        }
    }

    /// Short type name (last path segment, without generic arguments)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust `TypeId` of the model
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// Declared foreign-key relationship
///
/// `source.foreign_key` references the primary key of `destination`; once
/// resolved, the destination record is stored under `property`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    pub foreign_key: String,
    pub destination: ModelId,
    pub source: ModelId,
    pub property: String,
}

impl LinkSpec {
    /// Check that the destination is registered and has a primary key
    pub fn validate(&self) -> Result<Arc<TableBinding>> {
        let destination = lookup(self.destination)?;
        if destination.primary_key().is_none() {
            return Err(DatabaseError::link_integrity(
                self.source.name(),
                &self.foreign_key,
                self.destination.name(),
            ));
        }
        Ok(destination)
    }
}

/// Registration-time metadata of a model type
#[derive(Debug)]
pub struct TableBinding {
    model: ModelId,
    table_name: String,
    primary_key: Option<String>,
    links: Vec<LinkSpec>,
    connection: ConnectionSlot,
}

impl TableBinding {
    /// Model the binding belongs to
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Primary key field, if declared
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    /// Declared links, in declaration order
    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    /// Executor for this model's queries
    ///
    /// # Errors
    ///
    /// Returns a connection error while a deferred connection is unresolved.
    pub fn connection(&self) -> Result<Executor> {
        self.connection.get().ok_or_else(|| {
            DatabaseError::connection(format!(
                "connection for table `{}` is not resolved yet",
                self.table_name
            ))
        })
    }

    /// Primary key field, or a configuration error naming `operation`
    pub fn require_primary_key(&self, operation: &str) -> Result<&str> {
        self.primary_key().ok_or_else(|| {
            DatabaseError::configuration(format!(
                "{operation} is not available for model {} without primary key",
                self.model.name()
            ))
        })
    }
}

/// Connection handed to a registration
pub enum ConnectionSource {
    /// Usable immediately
    Ready(Executor),
    /// Delivered later through a [`ConnectionResolver`]
    Deferred(DeferredConnection),
}

impl From<Executor> for ConnectionSource {
    fn from(executor: Executor) -> Self {
        ConnectionSource::Ready(executor)
    }
}

impl From<DeferredConnection> for ConnectionSource {
    fn from(deferred: DeferredConnection) -> Self {
        ConnectionSource::Deferred(deferred)
    }
}

/// Receiving half of a connection that is not established yet
#[derive(Debug)]
pub struct DeferredConnection {
    receiver: oneshot::Receiver<Executor>,
}

/// Sending half of a [`DeferredConnection`]
#[derive(Debug)]
pub struct ConnectionResolver {
    sender: oneshot::Sender<Executor>,
}

impl DeferredConnection {
    /// Create a deferred connection and the resolver that completes it
    pub fn new() -> (Self, ConnectionResolver) {
        let (sender, receiver) = oneshot::channel();
        (Self { receiver }, ConnectionResolver { sender })
    }
}

impl ConnectionResolver {
    /// Deliver the executor to the waiting binding
    ///
    /// # Errors
    ///
    /// Fails if the binding holding the deferred connection was dropped.
    pub fn resolve(self, executor: Executor) -> Result<()> {
        self.sender
            .send(executor)
            .map_err(|_| DatabaseError::connection("deferred connection was dropped"))
    }
}

#[derive(Debug)]
struct ConnectionSlot {
    resolved: OnceCell<Executor>,
    pending: Mutex<Option<oneshot::Receiver<Executor>>>,
}

impl ConnectionSlot {
    fn new(source: ConnectionSource) -> Self {
        match source {
            ConnectionSource::Ready(executor) => Self {
                resolved: OnceCell::with_value(executor),
                pending: Mutex::new(None),
            },
            ConnectionSource::Deferred(deferred) => Self {
                resolved: OnceCell::new(),
                pending: Mutex::new(Some(deferred.receiver)),
            },
        }
    }

    fn get(&self) -> Option<Executor> {
        if let Some(executor) = self.resolved.get() {
            return Some(executor.clone());
        }

        let mut pending = self.pending.lock();
        let receiver = pending.as_mut()?;
        let executor = receiver.try_recv().ok()?;
        *pending = None;
        Some(self.resolved.get_or_init(|| executor).clone())
    }
}

/// Per-registration builder collecting the primary key and links of `M`
pub struct ModelBuilder<M: 'static> {
    connection: ConnectionSource,
    table_name: String,
    primary_key: Option<String>,
    links: Vec<LinkSpec>,
    _model: PhantomData<fn() -> M>,
}

/// Start registering model `M` against `table_name`
pub fn model<M: 'static>(
    connection: impl Into<ConnectionSource>,
    table_name: impl Into<String>,
) -> ModelBuilder<M> {
    ModelBuilder {
        connection: connection.into(),
        table_name: table_name.into(),
        primary_key: None,
        links: Vec::new(),
        _model: PhantomData,
    }
}

impl<M: 'static> ModelBuilder<M> {
    /// Mark `field` as the primary key
    #[must_use]
    pub fn primary(mut self, field: impl Into<String>) -> Self {
        self.primary_key = Some(field.into());
        self
    }

    /// Declare that `foreign_key` references `D`, resolved into `property`
    #[must_use]
    pub fn link<D: 'static>(mut self, property: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        self.links.push(LinkSpec {
            foreign_key: foreign_key.into(),
            destination: ModelId::of::<D>(),
            source: ModelId::of::<M>(),
            property: property.into(),
        });
        self
    }

    /// Materialize the binding and publish it in the registry
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `M` is already registered.
    pub fn register(self) -> Result<Arc<TableBinding>> {
        let model = ModelId::of::<M>();
        let binding = Arc::new(TableBinding {
            model,
            table_name: self.table_name,
            primary_key: self.primary_key,
            links: self.links,
            connection: ConnectionSlot::new(self.connection),
        });

        let mut registry = REGISTRY.write();
        if registry.contains_key(&model.type_id()) {
            return Err(DatabaseError::configuration(format!(
                "model {} is already registered",
                model.name()
            )));
        }
        registry.insert(model.type_id(), Arc::clone(&binding));
        drop(registry);

        tracing::debug!(
            model = model.name(),
            table = binding.table_name(),
            links = binding.links().len(),
            "model registered"
        );
        Ok(binding)
    }
}

/// Binding registered for `model`
///
/// # Errors
///
/// Returns a configuration error if the model was never registered.
pub fn lookup(model: ModelId) -> Result<Arc<TableBinding>> {
    REGISTRY
        .read()
        .get(&model.type_id())
        .cloned()
        .ok_or_else(|| {
            DatabaseError::configuration(format!(
                "model {} is not registered; call model::<{}>(connection, table).register() first",
                model.name(),
                model.name()
            ))
        })
}

/// Binding registered for `M`
pub fn binding_of<M: 'static>() -> Result<Arc<TableBinding>> {
    lookup(ModelId::of::<M>())
}

/// Whether `M` has been registered
pub fn is_registered<M: 'static>() -> bool {
    REGISTRY.read().contains_key(&TypeId::of::<M>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::RecordingDatabase;

    fn executor() -> Executor {
        Executor::new(Arc::new(RecordingDatabase::new()))
    }

    #[test]
    fn test_register_and_lookup() -> Result<()> {
        struct Account;

        let binding = model::<Account>(executor(), "account").primary("id").register()?;
        assert_eq!(binding.table_name(), "account");
        assert_eq!(binding.primary_key(), Some("id"));
        assert_eq!(binding.model().name(), "Account");

        let found = binding_of::<Account>()?;
        assert!(Arc::ptr_eq(&binding, &found));
        assert!(is_registered::<Account>());
        Ok(())
    }

    #[test]
    fn test_unregistered_lookup_fails() {
        struct Nowhere;
        let err = binding_of::<Nowhere>().expect_err("not registered");
        assert!(matches!(err, DatabaseError::Configuration(_)));
    }

    #[test]
    fn test_model_name_drops_generic_arguments() {
        struct Plain;
        struct Wrapper<T>(T);
        struct Pair<A, B>(A, B);

        assert_eq!(ModelId::of::<Plain>().name(), "Plain");
        assert_eq!(ModelId::of::<Wrapper<String>>().name(), "Wrapper");
        assert_eq!(ModelId::of::<Pair<Wrapper<u8>, Vec<i32>>>().name(), "Pair");
        assert_ne!(ModelId::of::<Wrapper<u8>>(), ModelId::of::<Wrapper<u16>>());
    }

    #[test]
    fn test_duplicate_registration_fails() -> Result<()> {
        struct Twice;
        model::<Twice>(executor(), "twice").register()?;
        let err = model::<Twice>(executor(), "twice")
            .register()
            .expect_err("duplicate");
        assert!(matches!(err, DatabaseError::Configuration(_)));
        Ok(())
    }

    #[test]
    fn test_links_keep_declaration_order() -> Result<()> {
        struct Owner;
        struct Editor;
        struct Document;

        let binding = model::<Document>(executor(), "document")
            .primary("id")
            .link::<Owner>("owner", "owner_id")
            .link::<Editor>("editor", "editor_id")
            .register()?;

        let links = binding.links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].property, "owner");
        assert_eq!(links[0].destination, ModelId::of::<Owner>());
        assert_eq!(links[0].source, ModelId::of::<Document>());
        assert_eq!(links[1].foreign_key, "editor_id");
        Ok(())
    }

    #[test]
    fn test_link_validation_requires_primary_key() -> Result<()> {
        struct Keyless;
        struct Holder;

        model::<Keyless>(executor(), "keyless").register()?;
        let binding = model::<Holder>(executor(), "holder")
            .link::<Keyless>("target", "target_id")
            .register()?;

        let err = binding.links()[0].validate().expect_err("no primary key");
        assert!(matches!(err, DatabaseError::LinkIntegrity { .. }));
        Ok(())
    }

    #[test]
    fn test_deferred_connection_resolves_later() -> Result<()> {
        struct Later;

        let (deferred, resolver) = DeferredConnection::new();
        let binding = model::<Later>(deferred, "later").register()?;

        let err = binding.connection().expect_err("not resolved");
        assert!(matches!(err, DatabaseError::ConnectionError(_)));

        resolver.resolve(executor())?;
        assert!(binding.connection().is_ok());
        assert!(binding.connection().is_ok());
        Ok(())
    }

    #[test]
    fn test_require_primary_key_names_operation() -> Result<()> {
        struct NoKey;
        let binding = model::<NoKey>(executor(), "no_key").register()?;
        let err = binding.require_primary_key("get").expect_err("no key");
        assert_eq!(
            err.to_string(),
            "Configuration error: get is not available for model NoKey without primary key"
        );
        Ok(())
    }
}
