use crate::error::{StoreError, StoreResult};
use crate::store::EntityStore;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// How one generated accessor behaves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AccessorKind {
    Setter,
    Getter,
}

/// One entry of a materialized type's accessor table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    /// Generated method name, e.g. `setId`
    pub method_name: String,
    pub kind: AccessorKind,
    /// Attribute suffix shared by the setter/getter pair, e.g. `Id`
    pub attribute: String,
    /// Store key the accessor delegates to, e.g. `id`
    pub storage_key: String,
    /// Declared type name; empty means untyped
    pub type_name: String,
    pub nullable: bool,
}

/// Materialized-type handle held by the generation registry. Accessor
/// behavior is fully determined by this table and the store contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityClass {
    pub namespace: String,
    pub name: String,
    pub accessors: Vec<Accessor>,
}

impl EntityClass {
    pub fn new(
        namespace: impl Into<String>,
        name: impl Into<String>,
        accessors: Vec<Accessor>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            accessors,
        }
    }

    /// Look up an accessor by its generated method name
    pub fn accessor(&self, method_name: &str) -> Option<&Accessor> {
        self.accessors
            .iter()
            .find(|accessor| accessor.method_name == method_name)
    }

    /// Default-construct a live instance of this type
    pub fn instantiate(self: Arc<Self>) -> Entity {
        Entity::new(self)
    }
}

pub type CallResult<T> = Result<T, CallError>;

/// Errors of the dynamic accessor dispatch surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Unknown method '{method}' on {class}")]
    UnknownMethod { class: String, method: String },

    #[error("Method '{method}' expects {expected} argument(s), got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Live instance of a generated type: a shared class handle plus an
/// exclusively owned store. The public surface is the accessor dispatch
/// and the delegated keyed operations.
#[derive(Debug, Clone)]
pub struct Entity {
    class: Arc<EntityClass>,
    store: EntityStore,
}

impl Entity {
    pub fn new(class: Arc<EntityClass>) -> Self {
        Self {
            class,
            store: EntityStore::new(),
        }
    }

    pub fn class(&self) -> &EntityClass {
        &self.class
    }

    /// Dispatch a generated accessor by method name.
    ///
    /// Setters take exactly one argument, write through to the store and
    /// return `Value::Null` (the generated source returns the owning
    /// instance fluently; dynamic dispatch has nothing more to say).
    /// Nullable getters read an absent key as `Value::Null`; non-nullable
    /// getters propagate the store's missing-key error.
    pub fn call(&mut self, method: &str, args: Vec<Value>) -> CallResult<Value> {
        let accessor = match self.class.accessor(method) {
            Some(accessor) => accessor.clone(),
            None => {
                return Err(CallError::UnknownMethod {
                    class: self.class.name.clone(),
                    method: method.to_string(),
                });
            }
        };

        match accessor.kind {
            AccessorKind::Setter => {
                let got = args.len();
                let mut args = args.into_iter();
                match (args.next(), args.next()) {
                    (Some(value), None) => {
                        self.store.set(&accessor.storage_key, value)?;
                        Ok(Value::Null)
                    }
                    _ => Err(CallError::Arity {
                        method: method.to_string(),
                        expected: 1,
                        got,
                    }),
                }
            }
            AccessorKind::Getter => {
                if !args.is_empty() {
                    return Err(CallError::Arity {
                        method: method.to_string(),
                        expected: 0,
                        got: args.len(),
                    });
                }
                if accessor.nullable && !self.store.exists(&accessor.storage_key) {
                    return Ok(Value::Null);
                }
                Ok(self.store.get(&accessor.storage_key)?.clone())
            }
        }
    }

    // Delegated store surface

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> StoreResult<&mut Self> {
        self.store.set(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> StoreResult<&Value> {
        self.store.get(key)
    }

    pub fn remove(&mut self, key: &str) -> StoreResult<Value> {
        self.store.remove(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.store.exists(key)
    }

    pub fn get_all(&self) -> IndexMap<String, Value> {
        self.store.get_all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn lock_values(&mut self) -> &mut Self {
        self.store.lock_values();
        self
    }

    pub fn lock_attributes(&mut self) -> &mut Self {
        self.store.lock_attributes();
        self
    }
}
