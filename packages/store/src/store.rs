use crate::error::{StoreError, StoreResult};
use crate::policy::AccessPolicy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered keyed core shared by [`EntityStore`] and [`ValueStore`].
///
/// Key order is insertion order; overwriting an existing key keeps its
/// original position, and removal preserves the order of the remaining keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreCore {
    entries: IndexMap<String, Value>,
    policy: AccessPolicy,
}

impl StoreCore {
    fn set(&mut self, key: &str, value: Value) -> StoreResult<()> {
        if self.policy.values_locked() {
            return Err(StoreError::locked_values(key));
        }
        if self.policy.attributes_locked() && !self.entries.contains_key(key) {
            return Err(StoreError::locked_attributes(key));
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<&Value> {
        self.entries
            .get(key)
            .ok_or_else(|| StoreError::missing_key(key))
    }

    fn remove(&mut self, key: &str) -> StoreResult<Value> {
        if self.policy.values_locked() {
            return Err(StoreError::locked_values(key));
        }
        if self.policy.attributes_locked() {
            return Err(StoreError::locked_attributes(key));
        }
        self.entries
            .shift_remove(key)
            .ok_or_else(|| StoreError::missing_key(key))
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get_all(&self) -> IndexMap<String, Value> {
        self.entries.clone()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// The lock-aware, insertion-ordered keyed runtime store backing generated
/// instances. Carries two independent escalating immutability modes:
/// `lock_values` freezes every value, `lock_attributes` freezes the key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    core: StoreCore,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated in iteration order
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut store = Self::new();
        for (key, value) in entries {
            store.core.entries.insert(key.into(), value.into());
        }
        store
    }

    /// Insert or overwrite `key`, preserving its original insertion
    /// position on overwrite. Fluent.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> StoreResult<&mut Self> {
        self.core.set(key, value.into())?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> StoreResult<&Value> {
        self.core.get(key)
    }

    pub fn remove(&mut self, key: &str) -> StoreResult<Value> {
        self.core.remove(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.core.exists(key)
    }

    /// Insertion-ordered snapshot of all entries
    pub fn get_all(&self) -> IndexMap<String, Value> {
        self.core.get_all()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Forbid value changes and removals. Idempotent, monotonic. Fluent.
    pub fn lock_values(&mut self) -> &mut Self {
        self.core.policy.lock_values();
        self
    }

    /// Forbid introducing new keys; existing keys may still change unless
    /// values are also locked. Idempotent, monotonic. Fluent.
    pub fn lock_attributes(&mut self) -> &mut Self {
        self.core.policy.lock_attributes();
        self
    }

    pub fn is_values_locked(&self) -> bool {
        self.core.policy.values_locked()
    }

    pub fn is_attributes_locked(&self) -> bool {
        self.core.policy.attributes_locked()
    }
}

/// Simplified single-flag store: one `lock()` gates both mutation classes
/// uniformly. `set` fails regardless of whether the key pre-exists, and
/// `remove` fails; missing-key semantics are identical to [`EntityStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueStore {
    core: StoreCore,
}

impl ValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> StoreResult<&mut Self> {
        self.core.set(key, value.into())?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> StoreResult<&Value> {
        self.core.get(key)
    }

    pub fn remove(&mut self, key: &str) -> StoreResult<Value> {
        self.core.remove(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.core.exists(key)
    }

    pub fn get_all(&self) -> IndexMap<String, Value> {
        self.core.get_all()
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.core.len() == 0
    }

    /// Make the store immutable. Idempotent, monotonic. Fluent.
    pub fn lock(&mut self) -> &mut Self {
        self.core.policy.lock_all();
        self
    }

    pub fn is_locked(&self) -> bool {
        self.core.policy.values_locked()
    }
}
