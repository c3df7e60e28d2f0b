use entitygen_store::EntityClass;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

/// Process-local cache preventing redundant regeneration of the same named
/// type. Keyed by (namespace, name); a class is registered only after a
/// successful write + materialization, so a failed generation leaves the
/// registry untouched.
///
/// The map itself is lock-guarded, but the surrounding check-then-generate
/// sequence is not serialized per name; callers running generations
/// concurrently for the same name must serialize externally.
#[derive(Debug, Default)]
pub struct Registry {
    classes: Mutex<HashMap<(String, String), Arc<EntityClass>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry instance
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn lookup(&self, namespace: &str, name: &str) -> Option<Arc<EntityClass>> {
        self.classes
            .lock()
            .expect("registry lock poisoned")
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn register(&self, class: Arc<EntityClass>) {
        self.classes
            .lock()
            .expect("registry lock poisoned")
            .insert((class.namespace.clone(), class.name.clone()), class);
    }

    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.lookup(namespace, name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_after_register() {
        let registry = Registry::new();
        let class = Arc::new(EntityClass::new("ns.registry_test", "Thing", vec![]));

        assert!(registry.lookup("ns.registry_test", "Thing").is_none());

        registry.register(class.clone());
        let found = registry.lookup("ns.registry_test", "Thing").expect("Missing class");
        assert_eq!(found.name, "Thing");
    }

    #[test]
    fn test_namespaces_are_distinct() {
        let registry = Registry::new();
        registry.register(Arc::new(EntityClass::new("ns.a", "Thing", vec![])));

        assert!(registry.contains("ns.a", "Thing"));
        assert!(!registry.contains("ns.b", "Thing"));
    }
}
