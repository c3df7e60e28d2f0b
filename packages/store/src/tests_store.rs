use crate::collection::EntityCollection;
use crate::entity::{Accessor, AccessorKind, CallError, Entity, EntityClass};
use crate::error::StoreError;
use crate::store::{EntityStore, ValueStore};
use serde_json::{json, Value};
use std::sync::Arc;

#[test]
fn test_set_and_get_simple_values() {
    let mut store = EntityStore::new();
    store
        .set("name", "Test name")
        .expect("Failed to set")
        .set("int", 12345670)
        .expect("Failed to set")
        .set("float", 12345.29)
        .expect("Failed to set");

    assert_eq!(store.get("name").unwrap(), &json!("Test name"));
    assert_eq!(store.get("int").unwrap(), &json!(12345670));
    assert_eq!(store.get("float").unwrap(), &json!(12345.29));
}

#[test]
fn test_get_all_preserves_insertion_order() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.set("banana", "yellow").unwrap();

    let all = store.get_all();
    let keys: Vec<&String> = all.keys().collect();
    assert_eq!(keys, vec!["apple", "banana"]);
    assert_eq!(all.get("apple"), Some(&json!("green")));
    assert_eq!(all.get("banana"), Some(&json!("yellow")));
}

#[test]
fn test_overwrite_keeps_original_position() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.set("banana", "yellow").unwrap();
    store.set("apple", "red").unwrap();

    let keys: Vec<String> = store.get_all().keys().cloned().collect();
    assert_eq!(keys, vec!["apple", "banana"]);
    assert_eq!(store.get("apple").unwrap(), &json!("red"));
}

#[test]
fn test_remove_deletes_key_and_keeps_order() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.set("banana", "yellow").unwrap();

    store.remove("apple").expect("Failed to remove");
    let keys: Vec<String> = store.get_all().keys().cloned().collect();
    assert_eq!(keys, vec!["banana"]);

    store.remove("banana").expect("Failed to remove");
    assert!(store.get_all().is_empty());
}

#[test]
fn test_exists() {
    let mut store = EntityStore::new();
    store.set("kiwi", "green").unwrap();
    store.set("orange", "orange").unwrap();

    assert!(store.exists("kiwi"));
    assert!(store.exists("orange"));
    assert!(!store.exists("banana"));
}

#[test]
fn test_get_missing_key_fails() {
    let mut store = EntityStore::new();
    store.set("kiwi", "green").unwrap();

    assert_eq!(
        store.get("banana"),
        Err(StoreError::missing_key("banana"))
    );
}

#[test]
fn test_remove_missing_key_fails() {
    let mut store = EntityStore::new();
    store.set("kiwi", "green").unwrap();

    assert_eq!(
        store.remove("banana"),
        Err(StoreError::missing_key("banana"))
    );
}

#[test]
fn test_count() {
    let mut store = EntityStore::new();
    assert_eq!(store.len(), 0);
    assert!(store.is_empty());

    store.set("apple", "green").unwrap();
    store.set("kiwi", "green").unwrap();
    assert_eq!(store.len(), 2);
}

#[test]
fn test_with_entries_constructor() {
    let store = EntityStore::with_entries([("apple", "green"), ("banana", "yellow")]);

    let keys: Vec<String> = store.get_all().keys().cloned().collect();
    assert_eq!(keys, vec!["apple", "banana"]);
}

#[test]
fn test_unlocked_by_default() {
    let store = EntityStore::new();
    assert!(!store.is_values_locked());
    assert!(!store.is_attributes_locked());
}

#[test]
fn test_lock_values_blocks_set_on_any_key() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_values();

    assert!(store.is_values_locked());
    assert_eq!(
        store.set("apple", "red").err(),
        Some(StoreError::locked_values("apple"))
    );
    assert_eq!(
        store.set("banana", "yellow").err(),
        Some(StoreError::locked_values("banana"))
    );
}

#[test]
fn test_lock_values_blocks_remove_but_not_get() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_values();

    assert_eq!(
        store.remove("apple").err(),
        Some(StoreError::locked_values("apple"))
    );
    // Reads stay valid after locking
    assert_eq!(store.get("apple").unwrap(), &json!("green"));
}

#[test]
fn test_lock_attributes_allows_existing_key_update() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_attributes();

    store.set("apple", "red").expect("Existing key must stay writable");
    assert_eq!(store.get("apple").unwrap(), &json!("red"));
}

#[test]
fn test_lock_attributes_blocks_new_key() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_attributes();

    assert_eq!(
        store.set("banana", "yellow").err(),
        Some(StoreError::locked_attributes("banana"))
    );
}

#[test]
fn test_lock_attributes_blocks_remove() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_attributes();

    assert_eq!(
        store.remove("apple").err(),
        Some(StoreError::locked_attributes("apple"))
    );
}

#[test]
fn test_values_lock_takes_precedence_over_attributes_lock() {
    let mut store = EntityStore::new();
    store.set("apple", "green").unwrap();
    store.lock_values();
    store.lock_attributes();

    assert_eq!(
        store.remove("apple").err(),
        Some(StoreError::locked_values("apple"))
    );
}

#[test]
fn test_value_store_lock_blocks_set_uniformly() {
    let mut store = ValueStore::new();
    store.set("apple", "green").unwrap();
    store.lock();

    assert!(store.is_locked());
    // Existing and new keys are blocked alike
    assert!(matches!(
        store.set("apple", "red"),
        Err(StoreError::LockedValues { .. })
    ));
    assert!(matches!(
        store.set("banana", "yellow"),
        Err(StoreError::LockedValues { .. })
    ));
}

#[test]
fn test_value_store_lock_blocks_remove() {
    let mut store = ValueStore::new();
    store.set("apple", "green").unwrap();
    store.lock();

    assert!(store.remove("apple").is_err());
    assert_eq!(store.get("apple").unwrap(), &json!("green"));
}

#[test]
fn test_value_store_missing_key_semantics() {
    let mut store = ValueStore::new();
    store.set("kiwi", "green").unwrap();

    assert_eq!(store.get("banana"), Err(StoreError::missing_key("banana")));
    assert_eq!(store.remove("banana"), Err(StoreError::missing_key("banana")));
}

fn person_class() -> Arc<EntityClass> {
    Arc::new(EntityClass::new(
        "fixtures.entities",
        "Person",
        vec![
            Accessor {
                method_name: "setId".to_string(),
                kind: AccessorKind::Setter,
                attribute: "Id".to_string(),
                storage_key: "id".to_string(),
                type_name: "int".to_string(),
                nullable: false,
            },
            Accessor {
                method_name: "getId".to_string(),
                kind: AccessorKind::Getter,
                attribute: "Id".to_string(),
                storage_key: "id".to_string(),
                type_name: "int".to_string(),
                nullable: true,
            },
            Accessor {
                method_name: "setLastName".to_string(),
                kind: AccessorKind::Setter,
                attribute: "LastName".to_string(),
                storage_key: "last_name".to_string(),
                type_name: "string".to_string(),
                nullable: false,
            },
            Accessor {
                method_name: "getAge".to_string(),
                kind: AccessorKind::Getter,
                attribute: "Age".to_string(),
                storage_key: "age".to_string(),
                type_name: "int".to_string(),
                nullable: false,
            },
        ],
    ))
}

#[test]
fn test_entity_setter_then_getter_roundtrip() {
    let mut entity = person_class().instantiate();

    entity.call("setId", vec![json!(10)]).expect("Failed to call setter");
    let value = entity.call("getId", vec![]).expect("Failed to call getter");

    assert_eq!(value, json!(10));
}

#[test]
fn test_entity_nullable_getter_reads_absent_key_as_null() {
    let mut entity = person_class().instantiate();

    let value = entity.call("getId", vec![]).expect("Failed to call getter");
    assert_eq!(value, Value::Null);
}

#[test]
fn test_entity_non_nullable_getter_propagates_missing_key() {
    let mut entity = person_class().instantiate();

    let result = entity.call("getAge", vec![]);
    assert_eq!(
        result,
        Err(CallError::Store(StoreError::missing_key("age")))
    );
}

#[test]
fn test_entity_setter_writes_storage_key() {
    let mut entity = person_class().instantiate();

    entity.call("setLastName", vec![json!("Baum")]).expect("Failed to call setter");

    assert!(entity.exists("last_name"));
    assert_eq!(entity.get("last_name").unwrap(), &json!("Baum"));
}

#[test]
fn test_entity_unknown_method() {
    let mut entity = person_class().instantiate();

    let result = entity.call("setNothing", vec![json!(1)]);
    assert!(matches!(result, Err(CallError::UnknownMethod { .. })));
}

#[test]
fn test_entity_setter_arity_checked() {
    let mut entity = person_class().instantiate();

    assert!(matches!(
        entity.call("setId", vec![]),
        Err(CallError::Arity { expected: 1, .. })
    ));
    assert!(matches!(
        entity.call("setId", vec![json!(1), json!(2)]),
        Err(CallError::Arity { expected: 1, .. })
    ));
}

#[test]
fn test_entity_get_all_matches_set_sequence() {
    let mut entity = person_class().instantiate();
    entity.call("setId", vec![json!(10)]).unwrap();
    entity.call("setLastName", vec![json!("Baum")]).unwrap();

    let all = entity.get_all();
    let keys: Vec<String> = all.keys().cloned().collect();
    assert_eq!(keys, vec!["id", "last_name"]);
    assert_eq!(all.get("id"), Some(&json!(10)));
    assert_eq!(all.get("last_name"), Some(&json!("Baum")));
}

#[test]
fn test_entity_respects_store_locks() {
    let mut entity = person_class().instantiate();
    entity.call("setId", vec![json!(10)]).unwrap();
    entity.lock_values();

    let result = entity.call("setId", vec![json!(20)]);
    assert!(matches!(
        result,
        Err(CallError::Store(StoreError::LockedValues { .. }))
    ));
    // Reads still work
    assert_eq!(entity.call("getId", vec![]).unwrap(), json!(10));
}

#[test]
fn test_collection_order_and_access() {
    let class = person_class();
    let mut collection = EntityCollection::new();

    let mut first = class.clone().instantiate();
    first.call("setId", vec![json!(1)]).unwrap();
    let mut second = class.clone().instantiate();
    second.call("setId", vec![json!(2)]).unwrap();

    collection.add(first).add(second);

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.first().unwrap().get("id").unwrap(), &json!(1));
    assert_eq!(collection.last().unwrap().get("id").unwrap(), &json!(2));
    assert_eq!(collection.get(1).unwrap().get("id").unwrap(), &json!(2));
}

#[test]
fn test_collection_remove_shifts() {
    let class = person_class();
    let mut collection: EntityCollection = (1..=3)
        .map(|i| {
            let mut entity = class.clone().instantiate();
            entity.call("setId", vec![json!(i)]).unwrap();
            entity
        })
        .collect();

    let removed = collection.remove(0).expect("Failed to remove");
    assert_eq!(removed.get("id").unwrap(), &json!(1));
    assert_eq!(collection.len(), 2);
    assert_eq!(collection.first().unwrap().get("id").unwrap(), &json!(2));

    assert!(collection.remove(5).is_none());
}

#[test]
fn test_collection_iteration_in_order() {
    let class = person_class();
    let mut collection = EntityCollection::new();
    for i in 0..3 {
        let mut entity = class.clone().instantiate();
        entity.call("setId", vec![json!(i)]).unwrap();
        collection.add(entity);
    }

    let ids: Vec<Value> = collection
        .iter()
        .map(|entity| entity.get("id").unwrap().clone())
        .collect();
    assert_eq!(ids, vec![json!(0), json!(1), json!(2)]);
}

#[test]
fn test_collection_clear() {
    let class = person_class();
    let mut collection = EntityCollection::new();
    collection.add(class.instantiate());

    collection.clear();
    assert!(collection.is_empty());
}
