use crate::builder::Builder;
use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::registry::Registry;
use entitygen_common::{FileSystem, MockFileSystem};
use entitygen_parser::ParseError;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

const PERSON_SOURCE: &str = r#"
import fixtures.StdClass

interface PersonInterface {
    setId(value: int) -> self
    getId() -> ?int
    setName(value: string) -> self
    getName() -> ?string
    setLastName(value: string) -> self
    setDad(value: StdClass) -> self
    getDad() -> ?StdClass
    setRange(low: int, high: int) -> self
}
"#;

/// File system that accepts reads but refuses every write
struct ReadOnlyFileSystem {
    inner: MockFileSystem,
}

impl FileSystem for ReadOnlyFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, std::io::Error> {
        self.inner.read_to_string(path)
    }

    fn write(&mut self, _path: &Path, _contents: &str) -> Result<(), std::io::Error> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only file system",
        ))
    }

    fn find_file(&self, root: &Path, file_name: &str) -> Option<PathBuf> {
        self.inner.find_file(root, file_name)
    }
}

fn mock_builder(namespace: &str, source: &str) -> Builder {
    let mut filesystem = MockFileSystem::new();
    filesystem.add_file(
        PathBuf::from("/virtual/interfaces/PersonInterface.iface"),
        source,
    );

    let config = BuilderConfig::new(namespace, "/virtual/entities", "/virtual/interfaces");
    Builder::with_filesystem(config, Box::new(filesystem))
}

#[test]
fn test_generation_returns_live_instance() {
    let mut builder = mock_builder("e2e.roundtrip", PERSON_SOURCE);

    let mut entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    entity.call("setId", vec![json!(10)]).expect("Failed to call setId");
    assert_eq!(entity.call("getId", vec![]).unwrap(), json!(10));
}

#[test]
fn test_fresh_instance_nullable_getter_is_null() {
    let mut builder = mock_builder("e2e.fresh_null", PERSON_SOURCE);

    let mut first = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");
    first.call("setId", vec![json!(10)]).unwrap();

    // A second default-constructed instance starts empty
    let mut second = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");
    assert_eq!(second.call("getId", vec![]).unwrap(), Value::Null);
}

#[test]
fn test_get_all_matches_set_sequence_in_order() {
    let mut builder = mock_builder("e2e.get_all", PERSON_SOURCE);

    let mut entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    entity.call("setId", vec![json!(10)]).unwrap();
    entity.call("setName", vec![json!("Bob")]).unwrap();
    entity.call("setLastName", vec![json!("Baum")]).unwrap();

    let all = entity.get_all();
    let keys: Vec<String> = all.keys().cloned().collect();
    assert_eq!(keys, vec!["id", "name", "last_name"]);
    assert_eq!(all.get("id"), Some(&json!(10)));
    assert_eq!(all.get("last_name"), Some(&json!("Baum")));
}

#[test]
fn test_setter_and_getter_nullability_are_independent() {
    let mut builder = mock_builder("e2e.nullability", PERSON_SOURCE);

    let mut entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    // Nullable getter reads as null before the non-nullable setter ran
    assert_eq!(entity.call("getDad", vec![]).unwrap(), Value::Null);

    let dad = json!({"name": "papa"});
    entity.call("setDad", vec![dad.clone()]).unwrap();
    assert_eq!(entity.call("getDad", vec![]).unwrap(), dad);

    let class = entity.class();
    let setter = class.accessor("setDad").expect("Missing setter");
    let getter = class.accessor("getDad").expect("Missing getter");
    assert!(!setter.nullable);
    assert!(getter.nullable);
}

#[test]
fn test_multi_param_method_is_excluded_silently() {
    let mut builder = mock_builder("e2e.unsupported", PERSON_SOURCE);

    let mut entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    assert!(entity.class().accessor("setRange").is_none());
    assert!(entity.call("setRange", vec![json!(1), json!(2)]).is_err());
}

#[test]
fn test_generated_file_is_written() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let interfaces = dir.path().join("interfaces");
    let entities = dir.path().join("entities");
    std::fs::create_dir_all(&interfaces).unwrap();
    std::fs::write(interfaces.join("PersonInterface.iface"), PERSON_SOURCE).unwrap();

    let config = BuilderConfig::new("e2e.on_disk", &entities, &interfaces);
    let mut builder = Builder::new(config);

    builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    let generated = entities.join("Person.rs");
    let contents = std::fs::read_to_string(&generated).expect("Missing generated file");

    println!("Generated source:\n{}", contents);

    assert!(contents.contains("pub struct Person {"));
    assert!(contents.contains("pub fn setId(&mut self, id: i64) -> StoreResult<&mut Self> {"));
    assert!(contents.contains("pub fn getDad(&self) -> StoreResult<Option<Value>> {"));
    assert!(contents.contains("use fixtures::StdClass;"));
    assert!(contents.contains("use fixtures::interfaces::PersonInterface as EntityInterface;"));
    // The multi-param method contributes nothing
    assert!(!contents.contains("setRange"));
}

#[test]
fn test_second_generation_does_not_rewrite_the_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let interfaces = dir.path().join("interfaces");
    let entities = dir.path().join("entities");
    std::fs::create_dir_all(&interfaces).unwrap();
    std::fs::write(interfaces.join("PersonInterface.iface"), PERSON_SOURCE).unwrap();

    let config = BuilderConfig::new("e2e.idempotent", &entities, &interfaces);
    let mut builder = Builder::new(config);

    builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    // Remove the artifact; a registry hit must not write it again
    std::fs::remove_file(entities.join("Person.rs")).unwrap();

    let mut entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    assert!(!entities.join("Person.rs").exists());
    entity.call("setId", vec![json!(1)]).unwrap();
    assert_eq!(entity.call("getId", vec![]).unwrap(), json!(1));
}

#[test]
fn test_missing_interface_file() {
    let mut builder = mock_builder("e2e.missing_file", PERSON_SOURCE);

    let result = builder.from_interface("fixtures.interfaces.GhostInterface");

    assert!(matches!(
        result,
        Err(BuildError::InterfaceNotFound { .. })
    ));
    assert!(!Registry::global().contains("e2e.missing_file", "Ghost"));
}

#[test]
fn test_interface_missing_from_source_leaves_registry_clean() {
    // The file exists but declares a different interface
    let mut filesystem = MockFileSystem::new();
    filesystem.add_file(
        PathBuf::from("/virtual/interfaces/WrongInterface.iface"),
        "interface OtherInterface { getId() -> ?int }",
    );
    let config = BuilderConfig::new("e2e.wrong_name", "/virtual/entities", "/virtual/interfaces");
    let mut builder = Builder::with_filesystem(config, Box::new(filesystem));

    let result = builder.from_interface("fixtures.interfaces.WrongInterface");

    assert!(matches!(
        result,
        Err(BuildError::Parse(ParseError::NotFound { .. }))
    ));
    assert!(!Registry::global().contains("e2e.wrong_name", "Wrong"));
}

#[test]
fn test_failed_write_aborts_and_leaves_registry_clean() {
    let mut inner = MockFileSystem::new();
    inner.add_file(
        PathBuf::from("/virtual/interfaces/PersonInterface.iface"),
        PERSON_SOURCE,
    );
    let config = BuilderConfig::new("e2e.failed_write", "/virtual/entities", "/virtual/interfaces");
    let mut builder =
        Builder::with_filesystem(config, Box::new(ReadOnlyFileSystem { inner }));

    let result = builder.from_interface("fixtures.interfaces.PersonInterface");

    assert!(matches!(result, Err(BuildError::Write { .. })));
    assert!(!Registry::global().contains("e2e.failed_write", "Person"));

    // A retry against a writable file system starts from a clean state
    let mut retry = mock_builder("e2e.failed_write", PERSON_SOURCE);
    let entity = retry
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Retry after failed write must succeed");
    assert_eq!(entity.class().name, "Person");
}

#[test]
fn test_entity_name_strips_interface_suffix() {
    let mut builder = mock_builder("e2e.naming", PERSON_SOURCE);

    let entity = builder
        .from_interface("fixtures.interfaces.PersonInterface")
        .expect("Failed to generate");

    assert_eq!(entity.class().name, "Person");
    assert_eq!(entity.class().namespace, "e2e.naming");
}
