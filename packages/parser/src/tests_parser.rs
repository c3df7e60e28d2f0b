use crate::ast::*;
use crate::error::ParseError;
use crate::parser::parse_interface;

const PERSON_SOURCE: &str = r#"
import fixtures.ObjectCollection as Collection
import fixtures.StdClass

interface PersonInterface {
    setDad(value: StdClass) -> self

    setId(value: int) -> self
    getId() -> ?int
    setName(value: string) -> self
    getName() -> ?string
    setLastName(value: string) -> self
    getLastName() -> ?string
    setAge(value: int) -> self
    getAge() -> ?int
    setMom(value: Collection) -> self
    getMom() -> ?Collection
    getDad() -> ?StdClass
}
"#;

#[test]
fn test_parse_person_interface() {
    let spec = parse_interface(PERSON_SOURCE, "PersonInterface").expect("Failed to parse");

    assert_eq!(spec.name, "PersonInterface");
    assert_eq!(spec.methods.len(), 12);

    // Methods come out in source order
    assert_eq!(spec.methods[0].name, "setDad");
    assert_eq!(spec.methods[1].name, "setId");
    assert_eq!(spec.methods[11].name, "getDad");
}

#[test]
fn test_imports_keep_order_and_alias() {
    let spec = parse_interface(PERSON_SOURCE, "PersonInterface").expect("Failed to parse");

    assert_eq!(spec.imports.len(), 2);
    assert_eq!(spec.imports[0].path, "fixtures.ObjectCollection");
    assert_eq!(spec.imports[0].alias.as_deref(), Some("Collection"));
    assert_eq!(spec.imports[1].path, "fixtures.StdClass");
    assert_eq!(spec.imports[1].alias, None);
}

#[test]
fn test_repeated_import_keeps_position_and_latest_alias() {
    let source = r#"
import fixtures.StdClass
import fixtures.ObjectCollection
import fixtures.StdClass as Std

interface ThingInterface {
    getThing() -> ?Std
}
"#;
    let spec = parse_interface(source, "ThingInterface").expect("Failed to parse");

    assert_eq!(spec.imports.len(), 2);
    assert_eq!(spec.imports[0].path, "fixtures.StdClass");
    assert_eq!(spec.imports[0].alias.as_deref(), Some("Std"));
    assert_eq!(spec.imports[1].path, "fixtures.ObjectCollection");
}

#[test]
fn test_setter_param_type_resolution() {
    let spec = parse_interface(PERSON_SOURCE, "PersonInterface").expect("Failed to parse");

    let set_id = &spec.methods[1];
    assert_eq!(set_id.params.len(), 1);
    assert_eq!(set_id.params[0].name, "value");
    assert_eq!(set_id.params[0].type_spec, TypeSpec::named("int"));
    assert!(set_id.return_type.is_self());
}

#[test]
fn test_nullable_return_type() {
    let spec = parse_interface(PERSON_SOURCE, "PersonInterface").expect("Failed to parse");

    let get_id = &spec.methods[2];
    assert!(get_id.params.is_empty());
    assert_eq!(get_id.return_type, TypeSpec::nullable("int"));
}

#[test]
fn test_nullability_is_explicit_not_inferred() {
    // Setter param non-nullable, getter return nullable, independent of
    // each other even for the same attribute.
    let spec = parse_interface(PERSON_SOURCE, "PersonInterface").expect("Failed to parse");

    let set_dad = &spec.methods[0];
    assert!(!set_dad.params[0].type_spec.nullable);

    let get_dad = &spec.methods[11];
    assert!(get_dad.return_type.nullable);
    assert_eq!(get_dad.return_type.type_name, "StdClass");
}

#[test]
fn test_untyped_param_and_return() {
    let source = r#"
interface ThingInterface {
    setNote(value) -> self
    getNote()
}
"#;
    let spec = parse_interface(source, "ThingInterface").expect("Failed to parse");

    assert!(spec.methods[0].params[0].type_spec.is_untyped());
    assert!(spec.methods[1].return_type.is_untyped());
}

#[test]
fn test_param_default_literals() {
    let source = r#"
interface ThingInterface {
    setName(value: string = "unknown") -> self
    setCount(value: int = 0) -> self
    setFlag(value: bool = true) -> self
    setExtra(value = null) -> self
}
"#;
    let spec = parse_interface(source, "ThingInterface").expect("Failed to parse");

    assert_eq!(
        spec.methods[0].params[0].default,
        Some(Literal::String {
            value: "unknown".to_string()
        })
    );
    assert_eq!(
        spec.methods[1].params[0].default,
        Some(Literal::Number { value: 0.0 })
    );
    assert_eq!(
        spec.methods[2].params[0].default,
        Some(Literal::Boolean { value: true })
    );
    assert_eq!(spec.methods[3].params[0].default, Some(Literal::Null));
}

#[test]
fn test_multi_param_method_parses() {
    // Arity is a classification concern, not a parse error.
    let source = r#"
interface ThingInterface {
    setRange(low: int, high: int) -> self
}
"#;
    let spec = parse_interface(source, "ThingInterface").expect("Failed to parse");

    assert_eq!(spec.methods[0].params.len(), 2);
}

#[test]
fn test_dotted_type_resolves_to_last_segment() {
    let source = r#"
interface ThingInterface {
    setMom(value: fixtures.ObjectCollection) -> self
}
"#;
    let spec = parse_interface(source, "ThingInterface").expect("Failed to parse");

    assert_eq!(spec.methods[0].params[0].type_spec.type_name, "ObjectCollection");
}

#[test]
fn test_other_interfaces_are_skipped() {
    let source = r#"
interface OtherInterface {
    setSomething(value: int) -> self
}

interface TargetInterface {
    getThing() -> ?int
}
"#;
    let spec = parse_interface(source, "TargetInterface").expect("Failed to parse");

    assert_eq!(spec.name, "TargetInterface");
    assert_eq!(spec.methods.len(), 1);
    assert_eq!(spec.methods[0].name, "getThing");
}

#[test]
fn test_missing_interface_is_not_found() {
    let result = parse_interface(PERSON_SOURCE, "MissingInterface");

    assert_eq!(
        result,
        Err(ParseError::not_found("MissingInterface"))
    );
}

#[test]
fn test_malformed_method_declaration() {
    let source = r#"
interface BrokenInterface {
    setId value int
}
"#;
    let result = parse_interface(source, "BrokenInterface");

    assert!(matches!(result, Err(ParseError::Malformed { .. })));
}

#[test]
fn test_unclosed_interface_body() {
    let source = "interface BrokenInterface { setId(value: int) -> self";
    let result = parse_interface(source, "BrokenInterface");

    assert!(matches!(result, Err(ParseError::Malformed { .. })));
}

#[test]
fn test_empty_interface() {
    let spec = parse_interface("interface EmptyInterface {}", "EmptyInterface")
        .expect("Failed to parse");

    assert!(spec.methods.is_empty());
    assert!(spec.imports.is_empty());
}
