use crate::classifier::AccessorPlan;
use crate::context::CodegenContext;
use crate::inflector;
use entitygen_parser::ast::{Import, TypeSpec};
use serde::{Deserialize, Serialize};

/// Rendered once per generation; write-once artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedClass {
    pub name: String,
    pub namespace: String,
    pub base_type_ref: String,
    pub interface_ref: String,
    pub imports: Vec<Import>,
    pub accessors: Vec<AccessorPlan>,
}

/// Render the generated source for a class. Deterministic: the output is
/// fully determined by the accessor plans and the import list.
pub fn render(class: &GeneratedClass) -> String {
    let mut ctx = CodegenContext::new();

    render_header(class, &mut ctx);
    render_imports(class, &mut ctx);
    render_struct(class, &mut ctx);
    render_impl(class, &mut ctx);

    ctx.into_output()
}

fn render_header(class: &GeneratedClass, ctx: &mut CodegenContext) {
    ctx.add_line("//! Generated by entitygen. Do not edit.");
    ctx.add_line("//!");
    ctx.add_line(&format!("//! Namespace: {}", class.namespace));
    ctx.add_line(&format!("//! Extends: {}", class.base_type_ref));
    ctx.add_line(&format!("//! Implements: {}", class.interface_ref));
    ctx.blank_line();
}

fn render_imports(class: &GeneratedClass, ctx: &mut CodegenContext) {
    for import in &class.imports {
        let path = import.path.replace('.', "::");
        match &import.alias {
            Some(alias) => ctx.add_line(&format!("use {} as {};", path, alias)),
            None => ctx.add_line(&format!("use {};", path)),
        }
    }

    // Runtime prelude for the accessor bodies
    ctx.add_line("use entitygen_store::StoreResult;");
    ctx.add_line("use indexmap::IndexMap;");
    ctx.add_line("use serde_json::Value;");
    ctx.blank_line();
}

fn render_struct(class: &GeneratedClass, ctx: &mut CodegenContext) {
    ctx.add_line(&format!("/// Class {}", class.name));
    ctx.add_line("///");
    ctx.add_line("/// Data holder for `EntityInterface`, backed by a lock-aware keyed store.");
    ctx.add_line("#[derive(Debug, Clone, Default)]");
    ctx.add_line(&format!("pub struct {} {{", class.name));
    ctx.indent();
    ctx.add_line("store: EntityStore,");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
}

fn render_impl(class: &GeneratedClass, ctx: &mut CodegenContext) {
    ctx.add_line("#[allow(non_snake_case)]");
    ctx.add_line(&format!("impl {} {{", class.name));
    ctx.indent();

    ctx.add_line("pub fn new() -> Self {");
    ctx.indent();
    ctx.add_line("Self::default()");
    ctx.dedent();
    ctx.add_line("}");

    for plan in &class.accessors {
        match plan {
            AccessorPlan::Setter { attribute, param } => {
                ctx.blank_line();
                render_setter(attribute, param, ctx);
            }
            AccessorPlan::Getter {
                attribute,
                return_type,
            } => {
                ctx.blank_line();
                render_getter(attribute, return_type, ctx);
            }
            // Excluded from the generated surface, not an error
            AccessorPlan::Unsupported => {}
        }
    }

    render_store_surface(ctx);

    ctx.dedent();
    ctx.add_line("}");
}

fn render_setter(attribute: &str, param: &TypeSpec, ctx: &mut CodegenContext) {
    let suffix = inflector::to_suffix(attribute);
    let key = inflector::to_storage_key(attribute);
    let param_name = inflector::to_param_name(attribute);

    ctx.add_line(&format!(
        "/// Sets `{}` (`{}`). Fluent.",
        key,
        display_type(param)
    ));
    ctx.add_line(&format!(
        "pub fn set{}(&mut self, {}: {}) -> StoreResult<&mut Self> {{",
        suffix,
        param_name,
        rust_type(param)
    ));
    ctx.indent();
    ctx.add_line(&format!(
        "self.store.set(\"{}\", Value::from({}))?;",
        key, param_name
    ));
    ctx.add_line("Ok(self)");
    ctx.dedent();
    ctx.add_line("}");
}

fn render_getter(attribute: &str, return_type: &TypeSpec, ctx: &mut CodegenContext) {
    let suffix = inflector::to_suffix(attribute);
    let key = inflector::to_storage_key(attribute);

    if return_type.nullable {
        ctx.add_line(&format!(
            "/// Returns `{}` (`{}`), or `None` when unset.",
            key,
            display_type(return_type)
        ));
        ctx.add_line(&format!(
            "pub fn get{}(&self) -> StoreResult<Option<Value>> {{",
            suffix
        ));
        ctx.indent();
        ctx.add_line(&format!("if !self.store.exists(\"{}\") {{", key));
        ctx.indent();
        ctx.add_line("return Ok(None);");
        ctx.dedent();
        ctx.add_line("}");
        ctx.add_line(&format!("Ok(Some(self.store.get(\"{}\")?.clone()))", key));
        ctx.dedent();
        ctx.add_line("}");
    } else {
        ctx.add_line(&format!(
            "/// Returns `{}` (`{}`).",
            key,
            display_type(return_type)
        ));
        ctx.add_line(&format!(
            "pub fn get{}(&self) -> StoreResult<Value> {{",
            suffix
        ));
        ctx.indent();
        ctx.add_line(&format!("Ok(self.store.get(\"{}\")?.clone())", key));
        ctx.dedent();
        ctx.add_line("}");
    }
}

fn render_store_surface(ctx: &mut CodegenContext) {
    ctx.blank_line();
    ctx.add_line("// Keyed store surface");
    ctx.blank_line();
    ctx.add_line("pub fn set(&mut self, name: &str, value: impl Into<Value>) -> StoreResult<&mut Self> {");
    ctx.indent();
    ctx.add_line("self.store.set(name, value)?;");
    ctx.add_line("Ok(self)");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line("pub fn get(&self, name: &str) -> StoreResult<&Value> {");
    ctx.indent();
    ctx.add_line("self.store.get(name)");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line("pub fn remove(&mut self, name: &str) -> StoreResult<Value> {");
    ctx.indent();
    ctx.add_line("self.store.remove(name)");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line("pub fn exists(&self, name: &str) -> bool {");
    ctx.indent();
    ctx.add_line("self.store.exists(name)");
    ctx.dedent();
    ctx.add_line("}");
    ctx.blank_line();
    ctx.add_line("pub fn getAll(&self) -> IndexMap<String, Value> {");
    ctx.indent();
    ctx.add_line("self.store.get_all()");
    ctx.dedent();
    ctx.add_line("}");
}

/// Runtime type for a declared type: scalars map to native types, named
/// and untyped declarations are held as raw values.
fn rust_type(type_spec: &TypeSpec) -> String {
    let base = match type_spec.type_name.as_str() {
        "int" => "i64",
        "float" => "f64",
        "string" => "String",
        "bool" => "bool",
        _ => "Value",
    };

    if type_spec.nullable {
        format!("Option<{}>", base)
    } else {
        base.to_string()
    }
}

/// Declared type as written in the interface, for doc comments
fn display_type(type_spec: &TypeSpec) -> String {
    let name = if type_spec.type_name.is_empty() {
        "mixed"
    } else {
        type_spec.type_name.as_str()
    };

    if type_spec.nullable {
        format!("?{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitygen_parser::ast::Span;

    fn import(path: &str, alias: Option<&str>) -> Import {
        Import {
            path: path.to_string(),
            alias: alias.map(|a| a.to_string()),
            span: Span::new(0, 0),
        }
    }

    fn person_class() -> GeneratedClass {
        GeneratedClass {
            name: "Person".to_string(),
            namespace: "test.entities".to_string(),
            base_type_ref: "entitygen_store.EntityStore".to_string(),
            interface_ref: "test.interfaces.PersonInterface".to_string(),
            imports: vec![
                import("fixtures.ObjectCollection", Some("Collection")),
                import("entitygen_store.EntityStore", None),
                import("test.interfaces.PersonInterface", Some("EntityInterface")),
            ],
            accessors: vec![
                AccessorPlan::Setter {
                    attribute: "Id".to_string(),
                    param: TypeSpec::named("int"),
                },
                AccessorPlan::Getter {
                    attribute: "Id".to_string(),
                    return_type: TypeSpec::nullable("int"),
                },
                AccessorPlan::Setter {
                    attribute: "LastName".to_string(),
                    param: TypeSpec::named("string"),
                },
                AccessorPlan::Unsupported,
            ],
        }
    }

    #[test]
    fn test_render_struct_and_header() {
        let output = render(&person_class());

        println!("Generated source:\n{}", output);

        assert!(output.contains("//! Namespace: test.entities"));
        assert!(output.contains("//! Extends: entitygen_store.EntityStore"));
        assert!(output.contains("//! Implements: test.interfaces.PersonInterface"));
        assert!(output.contains("pub struct Person {"));
        assert!(output.contains("store: EntityStore,"));
    }

    #[test]
    fn test_render_imports_with_alias() {
        let output = render(&person_class());

        assert!(output.contains("use fixtures::ObjectCollection as Collection;"));
        assert!(output.contains("use entitygen_store::EntityStore;"));
        assert!(output.contains("use test::interfaces::PersonInterface as EntityInterface;"));
    }

    #[test]
    fn test_render_typed_setter() {
        let output = render(&person_class());

        assert!(output.contains("pub fn setId(&mut self, id: i64) -> StoreResult<&mut Self> {"));
        assert!(output.contains("self.store.set(\"id\", Value::from(id))?;"));
        assert!(output.contains("Ok(self)"));
    }

    #[test]
    fn test_render_snake_case_storage_key() {
        let output = render(&person_class());

        assert!(output.contains("pub fn setLastName(&mut self, lastName: String)"));
        assert!(output.contains("self.store.set(\"last_name\", Value::from(lastName))?;"));
    }

    #[test]
    fn test_render_nullable_getter_maps_absent_to_none() {
        let output = render(&person_class());

        assert!(output.contains("pub fn getId(&self) -> StoreResult<Option<Value>> {"));
        assert!(output.contains("if !self.store.exists(\"id\") {"));
        assert!(output.contains("return Ok(None);"));
    }

    #[test]
    fn test_render_non_nullable_getter() {
        let class = GeneratedClass {
            accessors: vec![AccessorPlan::Getter {
                attribute: "Age".to_string(),
                return_type: TypeSpec::named("int"),
            }],
            ..person_class()
        };
        let output = render(&class);

        assert!(output.contains("pub fn getAge(&self) -> StoreResult<Value> {"));
        assert!(!output.contains("Option<Value>"));
    }

    #[test]
    fn test_unsupported_plan_is_not_rendered() {
        let output = render(&person_class());

        // The multi-param method contributes nothing
        assert_eq!(output.matches("pub fn set").count(), 3); // setId, setLastName, set
    }

    #[test]
    fn test_render_store_surface() {
        let output = render(&person_class());

        assert!(output.contains("pub fn getAll(&self) -> IndexMap<String, Value> {"));
        assert!(output.contains("pub fn exists(&self, name: &str) -> bool {"));
        assert!(output.contains("pub fn remove(&mut self, name: &str) -> StoreResult<Value> {"));
    }

    #[test]
    fn test_nullable_setter_param() {
        let class = GeneratedClass {
            accessors: vec![AccessorPlan::Setter {
                attribute: "Nick".to_string(),
                param: TypeSpec::nullable("string"),
            }],
            ..person_class()
        };
        let output = render(&class);

        assert!(output.contains("pub fn setNick(&mut self, nick: Option<String>)"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let class = person_class();
        assert_eq!(render(&class), render(&class));
    }
}
