use crate::classifier::{classify, AccessorPlan};
use crate::compiler::{render, GeneratedClass};
use crate::config::BuilderConfig;
use crate::error::{BuildError, BuildResult};
use crate::inflector;
use crate::registry::Registry;
use entitygen_common::{FileSystem, RealFileSystem};
use entitygen_parser::ast::{Import, Span};
use entitygen_parser::{parse_interface, upsert_import};
use entitygen_store::{Accessor, AccessorKind, Entity, EntityClass};
use std::sync::Arc;
use tracing::{debug, info};

/// Extension of interface source files
pub const INTERFACE_EXT: &str = "iface";

const INTERFACE_SUFFIX: &str = "Interface";
const BASE_STORE_REF: &str = "entitygen_store.EntityStore";

/// Orchestrates one generation request: registry check, interface
/// discovery, parse, classify, render, write, materialize.
pub struct Builder {
    config: BuilderConfig,
    filesystem: Box<dyn FileSystem>,
}

impl Builder {
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_filesystem(config, Box::new(RealFileSystem))
    }

    pub fn with_filesystem(config: BuilderConfig, filesystem: Box<dyn FileSystem>) -> Self {
        Self { config, filesystem }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Generate the data holder for `interface_path` (a dotted reference or
    /// bare interface name) and return a default-constructed live instance.
    ///
    /// Generation is idempotent and at-most-once per (namespace, name) per
    /// process lifetime: a registry hit skips discovery, rendering and the
    /// file write entirely. Concurrent calls for the same name are not
    /// serialized here; callers must do that themselves.
    pub fn from_interface(&mut self, interface_path: &str) -> BuildResult<Entity> {
        let interface_name = short_name(interface_path);
        let entity_name = interface_name
            .strip_suffix(INTERFACE_SUFFIX)
            .unwrap_or(interface_name);

        if let Some(class) = Registry::global().lookup(&self.config.output_namespace, entity_name) {
            debug!(
                namespace = %self.config.output_namespace,
                name = %entity_name,
                "reusing materialized type"
            );
            return Ok(class.instantiate());
        }

        let source = self.find_interface_source(interface_name)?;
        let spec = parse_interface(&source, interface_name)?;
        let plans = classify(&spec);
        debug!(
            interface = %interface_name,
            methods = spec.methods.len(),
            accessors = plans.iter().filter(|p| !matches!(p, AccessorPlan::Unsupported)).count(),
            "classified interface"
        );

        let mut imports = spec.imports.clone();
        upsert_import(&mut imports, synthetic_import(BASE_STORE_REF, None));
        upsert_import(
            &mut imports,
            synthetic_import(interface_path, Some("EntityInterface")),
        );

        let generated = GeneratedClass {
            name: entity_name.to_string(),
            namespace: self.config.output_namespace.clone(),
            base_type_ref: BASE_STORE_REF.to_string(),
            interface_ref: interface_path.to_string(),
            imports,
            accessors: plans,
        };

        let contents = render(&generated);
        let file_path = self
            .config
            .output_path
            .join(format!("{}.rs", entity_name));

        self.filesystem
            .write(&file_path, &contents)
            .map_err(|source| BuildError::Write {
                path: file_path.clone(),
                source,
            })?;
        info!(path = %file_path.display(), "wrote generated entity");

        let class = Arc::new(materialize(&generated));
        Registry::global().register(class.clone());

        Ok(class.instantiate())
    }

    fn find_interface_source(&self, interface_name: &str) -> BuildResult<String> {
        let file_name = format!("{}.{}", interface_name, INTERFACE_EXT);
        let path = self
            .filesystem
            .find_file(&self.config.interface_search_path, &file_name)
            .ok_or_else(|| BuildError::InterfaceNotFound {
                name: interface_name.to_string(),
                root: self.config.interface_search_path.clone(),
            })?;

        Ok(self.filesystem.read_to_string(&path)?)
    }
}

/// Build the runtime accessor table from the same plans the renderer saw
fn materialize(generated: &GeneratedClass) -> EntityClass {
    let accessors = generated
        .accessors
        .iter()
        .filter_map(|plan| match plan {
            AccessorPlan::Setter { attribute, param } => Some(Accessor {
                method_name: format!("set{}", inflector::to_suffix(attribute)),
                kind: AccessorKind::Setter,
                attribute: attribute.clone(),
                storage_key: inflector::to_storage_key(attribute),
                type_name: param.type_name.clone(),
                nullable: param.nullable,
            }),
            AccessorPlan::Getter {
                attribute,
                return_type,
            } => Some(Accessor {
                method_name: format!("get{}", inflector::to_suffix(attribute)),
                kind: AccessorKind::Getter,
                attribute: attribute.clone(),
                storage_key: inflector::to_storage_key(attribute),
                type_name: return_type.type_name.clone(),
                nullable: return_type.nullable,
            }),
            AccessorPlan::Unsupported => None,
        })
        .collect();

    EntityClass::new(
        generated.namespace.clone(),
        generated.name.clone(),
        accessors,
    )
}

/// Bare name of a dotted reference: `a.b.PersonInterface` -> `PersonInterface`
fn short_name(interface_path: &str) -> &str {
    interface_path
        .rsplit('.')
        .next()
        .unwrap_or(interface_path)
}

fn synthetic_import(path: &str, alias: Option<&str>) -> Import {
    Import {
        path: path.to_string(),
        alias: alias.map(|a| a.to_string()),
        span: Span::new(0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("a.b.PersonInterface"), "PersonInterface");
        assert_eq!(short_name("PersonInterface"), "PersonInterface");
    }
}
