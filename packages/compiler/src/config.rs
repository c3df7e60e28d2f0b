use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "entitygen.config.json";

/// Generation configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Namespace the generated types are registered under
    #[serde(default = "default_namespace")]
    pub output_namespace: String,

    /// Directory generated source files are written to
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Root searched for interface source files
    #[serde(default = "default_interface_path")]
    pub interface_search_path: PathBuf,
}

fn default_namespace() -> String {
    "entities".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("entities")
}

fn default_interface_path() -> PathBuf {
    PathBuf::from("interfaces")
}

impl BuilderConfig {
    pub fn new(
        output_namespace: impl Into<String>,
        output_path: impl Into<PathBuf>,
        interface_search_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            output_namespace: output_namespace.into(),
            output_path: output_path.into(),
            interface_search_path: interface_search_path.into(),
        }
    }

    /// Load config from a directory, falling back to defaults if absent
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: BuilderConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(BuilderConfig::default())
        }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            output_namespace: default_namespace(),
            output_path: default_output_path(),
            interface_search_path: default_interface_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "outputNamespace": "app.entities",
            "outputPath": "src/entities",
            "interfaceSearchPath": "src/interfaces"
        }"#;

        let config: BuilderConfig = serde_json::from_str(json).expect("Failed to parse config");

        assert_eq!(config.output_namespace, "app.entities");
        assert_eq!(config.output_path, PathBuf::from("src/entities"));
        assert_eq!(config.interface_search_path, PathBuf::from("src/interfaces"));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: BuilderConfig = serde_json::from_str("{}").expect("Failed to parse config");

        assert_eq!(config.output_namespace, "entities");
        assert_eq!(config.output_path, PathBuf::from("entities"));
    }
}
