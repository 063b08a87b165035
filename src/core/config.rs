//! Generator configuration.
//!
//! A [`Config`] controls where user templates are read from, where the
//! filesystem sink writes, how the registrar type is named and rendered, and
//! which framework types the emitted registration code refers to. It can be
//! built in code (`Config::default()` plus struct update syntax) or loaded
//! from a `.toml`, `.yml` or `.yaml` file.
//!
//! ```toml
//! template_dir = "src/main/templates"
//! resource_dir = "build/generated/resources"
//! source_dir = "build/generated/sources"
//! registrar_suffix = "Registrar"
//!
//! [types]
//! registry = "net.minecraft.util.registry.Registry"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// Top-level generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory that custom template `file` entries are resolved against
    pub template_dir: Option<PathBuf>,

    /// Root directory the filesystem sink writes resources under
    pub resource_dir: PathBuf,

    /// Root directory the filesystem sink writes generated sources under
    pub source_dir: PathBuf,

    /// Appended to the container's simple type name to name the registrar
    pub registrar_suffix: String,

    /// Optional tera template replacing the bundled registrar template
    pub registrar_template: Option<PathBuf>,

    /// Warn when a rendered `.json` resource does not parse
    pub validate_json: bool,

    /// Framework types referenced by emitted registration code
    pub types: GameTypes,
}

/// Fully-qualified framework type names used in generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTypes {
    pub registry: String,
    pub identifier: String,
    pub item: String,
    pub block_item: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: None,
            resource_dir: PathBuf::from("generated/resources"),
            source_dir: PathBuf::from("generated/sources"),
            registrar_suffix: String::from("Registrar"),
            registrar_template: None,
            validate_json: true,
            types: GameTypes::default(),
        }
    }
}

impl Default for GameTypes {
    fn default() -> Self {
        Self {
            registry: String::from("net.minecraft.util.registry.Registry"),
            identifier: String::from("net.minecraft.util.Identifier"),
            item: String::from("net.minecraft.item.Item"),
            block_item: String::from("net.minecraft.item.BlockItem"),
        }
    }
}

impl Config {
    /// Parse a TOML configuration document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML configuration document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading generator configuration");

        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("yml") | Some("yaml") => Self::from_yaml_str(&content),
            _ => Err(Error::config(format!(
                "Unsupported configuration format: {}",
                path.display()
            ))),
        }
    }

    /// Checks values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.registrar_suffix.is_empty() {
            return Err(Error::config("registrar_suffix cannot be empty"));
        }

        for (field, value) in [
            ("types.registry", &self.types.registry),
            ("types.identifier", &self.types.identifier),
            ("types.item", &self.types.item),
            ("types.block_item", &self.types.block_item),
        ] {
            if value.is_empty() {
                return Err(Error::config(format!("{field} cannot be empty")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.template_dir.is_none());
        assert_eq!(config.registrar_suffix, "Registrar");
        assert!(config.validate_json);
        assert_eq!(config.types.block_item, "net.minecraft.item.BlockItem");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml_keeps_unset_defaults() {
        let config = Config::from_toml_str(
            r#"
template_dir = "templates"
registrar_suffix = "Init"

[types]
registry = "net.minecraft.registry.Registries"
"#,
        )
        .unwrap();

        assert_eq!(config.template_dir, Some(PathBuf::from("templates")));
        assert_eq!(config.registrar_suffix, "Init");
        assert_eq!(config.types.registry, "net.minecraft.registry.Registries");
        // Untouched fields fall back to their defaults
        assert_eq!(config.types.identifier, "net.minecraft.util.Identifier");
        assert_eq!(config.resource_dir, PathBuf::from("generated/resources"));
    }

    #[test]
    fn test_config_rejects_empty_suffix() {
        let result = Config::from_yaml_str("registrar_suffix: \"\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_config_load_by_extension() {
        let dir = tempdir().unwrap();

        let yaml_path = dir.path().join("modgen.yml");
        std::fs::write(&yaml_path, "validate_json: false\n").unwrap();
        let config = Config::load(&yaml_path).unwrap();
        assert!(!config.validate_json);

        let ini_path = dir.path().join("modgen.ini");
        std::fs::write(&ini_path, "validate_json=false").unwrap();
        assert!(Config::load(&ini_path).is_err());
    }
}
