//! Declaration model produced by the host analysis pass.
//!
//! One [`ContainerDecl`] per registration container, with its fields and
//! methods and the annotation data attached to them. A [`DeclarationSet`]
//! bundles the containers of one run and can be read from YAML, TOML or JSON.

pub mod container;
pub mod member;
pub mod validate;
pub mod values;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

pub use container::{ContainerDecl, ContainerDefaultsDecl, TemplateDecl};
pub use member::{
    BlockAnnotation, CallbackRole, DeclaredType, FieldDecl, ItemAnnotation, MethodDecl,
    Visibility,
};
pub use validate::{AnnotatedBlock, AnnotatedItem, Callbacks, ValidatedMembers, validate_members};
pub use values::{AutoItem, FieldRef, INHERIT_MARKER, ItemGroupRef, TemplateRef};

/// All containers of one generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationSet {
    #[serde(default)]
    pub containers: Vec<ContainerDecl>,
}

impl DeclarationSet {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load declarations from a file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading declarations");

        let content = std::fs::read_to_string(path)?;
        let set = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => {
                return Err(Error::config(format!(
                    "Unsupported declaration format: {}",
                    path.display()
                )));
            }
        };

        debug!(container_count = set.containers.len(), "Loaded declarations");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TOML: &str = r#"
[[containers]]
owner = "com.example.ModBlocks"
namespace = "examplemod"

[containers.defaults]
block = "basic"
loot = "drop_self"

[[containers.fields]]
name = "COPPER_ORE"
type = "block"

[containers.fields.register_block]
id = "copper_ore"
"#;

    #[test]
    fn test_from_toml_str() {
        let set = DeclarationSet::from_toml_str(TOML).unwrap();
        assert_eq!(set.containers.len(), 1);

        let container = &set.containers[0];
        assert_eq!(container.defaults.block, TemplateRef::named("basic"));
        let annotation = container.fields[0].register_block.as_ref().unwrap();
        assert_eq!(annotation.model, TemplateRef::Inherit);
    }

    #[test]
    fn test_from_json_str() {
        let set = DeclarationSet::from_json_str(
            r#"{"containers": [{"owner": "ModItems", "namespace": "examplemod",
                "fields": [{"name": "INGOT", "type": "item",
                            "register_item": {"id": "ingot", "model": "basic"}}]}]}"#,
        )
        .unwrap();

        let item = set.containers[0].fields[0].register_item.as_ref().unwrap();
        assert_eq!(item.model, TemplateRef::named("basic"));
    }

    #[test]
    fn test_yaml_write_and_reload_keeps_meaning() {
        let set = DeclarationSet {
            containers: vec![
                ContainerDecl::new("com.example.ModBlocks", "examplemod")
                    .with_defaults(ContainerDefaultsDecl {
                        item_group: ItemGroupRef::field("com.example.Groups", "MAIN"),
                        ..ContainerDefaultsDecl::builtin()
                    })
                    .with_field(FieldDecl::block(
                        "HIDDEN",
                        BlockAnnotation {
                            model: TemplateRef::None,
                            auto_block_item: AutoItem::False,
                            item_group: ItemGroupRef::Void,
                            loot_args: vec!["a".to_string(), "b".to_string()],
                            ..BlockAnnotation::new("hidden")
                        },
                    ))
                    .with_field(FieldDecl::block(
                        "SHOWN",
                        BlockAnnotation {
                            auto_block_item: AutoItem::True,
                            ..BlockAnnotation::new("shown")
                        },
                    ))
                    .with_field(FieldDecl::block("PLAIN", BlockAnnotation::new("plain")))
                    .with_method(MethodDecl::callback("done", CallbackRole::PostRegister)),
            ],
        };

        let yaml = serde_yaml::to_string(&set).unwrap();
        let reloaded = DeclarationSet::from_yaml_str(&yaml).unwrap();

        assert_eq!(reloaded, set, "{yaml}");
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempdir().unwrap();
        let toml_path = dir.path().join("decls.toml");
        std::fs::write(&toml_path, TOML).unwrap();
        assert_eq!(DeclarationSet::load(&toml_path).unwrap().containers.len(), 1);

        let yaml_path = dir.path().join("decls.yaml");
        std::fs::write(&yaml_path, "containers: []").unwrap();
        assert!(DeclarationSet::load(&yaml_path).unwrap().containers.is_empty());

        let other = dir.path().join("decls.txt");
        std::fs::write(&other, "").unwrap();
        assert!(matches!(DeclarationSet::load(&other), Err(Error::Config(_))));
    }
}
