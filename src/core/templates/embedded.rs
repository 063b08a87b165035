//! Built-in templates bundled into the binary.
//!
//! The `templates/` directory is embedded at compile time with `rust-embed`.
//! Resource templates live at `{kind}/{name}.json`, so the built-in set is
//! discovered by scanning embedded paths; adding a file is enough to ship a new
//! built-in. Source templates used by the emitter live under `source/`.
//!
//! | path                          | kind          | name             |
//! |-------------------------------|---------------|------------------|
//! | `item/basic.json`             | `item`        | `basic`          |
//! | `item/block.json`             | `item`        | `block`          |
//! | `block/basic.json`            | `block`       | `basic`          |
//! | `block_state/basic.json`      | `block_state` | `basic`          |
//! | `loot/drop_self.json`         | `loot`        | `drop_self`      |
//! | `loot/drop_self_silk.json`    | `loot`        | `drop_self_silk` |
//! | `loot/drop_other.json`        | `loot`        | `drop_other`     |

use std::str::FromStr;

use rust_embed::RustEmbed;
use tracing::debug;

use super::{Template, TemplateKind, TemplateOrigin};
use crate::core::error::{Error, Result};

/// Path of the bundled registrar source template
pub const REGISTRAR_TEMPLATE_PATH: &str = "source/registrar.java.tera";

/// Container for all templates embedded at compile time.
#[derive(RustEmbed)]
#[folder = "templates/"]
pub struct EmbeddedTemplates;

/// Read access to the embedded templates
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateRepository;

impl EmbeddedTemplateRepository {
    pub fn new() -> Self {
        Self
    }

    /// Parse an embedded path of the form `{kind}/{name}.json`.
    ///
    /// Returns `None` for anything else (source templates, nested paths,
    /// unknown kinds).
    fn parse_resource_path(path: &str) -> Option<(TemplateKind, &str)> {
        let (kind, file) = path.split_once('/')?;
        if file.contains('/') {
            return None;
        }
        let name = file.strip_suffix(".json")?;
        let kind = TemplateKind::from_str(kind).ok()?;
        Some((kind, name))
    }

    /// Read an embedded file as UTF-8
    pub fn read(&self, path: &str) -> Result<String> {
        let file = EmbeddedTemplates::get(path)
            .ok_or_else(|| Error::template(format!("Built-in template not found: {path}")))?;

        String::from_utf8(file.data.into_owned()).map_err(|e| {
            Error::template(format!("Built-in template {path} is not valid UTF-8: {e}"))
        })
    }

    /// Load every built-in resource template for `namespace`, sorted by path
    pub fn load_builtins(&self, namespace: &str) -> Result<Vec<Template>> {
        let mut paths: Vec<String> = EmbeddedTemplates::iter()
            .map(|path| path.into_owned())
            .collect();
        paths.sort();

        let mut templates = Vec::new();
        for path in &paths {
            let Some((kind, name)) = Self::parse_resource_path(path) else {
                continue;
            };
            let body = self.read(path)?;
            debug!(kind = %kind, name = name, "Loaded built-in template");
            templates.push(Template::new(
                name,
                kind,
                &body,
                namespace,
                TemplateOrigin::Builtin,
            ));
        }

        Ok(templates)
    }

    /// The bundled tera template for registrar sources
    pub fn registrar_template(&self) -> Result<String> {
        self.read(REGISTRAR_TEMPLATE_PATH)
    }
}
