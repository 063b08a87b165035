//! Filesystem loader for user templates.
//!
//! Custom templates declared on a container name a file relative to the
//! configured template directory. Absolute paths are used as-is.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Template, TemplateKind, TemplateOrigin};

/// Loads user template files from a root directory
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    root_dir: PathBuf,
}

impl TemplateLoader {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Resolve a declared template file against the root directory
    pub fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    /// Read `file` and build a template named `name` for `namespace`
    pub fn load(
        &self,
        name: &str,
        kind: TemplateKind,
        file: &str,
        namespace: &str,
    ) -> io::Result<Template> {
        let path = self.resolve(file);
        debug!(path = %path.display(), name = name, kind = %kind, "Loading user template");

        let body = std::fs::read_to_string(&path)?;
        Ok(Template::new(
            name,
            kind,
            &body,
            namespace,
            TemplateOrigin::File(path),
        ))
    }
}

impl Default for TemplateLoader {
    fn default() -> Self {
        Self::new(".")
    }
}
