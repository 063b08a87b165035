//! Output sinks for generated artifacts.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::Config;
use crate::core::utils::package_to_path;

/// Destination for generated resources and sources
pub trait ResourceSink {
    /// Write a resource file `file_name` into the dotted `package`
    fn create_resource(&mut self, package: &str, file_name: &str, contents: &str)
    -> io::Result<()>;

    /// Write the source of type `type_name` into the dotted `package`
    fn create_source(&mut self, package: &str, type_name: &str, contents: &str) -> io::Result<()>;
}

/// Sink writing under a resource root and a source root on disk
///
/// Package dots become directories; sources are written as `<type>.java`.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    resource_root: PathBuf,
    source_root: PathBuf,
}

impl FileSystemSink {
    pub fn new(resource_root: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            resource_root: resource_root.into(),
            source_root: source_root.into(),
        }
    }

    /// Sink rooted at the configured output directories
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.resource_dir, &config.source_dir)
    }

    pub fn resource_root(&self) -> &Path {
        &self.resource_root
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    fn write(path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                io::Error::new(
                    e.kind(),
                    format!("Failed to create directory {}: {e}", parent.display()),
                )
            })?;
        }

        std::fs::write(path, contents).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to write file {}: {e}", path.display()),
            )
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
        Ok(())
    }
}

impl ResourceSink for FileSystemSink {
    fn create_resource(
        &mut self,
        package: &str,
        file_name: &str,
        contents: &str,
    ) -> io::Result<()> {
        let path = self
            .resource_root
            .join(package_to_path(package))
            .join(file_name);
        Self::write(&path, contents)
    }

    fn create_source(&mut self, package: &str, type_name: &str, contents: &str) -> io::Result<()> {
        let path = self
            .source_root
            .join(package_to_path(package))
            .join(format!("{type_name}.java"));
        Self::write(&path, contents)
    }
}

/// In-memory sink keyed by `(package, name)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    resources: BTreeMap<(String, String), String>,
    sources: BTreeMap<(String, String), String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(&self, package: &str, file_name: &str) -> Option<&str> {
        self.resources
            .get(&(package.to_string(), file_name.to_string()))
            .map(String::as_str)
    }

    pub fn source(&self, package: &str, type_name: &str) -> Option<&str> {
        self.sources
            .get(&(package.to_string(), type_name.to_string()))
            .map(String::as_str)
    }

    /// All resources as `(package, file_name, contents)`, ordered
    pub fn resources(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.resources
            .iter()
            .map(|((package, name), contents)| (package.as_str(), name.as_str(), contents.as_str()))
    }

    /// All sources as `(package, type_name, contents)`, ordered
    pub fn sources(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.sources
            .iter()
            .map(|((package, name), contents)| (package.as_str(), name.as_str(), contents.as_str()))
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

impl ResourceSink for MemorySink {
    fn create_resource(
        &mut self,
        package: &str,
        file_name: &str,
        contents: &str,
    ) -> io::Result<()> {
        self.resources.insert(
            (package.to_string(), file_name.to_string()),
            contents.to_string(),
        );
        Ok(())
    }

    fn create_source(&mut self, package: &str, type_name: &str, contents: &str) -> io::Result<()> {
        self.sources.insert(
            (package.to_string(), type_name.to_string()),
            contents.to_string(),
        );
        Ok(())
    }
}
