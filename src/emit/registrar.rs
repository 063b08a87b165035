//! Registrar source generation.
//!
//! Each container gets one registrar type whose `register()` method holds one
//! statement per registration, in order: every block followed by its
//! companion item, then every item, then the post-register callback. The
//! statements are built here and laid out by a tera template.

use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::core::config::GameTypes;
use crate::core::error::{Error, Result};
use crate::core::templates::EmbeddedTemplateRepository;
use crate::declarations::container::ContainerDecl;
use crate::declarations::validate::Callbacks;
use crate::resolve::{BlockDescriptor, ItemDescriptor};

const TEMPLATE_NAME: &str = "registrar.java";

/// Values handed to the registrar template
#[derive(Debug, Clone, Serialize)]
pub struct RegistrarContext {
    /// Package of the container, empty for the default package
    pub package: String,
    /// Fully-qualified container type
    pub owner: String,
    pub namespace: String,
    pub registrar_name: String,
    /// Java statements without trailing semicolons
    pub statements: Vec<String>,
}

/// A rendered registrar ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrarSource {
    pub package: String,
    pub type_name: String,
    pub contents: String,
}

/// Builds registration statements for one container
#[derive(Debug)]
pub struct StatementBuilder<'a> {
    container: &'a ContainerDecl,
    callbacks: &'a Callbacks,
    types: &'a GameTypes,
}

impl<'a> StatementBuilder<'a> {
    pub fn new(container: &'a ContainerDecl, callbacks: &'a Callbacks, types: &'a GameTypes) -> Self {
        Self {
            container,
            callbacks,
            types,
        }
    }

    fn identifier(&self, id: &str) -> String {
        format!(
            "new {}(\"{}\", \"{}\")",
            self.types.identifier, self.container.namespace, id
        )
    }

    fn member(&self, name: &str) -> String {
        format!("{}.{}", self.container.owner, name)
    }

    fn register(&self, callback: Option<&str>, registry: &str, id: &str, value: &str) -> String {
        match callback {
            Some(method) => format!("{}({}, {value})", self.member(method), self.identifier(id)),
            None => format!(
                "{}.register({}.{registry}, {}, {value})",
                self.types.registry,
                self.types.registry,
                self.identifier(id)
            ),
        }
    }

    /// Block registration, plus the companion item when requested
    pub fn block(&self, block: &BlockDescriptor) -> Vec<String> {
        let field = self.member(&block.field);
        let mut statements = vec![self.register(
            self.callbacks.block_registry.as_deref(),
            "BLOCK",
            &block.id,
            &field,
        )];

        if block.auto_block_item {
            let settings = match &block.item_group {
                Some(group) => format!("new {}.Settings().group({group})", self.types.item),
                None => format!("new {}.Settings()", self.types.item),
            };
            let item = format!("new {}({field}, {settings})", self.types.block_item);
            statements.push(self.register(
                self.callbacks.item_registry.as_deref(),
                "ITEM",
                &block.id,
                &item,
            ));
        }

        statements
    }

    pub fn item(&self, item: &ItemDescriptor) -> String {
        self.register(
            self.callbacks.item_registry.as_deref(),
            "ITEM",
            &item.id,
            &self.member(&item.field),
        )
    }

    /// Every statement of the registrar, in registration order
    pub fn statements(&self, blocks: &[BlockDescriptor], items: &[ItemDescriptor]) -> Vec<String> {
        let mut statements: Vec<String> = blocks.iter().flat_map(|b| self.block(b)).collect();
        statements.extend(items.iter().map(|i| self.item(i)));
        if let Some(post) = &self.callbacks.post_register {
            statements.push(format!("{}()", self.member(post)));
        }
        statements
    }
}

/// Renders registrar sources through a compiled tera template
#[derive(Debug, Clone)]
pub struct RegistrarEmitter {
    tera: Tera,
    suffix: String,
}

impl RegistrarEmitter {
    /// Compile `template` as the registrar layout
    pub fn new(template: &str, suffix: impl Into<String>) -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, template)?;
        Ok(Self {
            tera,
            suffix: suffix.into(),
        })
    }

    /// Use the override at `path` when given, the bundled template otherwise
    pub fn load(path: Option<&Path>, suffix: impl Into<String>) -> Result<Self> {
        let template = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading registrar template override");
                std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!(
                        "Cannot read registrar template {}: {e}",
                        path.display()
                    ))
                })?
            }
            None => EmbeddedTemplateRepository::new().registrar_template()?,
        };
        Self::new(&template, suffix)
    }

    /// Name of the registrar type generated for `container`
    pub fn type_name(&self, container: &ContainerDecl) -> String {
        format!("{}{}", container.simple_name(), self.suffix)
    }

    pub fn render(
        &self,
        container: &ContainerDecl,
        statements: Vec<String>,
    ) -> Result<RegistrarSource> {
        let registrar = RegistrarContext {
            package: container.package().to_string(),
            owner: container.owner.clone(),
            namespace: container.namespace.clone(),
            registrar_name: self.type_name(container),
            statements,
        };

        let context = Context::from_serialize(&registrar)?;
        let contents = self.tera.render(TEMPLATE_NAME, &context)?;

        debug!(
            registrar = %registrar.registrar_name,
            statements = registrar.statements.len(),
            "Rendered registrar"
        );

        Ok(RegistrarSource {
            package: registrar.package,
            type_name: registrar.registrar_name,
            contents,
        })
    }
}
