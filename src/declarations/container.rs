//! Registration container declarations.

use serde::{Deserialize, Serialize};

use super::member::{FieldDecl, MethodDecl};
use super::values::{ItemGroupRef, TemplateRef, deserialize_args};
use crate::core::templates::TemplateKind;
use crate::core::utils::{simple_name, split_qualified_name};

/// A custom template declared on a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDecl {
    /// Name the template is registered under
    pub name: String,
    /// File path, relative to the configured template directory
    pub file: String,
    pub kind: TemplateKind,
}

impl TemplateDecl {
    pub fn new(name: impl Into<String>, file: impl Into<String>, kind: TemplateKind) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            kind,
        }
    }
}

/// Container-level defaults for every resource category
///
/// Entity annotations that leave a category at the inherit marker fall back
/// to these values. A default cannot itself inherit; an unset default is
/// "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDefaultsDecl {
    #[serde(default = "TemplateRef::none")]
    pub block: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub block_args: Vec<String>,

    #[serde(default = "TemplateRef::none")]
    pub block_state: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub block_state_args: Vec<String>,

    #[serde(default = "TemplateRef::none")]
    pub item: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub item_args: Vec<String>,

    #[serde(default = "TemplateRef::none")]
    pub loot: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub loot_args: Vec<String>,

    #[serde(default)]
    pub auto_block_item: bool,
    #[serde(default = "TemplateRef::none")]
    pub block_item: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub block_item_args: Vec<String>,

    #[serde(default = "ItemGroupRef::void")]
    pub item_group: ItemGroupRef,
}

impl Default for ContainerDefaultsDecl {
    fn default() -> Self {
        Self {
            block: TemplateRef::None,
            block_args: Vec::new(),
            block_state: TemplateRef::None,
            block_state_args: Vec::new(),
            item: TemplateRef::None,
            item_args: Vec::new(),
            loot: TemplateRef::None,
            loot_args: Vec::new(),
            auto_block_item: false,
            block_item: TemplateRef::None,
            block_item_args: Vec::new(),
            item_group: ItemGroupRef::Void,
        }
    }
}

impl ContainerDefaultsDecl {
    /// Defaults pointing every category at the matching built-in
    pub fn builtin() -> Self {
        Self {
            block: TemplateRef::named("basic"),
            block_state: TemplateRef::named("basic"),
            item: TemplateRef::named("basic"),
            loot: TemplateRef::named("drop_self"),
            auto_block_item: true,
            block_item: TemplateRef::named("block"),
            ..Self::default()
        }
    }
}

/// A registration container: a type whose annotated static fields are
/// registered under one namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDecl {
    /// Fully-qualified name of the container type
    pub owner: String,
    pub namespace: String,
    #[serde(default)]
    pub defaults: ContainerDefaultsDecl,
    #[serde(default)]
    pub templates: Vec<TemplateDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl ContainerDecl {
    pub fn new(owner: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            namespace: namespace.into(),
            defaults: ContainerDefaultsDecl::default(),
            templates: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: ContainerDefaultsDecl) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_template(mut self, template: TemplateDecl) -> Self {
        self.templates.push(template);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// Package of the owner type, empty for the default package
    pub fn package(&self) -> &str {
        split_qualified_name(&self.owner).0
    }

    /// Unqualified owner type name
    pub fn simple_name(&self) -> &str {
        simple_name(&self.owner)
    }
}
