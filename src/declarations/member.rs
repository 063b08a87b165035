//! Members of a registration container as reported by the host analysis pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::values::{AutoItem, ItemGroupRef, TemplateRef, deserialize_args};

/// A member type, classified by the host by what it is assignable to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredType {
    Block,
    Item,
    Identifier,
    /// Anything else, by its source-level name
    Other(String),
}

impl From<String> for DeclaredType {
    fn from(value: String) -> Self {
        match value.to_lowercase().as_str() {
            "block" => Self::Block,
            "item" => Self::Item,
            "identifier" => Self::Identifier,
            _ => Self::Other(value),
        }
    }
}

impl From<DeclaredType> for String {
    fn from(value: DeclaredType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Block => write!(f, "block"),
            DeclaredType::Item => write!(f, "item"),
            DeclaredType::Identifier => write!(f, "identifier"),
            DeclaredType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Member access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// Registration hooks a container method can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallbackRole {
    /// Called instead of the framework registry for every block
    BlockRegistry,
    /// Called instead of the framework registry for every item
    ItemRegistry,
    /// Called once after all registrations
    PostRegister,
}

impl CallbackRole {
    /// Parameter list a callback of this role must declare
    pub fn required_params(&self) -> Vec<DeclaredType> {
        match self {
            CallbackRole::BlockRegistry => vec![DeclaredType::Identifier, DeclaredType::Block],
            CallbackRole::ItemRegistry => vec![DeclaredType::Identifier, DeclaredType::Item],
            CallbackRole::PostRegister => Vec::new(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            CallbackRole::BlockRegistry => "block registry",
            CallbackRole::ItemRegistry => "item registry",
            CallbackRole::PostRegister => "post-register",
        }
    }
}

/// `register_block` annotation data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAnnotation {
    /// Block id, the path part of its identifier
    pub id: String,

    #[serde(default)]
    pub model: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub model_args: Vec<String>,

    #[serde(default)]
    pub block_state: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub block_state_args: Vec<String>,

    #[serde(default)]
    pub block_item: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub block_item_args: Vec<String>,

    #[serde(default)]
    pub loot: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub loot_args: Vec<String>,
    /// Identifier dropped by the `drop_other` loot template
    #[serde(default)]
    pub loot_data: String,

    #[serde(default)]
    pub auto_block_item: AutoItem,
    #[serde(default)]
    pub item_group: ItemGroupRef,
}

impl BlockAnnotation {
    /// An annotation that inherits every setting
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: TemplateRef::Inherit,
            model_args: Vec::new(),
            block_state: TemplateRef::Inherit,
            block_state_args: Vec::new(),
            block_item: TemplateRef::Inherit,
            block_item_args: Vec::new(),
            loot: TemplateRef::Inherit,
            loot_args: Vec::new(),
            loot_data: String::new(),
            auto_block_item: AutoItem::Unset,
            item_group: ItemGroupRef::Inherit,
        }
    }
}

/// `register_item` annotation data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAnnotation {
    /// Item id, the path part of its identifier
    pub id: String,

    #[serde(default)]
    pub model: TemplateRef,
    #[serde(default, deserialize_with = "deserialize_args")]
    pub model_args: Vec<String>,
}

impl ItemAnnotation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            model: TemplateRef::Inherit,
            model_args: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A field of the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: DeclaredType,
    #[serde(rename = "static", default = "default_true")]
    pub is_static: bool,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub register_block: Option<BlockAnnotation>,
    #[serde(default)]
    pub register_item: Option<ItemAnnotation>,
}

impl FieldDecl {
    /// A public static field of `field_type`, with no annotations
    pub fn new(name: impl Into<String>, field_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            field_type,
            is_static: true,
            visibility: Visibility::Public,
            register_block: None,
            register_item: None,
        }
    }

    /// A public static block field annotated with `annotation`
    pub fn block(name: impl Into<String>, annotation: BlockAnnotation) -> Self {
        Self {
            register_block: Some(annotation),
            ..Self::new(name, DeclaredType::Block)
        }
    }

    /// A public static item field annotated with `annotation`
    pub fn item(name: impl Into<String>, annotation: ItemAnnotation) -> Self {
        Self {
            register_item: Some(annotation),
            ..Self::new(name, DeclaredType::Item)
        }
    }
}

/// A method of the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<DeclaredType>,
    #[serde(rename = "static", default = "default_true")]
    pub is_static: bool,
    #[serde(default)]
    pub visibility: Visibility,
    /// Callback annotations present on the method
    #[serde(default)]
    pub callbacks: Vec<CallbackRole>,
}

impl MethodDecl {
    /// A public static method declaring `role` with the parameters that role requires
    pub fn callback(name: impl Into<String>, role: CallbackRole) -> Self {
        Self {
            name: name.into(),
            params: role.required_params(),
            is_static: true,
            visibility: Visibility::Public,
            callbacks: vec![role],
        }
    }
}
