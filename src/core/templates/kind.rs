//! Template kinds and the resource categories that draw on them.
//!
//! Templates are stored by [`TemplateKind`]. Entities resolve one template per
//! [`ResourceCategory`]; several categories can share a kind (a block's
//! companion item model and a plain item model both come from the `item`
//! kind), but each category has its own defaults, arguments and output
//! package.
//!
//! ```
//! use modgen::core::templates::{ResourceCategory, TemplateKind};
//! use std::str::FromStr;
//!
//! assert_eq!(TemplateKind::from_str("block_state").unwrap(), TemplateKind::BlockState);
//! assert_eq!(ResourceCategory::BlockItem.template_kind(), TemplateKind::Item);
//! assert_eq!(
//!     ResourceCategory::LootTable.package("examplemod"),
//!     "data.examplemod.loot_tables.blocks"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storage kind of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// Item models, including block-item models
    Item,
    /// Block models
    Block,
    /// Block state definitions
    BlockState,
    /// Block loot tables
    Loot,
}

impl TemplateKind {
    /// Returns the kind as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Block => "block",
            Self::BlockState => "block_state",
            Self::Loot => "loot",
        }
    }

    /// Returns all template kinds
    pub fn all() -> [TemplateKind; 4] {
        [Self::Item, Self::Block, Self::BlockState, Self::Loot]
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "item" => Ok(Self::Item),
            "block" => Ok(Self::Block),
            "block_state" | "blockstate" => Ok(Self::BlockState),
            "loot" | "loot_table" => Ok(Self::Loot),
            _ => Err(format!("Unknown template kind: {s}")),
        }
    }
}

/// A resource an entity can generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    ItemModel,
    BlockModel,
    BlockState,
    BlockItem,
    LootTable,
}

impl ResourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ItemModel => "item_model",
            Self::BlockModel => "block_model",
            Self::BlockState => "block_state",
            Self::BlockItem => "block_item",
            Self::LootTable => "loot_table",
        }
    }

    /// Kind of template this category is resolved from
    pub fn template_kind(&self) -> TemplateKind {
        match self {
            Self::ItemModel | Self::BlockItem => TemplateKind::Item,
            Self::BlockModel => TemplateKind::Block,
            Self::BlockState => TemplateKind::BlockState,
            Self::LootTable => TemplateKind::Loot,
        }
    }

    /// Dotted resource package the category's files are written to
    pub fn package(&self, namespace: &str) -> String {
        match self {
            Self::ItemModel | Self::BlockItem => format!("assets.{namespace}.models.item"),
            Self::BlockModel => format!("assets.{namespace}.models.block"),
            Self::BlockState => format!("assets.{namespace}.blockstates"),
            Self::LootTable => format!("data.{namespace}.loot_tables.blocks"),
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
