//! Template and argument resolution for annotated entities.
//!
//! Container defaults are resolved once per container; each annotated block
//! or item is then resolved against them into a descriptor.

pub mod defaults;
pub mod descriptor;
pub mod layer;
pub mod loot;

pub use defaults::{CategoryDefault, ContainerDefaults, ResolvedTemplate};
pub use descriptor::{BlockDescriptor, ItemDescriptor};
pub use layer::{Layer, resolve_args, resolve_item_group, resolve_layer, resolve_template};
pub use loot::LootAction;
