//! Template system for resource generation.
//!
//! This module holds everything about templates themselves: their kinds and
//! the resource categories drawing on them, the substitution rules of a loaded
//! template, the bundled built-ins, the loader for user template files and
//! the per-container store that resolution looks names up in.

pub mod embedded;
pub mod kind;
pub mod loader;
pub mod store;
pub mod template;

pub use embedded::*;
pub use kind::*;
pub use loader::*;
pub use store::*;
pub use template::*;
