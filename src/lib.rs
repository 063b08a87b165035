//! modgen: build-time generator for game-mod registration glue and assets.
//!
//! A host analysis pass hands the generator one [`ContainerDecl`] per
//! registration container. For every annotated block and item the generator
//! resolves which template (and which arguments) each resource category uses,
//! layering entity values over container defaults and built-in templates, then
//! emits a registrar source file and the JSON resources through a
//! [`ResourceSink`].
//!
//! ```no_run
//! use modgen::{Config, DeclarationSet, Generator, MemorySink};
//!
//! # fn main() -> modgen::Result<()> {
//! let declarations = DeclarationSet::load("declarations.yml")?;
//! let generator = Generator::new(Config::default())?;
//! let mut sink = MemorySink::new();
//! let report = generator.generate(&declarations.containers, &mut sink)?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]

pub mod core;
pub mod declarations;
pub mod emit;
pub mod generator;
pub mod resolve;

pub use crate::core::{
    config::{Config, GameTypes},
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity},
    error::{Error, Result},
    templates::{Template, TemplateKind, TemplateOrigin, TemplateStore},
};
pub use declarations::{ContainerDecl, DeclarationSet};
pub use emit::{FileSystemSink, MemorySink, ResourceSink};
pub use generator::{GenerationReport, Generator};
