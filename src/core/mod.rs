//! Core building blocks shared by the resolver, the emitter and the generator:
//! errors, diagnostics, configuration, naming rules and the template store.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod rules;
pub mod templates;
pub mod utils;

pub use error::Error;
