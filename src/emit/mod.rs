//! Artifact emission.
//!
//! Resources are rendered from resolved templates; the registrar source is
//! assembled from registration statements and a tera layout. Both go to a
//! caller-supplied [`ResourceSink`].

pub mod registrar;
pub mod resources;
pub mod sink;

pub use registrar::{RegistrarContext, RegistrarEmitter, RegistrarSource, StatementBuilder};
pub use resources::{ResourceArtifact, ResourceEmitter};
pub use sink::{FileSystemSink, MemorySink, ResourceSink};
