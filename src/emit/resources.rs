//! Resource file rendering.

use tracing::debug;

use super::sink::ResourceSink;
use crate::core::diagnostics::{DiagnosticKind, Diagnostics};
use crate::core::templates::ResourceCategory;
use crate::resolve::ResolvedTemplate;

/// A rendered resource ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceArtifact {
    pub category: ResourceCategory,
    pub package: String,
    pub file_name: String,
    pub contents: String,
}

/// Renders entity resources and hands them to a sink
#[derive(Debug, Clone)]
pub struct ResourceEmitter<'a> {
    namespace: &'a str,
    validate_json: bool,
}

impl<'a> ResourceEmitter<'a> {
    pub fn new(namespace: &'a str, validate_json: bool) -> Self {
        Self {
            namespace,
            validate_json,
        }
    }

    /// Render one category of entity `id`
    ///
    /// A render failure is a configuration error on `subject` and yields no
    /// artifact. Output that should be JSON but does not parse is kept with a
    /// warning.
    pub fn render(
        &self,
        id: &str,
        category: ResourceCategory,
        resolved: &ResolvedTemplate,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<ResourceArtifact> {
        let contents = match resolved.template.render(id, &resolved.args) {
            Ok(contents) => contents,
            Err(e) => {
                diagnostics.configuration(subject, format!("cannot render {category}: {e}"));
                return None;
            }
        };

        let file_name = format!("{id}.json");
        if self.validate_json {
            if let Err(e) = serde_json::from_str::<serde_json::Value>(&contents) {
                diagnostics.warning(
                    DiagnosticKind::Configuration,
                    Some(subject),
                    format!(
                        "{category} '{file_name}' from template '{}' is not valid JSON: {e}",
                        resolved.template.name()
                    ),
                );
            }
        }

        Some(ResourceArtifact {
            category,
            package: category.package(self.namespace),
            file_name,
            contents,
        })
    }

    /// Write `artifact`, recording an I/O diagnostic on failure
    pub fn write(
        &self,
        sink: &mut dyn ResourceSink,
        artifact: &ResourceArtifact,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        match sink.create_resource(&artifact.package, &artifact.file_name, &artifact.contents) {
            Ok(()) => {
                debug!(
                    package = %artifact.package,
                    file = %artifact.file_name,
                    category = %artifact.category,
                    "Emitted resource"
                );
                true
            }
            Err(e) => {
                diagnostics.error(
                    DiagnosticKind::Io,
                    Some(subject),
                    format!(
                        "cannot write {}/{}: {e}",
                        artifact.package, artifact.file_name
                    ),
                );
                false
            }
        }
    }

    /// Render and write every resource in `resources`, returning how many were written
    pub fn emit<'r>(
        &self,
        sink: &mut dyn ResourceSink,
        id: &str,
        resources: impl IntoIterator<Item = (ResourceCategory, &'r ResolvedTemplate)>,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> usize {
        let mut written = 0;
        for (category, resolved) in resources {
            if let Some(artifact) = self.render(id, category, resolved, subject, diagnostics) {
                if self.write(sink, &artifact, subject, diagnostics) {
                    written += 1;
                }
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::Severity;
    use crate::core::templates::{Template, TemplateKind, TemplateOrigin};
    use crate::emit::MemorySink;
    use std::io;
    use std::sync::Arc;

    fn resolved(body: &str, args: &[&str]) -> ResolvedTemplate {
        ResolvedTemplate {
            template: Arc::new(Template::new(
                "t",
                TemplateKind::Block,
                body,
                "examplemod",
                TemplateOrigin::Builtin,
            )),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_places_artifact() {
        let emitter = ResourceEmitter::new("examplemod", true);
        let mut diagnostics = Diagnostics::new();

        let artifact = emitter
            .render(
                "ore",
                ResourceCategory::BlockModel,
                &resolved(r#"{"parent": "%s", "t": "${modid}:block/${id}"}"#, &["block/cube_all"]),
                "ORE",
                &mut diagnostics,
            )
            .unwrap();

        assert_eq!(artifact.package, "assets.examplemod.models.block");
        assert_eq!(artifact.file_name, "ore.json");
        assert_eq!(
            artifact.contents,
            r#"{"parent": "block/cube_all", "t": "examplemod:block/ore"}"#
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_render_failure_is_configuration_error() {
        let emitter = ResourceEmitter::new("examplemod", true);
        let mut diagnostics = Diagnostics::new();

        let artifact = emitter.render(
            "ore",
            ResourceCategory::BlockModel,
            &resolved(r#"{"a": "%s"}"#, &[]),
            "ORE",
            &mut diagnostics,
        );

        assert!(artifact.is_none());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_invalid_json_is_a_warning() {
        let mut diagnostics = Diagnostics::new();
        let template = resolved("not json ${id}", &[]);

        let artifact = ResourceEmitter::new("examplemod", true).render(
            "ore",
            ResourceCategory::BlockState,
            &template,
            "ORE",
            &mut diagnostics,
        );
        assert!(artifact.is_some());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.iter().next().unwrap().severity, Severity::Warning);

        let mut diagnostics = Diagnostics::new();
        ResourceEmitter::new("examplemod", false).render(
            "ore",
            ResourceCategory::BlockState,
            &template,
            "ORE",
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
    }

    struct FailingSink;

    impl ResourceSink for FailingSink {
        fn create_resource(&mut self, _: &str, _: &str, _: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn create_source(&mut self, _: &str, _: &str, _: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_emit_counts_and_skips_failed_writes() {
        let emitter = ResourceEmitter::new("examplemod", true);
        let model = resolved("{}", &[]);
        let resources = [
            (ResourceCategory::BlockModel, &model),
            (ResourceCategory::BlockState, &model),
        ];

        let mut diagnostics = Diagnostics::new();
        let mut sink = MemorySink::new();
        assert_eq!(
            emitter.emit(&mut sink, "ore", resources, "ORE", &mut diagnostics),
            2
        );
        assert!(sink.resource("assets.examplemod.blockstates", "ore.json").is_some());

        let mut failing = FailingSink;
        assert_eq!(
            emitter.emit(&mut failing, "ore", resources, "ORE", &mut diagnostics),
            0
        );
        assert_eq!(diagnostics.error_count(), 2);
        assert!(
            diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::Io && d.message.contains("read-only"))
        );
    }
}
