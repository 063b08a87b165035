//! Generation pipeline.
//!
//! One pass per container:
//!
//! 1. Build the template store (built-ins, then the container's templates)
//! 2. Resolve the container defaults
//! 3. Validate members and resolve a descriptor per annotated block and item
//! 4. Emit resources, then the registrar source
//!
//! Recoverable problems become diagnostics on the report and the pass moves
//! on. Only a broken built-in template aborts the run.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::core::diagnostics::{DiagnosticKind, Diagnostics};
use crate::core::error::Result;
use crate::core::rules::{validate_namespace, validate_qualified_name};
use crate::core::templates::{EmbeddedTemplateRepository, TemplateLoader, TemplateStore};
use crate::declarations::container::ContainerDecl;
use crate::declarations::validate::{field_subject, validate_members};
use crate::emit::{RegistrarEmitter, ResourceEmitter, ResourceSink, StatementBuilder};
use crate::resolve::{BlockDescriptor, ContainerDefaults, ItemDescriptor};

/// Outcome of a generation run
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    #[serde(skip)]
    pub diagnostics: Diagnostics,
    pub containers: usize,
    pub blocks: usize,
    pub items: usize,
    pub resources_written: usize,
    pub sources_written: usize,
}

impl GenerationReport {
    /// True when no error diagnostic was recorded
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Runs generation passes with one configuration
#[derive(Debug)]
pub struct Generator {
    config: Config,
    loader: TemplateLoader,
    registrar: RegistrarEmitter,
}

impl Generator {
    /// Validate `config` and prepare the registrar template
    ///
    /// Fails when the configuration is invalid, a built-in template cannot be
    /// read or the registrar template does not compile.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        // Surface broken built-ins before any container is processed
        EmbeddedTemplateRepository::new().load_builtins("")?;

        let registrar = RegistrarEmitter::load(
            config.registrar_template.as_deref(),
            config.registrar_suffix.clone(),
        )?;
        let loader = match &config.template_dir {
            Some(dir) => TemplateLoader::new(dir),
            None => TemplateLoader::default(),
        };

        Ok(Self {
            config,
            loader,
            registrar,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate every container into `sink`
    pub fn generate(
        &self,
        containers: &[ContainerDecl],
        sink: &mut dyn ResourceSink,
    ) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        for container in containers {
            self.generate_container(container, sink, &mut report)?;
        }

        info!(
            containers = report.containers,
            blocks = report.blocks,
            items = report.items,
            resources = report.resources_written,
            sources = report.sources_written,
            errors = report.diagnostics.error_count(),
            "Generation finished"
        );

        Ok(report)
    }

    fn generate_container(
        &self,
        container: &ContainerDecl,
        sink: &mut dyn ResourceSink,
        report: &mut GenerationReport,
    ) -> Result<()> {
        info!(owner = %container.owner, namespace = %container.namespace, "Processing container");
        let subject = container.owner.as_str();
        let diagnostics = &mut report.diagnostics;

        if let Err(message) = validate_namespace(&container.namespace) {
            diagnostics.configuration(subject, message);
            return Ok(());
        }
        if let Err(message) = validate_qualified_name(&container.owner) {
            diagnostics.structural(subject, message);
            return Ok(());
        }
        report.containers += 1;

        let store = self.build_store(container, diagnostics)?;
        let defaults = ContainerDefaults::resolve(&container.defaults, &store, subject, diagnostics);
        let members = validate_members(container, diagnostics);

        let blocks: Vec<BlockDescriptor> = members
            .blocks
            .iter()
            .filter_map(|block| {
                let subject = field_subject(container, block.field);
                BlockDescriptor::build(
                    &container.namespace,
                    *block,
                    &defaults,
                    &store,
                    &subject,
                    diagnostics,
                )
            })
            .collect();
        let items: Vec<ItemDescriptor> = members
            .items
            .iter()
            .filter_map(|item| {
                let subject = field_subject(container, item.field);
                ItemDescriptor::build(*item, &defaults, &store, &subject, diagnostics)
            })
            .collect();
        check_duplicate_ids(container, &blocks, &items, diagnostics);
        report.blocks += blocks.len();
        report.items += items.len();

        let emitter = ResourceEmitter::new(&container.namespace, self.config.validate_json);
        for block in &blocks {
            let subject = field_subject(container, &block.field);
            report.resources_written +=
                emitter.emit(sink, &block.id, block.resources(), &subject, diagnostics);
        }
        for item in &items {
            let subject = field_subject(container, &item.field);
            report.resources_written +=
                emitter.emit(sink, &item.id, item.resources(), &subject, diagnostics);
        }

        let statements = StatementBuilder::new(container, &members.callbacks, &self.config.types)
            .statements(&blocks, &items);
        if statements.is_empty() {
            debug!(owner = %container.owner, "Nothing to register, skipping registrar");
            return Ok(());
        }

        let source = match self.registrar.render(container, statements) {
            Ok(source) => source,
            Err(e) => {
                diagnostics.configuration(subject, format!("cannot render registrar: {e}"));
                return Ok(());
            }
        };
        match sink.create_source(&source.package, &source.type_name, &source.contents) {
            Ok(()) => {
                debug!(package = %source.package, type_name = %source.type_name, "Emitted registrar");
                report.sources_written += 1;
            }
            Err(e) => diagnostics.error(
                DiagnosticKind::Io,
                Some(subject),
                format!("cannot write registrar {}: {e}", source.type_name),
            ),
        }

        Ok(())
    }

    /// Built-ins first, then the container's own templates
    fn build_store(
        &self,
        container: &ContainerDecl,
        diagnostics: &mut Diagnostics,
    ) -> Result<TemplateStore> {
        let mut store = TemplateStore::with_builtins(&container.namespace)?;

        for decl in &container.templates {
            let template =
                match self
                    .loader
                    .load(&decl.name, decl.kind, &decl.file, &container.namespace)
                {
                    Ok(template) => template,
                    Err(e) => {
                        diagnostics.error(
                            DiagnosticKind::Io,
                            Some(&container.owner),
                            format!(
                                "cannot read {} template '{}' from {}: {e}",
                                decl.kind,
                                decl.name,
                                self.loader.resolve(&decl.file).display()
                            ),
                        );
                        continue;
                    }
                };

            if let Some(previous) = store.register(template) {
                if previous.is_builtin() {
                    diagnostics.warning(
                        DiagnosticKind::Configuration,
                        Some(&container.owner),
                        format!("{} template '{}' replaces the built-in", decl.kind, decl.name),
                    );
                } else {
                    diagnostics.warning(
                        DiagnosticKind::Configuration,
                        Some(&container.owner),
                        format!(
                            "{} template '{}' is declared more than once; the last one wins",
                            decl.kind, decl.name
                        ),
                    );
                }
            }
        }

        debug!(owner = %container.owner, template_count = store.len(), "Template store ready");
        Ok(store)
    }
}

/// Record `id` for `field`, returning the field that registered it first
fn first_registration<'a>(
    seen: &mut HashMap<&'a str, &'a str>,
    id: &'a str,
    field: &'a str,
) -> Option<&'a str> {
    match seen.entry(id) {
        Entry::Occupied(entry) => Some(*entry.get()),
        Entry::Vacant(entry) => {
            entry.insert(field);
            None
        }
    }
}

/// Warn about ids registered more than once in the same registry
fn check_duplicate_ids(
    container: &ContainerDecl,
    blocks: &[BlockDescriptor],
    items: &[ItemDescriptor],
    diagnostics: &mut Diagnostics,
) {
    let mut block_ids = HashMap::new();
    let mut item_ids = HashMap::new();
    let mut duplicates = Vec::new();

    for block in blocks {
        if let Some(first) = first_registration(&mut block_ids, &block.id, &block.field) {
            duplicates.push(("block", &block.id, &block.field, first));
        }
        if block.auto_block_item {
            if let Some(first) = first_registration(&mut item_ids, &block.id, &block.field) {
                duplicates.push(("item", &block.id, &block.field, first));
            }
        }
    }
    for item in items {
        if let Some(first) = first_registration(&mut item_ids, &item.id, &item.field) {
            duplicates.push(("item", &item.id, &item.field, first));
        }
    }

    for (registry, id, field, first) in duplicates {
        diagnostics.warning(
            DiagnosticKind::Configuration,
            Some(&field_subject(container, field)),
            format!(
                "{registry} id '{}:{id}' is also registered by {first}",
                container.namespace
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::container::ContainerDefaultsDecl;
    use crate::declarations::member::{BlockAnnotation, FieldDecl, ItemAnnotation};
    use crate::emit::MemorySink;
    use tracing_test::traced_test;

    fn generator() -> Generator {
        Generator::new(Config::default()).unwrap()
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = Config {
            registrar_suffix: String::new(),
            ..Config::default()
        };
        assert!(Generator::new(config).is_err());
    }

    #[test]
    fn test_invalid_namespace_skips_container() {
        let container = ContainerDecl::new("ModBlocks", "Example Mod")
            .with_field(FieldDecl::block("ORE", BlockAnnotation::new("ore")));
        let mut sink = MemorySink::new();

        let report = generator().generate(&[container], &mut sink).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.containers, 0);
        assert_eq!(sink.source_count(), 0);
    }

    #[test]
    fn test_malformed_owner_skips_container() {
        let container = ContainerDecl::new("com.example.Mod Blocks", "examplemod")
            .with_field(FieldDecl::block("ORE", BlockAnnotation::new("ore")));
        let mut sink = MemorySink::new();

        let report = generator().generate(&[container], &mut sink).unwrap();

        assert_eq!(report.containers, 0);
        let errors: Vec<_> = report
            .diagnostics
            .for_subject("com.example.Mod Blocks")
            .collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, DiagnosticKind::Structural);
        assert_eq!(sink.source_count(), 0);
    }

    #[test]
    fn test_duplicate_ids_warn() {
        let container = ContainerDecl::new("ModBlocks", "examplemod")
            .with_defaults(ContainerDefaultsDecl::builtin())
            .with_field(FieldDecl::block("ORE", BlockAnnotation::new("ore")))
            .with_field(FieldDecl::block("ORE_AGAIN", BlockAnnotation::new("ore")))
            .with_field(FieldDecl::item("ORE_ITEM", ItemAnnotation::new("ore")));
        let mut sink = MemorySink::new();

        let report = generator().generate(&[container], &mut sink).unwrap();

        assert!(report.is_success());
        assert_eq!(report.blocks, 2);
        let again: Vec<_> = report
            .diagnostics
            .for_subject("ModBlocks.ORE_AGAIN")
            .collect();
        // Block registry and companion item registry
        assert_eq!(again.len(), 2);
        assert!(again[0].message.contains("also registered by ORE"));
        assert_eq!(
            report.diagnostics.for_subject("ModBlocks.ORE_ITEM").count(),
            1
        );
    }

    #[test]
    #[traced_test]
    fn test_generation_is_logged() {
        let container = ContainerDecl::new("com.example.ModItems", "examplemod")
            .with_defaults(ContainerDefaultsDecl::builtin())
            .with_field(FieldDecl::item("INGOT", ItemAnnotation::new("ingot")));
        let mut sink = MemorySink::new();

        let report = generator().generate(&[container], &mut sink).unwrap();

        assert_eq!(report.resources_written, 1);
        assert_eq!(report.sources_written, 1);
        assert!(logs_contain("Processing container"));
        assert!(logs_contain("Generation finished"));
    }

    #[test]
    fn test_empty_container_writes_no_registrar() {
        let mut sink = MemorySink::new();
        let report = generator()
            .generate(&[ContainerDecl::new("Empty", "examplemod")], &mut sink)
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.containers, 1);
        assert_eq!(sink.source_count(), 0);
    }
}
