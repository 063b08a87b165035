//! Container defaults resolved against the template store.

use std::sync::Arc;

use tracing::debug;

use super::layer::resolve_template;
use crate::core::diagnostics::Diagnostics;
use crate::core::templates::{ResourceCategory, Template, TemplateStore};
use crate::declarations::container::ContainerDefaultsDecl;
use crate::declarations::values::{FieldRef, ItemGroupRef, TemplateRef};

/// A resolved template paired with the argument list it is rendered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub template: Arc<Template>,
    pub args: Vec<String>,
}

/// Default template and arguments for one category
#[derive(Debug, Clone, Default)]
pub struct CategoryDefault {
    pub template: Option<Arc<Template>>,
    pub args: Vec<String>,
}

/// Container defaults with every template name looked up
///
/// A default has no parent, so the inherit marker is rejected here and the
/// category falls back to none.
#[derive(Debug, Clone, Default)]
pub struct ContainerDefaults {
    pub block_model: CategoryDefault,
    pub block_state: CategoryDefault,
    pub item_model: CategoryDefault,
    pub block_item: CategoryDefault,
    pub loot_table: CategoryDefault,
    pub auto_block_item: bool,
    pub item_group: Option<FieldRef>,
}

impl ContainerDefaults {
    pub fn resolve(
        decl: &ContainerDefaultsDecl,
        store: &TemplateStore,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut resolve = |category: ResourceCategory, reference: &TemplateRef, args: &[String]| {
            if reference.is_inherit() {
                diagnostics.configuration(
                    subject,
                    format!("default {category} template cannot inherit; using none"),
                );
            }
            let template = resolve_template(
                reference,
                None,
                store,
                category.template_kind(),
                subject,
                diagnostics,
            );
            CategoryDefault {
                template,
                args: args.to_vec(),
            }
        };

        let block_model = resolve(ResourceCategory::BlockModel, &decl.block, &decl.block_args);
        let block_state = resolve(
            ResourceCategory::BlockState,
            &decl.block_state,
            &decl.block_state_args,
        );
        let item_model = resolve(ResourceCategory::ItemModel, &decl.item, &decl.item_args);
        let block_item = resolve(
            ResourceCategory::BlockItem,
            &decl.block_item,
            &decl.block_item_args,
        );
        let loot_table = resolve(ResourceCategory::LootTable, &decl.loot, &decl.loot_args);

        let item_group = match &decl.item_group {
            ItemGroupRef::Inherit => {
                diagnostics.configuration(subject, "default item group cannot inherit; using none");
                None
            }
            ItemGroupRef::Void => None,
            ItemGroupRef::Field(field) => match field.validate() {
                Ok(()) => Some(field.clone()),
                Err(message) => {
                    diagnostics.configuration(subject, format!("default item group: {message}"));
                    None
                }
            },
        };

        debug!(
            subject = subject,
            auto_block_item = decl.auto_block_item,
            "Resolved container defaults"
        );

        Self {
            block_model,
            block_state,
            item_model,
            block_item,
            loot_table,
            auto_block_item: decl.auto_block_item,
            item_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults_resolve() {
        let store = TemplateStore::with_builtins("examplemod").unwrap();
        let mut diagnostics = Diagnostics::new();

        let defaults = ContainerDefaults::resolve(
            &ContainerDefaultsDecl::builtin(),
            &store,
            "ModBlocks",
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
        assert_eq!(defaults.block_model.template.unwrap().name(), "basic");
        assert_eq!(defaults.block_item.template.unwrap().name(), "block");
        assert_eq!(defaults.loot_table.template.unwrap().name(), "drop_self");
        assert!(defaults.auto_block_item);
        assert!(defaults.item_group.is_none());
    }

    #[test]
    fn test_empty_defaults_are_none() {
        let store = TemplateStore::with_builtins("examplemod").unwrap();
        let mut diagnostics = Diagnostics::new();

        let defaults = ContainerDefaults::resolve(
            &ContainerDefaultsDecl::default(),
            &store,
            "ModBlocks",
            &mut diagnostics,
        );

        assert!(diagnostics.is_empty());
        assert!(defaults.block_model.template.is_none());
        assert!(defaults.item_model.template.is_none());
        assert!(!defaults.auto_block_item);
    }

    #[test]
    fn test_marker_at_container_level_is_an_error() {
        let store = TemplateStore::with_builtins("examplemod").unwrap();
        let mut diagnostics = Diagnostics::new();
        let decl = ContainerDefaultsDecl {
            block: TemplateRef::Inherit,
            item_group: ItemGroupRef::Inherit,
            ..ContainerDefaultsDecl::builtin()
        };

        let defaults = ContainerDefaults::resolve(&decl, &store, "ModBlocks", &mut diagnostics);

        assert!(defaults.block_model.template.is_none());
        assert!(defaults.item_group.is_none());
        assert_eq!(diagnostics.error_count(), 2);
        assert!(
            diagnostics
                .for_subject("ModBlocks")
                .any(|d| d.message.contains("block_model template cannot inherit"))
        );
    }

    #[test]
    fn test_malformed_default_item_group_is_an_error() {
        let store = TemplateStore::with_builtins("examplemod").unwrap();
        let mut diagnostics = Diagnostics::new();
        let decl = ContainerDefaultsDecl {
            item_group: ItemGroupRef::field("com.example.Groups", "MAIN)"),
            ..ContainerDefaultsDecl::builtin()
        };

        let defaults = ContainerDefaults::resolve(&decl, &store, "ModBlocks", &mut diagnostics);

        assert!(defaults.item_group.is_none());
        assert_eq!(diagnostics.error_count(), 1);
    }
}
