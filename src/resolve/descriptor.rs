//! Resolved block and item descriptors.
//!
//! A descriptor is built once per annotated field and carries everything the
//! emitter needs: the templates and arguments of each resource category that
//! resolved to something, the companion item flag and the item group. No
//! inherit marker survives past construction.

use tracing::debug;

use super::defaults::{CategoryDefault, ContainerDefaults, ResolvedTemplate};
use super::layer::{resolve_args, resolve_item_group, resolve_template};
use super::loot::LootAction;
use crate::core::diagnostics::{DiagnosticKind, Diagnostics};
use crate::core::rules::validate_entity_id;
use crate::core::templates::{ResourceCategory, TemplateStore};
use crate::declarations::validate::{AnnotatedBlock, AnnotatedItem};
use crate::declarations::values::{FieldRef, ItemGroupRef, TemplateRef};

fn resolve_category(
    category: ResourceCategory,
    reference: &TemplateRef,
    args: &[String],
    default: &CategoryDefault,
    store: &TemplateStore,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Option<ResolvedTemplate> {
    let template = resolve_template(
        reference,
        default.template.as_ref(),
        store,
        category.template_kind(),
        subject,
        diagnostics,
    )?;
    Some(ResolvedTemplate {
        template,
        args: resolve_args(args, &default.args),
    })
}

fn check_id(id: &str, subject: &str, diagnostics: &mut Diagnostics) -> bool {
    match validate_entity_id(id) {
        Ok(()) => true,
        Err(message) => {
            diagnostics.configuration(subject, message);
            false
        }
    }
}

/// A block entity with every category resolved
#[derive(Debug, Clone)]
pub struct BlockDescriptor {
    /// Name of the annotated field
    pub field: String,
    pub id: String,
    pub model: Option<ResolvedTemplate>,
    pub block_state: Option<ResolvedTemplate>,
    pub block_item: Option<ResolvedTemplate>,
    pub loot: Option<ResolvedTemplate>,
    /// Whether a companion block item is registered
    pub auto_block_item: bool,
    /// Item group of the companion item, none for no group
    pub item_group: Option<FieldRef>,
}

impl BlockDescriptor {
    /// Resolve an annotated block field
    ///
    /// Returns `None` when the id is invalid; problems with individual
    /// categories are reported and leave that category empty.
    pub fn build(
        namespace: &str,
        block: AnnotatedBlock<'_>,
        defaults: &ContainerDefaults,
        store: &TemplateStore,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let annotation = block.annotation;
        if !check_id(&annotation.id, subject, diagnostics) {
            return None;
        }

        let model = resolve_category(
            ResourceCategory::BlockModel,
            &annotation.model,
            &annotation.model_args,
            &defaults.block_model,
            store,
            subject,
            diagnostics,
        );
        let block_state = resolve_category(
            ResourceCategory::BlockState,
            &annotation.block_state,
            &annotation.block_state_args,
            &defaults.block_state,
            store,
            subject,
            diagnostics,
        );
        let block_item = resolve_category(
            ResourceCategory::BlockItem,
            &annotation.block_item,
            &annotation.block_item_args,
            &defaults.block_item,
            store,
            subject,
            diagnostics,
        );

        let loot = resolve_category(
            ResourceCategory::LootTable,
            &annotation.loot,
            &annotation.loot_args,
            &defaults.loot_table,
            store,
            subject,
            diagnostics,
        )
        .and_then(|resolved| {
            let action = LootAction::of(&resolved.template);
            if action != LootAction::Custom && !annotation.loot_args.is_empty() {
                diagnostics.warning(
                    DiagnosticKind::Configuration,
                    Some(subject),
                    format!(
                        "loot_args are ignored by the built-in '{}' loot table",
                        resolved.template.name()
                    ),
                );
            }
            match action.arguments(namespace, &annotation.id, &annotation.loot_data, resolved.args)
            {
                Ok(args) => Some(ResolvedTemplate {
                    template: resolved.template,
                    args,
                }),
                Err(message) => {
                    diagnostics.configuration(subject, message);
                    None
                }
            }
        });

        let item_group = match &annotation.item_group {
            ItemGroupRef::Field(field) => match field.validate() {
                Ok(()) => Some(field.clone()),
                Err(message) => {
                    diagnostics.configuration(subject, format!("item group: {message}"));
                    None
                }
            },
            reference => resolve_item_group(reference, defaults.item_group.as_ref()),
        };

        let descriptor = Self {
            field: block.field.to_string(),
            id: annotation.id.clone(),
            model,
            block_state,
            block_item,
            loot,
            auto_block_item: annotation.auto_block_item.resolve(defaults.auto_block_item),
            item_group,
        };

        debug!(
            subject = subject,
            id = %descriptor.id,
            auto_block_item = descriptor.auto_block_item,
            resources = descriptor.resources().len(),
            "Resolved block"
        );

        Some(descriptor)
    }

    /// Resources this block generates, by category
    ///
    /// The block item model is included only with a companion item.
    pub fn resources(&self) -> Vec<(ResourceCategory, &ResolvedTemplate)> {
        let block_item = self.block_item.as_ref().filter(|_| self.auto_block_item);
        [
            (ResourceCategory::BlockModel, self.model.as_ref()),
            (ResourceCategory::BlockState, self.block_state.as_ref()),
            (ResourceCategory::BlockItem, block_item),
            (ResourceCategory::LootTable, self.loot.as_ref()),
        ]
        .into_iter()
        .filter_map(|(category, resolved)| resolved.map(|r| (category, r)))
        .collect()
    }
}

/// An item entity with its model resolved
#[derive(Debug, Clone)]
pub struct ItemDescriptor {
    pub field: String,
    pub id: String,
    pub model: Option<ResolvedTemplate>,
}

impl ItemDescriptor {
    pub fn build(
        item: AnnotatedItem<'_>,
        defaults: &ContainerDefaults,
        store: &TemplateStore,
        subject: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let annotation = item.annotation;
        if !check_id(&annotation.id, subject, diagnostics) {
            return None;
        }

        let model = resolve_category(
            ResourceCategory::ItemModel,
            &annotation.model,
            &annotation.model_args,
            &defaults.item_model,
            store,
            subject,
            diagnostics,
        );

        debug!(
            subject = subject,
            id = %annotation.id,
            has_model = model.is_some(),
            "Resolved item"
        );

        Some(Self {
            field: item.field.to_string(),
            id: annotation.id.clone(),
            model,
        })
    }

    pub fn resources(&self) -> Vec<(ResourceCategory, &ResolvedTemplate)> {
        self.model
            .iter()
            .map(|resolved| (ResourceCategory::ItemModel, resolved))
            .collect()
    }
}
