//! Two-level inheritance between entity annotations and container defaults.
//!
//! Every inheriting category follows the same rule: an inherit marker takes
//! the parent value (which may itself be absent), an explicit "nothing" is
//! absent, and a concrete value is looked up. [`resolve_layer`] implements the
//! rule once; the helpers below apply it to templates, argument lists and item
//! groups.

use std::sync::Arc;

use crate::core::diagnostics::Diagnostics;
use crate::core::templates::{Template, TemplateKind, TemplateStore};
use crate::declarations::values::{FieldRef, ItemGroupRef, TemplateRef};

/// One layer of a layered setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer<T> {
    /// Defer to the parent layer
    Inherit,
    /// Explicitly nothing
    Absent,
    Value(T),
}

impl<'a> From<&'a TemplateRef> for Layer<&'a str> {
    fn from(value: &'a TemplateRef) -> Self {
        match value {
            TemplateRef::Inherit => Layer::Inherit,
            TemplateRef::None => Layer::Absent,
            TemplateRef::Named(name) => Layer::Value(name.as_str()),
        }
    }
}

impl<'a> From<&'a ItemGroupRef> for Layer<&'a FieldRef> {
    fn from(value: &'a ItemGroupRef) -> Self {
        match value {
            ItemGroupRef::Inherit => Layer::Inherit,
            ItemGroupRef::Void => Layer::Absent,
            ItemGroupRef::Field(field) => Layer::Value(field),
        }
    }
}

/// Resolve `layer` over `parent`, mapping a concrete value through `lookup`
pub fn resolve_layer<T, U>(
    layer: Layer<T>,
    parent: Option<U>,
    lookup: impl FnOnce(T) -> Option<U>,
) -> Option<U> {
    match layer {
        Layer::Inherit => parent,
        Layer::Absent => None,
        Layer::Value(value) => lookup(value),
    }
}

/// Resolve a template reference of `kind` for `subject`
///
/// An unknown name records one configuration error and resolves to nothing.
pub fn resolve_template(
    reference: &TemplateRef,
    parent: Option<&Arc<Template>>,
    store: &TemplateStore,
    kind: TemplateKind,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Arc<Template>> {
    let layer: Layer<&str> = reference.into();
    resolve_layer(layer, parent.cloned(), |name| {
        let found = store.lookup(kind, name).cloned();
        if found.is_none() {
            let mut known = store.names(kind).join(", ");
            if known.is_empty() {
                known.push_str("none");
            }
            diagnostics.configuration(
                subject,
                format!("unknown {kind} template '{name}' (known: {known})"),
            );
        }
        found
    })
}

/// Entity arguments when given, the container defaults otherwise
///
/// Lists are never merged element-wise.
pub fn resolve_args(entity: &[String], default: &[String]) -> Vec<String> {
    if entity.is_empty() {
        default.to_vec()
    } else {
        entity.to_vec()
    }
}

/// Resolve an item group association over the container's
pub fn resolve_item_group(reference: &ItemGroupRef, parent: Option<&FieldRef>) -> Option<FieldRef> {
    let layer: Layer<&FieldRef> = reference.into();
    resolve_layer(layer, parent, Some).cloned()
}
