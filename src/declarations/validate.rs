//! Structural validation of container members.
//!
//! Turns raw member declarations into the annotated block and item fields and
//! the callback set the resolver and emitter work from. Every problem found
//! here is a structural diagnostic; the offending declaration is dropped and
//! the rest of the container is still processed.

use super::container::ContainerDecl;
use super::member::{
    BlockAnnotation, CallbackRole, DeclaredType, FieldDecl, ItemAnnotation, MethodDecl,
    Visibility,
};
use crate::core::diagnostics::Diagnostics;
use crate::core::rules::validate_java_identifier;

/// A field carrying a `register_block` annotation that passed validation
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedBlock<'a> {
    pub field: &'a str,
    pub annotation: &'a BlockAnnotation,
}

/// A field carrying a `register_item` annotation that passed validation
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedItem<'a> {
    pub field: &'a str,
    pub annotation: &'a ItemAnnotation,
}

/// Method names of the accepted callbacks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Callbacks {
    pub block_registry: Option<String>,
    pub item_registry: Option<String>,
    pub post_register: Option<String>,
}

impl Callbacks {
    pub fn get(&self, role: CallbackRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    fn slot(&self, role: CallbackRole) -> &Option<String> {
        match role {
            CallbackRole::BlockRegistry => &self.block_registry,
            CallbackRole::ItemRegistry => &self.item_registry,
            CallbackRole::PostRegister => &self.post_register,
        }
    }

    fn slot_mut(&mut self, role: CallbackRole) -> &mut Option<String> {
        match role {
            CallbackRole::BlockRegistry => &mut self.block_registry,
            CallbackRole::ItemRegistry => &mut self.item_registry,
            CallbackRole::PostRegister => &mut self.post_register,
        }
    }
}

/// Members of one container that survived validation, in declaration order
#[derive(Debug, Clone, Default)]
pub struct ValidatedMembers<'a> {
    pub blocks: Vec<AnnotatedBlock<'a>>,
    pub items: Vec<AnnotatedItem<'a>>,
    pub callbacks: Callbacks,
}

/// Diagnostic subject for a container field
pub fn field_subject(container: &ContainerDecl, field: &str) -> String {
    format!("{}.{}", container.owner, field)
}

/// Diagnostic subject for a container method
pub fn method_subject(container: &ContainerDecl, method: &str) -> String {
    format!("{}.{}()", container.owner, method)
}

/// Validate the fields and methods of `container`
pub fn validate_members<'a>(
    container: &'a ContainerDecl,
    diagnostics: &mut Diagnostics,
) -> ValidatedMembers<'a> {
    let mut members = ValidatedMembers::default();

    for field in &container.fields {
        let subject = field_subject(container, &field.name);

        if let Some(annotation) = &field.register_block {
            if check_field(field, DeclaredType::Block, "register_block", &subject, diagnostics) {
                members.blocks.push(AnnotatedBlock {
                    field: &field.name,
                    annotation,
                });
            }
        }

        if let Some(annotation) = &field.register_item {
            if check_field(field, DeclaredType::Item, "register_item", &subject, diagnostics) {
                members.items.push(AnnotatedItem {
                    field: &field.name,
                    annotation,
                });
            }
        }
    }

    members.callbacks = validate_callbacks(container, diagnostics);
    members
}

fn check_field(
    field: &FieldDecl,
    expected: DeclaredType,
    annotation: &str,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> bool {
    let mut valid = true;

    if let Err(message) = validate_java_identifier(&field.name) {
        diagnostics.structural(subject, message);
        valid = false;
    }
    if field.field_type != expected {
        diagnostics.structural(
            subject,
            format!(
                "@{annotation} requires a field of type {expected}, found {}",
                field.field_type
            ),
        );
        valid = false;
    }
    if !field.is_static {
        diagnostics.structural(subject, format!("@{annotation} field must be static"));
        valid = false;
    }
    if field.visibility == Visibility::Private {
        diagnostics.structural(subject, format!("@{annotation} field must not be private"));
        valid = false;
    }

    valid
}

fn check_method(
    method: &MethodDecl,
    role: CallbackRole,
    subject: &str,
    diagnostics: &mut Diagnostics,
) -> bool {
    let mut valid = true;

    if let Err(message) = validate_java_identifier(&method.name) {
        diagnostics.structural(subject, message);
        valid = false;
    }
    let required = role.required_params();
    if method.params != required {
        let expected: Vec<String> = required.iter().map(ToString::to_string).collect();
        let found: Vec<String> = method.params.iter().map(ToString::to_string).collect();
        diagnostics.structural(
            subject,
            format!(
                "{} callback must take ({}), found ({})",
                role.describe(),
                expected.join(", "),
                found.join(", ")
            ),
        );
        valid = false;
    }
    if !method.is_static {
        diagnostics.structural(
            subject,
            format!("{} callback must be static", role.describe()),
        );
        valid = false;
    }
    if method.visibility == Visibility::Private {
        diagnostics.structural(
            subject,
            format!("{} callback must not be private", role.describe()),
        );
        valid = false;
    }

    valid
}

fn validate_callbacks(container: &ContainerDecl, diagnostics: &mut Diagnostics) -> Callbacks {
    let mut callbacks = Callbacks::default();
    // Roles already reported as duplicated, so the first declaration is flagged once
    let mut reported: Vec<CallbackRole> = Vec::new();

    for method in &container.methods {
        let subject = method_subject(container, &method.name);

        for &role in &method.callbacks {
            if !check_method(method, role, &subject, diagnostics) {
                continue;
            }

            match callbacks.get(role).map(str::to_string) {
                None => *callbacks.slot_mut(role) = Some(method.name.clone()),
                Some(first) => {
                    if !reported.contains(&role) {
                        diagnostics.structural(
                            &method_subject(container, &first),
                            format!(
                                "duplicate {} callback, also declared by {}()",
                                role.describe(),
                                method.name
                            ),
                        );
                        reported.push(role);
                    }
                    diagnostics.structural(
                        &subject,
                        format!(
                            "duplicate {} callback, already declared by {first}()",
                            role.describe()
                        ),
                    );
                }
            }
        }
    }

    callbacks
}
