//! A loaded resource template and its substitution rules.
//!
//! Template bodies carry three kinds of substitution point:
//!
//! - `${modid}`: replaced with the container namespace when the template is loaded
//! - `${id}`: replaced with the entity id when the template is rendered
//! - `%s` / `%N$s`: positional argument slots filled from the resolved argument
//!   list (sequentially, or by 1-based index); `%%` is a literal percent and
//!   `%n` a newline
//!
//! Arguments beyond the slots a body uses are ignored.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use super::TemplateKind;

/// Placeholder replaced by the container namespace at load time
pub const NAMESPACE_PLACEHOLDER: &str = "${modid}";

/// Placeholder replaced by the entity id at render time
pub const ID_PLACEHOLDER: &str = "${id}";

static SLOT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:([1-9][0-9]*)\$)?([sn%])")
        .unwrap_or_else(|e| panic!("invalid slot pattern: {e}"))
});

/// Errors raised while rendering a template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A slot referenced an argument that was not supplied
    #[error("template '{template}' needs argument {index} but only {supplied} were supplied")]
    MissingArgument {
        template: String,
        index: usize,
        supplied: usize,
    },
}

/// Where a template body came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// Bundled with the generator
    Builtin,
    /// Loaded from a user template file
    File(PathBuf),
}

/// A named, immutable template body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    kind: TemplateKind,
    body: String,
    origin: TemplateOrigin,
}

impl Template {
    /// Create a template, substituting `namespace` for `${modid}`
    pub fn new(
        name: impl Into<String>,
        kind: TemplateKind,
        body: &str,
        namespace: &str,
        origin: TemplateOrigin,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            body: body.replace(NAMESPACE_PLACEHOLDER, namespace),
            origin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn origin(&self) -> &TemplateOrigin {
        &self.origin
    }

    pub fn is_builtin(&self) -> bool {
        self.origin == TemplateOrigin::Builtin
    }

    /// Render the body for one entity
    pub fn render<S: AsRef<str>>(&self, id: &str, args: &[S]) -> Result<String, TemplateError> {
        let body = self.body.replace(ID_PLACEHOLDER, id);

        let mut next = 0;
        let mut missing = None;
        let rendered = SLOT_RE.replace_all(&body, |caps: &Captures<'_>| match &caps[2] {
            "%" => "%".to_string(),
            "n" => "\n".to_string(),
            _ => {
                let index = match caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) {
                    Some(explicit) => explicit,
                    None => {
                        next += 1;
                        next
                    }
                };
                match args.get(index - 1) {
                    Some(arg) => arg.as_ref().to_string(),
                    None => {
                        missing.get_or_insert(index);
                        String::new()
                    }
                }
            }
        });

        if let Some(index) = missing {
            return Err(TemplateError::MissingArgument {
                template: self.name.clone(),
                index,
                supplied: args.len(),
            });
        }

        Ok(rendered.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(body: &str) -> Template {
        Template::new(
            "test",
            TemplateKind::Block,
            body,
            "examplemod",
            TemplateOrigin::Builtin,
        )
    }

    #[test]
    fn test_namespace_is_substituted_at_load() {
        let t = template(r#"{"all": "${modid}:block/${id}"}"#);
        assert_eq!(t.body(), r#"{"all": "examplemod:block/${id}"}"#);
    }

    #[test]
    fn test_render_substitutes_id_and_sequential_args() {
        let t = template(r#"{"parent": "%s", "texture": "${modid}:block/${id}_%s"}"#);
        let rendered = t.render("copper_ore", &["block/cube_all", "side"]).unwrap();
        assert_eq!(
            rendered,
            r#"{"parent": "block/cube_all", "texture": "examplemod:block/copper_ore_side"}"#
        );
    }

    #[test]
    fn test_render_supports_indexed_slots_and_escapes() {
        let t = template("%2$s/%1$s 100%% %s");
        let rendered = t.render("x", &["a", "b"]).unwrap();
        assert_eq!(rendered, "b/a 100% a");
    }

    #[test]
    fn test_render_ignores_extra_args() {
        let t = template("${id}=%s");
        assert_eq!(t.render("ore", &["1", "2", "3"]).unwrap(), "ore=1");
    }

    #[test]
    fn test_render_reports_missing_argument() {
        let t = template("%s and %s");
        let err = t.render("ore", &["only"]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingArgument {
                template: "test".to_string(),
                index: 2,
                supplied: 1,
            }
        );
    }

    #[test]
    fn test_origin() {
        assert!(template("x").is_builtin());
        let user = Template::new(
            "pillar",
            TemplateKind::Block,
            "x",
            "ns",
            TemplateOrigin::File(PathBuf::from("pillar.json")),
        );
        assert!(!user.is_builtin());
        assert_eq!(user.kind(), TemplateKind::Block);
    }
}
