//! Loot table actions.
//!
//! The built-in loot templates stand for fixed drop behaviours and take their
//! argument from the entity itself rather than from the declared loot
//! arguments. Any other loot template is rendered with the resolved loot
//! argument list.

use crate::core::templates::Template;

/// What a resolved loot template does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootAction {
    /// The block drops itself
    DropSelf,
    /// The block drops itself when mined with silk touch
    DropSelfSilk,
    /// The block drops the identifier in `loot_data`
    DropOther,
    /// A user template
    Custom,
}

impl LootAction {
    /// Classify a resolved loot template
    ///
    /// Only built-ins are actions; a user template that replaced a built-in
    /// name is custom.
    pub fn of(template: &Template) -> Self {
        if !template.is_builtin() {
            return LootAction::Custom;
        }
        match template.name() {
            "drop_self" => LootAction::DropSelf,
            "drop_self_silk" => LootAction::DropSelfSilk,
            "drop_other" => LootAction::DropOther,
            _ => LootAction::Custom,
        }
    }

    /// Arguments the loot template is rendered with
    pub fn arguments(
        &self,
        namespace: &str,
        id: &str,
        loot_data: &str,
        resolved_args: Vec<String>,
    ) -> Result<Vec<String>, String> {
        match self {
            LootAction::DropSelf | LootAction::DropSelfSilk => Ok(vec![format!("{namespace}:{id}")]),
            LootAction::DropOther if loot_data.is_empty() => {
                Err("drop_other loot requires loot_data naming the dropped identifier".to_string())
            }
            LootAction::DropOther => Ok(vec![loot_data.to_string()]),
            LootAction::Custom => Ok(resolved_args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::templates::{TemplateKind, TemplateOrigin, TemplateStore};
    use std::path::PathBuf;

    fn builtin(name: &str) -> Template {
        let store = TemplateStore::with_builtins("examplemod").unwrap();
        store.lookup(TemplateKind::Loot, name).unwrap().as_ref().clone()
    }

    #[test]
    fn test_builtin_actions() {
        assert_eq!(LootAction::of(&builtin("drop_self")), LootAction::DropSelf);
        assert_eq!(
            LootAction::of(&builtin("drop_self_silk")),
            LootAction::DropSelfSilk
        );
        assert_eq!(LootAction::of(&builtin("drop_other")), LootAction::DropOther);
    }

    #[test]
    fn test_user_template_shadowing_builtin_is_custom() {
        let user = Template::new(
            "drop_self",
            TemplateKind::Loot,
            "{}",
            "examplemod",
            TemplateOrigin::File(PathBuf::from("drop_self.json")),
        );
        assert_eq!(LootAction::of(&user), LootAction::Custom);
    }

    #[test]
    fn test_arguments() {
        let custom = vec!["x".to_string()];
        assert_eq!(
            LootAction::DropSelf
                .arguments("examplemod", "ore", "", custom.clone())
                .unwrap(),
            vec!["examplemod:ore"]
        );
        assert_eq!(
            LootAction::DropOther
                .arguments("examplemod", "ore", "examplemod:raw_ore", custom.clone())
                .unwrap(),
            vec!["examplemod:raw_ore"]
        );
        assert!(
            LootAction::DropOther
                .arguments("examplemod", "ore", "", custom.clone())
                .is_err()
        );
        assert_eq!(
            LootAction::Custom
                .arguments("examplemod", "ore", "", custom)
                .unwrap(),
            vec!["x"]
        );
    }
}
