//! String transformation utilities for code generation

/// Converts a string to snake_case, the form resource ids are expected in.
///
/// Handles camelCase, PascalCase, kebab-case and space-separated input.
///
/// # Examples
/// ```
/// use modgen::core::utils::to_snake_case;
///
/// assert_eq!(to_snake_case("CopperOre"), "copper_ore");
/// assert_eq!(to_snake_case("copperOre"), "copper_ore");
/// assert_eq!(to_snake_case("copper-ore"), "copper_ore");
/// assert_eq!(to_snake_case("Copper Ore Block"), "copper_ore_block");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            // Word boundary on a lower-to-upper transition
            if prev_is_lowercase {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            result.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        } else if ch == '-' || ch == '_' || ch == ' ' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    result.trim_matches('_').to_string()
}

/// Splits a fully-qualified type name into its package and simple name.
///
/// ```
/// use modgen::core::utils::split_qualified_name;
///
/// assert_eq!(
///     split_qualified_name("com.example.ModBlocks"),
///     ("com.example", "ModBlocks")
/// );
/// assert_eq!(split_qualified_name("ModBlocks"), ("", "ModBlocks"));
/// ```
pub fn split_qualified_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        Some((package, simple)) => (package, simple),
        None => ("", name),
    }
}

/// Simple (unqualified) part of a type name
pub fn simple_name(name: &str) -> &str {
    split_qualified_name(name).1
}

/// Converts a dotted package name into a relative path
pub fn package_to_path(package: &str) -> std::path::PathBuf {
    package.split('.').filter(|part| !part.is_empty()).collect()
}
