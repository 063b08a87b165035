//! Naming rules for namespaces and entity ids

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::utils::to_snake_case;

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_\-]+$").unwrap_or_else(|e| panic!("invalid namespace pattern: {e}"))
});

static PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9_.\-/]+$").unwrap_or_else(|e| panic!("invalid id pattern: {e}"))
});

static JAVA_IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")
        .unwrap_or_else(|e| panic!("invalid identifier pattern: {e}"))
});

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Validates a simple Java identifier such as a field or method name
pub fn validate_java_identifier(name: &str) -> Result<(), String> {
    if !JAVA_IDENT_RE.is_match(name) {
        return Err(format!("'{name}' is not a valid Java identifier"));
    }
    if JAVA_KEYWORDS.contains(&name) {
        return Err(format!("'{name}' is a reserved Java keyword"));
    }
    Ok(())
}

/// Validates a dotted Java type name such as `net.minecraft.item.ItemGroup`
pub fn validate_qualified_name(name: &str) -> Result<(), String> {
    if name.split('.').all(|part| validate_java_identifier(part).is_ok()) {
        Ok(())
    } else {
        Err(format!("'{name}' is not a valid qualified Java name"))
    }
}

/// Validates a container namespace (the part before `:` in an identifier)
///
/// The namespace becomes a single directory under `assets/` and `data/`, so
/// `.` is rejected along with `/`.
pub fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("namespace cannot be empty".to_string());
    }

    if !NAMESPACE_RE.is_match(namespace) {
        return Err(format!(
            "namespace '{namespace}' must contain only lowercase letters, digits, '_' and '-'"
        ));
    }

    Ok(())
}

/// Validates an entity id (the path part of an identifier)
pub fn validate_entity_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("id cannot be empty".to_string());
    }

    if !PATH_RE.is_match(id) {
        let suggestion = to_snake_case(id);
        if !suggestion.is_empty() && PATH_RE.is_match(&suggestion) {
            return Err(format!(
                "id '{id}' is not a valid resource path; did you mean '{suggestion}'?"
            ));
        }
        return Err(format!(
            "id '{id}' must contain only lowercase letters, digits, '_', '-', '.' and '/'"
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("examplemod").is_ok());
        assert!(validate_namespace("example_mod-2").is_ok());
        assert!(validate_namespace("").is_err());
        assert!(validate_namespace("Example").is_err());
        assert!(validate_namespace("example/mod").is_err());
        assert!(validate_namespace("my.mod").is_err());
    }

    #[test]
    fn test_validate_java_names() {
        assert!(validate_java_identifier("COPPER_ORE").is_ok());
        assert!(validate_java_identifier("$on_block2").is_ok());
        assert!(validate_java_identifier("").is_err());
        assert!(validate_java_identifier("2FAST").is_err());
        assert!(validate_java_identifier("x); System.exit(1").is_err());
        assert!(validate_java_identifier("class").is_err());

        assert!(validate_qualified_name("net.minecraft.item.ItemGroup").is_ok());
        assert!(validate_qualified_name("ModBlocks").is_ok());
        assert!(validate_qualified_name("net..item").is_err());
        assert!(validate_qualified_name("com.example.new").is_err());
    }

    #[test]
    fn test_validate_entity_id() {
        assert!(validate_entity_id("copper_ore").is_ok());
        assert!(validate_entity_id("ores/copper").is_ok());
        assert!(validate_entity_id("").is_err());
    }

    #[test]
    fn test_invalid_id_suggests_snake_case() {
        let err = validate_entity_id("CopperOre").unwrap_err();
        assert!(err.contains("did you mean 'copper_ore'"));

        let err = validate_entity_id("!!!").unwrap_err();
        assert!(!err.contains("did you mean"));
    }
}
