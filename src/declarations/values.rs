//! Layered annotation values.
//!
//! Entity annotations leave most settings at the inherit marker so the
//! container default applies. These types keep the three states (inherit,
//! explicitly nothing, a concrete value) distinct all the way from the
//! declaration file to the resolver.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_value::Value as SerdeValue;

use crate::core::rules::{validate_java_identifier, validate_qualified_name};

/// Reserved value meaning "use the container's default for this category"
pub const INHERIT_MARKER: &str = "#$%INHERIT";

/// Reference to a template by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateRef {
    /// Defer to the container default
    #[default]
    Inherit,
    /// Explicitly no template; the category produces no resource
    None,
    /// A template registered under this name
    Named(String),
}

impl TemplateRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// `TemplateRef::None`, as a function for serde defaults
    pub fn none() -> Self {
        Self::None
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }
}

impl From<String> for TemplateRef {
    fn from(value: String) -> Self {
        if value == INHERIT_MARKER {
            Self::Inherit
        } else if value.is_empty() {
            Self::None
        } else {
            Self::Named(value)
        }
    }
}

impl From<&str> for TemplateRef {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<TemplateRef> for String {
    fn from(value: TemplateRef) -> Self {
        match value {
            TemplateRef::Inherit => INHERIT_MARKER.to_string(),
            TemplateRef::None => String::new(),
            TemplateRef::Named(name) => name,
        }
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateRef::Inherit => write!(f, "<inherit>"),
            TemplateRef::None => write!(f, "<none>"),
            TemplateRef::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Tri-state "auto-generate companion block item" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AutoItem {
    True,
    False,
    /// Use the container default
    #[default]
    Unset,
}

impl AutoItem {
    /// Apply the entity flag over the container default
    pub fn resolve(self, container_default: bool) -> bool {
        match self {
            AutoItem::True => true,
            AutoItem::False => false,
            AutoItem::Unset => container_default,
        }
    }
}

impl From<bool> for AutoItem {
    fn from(value: bool) -> Self {
        if value { AutoItem::True } else { AutoItem::False }
    }
}

impl Serialize for AutoItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            AutoItem::True => serializer.serialize_bool(true),
            AutoItem::False => serializer.serialize_bool(false),
            AutoItem::Unset => serializer.serialize_str("unset"),
        }
    }
}

impl<'de> Deserialize<'de> for AutoItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match SerdeValue::deserialize(deserializer)? {
            SerdeValue::Bool(value) => Ok(value.into()),
            SerdeValue::Unit | SerdeValue::Option(None) => Ok(AutoItem::Unset),
            SerdeValue::String(s) => match s.to_lowercase().as_str() {
                "true" => Ok(AutoItem::True),
                "false" => Ok(AutoItem::False),
                "unset" | "none" | "" => Ok(AutoItem::Unset),
                other => Err(serde::de::Error::custom(format!(
                    "Expected true, false or unset, found '{other}'"
                ))),
            },
            _ => Err(serde::de::Error::custom(
                "Expected a boolean or 'unset' for auto_block_item",
            )),
        }
    }
}

/// A static field on some type, e.g. an item group constant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    /// Fully-qualified owner type
    pub owner: String,
    pub field: String,
}

impl FieldRef {
    pub fn new(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            field: field.into(),
        }
    }

    /// Check that the reference can be written into generated source
    pub fn validate(&self) -> Result<(), String> {
        validate_qualified_name(&self.owner)?;
        validate_java_identifier(&self.field)
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.field)
    }
}

/// Item group association for a companion block item
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ItemGroupRef {
    /// Use the container's association
    #[default]
    Inherit,
    /// No item group
    Void,
    Field(FieldRef),
}

impl ItemGroupRef {
    /// `ItemGroupRef::Void`, as a function for serde defaults
    pub fn void() -> Self {
        Self::Void
    }

    pub fn field(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Field(FieldRef::new(owner, field))
    }

    fn from_parts(owner: String, field: String) -> Self {
        if field == INHERIT_MARKER {
            Self::Inherit
        } else if field.is_empty() || owner.is_empty() || owner == "java.lang.Void" || owner == "Void"
        {
            Self::Void
        } else {
            Self::Field(FieldRef { owner, field })
        }
    }
}

/// Written back in the forms the deserializer reads: the marker, null or a
/// `{owner, field}` map
impl Serialize for ItemGroupRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ItemGroupRef::Inherit => serializer.serialize_str(INHERIT_MARKER),
            ItemGroupRef::Void => serializer.serialize_none(),
            ItemGroupRef::Field(field) => field.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ItemGroupRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match SerdeValue::deserialize(deserializer)? {
            SerdeValue::Unit | SerdeValue::Option(None) => Ok(ItemGroupRef::Void),
            SerdeValue::String(s) => {
                if s == INHERIT_MARKER {
                    Ok(ItemGroupRef::Inherit)
                } else if s.is_empty() || s.eq_ignore_ascii_case("none") {
                    Ok(ItemGroupRef::Void)
                } else {
                    // `owner.Type.FIELD` shorthand
                    match s.rsplit_once('.') {
                        Some((owner, field)) => {
                            Ok(Self::from_parts(owner.to_string(), field.to_string()))
                        }
                        None => Err(serde::de::Error::custom(format!(
                            "Item group '{s}' must be written as Owner.FIELD"
                        ))),
                    }
                }
            }
            value @ SerdeValue::Map(_) => {
                let field_ref = FieldRef::deserialize(value).map_err(serde::de::Error::custom)?;
                Ok(Self::from_parts(field_ref.owner, field_ref.field))
            }
            _ => Err(serde::de::Error::custom(
                "Expected an Owner.FIELD string, a {owner, field} map or null for item_group",
            )),
        }
    }
}

/// Deserialize either a single argument or a list of arguments
pub fn deserialize_args<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.push(s);
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
