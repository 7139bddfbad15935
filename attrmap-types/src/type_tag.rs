use crate::ClassId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared type of a mapped attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "class", rename_all = "snake_case")]
pub enum TypeTag {
    String,
    Int,
    Float,
    Bool,
    /// Untyped pass-through (`mixed`, `array`, raw JSON).
    Any,
    /// A nested mapped entity of the given class.
    Entity(ClassId),
    /// A nested mapped collection of the given class.
    Collection(ClassId),
}

impl TypeTag {
    /// Resolves a primitive type name. Class names return `None`.
    pub fn primitive(name: &str) -> Option<Self> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "string" | "str" => Self::String,
            "int" | "integer" => Self::Int,
            "float" | "double" => Self::Float,
            "bool" | "boolean" => Self::Bool,
            "mixed" | "array" | "any" | "json" => Self::Any,
            _ => return None,
        };
        Some(tag)
    }

    /// Returns true for the scalar tags (not `Any`, entities or collections).
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::String | Self::Int | Self::Float | Self::Bool)
    }

    /// The referenced class for entity and collection tags.
    pub fn class(&self) -> Option<&ClassId> {
        match self {
            Self::Entity(class) | Self::Collection(class) => Some(class),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::Any => f.write_str("any"),
            Self::Entity(class) => write!(f, "entity {class}"),
            Self::Collection(class) => write!(f, "collection {class}"),
        }
    }
}
