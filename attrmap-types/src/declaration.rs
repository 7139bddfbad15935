//! What metadata ingestion hands to the registry.
//!
//! Declarations are the source-level view of a mapped class: names may be
//! left empty and types are still strings. They deserialize from JSON or
//! TOML so a class layout can live in a manifest file.

use crate::{ClassId, FieldMapping, TypeTag};
use serde::{Deserialize, Serialize};

/// Type name used when a declaration carries none, or only `null`.
pub const DEFAULT_TYPE_NAME: &str = "string";

/// A mapped entity class and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDeclaration {
    pub class: ClassId,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
}

/// One attribute as declared on the class.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub attribute: String,
    /// External field name; empty means "same as the attribute".
    #[serde(default)]
    pub name: String,
    /// Property alias; empty means "same as the attribute".
    #[serde(default)]
    pub prop: String,
    #[serde(default)]
    pub hidden: bool,
    /// Declared type, possibly a `|` union such as `int|null`.
    #[serde(default, rename = "type")]
    pub type_hint: Option<String>,
}

impl FieldDeclaration {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            ..Self::default()
        }
    }

    pub fn resolved_field(&self) -> &str {
        if self.name.is_empty() { &self.attribute } else { &self.name }
    }

    pub fn resolved_alias(&self) -> &str {
        if self.prop.is_empty() { &self.attribute } else { &self.prop }
    }

    pub fn type_name(&self) -> &str {
        declared_type_name(self.type_hint.as_deref().unwrap_or(""))
    }

    /// Builds the mapping once the type name has been resolved to a tag.
    pub fn to_mapping(&self, declared_type: TypeTag) -> FieldMapping {
        FieldMapping::new(self.attribute.clone(), declared_type)
            .field(self.resolved_field())
            .alias(self.resolved_alias())
            .hidden(self.hidden)
    }
}

/// A mapped collection class and the entity class of its elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDeclaration {
    pub class: ClassId,
    #[serde(default)]
    pub element: Option<ClassId>,
}

/// Picks the first alternative of a union type that is not nullable.
///
/// `"int|null"` → `"int"`, `"?\\App\\Address"` → `"App\\Address"`,
/// `""` or `"null"` → `"string"`.
pub fn declared_type_name(declared: &str) -> &str {
    declared
        .split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty() && !alt.contains("null"))
        .map(|alt| alt.trim_start_matches('?').trim_start_matches('\\'))
        .find(|alt| !alt.is_empty())
        .unwrap_or(DEFAULT_TYPE_NAME)
}
