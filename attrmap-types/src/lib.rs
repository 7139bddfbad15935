//! Core metadata types for attrmap.
//!
//! This crate holds the plain data that describes how a mapped class lays
//! out its attributes:
//! - [`ClassId`]: identity token of a mapped class
//! - [`TypeTag`]: the declared type of an attribute (primitive, nested
//!   entity or nested collection)
//! - [`FieldMapping`] / [`ClassMapping`]: per-attribute metadata and the
//!   dual attribute/field index over it
//! - [`EntityDeclaration`] and friends: what metadata ingestion supplies
//!
//! Behaviour (registry, coercion, mapped objects) lives in `attrmap-model`.

mod declaration;
mod ids;
mod mapping;
mod type_tag;

pub use declaration::{CollectionDeclaration, EntityDeclaration, FieldDeclaration, declared_type_name};
pub use ids::ClassId;
pub use mapping::{ClassMapping, FieldMapping};
pub use type_tag::TypeTag;

/// Result type alias using the crate's error type.
pub type MappingResult<T> = std::result::Result<T, MappingError>;

/// Errors raised while registering metadata or mapping attribute values.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("unregistered entity: {0} must be marked as a mapped entity first")]
    UnregisteredEntity(ClassId),

    #[error("duplicate field name: '{field}' is already mapped to '{attribute}' in {class}")]
    DuplicateFieldName {
        class: ClassId,
        field: String,
        attribute: String,
    },

    #[error("duplicate attribute: '{attribute}' is already registered in {class}")]
    DuplicateAttribute { class: ClassId, attribute: String },

    #[error("unknown field: '{key}' is not mapped in {class}")]
    UnknownField { class: ClassId, key: String },

    #[error("missing accessor: {class} declares no getter for '{attribute}'")]
    MissingAccessor { class: ClassId, attribute: String },

    #[error("type coercion failed: cannot convert {found} to {expected}")]
    TypeCoercion { expected: String, found: String },

    #[error("invalid shape: expected {expected}, got {found}")]
    InvalidShape { expected: String, found: String },

    #[error("element type mismatch: expected {expected}, got {found}")]
    ElementTypeMismatch { expected: ClassId, found: String },

    #[error("undeclared element type: collection {0} has no element class")]
    UndeclaredElementType(ClassId),

    #[error("instantiation failed for {class}: {reason}")]
    Instantiation { class: ClassId, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl MappingError {
    /// Shorthand for a coercion failure.
    pub fn coercion(expected: impl ToString, found: impl Into<String>) -> Self {
        Self::TypeCoercion {
            expected: expected.to_string(),
            found: found.into(),
        }
    }

    /// Shorthand for a shape failure.
    pub fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidShape {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
