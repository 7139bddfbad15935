//! Per-attribute metadata and the per-class dual index over it.

use crate::{ClassId, MappingError, MappingResult, TypeTag};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How one attribute of a mapped class maps to the outside world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// In-memory attribute name (accessor table key).
    pub attribute: String,
    /// External (wire) field name.
    pub field: String,
    /// Property alias, used by alias-keyed serialization.
    pub alias: String,
    pub hidden: bool,
    pub declared_type: TypeTag,
}

impl FieldMapping {
    /// A visible mapping whose field name and alias equal the attribute name.
    pub fn new(attribute: impl Into<String>, declared_type: TypeTag) -> Self {
        let attribute = attribute.into();
        Self {
            field: attribute.clone(),
            alias: attribute.clone(),
            attribute,
            hidden: false,
            declared_type,
        }
    }

    /// Overrides the external field name.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Overrides the property alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Sets the hidden flag.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// True if `key` names this mapping by field, attribute or alias.
    pub fn answers_to(&self, key: &str) -> bool {
        self.field == key || self.attribute == key || self.alias == key
    }
}

/// All field mappings of one class, indexed by attribute and by field.
///
/// `fields` is the authoritative set in registration order; both indexes
/// point into it and are only ever updated together by [`ClassMapping::insert`].
#[derive(Debug, Clone, Default)]
pub struct ClassMapping {
    fields: Vec<FieldMapping>,
    by_attribute: HashMap<String, usize>,
    by_field: HashMap<String, usize>,
}

impl ClassMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a mapping into both indexes.
    ///
    /// Fails without touching either index when the field name or the
    /// attribute name is already taken.
    pub fn insert(&mut self, class: &ClassId, mapping: FieldMapping) -> MappingResult<()> {
        if let Some(&existing) = self.by_field.get(&mapping.field) {
            return Err(MappingError::DuplicateFieldName {
                class: class.clone(),
                field: mapping.field,
                attribute: self.fields[existing].attribute.clone(),
            });
        }
        if self.by_attribute.contains_key(&mapping.attribute) {
            return Err(MappingError::DuplicateAttribute {
                class: class.clone(),
                attribute: mapping.attribute,
            });
        }

        let index = self.fields.len();
        self.by_attribute.insert(mapping.attribute.clone(), index);
        self.by_field.insert(mapping.field.clone(), index);
        self.fields.push(mapping);
        Ok(())
    }

    pub fn by_attribute(&self, attribute: &str) -> Option<&FieldMapping> {
        self.by_attribute.get(attribute).map(|&i| &self.fields[i])
    }

    pub fn by_field(&self, field: &str) -> Option<&FieldMapping> {
        self.by_field.get(field).map(|&i| &self.fields[i])
    }

    /// Field-first, then attribute lookup.
    pub fn resolve(&self, key: &str) -> Option<&FieldMapping> {
        self.by_field(key).or_else(|| self.by_attribute(key))
    }

    /// All mappings in registration order.
    pub fn fields(&self) -> &[FieldMapping] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
