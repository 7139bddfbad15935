//! Attribute access on mapped objects.
//!
//! Each entity type publishes an [`Accessors`] table once, naming a getter
//! and/or setter per attribute. [`AttributeAccessor`] resolves external
//! keys through the registry, coerces incoming values and dispatches to
//! that table.

use crate::coerce::TypeCoercer;
use crate::object::{MappedEntity, MappedObject};
use crate::value::Value;
use crate::registry::MappingRegistry;
use attrmap_types::{FieldMapping, MappingError, MappingResult};
use serde_json::{Map, Value as Json};
use std::collections::HashMap;
use tracing::trace;

pub type Getter<T> = fn(&T) -> Value;
pub type Setter<T> = fn(&mut T, Value) -> MappingResult<()>;

/// Getter/setter table of an entity type, keyed by attribute name.
pub struct Accessors<T> {
    getters: HashMap<&'static str, Getter<T>>,
    setters: HashMap<&'static str, Setter<T>>,
}

impl<T> Default for Accessors<T> {
    fn default() -> Self {
        Self {
            getters: HashMap::new(),
            setters: HashMap::new(),
        }
    }
}

impl<T> Accessors<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn getter(mut self, attribute: &'static str, getter: Getter<T>) -> Self {
        self.getters.insert(attribute, getter);
        self
    }

    pub fn setter(mut self, attribute: &'static str, setter: Setter<T>) -> Self {
        self.setters.insert(attribute, setter);
        self
    }

    /// Registers both directions for one attribute.
    pub fn field(self, attribute: &'static str, getter: Getter<T>, setter: Setter<T>) -> Self {
        self.getter(attribute, getter).setter(attribute, setter)
    }

    pub fn get(&self, attribute: &str) -> Option<Getter<T>> {
        self.getters.get(attribute).copied()
    }

    pub fn set(&self, attribute: &str) -> Option<Setter<T>> {
        self.setters.get(attribute).copied()
    }
}

/// Key used for each field of the serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKey {
    Field,
    Alias,
}

impl OutputKey {
    fn of(self, mapping: &FieldMapping) -> &str {
        match self {
            Self::Field => &mapping.field,
            Self::Alias => &mapping.alias,
        }
    }
}

/// Registry-driven get/set/serialize over mapped objects.
pub struct AttributeAccessor;

impl AttributeAccessor {
    fn mapping<'r, T: MappedEntity>(
        object: &'r MappedObject<T>,
        key: &str,
    ) -> MappingResult<&'r FieldMapping> {
        object
            .registry()
            .resolve(T::CLASS, key)
            .ok_or_else(|| MappingError::UnknownField {
                class: T::class_id(),
                key: key.to_string(),
            })
    }

    /// Reads an attribute by field name or attribute name, returning the
    /// external field name along with the value.
    pub fn get<T: MappedEntity>(
        object: &MappedObject<T>,
        key: &str,
    ) -> MappingResult<(String, Value)> {
        let mapping = Self::mapping(object, key)?;
        let getter = T::accessors()
            .get(&mapping.attribute)
            .ok_or_else(|| MappingError::MissingAccessor {
                class: T::class_id(),
                attribute: mapping.attribute.clone(),
            })?;
        Ok((mapping.field.clone(), getter(object.entity())))
    }

    /// Coerces `value` to the declared type and hands it to the setter.
    ///
    /// Attributes without a setter are read-only; the write is skipped.
    pub fn set<T: MappedEntity>(
        object: &mut MappedObject<T>,
        key: &str,
        value: Value,
    ) -> MappingResult<()> {
        let mapping = Self::mapping(object, key)?.clone();
        let value = TypeCoercer::new(object.registry()).coerce(&mapping.declared_type, value)?;

        match T::accessors().set(&mapping.attribute) {
            Some(setter) => setter(object.entity_mut(), value),
            None => {
                trace!(class = T::CLASS, attribute = %mapping.attribute, "No setter, write skipped");
                Ok(())
            }
        }
    }

    /// Serializes every included field in registration order.
    pub fn serialize<T: MappedEntity>(
        object: &MappedObject<T>,
        key: OutputKey,
    ) -> MappingResult<Map<String, Json>> {
        let registry = object.registry();
        let accessors = T::accessors();
        let mut out = Map::new();

        for mapping in registry.all_fields(T::CLASS) {
            if !object.visibility().includes(mapping) {
                continue;
            }
            let Some(getter) = accessors.get(&mapping.attribute) else {
                trace!(class = T::CLASS, attribute = %mapping.attribute, "No getter, field skipped");
                continue;
            };
            let value = getter(object.entity()).to_json(registry.config())?;
            out.insert(key.of(mapping).to_string(), value);
        }
        Ok(out)
    }

    /// Fields of `T` that have no getter, for startup checks.
    pub fn missing_getters<T: MappedEntity>(registry: &MappingRegistry) -> Vec<String> {
        registry
            .all_fields(T::CLASS)
            .iter()
            .filter(|m| T::accessors().get(&m.attribute).is_none())
            .map(|m| m.attribute.clone())
            .collect()
    }
}

impl<T> std::fmt::Debug for Accessors<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut getters: Vec<_> = self.getters.keys().collect();
        let mut setters: Vec<_> = self.setters.keys().collect();
        getters.sort();
        setters.sort();
        f.debug_struct("Accessors")
            .field("getters", &getters)
            .field("setters", &setters)
            .finish()
    }
}
