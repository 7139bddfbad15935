//! Mapped objects.
//!
//! A mapped entity is a plain Rust struct implementing [`MappedEntity`].
//! [`MappedObject`] wraps it together with the registry handle, the raw
//! attributes it was last filled from, and its visibility lists; that
//! wrapper is what application code fills from and serializes to external
//! maps.

use crate::accessor::{Accessors, AttributeAccessor, OutputKey};
use crate::config::UnknownFieldPolicy;
use crate::registry::MappingRegistry;
use crate::value::Value;
use crate::visibility::Visibility;
use attrmap_types::{ClassId, MappingError, MappingResult};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A struct whose attributes are mapped through the registry.
///
/// ```ignore
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Person { age: i64 }
///
/// static PERSON: LazyLock<Accessors<Person>> = LazyLock::new(|| {
///     Accessors::<Person>::new().field("age", |p| p.age.into(), |p, v| {
///         p.age = v.take()?;
///         Ok(())
///     })
/// });
///
/// impl MappedEntity for Person {
///     const CLASS: &'static str = "Person";
///     fn accessors() -> &'static Accessors<Self> { &PERSON }
/// }
/// ```
pub trait MappedEntity: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Class identity under which the registry knows this type.
    const CLASS: &'static str;

    /// Keys hidden by default on every new instance.
    const HIDDEN: &'static [&'static str] = &[];

    /// Keys made visible by default on every new instance.
    const VISIBLE: &'static [&'static str] = &[];

    /// The getter/setter table, built once per type.
    fn accessors() -> &'static Accessors<Self>;

    fn class_id() -> ClassId {
        ClassId::new(Self::CLASS)
    }
}

/// Object-safe view of a [`MappedObject`] of any entity type, used for
/// nested values and collection elements.
pub trait DynObject: fmt::Debug + Send + Sync {
    fn class_id(&self) -> ClassId;

    fn fill(&mut self, attributes: &Map<String, Json>) -> MappingResult<()>;

    fn to_map(&self) -> MappingResult<Map<String, Json>>;

    fn clone_object(&self) -> Box<dyn DynObject>;

    fn eq_object(&self, other: &dyn DynObject) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for Box<dyn DynObject> {
    fn clone(&self) -> Self {
        self.clone_object()
    }
}

/// A mapped entity plus its mapping state.
#[derive(Clone)]
pub struct MappedObject<T: MappedEntity> {
    registry: Arc<MappingRegistry>,
    entity: T,
    raw: Map<String, Json>,
    visibility: Visibility,
}

impl<T: MappedEntity> MappedObject<T> {
    /// An instance holding `T::default()`, with no attributes filled.
    pub fn empty(registry: &Arc<MappingRegistry>) -> MappingResult<Self> {
        if !registry.is_entity(T::CLASS) {
            return Err(MappingError::UnregisteredEntity(T::class_id()));
        }
        Ok(Self {
            registry: Arc::clone(registry),
            entity: T::default(),
            raw: Map::new(),
            visibility: Visibility::new(T::HIDDEN, T::VISIBLE),
        })
    }

    /// Creates an instance and fills it from an external map.
    pub fn new(registry: &Arc<MappingRegistry>, attributes: &Map<String, Json>) -> MappingResult<Self> {
        let mut object = Self::empty(registry)?;
        object.fill(attributes)?;
        Ok(object)
    }

    /// Creates an instance from a JSON value, which must be an object.
    pub fn from_json(registry: &Arc<MappingRegistry>, json: &Json) -> MappingResult<Self> {
        match json {
            Json::Object(map) => Self::new(registry, map),
            other => Err(MappingError::shape("map", Value::from(other.clone()).kind())),
        }
    }

    /// Creates an instance from JSON text.
    pub fn from_json_str(registry: &Arc<MappingRegistry>, text: &str) -> MappingResult<Self> {
        let json: Json = serde_json::from_str(text)?;
        Self::from_json(registry, &json)
    }

    /// Assigns every mapped key of `attributes`.
    ///
    /// Unmapped keys are dropped (or rejected, depending on config). Mapped
    /// keys go through coercion and the setter, and are also retained
    /// verbatim as raw attributes. A failing key leaves the object as it
    /// was before the call.
    pub fn fill(&mut self, attributes: &Map<String, Json>) -> MappingResult<()> {
        let mut staged = self.clone();
        staged.assign(attributes)?;
        self.entity = staged.entity;
        self.raw = staged.raw;
        Ok(())
    }

    fn assign(&mut self, attributes: &Map<String, Json>) -> MappingResult<()> {
        for (key, json) in attributes {
            if self.registry.lookup_by_field(T::CLASS, key).is_none() {
                if self.registry.config().unknown_fields == UnknownFieldPolicy::Reject {
                    return Err(MappingError::UnknownField {
                        class: T::class_id(),
                        key: key.clone(),
                    });
                }
                debug!(class = T::CLASS, key = %key, "Unmapped key dropped");
                continue;
            }
            AttributeAccessor::set(self, key, Value::from(json.clone()))?;
            self.raw.insert(key.clone(), json.clone());
        }
        Ok(())
    }

    /// Reads an attribute, returning its external field name and value.
    pub fn get(&self, key: &str) -> MappingResult<(String, Value)> {
        AttributeAccessor::get(self, key)
    }

    pub fn get_value(&self, key: &str) -> MappingResult<Value> {
        self.get(key).map(|(_, value)| value)
    }

    /// Coerces and writes an attribute.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> MappingResult<()> {
        AttributeAccessor::set(self, key, value.into())
    }

    /// True when `key` resolves to a readable, non-null attribute.
    pub fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_ok_and(|value| !value.is_null())
    }

    /// Forgets the raw attribute retained for `key`.
    pub fn remove(&mut self, key: &str) -> Option<Json> {
        self.raw.shift_remove(key)
    }

    /// Serialized values of the given keys only, ignoring visibility.
    pub fn only(&self, keys: &[&str]) -> MappingResult<Map<String, Json>> {
        let mut out = Map::new();
        for key in keys {
            let value = self.get_value(key)?.to_json(self.registry.config())?;
            out.insert(key.to_string(), value);
        }
        Ok(out)
    }

    /// The external form, keyed by field name.
    pub fn to_map(&self) -> MappingResult<Map<String, Json>> {
        AttributeAccessor::serialize(self, OutputKey::Field)
    }

    /// The external form, keyed by property alias.
    pub fn to_alias_map(&self) -> MappingResult<Map<String, Json>> {
        AttributeAccessor::serialize(self, OutputKey::Alias)
    }

    pub fn to_json(&self) -> MappingResult<String> {
        Ok(serde_json::to_string(&self.to_map()?)?)
    }

    pub fn make_visible(&mut self, keys: &[&str]) -> &mut Self {
        self.visibility.make_visible(keys);
        self
    }

    pub fn make_hidden(&mut self, keys: &[&str]) -> &mut Self {
        self.visibility.make_hidden(keys);
        self
    }

    pub fn set_visible(&mut self, keys: Vec<String>) -> &mut Self {
        self.visibility.set_visible(keys);
        self
    }

    pub fn set_hidden(&mut self, keys: Vec<String>) -> &mut Self {
        self.visibility.set_hidden(keys);
        self
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn entity(&self) -> &T {
        &self.entity
    }

    pub fn entity_mut(&mut self) -> &mut T {
        &mut self.entity
    }

    pub fn into_entity(self) -> T {
        self.entity
    }

    /// The external values last passed to `fill`, per mapped key.
    pub fn raw_attributes(&self) -> &Map<String, Json> {
        &self.raw
    }

    pub fn registry(&self) -> &Arc<MappingRegistry> {
        &self.registry
    }
}

/// Two objects are equal when their entity state is equal.
impl<T: MappedEntity> PartialEq for MappedObject<T> {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl<T: MappedEntity> fmt::Debug for MappedObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedObject")
            .field("class", &T::CLASS)
            .field("entity", &self.entity)
            .field("raw", &self.raw)
            .field("visibility", &self.visibility)
            .finish()
    }
}

impl<T: MappedEntity> fmt::Display for MappedObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<T: MappedEntity> Serialize for MappedObject<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<T: MappedEntity> DynObject for MappedObject<T> {
    fn class_id(&self) -> ClassId {
        T::class_id()
    }

    fn fill(&mut self, attributes: &Map<String, Json>) -> MappingResult<()> {
        MappedObject::fill(self, attributes)
    }

    fn to_map(&self) -> MappingResult<Map<String, Json>> {
        MappedObject::to_map(self)
    }

    fn clone_object(&self) -> Box<dyn DynObject> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn DynObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
