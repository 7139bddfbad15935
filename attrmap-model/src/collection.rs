//! Mapped collections: ordered lists of mapped objects of one element class.

use crate::object::{DynObject, MappedEntity, MappedObject};
use crate::registry::MappingRegistry;
use crate::value::Value;
use attrmap_types::{ClassId, MappingError, MappingResult};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::fmt;
use std::sync::Arc;

/// An ordered list of mapped objects whose class is the collection's
/// declared element class.
#[derive(Clone)]
pub struct MappedCollection {
    registry: Arc<MappingRegistry>,
    class: ClassId,
    element: ClassId,
    items: Vec<Box<dyn DynObject>>,
}

impl MappedCollection {
    /// An empty collection of a declared collection class.
    pub fn new(registry: &Arc<MappingRegistry>, class: &str) -> MappingResult<Self> {
        let element = registry.collection_element(class)?.clone();
        Ok(Self {
            registry: Arc::clone(registry),
            class: ClassId::new(class),
            element,
            items: Vec::new(),
        })
    }

    /// Builds a collection from a JSON array, or from the values of a JSON
    /// object in key order. Every item must be a map.
    pub fn from_json(registry: &Arc<MappingRegistry>, class: &str, json: &Json) -> MappingResult<Self> {
        let mut collection = Self::new(registry, class)?;
        match json {
            Json::Array(items) => collection.extend_json(items)?,
            Json::Object(map) => collection.extend_json(map.values())?,
            other => {
                return Err(MappingError::shape(
                    format!("sequence for {class}"),
                    Value::from(other.clone()).kind(),
                ));
            }
        }
        Ok(collection)
    }

    /// Builds a collection from items that are either maps or objects of
    /// the element class.
    pub fn from_values(
        registry: &Arc<MappingRegistry>,
        class: &str,
        items: impl IntoIterator<Item = Value>,
    ) -> MappingResult<Self> {
        let mut collection = Self::new(registry, class)?;
        for item in items {
            match item {
                Value::Object(object) => collection.append(object)?,
                Value::Json(Json::Object(map)) => collection.append_raw(&map)?,
                other => return Err(collection.mismatch(other.kind())),
            }
        }
        Ok(collection)
    }

    fn extend_json<'j>(&mut self, items: impl IntoIterator<Item = &'j Json>) -> MappingResult<()> {
        for item in items {
            match item {
                Json::Object(map) => self.append_raw(map)?,
                other => return Err(self.mismatch(Value::from(other.clone()).kind())),
            }
        }
        Ok(())
    }

    fn mismatch(&self, found: String) -> MappingError {
        MappingError::ElementTypeMismatch {
            expected: self.element.clone(),
            found,
        }
    }

    /// Appends an object, which must be of the element class.
    pub fn append(&mut self, item: Box<dyn DynObject>) -> MappingResult<()> {
        let found = item.class_id();
        if found != self.element {
            return Err(self.mismatch(found.to_string()));
        }
        self.items.push(item);
        Ok(())
    }

    /// Appends a typed object, checked like [`MappedCollection::append`].
    pub fn push<T: MappedEntity>(&mut self, item: MappedObject<T>) -> MappingResult<()> {
        self.append(Box::new(item))
    }

    /// Converts a raw map into a new element through the element class's
    /// factory and fill path, then appends it.
    pub fn append_raw(&mut self, attributes: &Map<String, Json>) -> MappingResult<()> {
        let mut object = MappingRegistry::instantiate(&self.registry, self.element.as_str())?;
        object.fill(attributes)?;
        self.append(object)
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class
    }

    pub fn element_class(&self) -> &ClassId {
        &self.element
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn DynObject> {
        self.items.iter().map(|item| &**item as &dyn DynObject)
    }

    /// The element at `index` as a `MappedObject<T>`, if it is one.
    pub fn get<T: MappedEntity>(&self, index: usize) -> Option<&MappedObject<T>> {
        self.items.get(index)?.as_any().downcast_ref::<MappedObject<T>>()
    }

    /// All elements that are `MappedObject<T>`.
    pub fn iter_as<T: MappedEntity>(&self) -> impl Iterator<Item = &MappedObject<T>> {
        self.items
            .iter()
            .filter_map(|item| item.as_any().downcast_ref::<MappedObject<T>>())
    }

    /// Each element's `to_map()`, in order.
    pub fn to_list(&self) -> MappingResult<Vec<Json>> {
        self.items
            .iter()
            .map(|item| item.to_map().map(Json::Object))
            .collect()
    }

    pub fn to_json(&self) -> MappingResult<String> {
        Ok(serde_json::to_string(&self.to_list()?)?)
    }
}

impl PartialEq for MappedCollection {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class
            && self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| a.eq_object(b.as_ref()))
    }
}

impl fmt::Debug for MappedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappedCollection")
            .field("class", &self.class)
            .field("element", &self.element)
            .field("items", &self.items)
            .finish()
    }
}

impl fmt::Display for MappedCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for MappedCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_list()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
