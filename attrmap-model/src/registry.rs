//! The mapping registry.
//!
//! Holds, per mapped class, the field metadata and the factory used to
//! produce fresh instances. The registry is filled during startup through
//! `&mut self` methods and then frozen behind an `Arc` with
//! [`MappingRegistry::into_shared`]; every mapped object keeps a handle to
//! that shared, read-only table.

use crate::config::MapperConfig;
use crate::object::{DynObject, MappedEntity, MappedObject};
use attrmap_types::{
    ClassId, ClassMapping, FieldDeclaration, FieldMapping, MappingError, MappingResult, TypeTag,
};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Produces an empty instance of a mapped class.
pub type ObjectFactory = fn(&Arc<MappingRegistry>) -> MappingResult<Box<dyn DynObject>>;

fn empty_object<T: MappedEntity>(
    registry: &Arc<MappingRegistry>,
) -> MappingResult<Box<dyn DynObject>> {
    Ok(Box::new(MappedObject::<T>::empty(registry)?))
}

#[derive(Default)]
pub struct MappingRegistry {
    config: MapperConfig,
    entities: HashSet<ClassId>,
    classes: HashMap<ClassId, ClassMapping>,
    /// Collection class → element class (`None` when never declared).
    collections: HashMap<ClassId, Option<ClassId>>,
    factories: HashMap<ClassId, ObjectFactory>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Freezes the registry for shared, read-only use.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    // ================================================================
    // Registration
    // ================================================================

    /// Marks a class as a valid mapping target. Repeat calls are no-ops.
    pub fn mark_entity(&mut self, class: impl Into<ClassId>) {
        let class = class.into();
        if !self.entities.contains(&class) {
            debug!(class = %class, "Entity marked");
            self.entities.insert(class);
        }
    }

    pub fn is_entity(&self, class: &str) -> bool {
        self.entities.contains(class)
    }

    /// Marks `T` as an entity and installs its instance factory.
    pub fn register<T: MappedEntity>(&mut self) {
        let class = T::class_id();
        self.mark_entity(class.clone());
        self.register_factory(class, empty_object::<T>);
    }

    /// Installs the factory used by [`MappingRegistry::instantiate`].
    pub fn register_factory(&mut self, class: impl Into<ClassId>, factory: ObjectFactory) {
        self.factories.insert(class.into(), factory);
    }

    /// Registers one attribute of a marked class.
    ///
    /// Both the attribute index and the field index are updated, or
    /// neither is.
    pub fn register_field(&mut self, class: &str, mapping: FieldMapping) -> MappingResult<()> {
        let Some(class_id) = self.entities.get(class).cloned() else {
            return Err(MappingError::UnregisteredEntity(ClassId::new(class)));
        };

        let attribute = mapping.attribute.clone();
        self.classes
            .entry(class_id.clone())
            .or_default()
            .insert(&class_id, mapping)?;

        if let Some(mapping) = self.lookup_by_attribute(class, &attribute) {
            debug!(
                class = %class_id,
                attribute = %mapping.attribute,
                field = %mapping.field,
                declared_type = %mapping.declared_type,
                "Field registered"
            );
        }
        Ok(())
    }

    /// Registers an attribute as declared at the source level, resolving
    /// its type name and defaulting empty names.
    pub fn register_declared(
        &mut self,
        class: &str,
        declaration: &FieldDeclaration,
    ) -> MappingResult<()> {
        let declared_type = self.resolve_type(declaration.type_name())?;
        self.register_field(class, declaration.to_mapping(declared_type))
    }

    /// Records a collection class and the entity class of its elements.
    pub fn declare_collection(&mut self, class: impl Into<ClassId>, element: Option<ClassId>) {
        let class = class.into();
        debug!(class = %class, element = ?element, "Collection declared");
        self.collections.insert(class, element);
    }

    // ================================================================
    // Lookup
    // ================================================================

    pub fn lookup_by_attribute(&self, class: &str, attribute: &str) -> Option<&FieldMapping> {
        self.classes.get(class)?.by_attribute(attribute)
    }

    pub fn lookup_by_field(&self, class: &str, field: &str) -> Option<&FieldMapping> {
        self.classes.get(class)?.by_field(field)
    }

    /// Field-name lookup first, then attribute-name lookup.
    pub fn resolve(&self, class: &str, key: &str) -> Option<&FieldMapping> {
        self.classes.get(class)?.resolve(key)
    }

    /// All mappings of a class in registration order.
    pub fn all_fields(&self, class: &str) -> &[FieldMapping] {
        self.classes.get(class).map(ClassMapping::fields).unwrap_or(&[])
    }

    pub fn class_mapping(&self, class: &str) -> Option<&ClassMapping> {
        self.classes.get(class)
    }

    pub fn is_collection(&self, class: &str) -> bool {
        self.collections.contains_key(class)
    }

    /// The element class of a declared collection.
    pub fn collection_element(&self, class: &str) -> MappingResult<&ClassId> {
        self.collections
            .get(class)
            .and_then(Option::as_ref)
            .ok_or_else(|| MappingError::UndeclaredElementType(ClassId::new(class)))
    }

    /// Maps a declared type name to a tag.
    ///
    /// Primitive names win; otherwise the name must be a marked entity or
    /// a declared collection.
    pub fn resolve_type(&self, name: &str) -> MappingResult<TypeTag> {
        if let Some(tag) = TypeTag::primitive(name) {
            return Ok(tag);
        }
        if self.is_entity(name) {
            Ok(TypeTag::Entity(ClassId::new(name)))
        } else if self.is_collection(name) {
            Ok(TypeTag::Collection(ClassId::new(name)))
        } else {
            Err(MappingError::UnregisteredEntity(ClassId::new(name)))
        }
    }

    // ================================================================
    // Instantiation
    // ================================================================

    /// Produces an empty instance of `class` through its factory.
    pub fn instantiate(registry: &Arc<Self>, class: &str) -> MappingResult<Box<dyn DynObject>> {
        let factory = registry
            .factories
            .get(class)
            .ok_or_else(|| MappingError::Instantiation {
                class: ClassId::new(class),
                reason: "no factory registered".into(),
            })?;
        factory(registry)
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("config", &self.config)
            .field("entities", &self.entities.len())
            .field("classes", &self.classes.len())
            .field("collections", &self.collections.len())
            .field("factories", &self.factories.len())
            .finish()
    }
}
