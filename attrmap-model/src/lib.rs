//! Runtime attribute mapping for plain Rust structs.
//!
//! Maps loosely typed external data (string-keyed JSON maps) onto typed
//! entities and back:
//! - [`MappingRegistry`]: per-class field metadata, collection declarations
//!   and instance factories, frozen behind an `Arc` after startup
//! - [`TypeCoercer`]: best-effort conversion into declared attribute types,
//!   including nested entities and collections
//! - [`AttributeAccessor`] / [`Accessors`]: key resolution, getter/setter
//!   dispatch and hidden/visible filtering
//! - [`MappedObject`] / [`MappedCollection`]: what application code fills
//!   and serializes
//!
//! Metadata comes in either through the registry's `&mut` API or through a
//! [`Manifest`] document.

mod accessor;
mod coerce;
mod collection;
mod config;
mod manifest;
mod object;
mod registry;
mod value;
mod visibility;

pub use accessor::{Accessors, AttributeAccessor, Getter, OutputKey, Setter};
pub use coerce::{TypeCoercer, decode_float};
pub use collection::MappedCollection;
pub use config::{MapperConfig, NonFiniteFloats, UnknownFieldPolicy};
pub use manifest::Manifest;
pub use object::{DynObject, MappedEntity, MappedObject};
pub use registry::{MappingRegistry, ObjectFactory};
pub use value::{FromValue, Value};
pub use visibility::Visibility;

pub use attrmap_types::{
    ClassId, ClassMapping, CollectionDeclaration, EntityDeclaration, FieldDeclaration,
    FieldMapping, MappingError, MappingResult, TypeTag,
};
