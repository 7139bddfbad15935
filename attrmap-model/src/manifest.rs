//! Declarative class layouts.
//!
//! A manifest lists entity and collection declarations so the registry can
//! be populated from a TOML or JSON document instead of code.
//!
//! ```toml
//! [[entities]]
//! class = "Person"
//!
//! [[entities.fields]]
//! attribute = "age"
//! type = "int|null"
//!
//! [[collections]]
//! class = "PersonList"
//! element = "Person"
//! ```

use crate::registry::MappingRegistry;
use attrmap_types::{CollectionDeclaration, EntityDeclaration, MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entities: Vec<EntityDeclaration>,
    #[serde(default)]
    pub collections: Vec<CollectionDeclaration>,
}

impl Manifest {
    pub fn from_toml_str(contents: &str) -> MappingResult<Self> {
        toml::from_str(contents).map_err(|e| MappingError::Config(e.to_string()))
    }

    pub fn from_json_str(contents: &str) -> MappingResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

impl MappingRegistry {
    /// Populates the registry from a manifest.
    ///
    /// Entities are marked and collections declared before any field is
    /// registered, so type references may point forward. The first
    /// registration error aborts ingestion.
    pub fn ingest(&mut self, manifest: &Manifest) -> MappingResult<()> {
        for entity in &manifest.entities {
            self.mark_entity(entity.class.clone());
        }
        for collection in &manifest.collections {
            self.declare_collection(collection.class.clone(), collection.element.clone());
        }

        let mut field_count = 0;
        for entity in &manifest.entities {
            for field in &entity.fields {
                self.register_declared(entity.class.as_str(), field)?;
                field_count += 1;
            }
        }

        info!(
            entities = manifest.entities.len(),
            collections = manifest.collections.len(),
            fields = field_count,
            "Mapping manifest ingested"
        );
        Ok(())
    }

    /// Builds a registry straight from a manifest.
    pub fn from_manifest(manifest: &Manifest) -> MappingResult<Self> {
        let mut registry = Self::new();
        registry.ingest(manifest)?;
        Ok(registry)
    }
}
