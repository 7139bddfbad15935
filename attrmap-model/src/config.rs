//! Mapper configuration, optionally read from a `mapping.toml` file.

use attrmap_types::{MappingError, MappingResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// What `fill` does with keys that no field is mapped to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Silently drop them.
    #[default]
    Drop,
    /// Fail with `UnknownField`.
    Reject,
}

/// How NaN and the infinities are written to the external form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonFiniteFloats {
    /// `"NaN"`, `"Infinity"`, `"-Infinity"`.
    #[default]
    String,
    Null,
}

/// Runtime knobs for the mapping pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MapperConfig {
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
    #[serde(default)]
    pub non_finite_floats: NonFiniteFloats,
}

/// Raw TOML structure of a config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    mapping: MapperConfig,
}

impl MapperConfig {
    /// Parses a config document, failing on malformed input.
    pub fn from_toml_str(contents: &str) -> MappingResult<Self> {
        toml::from_str::<ConfigFile>(contents)
            .map(|file| file.mapping)
            .map_err(|e| MappingError::Config(e.to_string()))
    }

    /// Loads config from a file, falling back to defaults if the file is
    /// missing or broken.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No mapping config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded mapping config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse mapping config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read mapping config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
