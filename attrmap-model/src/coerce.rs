//! Best-effort conversion of external values into declared attribute types.
//!
//! External data (decoded JSON, form input) is loosely typed, so scalar
//! coercion prefers parsing over rejection: `"34"` becomes `34`, `"0"`
//! becomes `false`, `1` becomes `"1"`. Only values with no sensible reading
//! in the target type fail.

use crate::collection::MappedCollection;
use crate::registry::MappingRegistry;
use crate::value::Value;
use attrmap_types::{ClassId, MappingError, MappingResult, TypeTag};
use serde_json::Value as Json;
use std::sync::Arc;

/// Decodes a float, honouring the textual special values used by wire
/// formats that cannot carry them as numbers.
pub fn decode_float(text: &str) -> Option<f64> {
    match text.trim() {
        "Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse().ok(),
    }
}

/// Coerces values against a registry, which it needs to build nested
/// entities and collections.
pub struct TypeCoercer<'a> {
    registry: &'a Arc<MappingRegistry>,
}

impl<'a> TypeCoercer<'a> {
    pub fn new(registry: &'a Arc<MappingRegistry>) -> Self {
        Self { registry }
    }

    /// Converts `value` into the representation declared by `tag`.
    ///
    /// Null passes through unchanged for every tag.
    pub fn coerce(&self, tag: &TypeTag, value: Value) -> MappingResult<Value> {
        let value = match value {
            Value::Json(json) if !json.is_array() && !json.is_object() => Value::from(json),
            other => other,
        };
        if value.is_null() {
            return Ok(Value::Null);
        }

        match tag {
            TypeTag::Any => Ok(value),
            TypeTag::String => to_string(value).map(Value::String),
            TypeTag::Int => to_int(value).map(Value::Int),
            TypeTag::Float => to_float(value).map(Value::Float),
            TypeTag::Bool => to_bool(value).map(Value::Bool),
            TypeTag::Entity(class) => self.to_entity(class, value),
            TypeTag::Collection(class) => self.to_collection(class, value),
        }
    }

    fn to_entity(&self, class: &ClassId, value: Value) -> MappingResult<Value> {
        match value {
            Value::Object(object) if object.class_id() == *class => Ok(Value::Object(object)),
            Value::Object(object) => Err(MappingError::ElementTypeMismatch {
                expected: class.clone(),
                found: object.class_id().to_string(),
            }),
            Value::Json(Json::Object(map)) => {
                let mut object = MappingRegistry::instantiate(self.registry, class.as_str())?;
                object.fill(&map)?;
                Ok(Value::Object(object))
            }
            other => Err(MappingError::shape(format!("map for {class}"), other.kind())),
        }
    }

    fn to_collection(&self, class: &ClassId, value: Value) -> MappingResult<Value> {
        match value {
            Value::Collection(collection) if collection.class_id() == class => {
                Ok(Value::Collection(collection))
            }
            Value::Collection(collection) => Err(MappingError::ElementTypeMismatch {
                expected: class.clone(),
                found: collection.class_id().to_string(),
            }),
            Value::Json(json @ Json::Array(_)) => {
                MappedCollection::from_json(self.registry, class.as_str(), &json)
                    .map(Value::Collection)
            }
            other => Err(MappingError::shape(format!("sequence for {class}"), other.kind())),
        }
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("string {s:?}"),
        Value::Float(f) => format!("float {f}"),
        other => other.kind(),
    }
}

fn to_string(value: Value) -> MappingResult<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Int(i) => Ok(i.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Float(f) if f.is_nan() => Ok("NaN".into()),
        Value::Float(f) if f.is_infinite() => {
            Ok(if f > 0.0 { "Infinity" } else { "-Infinity" }.into())
        }
        Value::Float(f) => Ok(f.to_string()),
        other => Err(MappingError::coercion(TypeTag::String, describe(&other))),
    }
}

fn float_to_int(f: f64) -> MappingResult<i64> {
    // i64::MAX rounds up to 2^63 as a float, hence the strict upper bound.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f.trunc() as i64)
    } else {
        Err(MappingError::coercion(TypeTag::Int, format!("float {f}")))
    }
}

fn to_int(value: Value) -> MappingResult<i64> {
    match value {
        Value::Int(i) => Ok(i),
        Value::Bool(b) => Ok(i64::from(b)),
        Value::Float(f) => float_to_int(f),
        Value::String(s) => {
            let text = s.trim();
            if let Ok(i) = text.parse::<i64>() {
                return Ok(i);
            }
            match text.parse::<f64>() {
                Ok(f) => float_to_int(f),
                Err(_) => Err(MappingError::coercion(TypeTag::Int, format!("string {s:?}"))),
            }
        }
        other => Err(MappingError::coercion(TypeTag::Int, describe(&other))),
    }
}

fn to_float(value: Value) -> MappingResult<f64> {
    match value {
        Value::Float(f) => Ok(f),
        Value::Int(i) => Ok(i as f64),
        Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::String(s) => decode_float(&s)
            .ok_or_else(|| MappingError::coercion(TypeTag::Float, format!("string {s:?}"))),
        other => Err(MappingError::coercion(TypeTag::Float, describe(&other))),
    }
}

fn to_bool(value: Value) -> MappingResult<bool> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::Int(i) => Ok(i != 0),
        Value::Float(f) => Ok(f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" | "" => Ok(false),
            text => decode_float(text)
                .filter(|f| !f.is_nan())
                .map(|f| f != 0.0)
                .ok_or_else(|| MappingError::coercion(TypeTag::Bool, format!("string {s:?}"))),
        },
        other => Err(MappingError::coercion(TypeTag::Bool, describe(&other))),
    }
}
