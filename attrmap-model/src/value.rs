//! Tagged attribute values.
//!
//! Everything that flows through an accessor is a [`Value`]: scalars,
//! nested mapped objects, nested collections, or untyped JSON that has not
//! been coerced yet.

use crate::collection::MappedCollection;
use crate::config::{MapperConfig, NonFiniteFloats};
use crate::object::{DynObject, MappedEntity, MappedObject};
use attrmap_types::{MappingError, MappingResult};
use serde_json::Value as Json;

/// A dynamically typed attribute value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Untyped JSON (arrays and objects from external input, `Any` attributes).
    Json(Json),
    Object(Box<dyn DynObject>),
    Collection(MappedCollection),
}

impl Value {
    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> String {
        match self {
            Self::Null => "null".into(),
            Self::Bool(_) => "bool".into(),
            Self::Int(_) => "int".into(),
            Self::Float(_) => "float".into(),
            Self::String(_) => "string".into(),
            Self::Json(Json::Array(_)) => "array".into(),
            Self::Json(Json::Object(_)) => "map".into(),
            Self::Json(other) => format!("json {other}"),
            Self::Object(object) => format!("object {}", object.class_id()),
            Self::Collection(collection) => format!("collection {}", collection.class_id()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(Json::Null))
    }

    /// Extracts a typed value, see [`FromValue`].
    pub fn take<T: FromValue>(self) -> MappingResult<T> {
        T::from_value(self)
    }

    /// Converts into the external JSON form, serializing nested objects and
    /// collections recursively.
    pub fn to_json(&self, config: &MapperConfig) -> MappingResult<Json> {
        let json = match self {
            Self::Null => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::from(*i),
            Self::Float(f) => float_to_json(*f, config.non_finite_floats),
            Self::String(s) => Json::String(s.clone()),
            Self::Json(json) => json.clone(),
            Self::Object(object) => Json::Object(object.to_map()?),
            Self::Collection(collection) => Json::Array(collection.to_list()?),
        };
        Ok(json)
    }
}

fn float_to_json(f: f64, policy: NonFiniteFloats) -> Json {
    if let Some(number) = serde_json::Number::from_f64(f) {
        return Json::Number(number);
    }
    match policy {
        NonFiniteFloats::Null => Json::Null,
        NonFiniteFloats::String if f.is_nan() => Json::String("NaN".into()),
        NonFiniteFloats::String if f > 0.0 => Json::String("Infinity".into()),
        NonFiniteFloats::String => Json::String("-Infinity".into()),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.eq_object(b.as_ref()),
            (Self::Collection(a), Self::Collection(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::String(s),
            other => Self::Json(other),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl<T: MappedEntity> From<MappedObject<T>> for Value {
    fn from(object: MappedObject<T>) -> Self {
        Self::Object(Box::new(object))
    }
}

impl From<MappedCollection> for Value {
    fn from(collection: MappedCollection) -> Self {
        Self::Collection(collection)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Typed extraction out of an already-coerced [`Value`].
///
/// Setters in an accessor table use this to move a value into a typed
/// attribute; a mismatch surfaces as `TypeCoercion`.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> MappingResult<Self>;
}

fn mismatch<T>(expected: &str, value: &Value) -> MappingResult<T> {
    Err(MappingError::coercion(expected, value.kind()))
}

impl FromValue for Value {
    fn from_value(value: Value) -> MappingResult<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => mismatch("bool", &other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Int(i) => Ok(i),
            other => mismatch("int", &other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> MappingResult<Self> {
        let wide = i64::from_value(value)?;
        i32::try_from(wide).map_err(|_| MappingError::coercion("i32", wide.to_string()))
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> MappingResult<Self> {
        let wide = i64::from_value(value)?;
        u32::try_from(wide).map_err(|_| MappingError::coercion("u32", wide.to_string()))
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => mismatch("float", &other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => mismatch("string", &other),
        }
    }
}

impl FromValue for Json {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Object(_) | Value::Collection(_) => mismatch("json", &value),
            other => other.to_json(&MapperConfig::default()),
        }
    }
}

impl<T: MappedEntity> FromValue for MappedObject<T> {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Object(object) => {
                let found = object.class_id().to_string();
                object
                    .into_any()
                    .downcast::<MappedObject<T>>()
                    .map(|boxed| *boxed)
                    .map_err(|_| MappingError::ElementTypeMismatch {
                        expected: T::class_id(),
                        found,
                    })
            }
            other => mismatch(T::CLASS, &other),
        }
    }
}

impl FromValue for MappedCollection {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Collection(collection) => Ok(collection),
            other => mismatch("collection", &other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> MappingResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}
