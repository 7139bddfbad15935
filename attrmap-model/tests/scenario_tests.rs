//! End-to-end: a registered class filled from loosely typed input and
//! serialized back out.

use attrmap_model::{
    Accessors, FieldMapping, Manifest, MappedEntity, MappedObject, MappingRegistry, TypeTag,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, LazyLock};

#[derive(Debug, Clone, Default, PartialEq)]
struct Citizen {
    age: i64,
    ssn: String,
}

static CITIZEN: LazyLock<Accessors<Citizen>> = LazyLock::new(|| {
    Accessors::<Citizen>::new()
        .field("age", |c| c.age.into(), |c, v| {
            c.age = v.take()?;
            Ok(())
        })
        .field("ssn", |c| c.ssn.clone().into(), |c, v| {
            c.ssn = v.take()?;
            Ok(())
        })
});

impl MappedEntity for Citizen {
    const CLASS: &'static str = "Citizen";

    fn accessors() -> &'static Accessors<Self> {
        &CITIZEN
    }
}

fn registry() -> Arc<MappingRegistry> {
    let mut r = MappingRegistry::new();
    r.register::<Citizen>();
    r.register_field("Citizen", FieldMapping::new("age", TypeTag::Int)).unwrap();
    r.register_field("Citizen", FieldMapping::new("ssn", TypeTag::String).hidden(true))
        .unwrap();
    r.into_shared()
}

fn input() -> serde_json::Map<String, serde_json::Value> {
    match json!({"age": "34", "ssn": "123-45-6789"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn hidden_attribute_is_left_out() {
    let citizen = MappedObject::<Citizen>::new(&registry(), &input()).unwrap();
    assert_eq!(citizen.entity().age, 34);
    assert_eq!(citizen.to_json().unwrap(), r#"{"age":34}"#);
}

#[test]
fn made_visible_attribute_is_included() {
    let mut citizen = MappedObject::<Citizen>::new(&registry(), &input()).unwrap();
    citizen.make_visible(&["ssn"]);
    assert_eq!(citizen.to_json().unwrap(), r#"{"age":34,"ssn":"123-45-6789"}"#);
}

#[test]
fn manifest_driven_registry_behaves_the_same() {
    let manifest = Manifest::from_toml_str(
        r#"
[[entities]]
class = "Citizen"

[[entities.fields]]
attribute = "age"
type = "int"

[[entities.fields]]
attribute = "ssn"
hidden = true
"#,
    )
    .unwrap();
    let mut r = MappingRegistry::from_manifest(&manifest).unwrap();
    r.register::<Citizen>();
    let r = r.into_shared();

    let citizen = MappedObject::<Citizen>::new(&r, &input()).unwrap();
    assert_eq!(citizen.to_json().unwrap(), r#"{"age":34}"#);
}
