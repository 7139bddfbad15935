//! Shared fixtures: a `Person` with a nested `Address` and a `PersonList`
//! of friends, plus an unrelated `Pet`.

#![allow(dead_code)]

use attrmap_model::{
    Accessors, ClassId, FieldMapping, MappedCollection, MappedEntity, MappedObject, MapperConfig,
    MappingRegistry, TypeTag,
};
use std::sync::{Arc, LazyLock};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i64,
    pub ssn: String,
    pub score: f64,
    pub active: bool,
    pub nickname: Option<String>,
    pub address: Option<MappedObject<Address>>,
    pub friends: Option<MappedCollection>,
    /// Write-only.
    pub token: String,
    /// Read-only.
    pub version: i64,
}

static PERSON: LazyLock<Accessors<Person>> = LazyLock::new(|| {
    Accessors::<Person>::new()
        .field("name", |p| p.name.clone().into(), |p, v| {
            p.name = v.take()?;
            Ok(())
        })
        .field("age", |p| p.age.into(), |p, v| {
            p.age = v.take()?;
            Ok(())
        })
        .field("ssn", |p| p.ssn.clone().into(), |p, v| {
            p.ssn = v.take()?;
            Ok(())
        })
        .field("score", |p| p.score.into(), |p, v| {
            p.score = v.take()?;
            Ok(())
        })
        .field("active", |p| p.active.into(), |p, v| {
            p.active = v.take()?;
            Ok(())
        })
        .field("nickname", |p| p.nickname.clone().into(), |p, v| {
            p.nickname = v.take()?;
            Ok(())
        })
        .field("address", |p| p.address.clone().into(), |p, v| {
            p.address = v.take()?;
            Ok(())
        })
        .field("friends", |p| p.friends.clone().into(), |p, v| {
            p.friends = v.take()?;
            Ok(())
        })
        .setter("token", |p, v| {
            p.token = v.take()?;
            Ok(())
        })
        .getter("version", |p| p.version.into())
});

impl MappedEntity for Person {
    const CLASS: &'static str = "Person";

    fn accessors() -> &'static Accessors<Self> {
        &PERSON
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

static ADDRESS: LazyLock<Accessors<Address>> = LazyLock::new(|| {
    Accessors::<Address>::new()
        .field("city", |a| a.city.clone().into(), |a, v| {
            a.city = v.take()?;
            Ok(())
        })
        .field("zip", |a| a.zip.clone().into(), |a, v| {
            a.zip = v.take()?;
            Ok(())
        })
});

impl MappedEntity for Address {
    const CLASS: &'static str = "Address";

    fn accessors() -> &'static Accessors<Self> {
        &ADDRESS
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pet {
    pub name: String,
}

static PET: LazyLock<Accessors<Pet>> = LazyLock::new(|| {
    Accessors::<Pet>::new().field("name", |p| p.name.clone().into(), |p, v| {
        p.name = v.take()?;
        Ok(())
    })
});

impl MappedEntity for Pet {
    const CLASS: &'static str = "Pet";

    fn accessors() -> &'static Accessors<Self> {
        &PET
    }
}

pub fn registry() -> Arc<MappingRegistry> {
    registry_with(MapperConfig::default())
}

pub fn registry_with(config: MapperConfig) -> Arc<MappingRegistry> {
    let mut r = MappingRegistry::with_config(config);
    r.register::<Person>();
    r.register::<Address>();
    r.register::<Pet>();
    r.declare_collection("PersonList", Some(ClassId::new("Person")));
    r.declare_collection("PetList", Some(ClassId::new("Pet")));
    r.declare_collection("Untyped", None);

    let person = [
        FieldMapping::new("name", TypeTag::String).field("full_name"),
        FieldMapping::new("age", TypeTag::Int),
        FieldMapping::new("ssn", TypeTag::String).hidden(true),
        FieldMapping::new("score", TypeTag::Float),
        FieldMapping::new("active", TypeTag::Bool),
        FieldMapping::new("nickname", TypeTag::String).alias("nick"),
        FieldMapping::new("address", TypeTag::Entity(ClassId::new("Address"))),
        FieldMapping::new("friends", TypeTag::Collection(ClassId::new("PersonList"))),
        FieldMapping::new("token", TypeTag::String),
        FieldMapping::new("version", TypeTag::Int),
    ];
    for mapping in person {
        r.register_field("Person", mapping).unwrap();
    }

    r.register_field("Address", FieldMapping::new("city", TypeTag::String)).unwrap();
    r.register_field("Address", FieldMapping::new("zip", TypeTag::String).field("postal_code"))
        .unwrap();

    r.register_field("Pet", FieldMapping::new("name", TypeTag::String)).unwrap();

    r.into_shared()
}

/// Parses a JSON object literal into a map.
pub fn map(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match json {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
