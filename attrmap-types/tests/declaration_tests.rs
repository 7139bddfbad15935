use attrmap_types::{
    ClassId, CollectionDeclaration, EntityDeclaration, FieldDeclaration, TypeTag, declared_type_name,
};
use pretty_assertions::assert_eq;

// ── declared_type_name ───────────────────────────────────────────

#[test]
fn plain_type_name_is_kept() {
    assert_eq!(declared_type_name("int"), "int");
    assert_eq!(declared_type_name(" float "), "float");
}

#[test]
fn first_non_null_union_alternative_wins() {
    assert_eq!(declared_type_name("null|int"), "int");
    assert_eq!(declared_type_name("int|null"), "int");
    assert_eq!(declared_type_name("null|string|int"), "string");
}

#[test]
fn nullable_prefix_and_namespace_are_stripped() {
    assert_eq!(declared_type_name("?int"), "int");
    assert_eq!(declared_type_name("\\App\\Address|null"), "App\\Address");
}

#[test]
fn missing_or_all_null_defaults_to_string() {
    assert_eq!(declared_type_name(""), "string");
    assert_eq!(declared_type_name("null"), "string");
    assert_eq!(declared_type_name("null| null "), "string");
}

#[test]
fn capitalized_null_in_class_names_is_not_nullable() {
    assert_eq!(declared_type_name("NullAddress|null"), "NullAddress");
    assert_eq!(declared_type_name("?NullableOrder"), "NullableOrder");
}

// ── FieldDeclaration ─────────────────────────────────────────────

#[test]
fn empty_names_default_to_attribute() {
    let decl = FieldDeclaration::new("age");
    assert_eq!(decl.resolved_field(), "age");
    assert_eq!(decl.resolved_alias(), "age");
    assert_eq!(decl.type_name(), "string");
}

#[test]
fn explicit_names_are_used() {
    let decl = FieldDeclaration {
        attribute: "userName".into(),
        name: "user_name".into(),
        prop: "login".into(),
        hidden: true,
        type_hint: Some("string|null".into()),
    };
    let mapping = decl.to_mapping(TypeTag::String);
    assert_eq!(mapping.attribute, "userName");
    assert_eq!(mapping.field, "user_name");
    assert_eq!(mapping.alias, "login");
    assert!(mapping.hidden);
}

#[test]
fn field_declaration_deserializes_with_defaults() {
    let decl: FieldDeclaration =
        serde_json::from_str(r#"{"attribute": "age", "type": "int|null"}"#).unwrap();
    assert_eq!(decl.attribute, "age");
    assert_eq!(decl.name, "");
    assert!(!decl.hidden);
    assert_eq!(decl.type_name(), "int");
}

#[test]
fn entity_declaration_deserializes() {
    let decl: EntityDeclaration = serde_json::from_str(
        r#"{"class": "Person", "fields": [{"attribute": "age"}, {"attribute": "ssn", "hidden": true}]}"#,
    )
    .unwrap();
    assert_eq!(decl.class, ClassId::new("Person"));
    assert_eq!(decl.fields.len(), 2);
    assert!(decl.fields[1].hidden);
}

#[test]
fn collection_declaration_element_is_optional() {
    let decl: CollectionDeclaration = serde_json::from_str(r#"{"class": "Bag"}"#).unwrap();
    assert_eq!(decl.class.as_str(), "Bag");
    assert!(decl.element.is_none());
}
