use hexschema::{
    collect_ids, decode_schema, validate, PrimitiveType, Type, ValidationErrorKind,
    ValidationOptions,
};
use serde_json::json;

fn validate_ok(schema: &serde_json::Value, instance: &serde_json::Value) {
    let decoded = decode_schema(schema).unwrap();
    let pool = collect_ids(&decoded, "root").unwrap();
    let result = validate(&ValidationOptions::default(), &pool, instance, &decoded);
    assert!(result.is_ok(), "expected ok, got {:?}", result.err());
}

fn validate_err(schema: &serde_json::Value, instance: &serde_json::Value) -> Vec<hexschema::ValidationError> {
    let decoded = decode_schema(schema).unwrap();
    let pool = collect_ids(&decoded, "root").unwrap();
    validate(&ValidationOptions::default(), &pool, instance, &decoded).unwrap_err()
}

#[test]
fn s1_integer_type() {
    let schema = json!({ "type": "integer" });
    validate_ok(&schema, &json!(3));

    let errors = validate_err(&schema, &json!(3.5));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "");
    assert!(matches!(
        &errors[0].kind,
        ValidationErrorKind::InvalidType { expected: Type::SingleType(PrimitiveType::Integer), actual } if *actual == "number"
    ));
}

#[test]
fn s2_required_and_max_length() {
    let schema = json!({
        "type": "object",
        "required": ["a"],
        "properties": { "a": { "type": "string", "maxLength": 3 } }
    });

    let errors = validate_err(&schema, &json!({ "a": "hello" }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "/a");
    assert!(matches!(errors[0].kind, ValidationErrorKind::MaxLength(3)));

    let errors = validate_err(&schema, &json!({}));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "");
    assert!(matches!(&errors[0].kind, ValidationErrorKind::Required(name) if name == "a"));
}

#[test]
fn s3_tuple_items_and_additional_items() {
    let schema = json!({
        "items": [ { "type": "integer" }, { "type": "string" } ],
        "additionalItems": false
    });
    validate_ok(&schema, &json!([1, "x"]));

    let errors = validate_err(&schema, &json!([1, "x", true]));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "/2");
    assert!(matches!(
        errors[0].kind,
        ValidationErrorKind::AdditionalItemsDisallowed(2)
    ));
}

#[test]
fn s4_one_of_integer_is_also_number() {
    let schema = json!({
        "oneOf": [ { "type": "integer" }, { "type": "number" } ]
    });

    let errors = validate_err(&schema, &json!(3));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "");
    assert!(matches!(
        &errors[0].kind,
        ValidationErrorKind::OneOfManyMatch(matches) if matches == &[0, 1]
    ));

    validate_ok(&schema, &json!(3.5));
}

#[test]
fn s5_recursive_ref_terminates() {
    let schema = json!({
        "$id": "root",
        "definitions": {
            "node": {
                "type": "object",
                "properties": { "next": { "$ref": "#/definitions/node" } }
            }
        },
        "$ref": "#/definitions/node"
    });

    validate_ok(&schema, &json!({ "next": { "next": {} } }));

    let errors = validate_err(&schema, &json!({ "next": 42 }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "/next");
    assert!(matches!(
        errors[0].kind,
        ValidationErrorKind::InvalidType { expected: Type::SingleType(PrimitiveType::Object), actual: "number" }
    ));
}

#[test]
fn s6_array_and_schema_dependencies() {
    let schema = json!({
        "dependencies": {
            "a": ["b"],
            "c": { "required": ["d"] }
        }
    });

    validate_ok(&schema, &json!({ "a": 1, "b": 2, "c": 3, "d": 4 }));

    let errors = validate_err(&schema, &json!({ "a": 1 }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "");
    assert!(matches!(&errors[0].kind, ValidationErrorKind::Required(name) if name == "b"));

    let errors = validate_err(&schema, &json!({ "c": 1 }));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].instance_location.to_string(), "");
    assert!(matches!(&errors[0].kind, ValidationErrorKind::Required(name) if name == "d"));
}
