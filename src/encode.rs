//! `Schema -> JsonValue`, the inverse of [`crate::decode`] on the subset of
//! inputs the decoder accepts (§4.2, §8.1).

use serde_json::{Map, Value};

use crate::schema::{Dependency, ExclusiveBoundary, Items, Schema, SubSchema};

/// Encodes a [`Schema`] back into JSON. Starts from the subschema's `source`
/// so unknown/custom keywords round-trip, then overwrites each typed
/// keyword with its current value.
pub fn encode_schema(schema: &Schema) -> Value {
    match schema {
        Schema::BooleanSchema(b) => Value::Bool(*b),
        Schema::ObjectSchema(sub) => Value::Object(encode_sub_schema(sub)),
    }
}

fn encode_sub_schema(sub: &SubSchema) -> Map<String, Value> {
    let mut out = sub.source.clone();

    set_or_remove(&mut out, "type", sub.type_.as_ref().map(encode_type));
    set_or_remove(&mut out, "$id", sub.id.clone().map(Value::String));
    set_or_remove(&mut out, "$ref", sub.ref_.clone().map(Value::String));

    set_or_remove(&mut out, "title", sub.title.clone().map(Value::String));
    set_or_remove(&mut out, "description", sub.description.clone().map(Value::String));
    set_or_remove(&mut out, "default", sub.default.clone());
    set_or_remove(
        &mut out,
        "examples",
        sub.examples.clone().map(|v| Value::Array(v)),
    );
    set_or_remove(
        &mut out,
        "definitions",
        sub.definitions.as_ref().map(|defs| {
            Value::Object(defs.iter().map(|(k, v)| (k.clone(), encode_schema(v))).collect())
        }),
    );

    set_or_remove(&mut out, "multipleOf", sub.multiple_of.map(num));
    set_or_remove(&mut out, "maximum", sub.maximum.map(num));
    set_or_remove(&mut out, "minimum", sub.minimum.map(num));
    set_or_remove(
        &mut out,
        "exclusiveMaximum",
        sub.exclusive_maximum.map(encode_bound),
    );
    set_or_remove(
        &mut out,
        "exclusiveMinimum",
        sub.exclusive_minimum.map(encode_bound),
    );

    set_or_remove(&mut out, "maxLength", sub.max_length.map(uint));
    set_or_remove(&mut out, "minLength", sub.min_length.map(uint));
    set_or_remove(&mut out, "pattern", sub.pattern.clone().map(Value::String));
    set_or_remove(&mut out, "format", sub.format.clone().map(Value::String));

    match &sub.items {
        Items::NoItems => {}
        Items::ItemDefinition(s) => {
            out.insert("items".to_string(), encode_schema(s));
        }
        Items::ArrayOfItems(items) => {
            out.insert(
                "items".to_string(),
                Value::Array(items.iter().map(encode_schema).collect()),
            );
        }
    }
    set_or_remove(
        &mut out,
        "additionalItems",
        sub.additional_items.as_deref().map(encode_schema),
    );
    set_or_remove(&mut out, "maxItems", sub.max_items.map(uint));
    set_or_remove(&mut out, "minItems", sub.min_items.map(uint));
    set_or_remove(&mut out, "uniqueItems", sub.unique_items.map(Value::Bool));
    set_or_remove(&mut out, "contains", sub.contains.as_deref().map(encode_schema));

    set_or_remove(&mut out, "maxProperties", sub.max_properties.map(uint));
    set_or_remove(&mut out, "minProperties", sub.min_properties.map(uint));
    set_or_remove(
        &mut out,
        "required",
        sub.required
            .clone()
            .map(|names| Value::Array(names.into_iter().map(Value::String).collect())),
    );
    set_or_remove(
        &mut out,
        "properties",
        sub.properties.as_ref().map(encode_schema_map),
    );
    set_or_remove(
        &mut out,
        "patternProperties",
        sub.pattern_properties.as_ref().map(encode_schema_map),
    );
    set_or_remove(
        &mut out,
        "additionalProperties",
        sub.additional_properties.as_deref().map(encode_schema),
    );
    set_or_remove(
        &mut out,
        "dependencies",
        sub.dependencies.as_ref().map(|deps| {
            Value::Object(
                deps.iter()
                    .map(|(k, v)| (k.clone(), encode_dependency(v)))
                    .collect(),
            )
        }),
    );
    set_or_remove(
        &mut out,
        "propertyNames",
        sub.property_names.as_deref().map(encode_schema),
    );

    set_or_remove(
        &mut out,
        "enum",
        sub.enum_.clone().map(Value::Array),
    );
    set_or_remove(&mut out, "const", sub.const_.clone());
    set_or_remove(
        &mut out,
        "allOf",
        sub.all_of
            .as_ref()
            .map(|v| Value::Array(v.iter().map(encode_schema).collect())),
    );
    set_or_remove(
        &mut out,
        "anyOf",
        sub.any_of
            .as_ref()
            .map(|v| Value::Array(v.iter().map(encode_schema).collect())),
    );
    set_or_remove(
        &mut out,
        "oneOf",
        sub.one_of
            .as_ref()
            .map(|v| Value::Array(v.iter().map(encode_schema).collect())),
    );
    set_or_remove(&mut out, "not", sub.not.as_deref().map(encode_schema));

    out
}

fn set_or_remove(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    match value {
        Some(v) => {
            map.insert(key.to_string(), v);
        }
        None => {
            map.remove(key);
        }
    }
}

fn num(n: f64) -> Value {
    serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Encodes a non-negative count keyword (`maxLength`, `minItems`, ...) as an
/// integer JSON number. Unlike `num`, this never goes through `from_f64`:
/// with `arbitrary_precision` enabled, `Number::from_f64` stores the textual
/// form `"3.0"`, which `as_u64` (used to decode these fields back) can't
/// parse.
fn uint(n: usize) -> Value {
    Value::Number(serde_json::Number::from(n as u64))
}

fn encode_bound(b: ExclusiveBoundary) -> Value {
    match b {
        ExclusiveBoundary::Toggle(b) => Value::Bool(b),
        ExclusiveBoundary::Number(n) => num(n),
    }
}

fn encode_schema_map(map: &std::collections::BTreeMap<String, Schema>) -> Value {
    Value::Object(map.iter().map(|(k, v)| (k.clone(), encode_schema(v))).collect())
}

fn encode_dependency(dep: &Dependency) -> Value {
    match dep {
        Dependency::ArrayPropNames(names) => {
            Value::Array(names.iter().cloned().map(Value::String).collect())
        }
        Dependency::PropSchema(schema) => encode_schema(schema),
    }
}

fn encode_type(t: &crate::schema::Type) -> Value {
    use crate::schema::Type::*;
    match t {
        AnyType => Value::Null,
        SingleType(t) => Value::String(t.to_string()),
        NullableType(t) => Value::Array(vec![Value::String(t.to_string()), Value::String("null".into())]),
        UnionType(ts) => Value::Array(ts.iter().map(|t| Value::String(t.to_string())).collect()),
    }
}
