//! `JsonValue -> Schema` with structural validation of the schema itself
//! (§4.1).

use std::collections::BTreeMap;

use jsonptr::Pointer;
use serde_json::Value;
use tracing::trace;

use crate::error::DecodeError;
use crate::schema::{decode_type, Dependency, ExclusiveBoundary, Items, Schema, SubSchema};

/// Decodes an arbitrary JSON value into a [`Schema`], per §4.1.
pub fn decode_schema(value: &Value) -> Result<Schema, DecodeError> {
    decode_at(value, &Pointer::default())
}

fn decode_at(value: &Value, at: &Pointer) -> Result<Schema, DecodeError> {
    match value {
        Value::Bool(b) => Ok(Schema::BooleanSchema(*b)),
        Value::Object(map) => {
            trace!(pointer = %at, "decoding object schema");
            Ok(Schema::ObjectSchema(decode_sub_schema(map, at)?))
        }
        other => Err(DecodeError::not_a_schema(at.clone(), other.clone())),
    }
}

fn child(at: &Pointer, segment: impl Into<String>) -> Pointer {
    let mut next = at.clone();
    next.push_back(jsonptr::Token::from(segment.into()));
    next
}

fn decode_sub_schema(
    map: &serde_json::Map<String, Value>,
    at: &Pointer,
) -> Result<SubSchema, DecodeError> {
    let mut sub = SubSchema::empty();
    sub.source = map.clone();

    if let Some(type_value) = map.get("type") {
        let at = child(at, "type");
        sub.type_ = Some(
            decode_type(type_value).map_err(|name| DecodeError::UnknownType { pointer: at, name })?,
        );
    }

    sub.id = map
        .get("$id")
        .or_else(|| map.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    sub.ref_ = map.get("$ref").and_then(Value::as_str).map(str::to_string);

    sub.title = string_field(map, "title");
    sub.description = string_field(map, "description");
    sub.default = map.get("default").cloned();
    sub.examples = map
        .get("examples")
        .and_then(Value::as_array)
        .map(|a| a.to_vec());

    if let Some(defs) = map.get("definitions") {
        sub.definitions = Some(decode_schema_map(defs, &child(at, "definitions"), "definitions")?);
    }

    sub.multiple_of = number_field(map, "multipleOf");
    sub.maximum = number_field(map, "maximum");
    sub.minimum = number_field(map, "minimum");
    sub.exclusive_maximum = bound_field(map, "exclusiveMaximum")?;
    sub.exclusive_minimum = bound_field(map, "exclusiveMinimum")?;

    sub.max_length = non_negative_field(map, "maxLength", at)?;
    sub.min_length = non_negative_field(map, "minLength", at)?;
    sub.pattern = string_field(map, "pattern");
    sub.format = string_field(map, "format");
    if let Some(pattern) = &sub.pattern {
        fancy_regex::Regex::new(pattern).map_err(|source| DecodeError::BadPattern {
            pointer: child(at, "pattern"),
            keyword: "pattern",
            source: Box::new(source),
        })?;
    }

    if let Some(items_value) = map.get("items") {
        let at = child(at, "items");
        sub.items = match items_value {
            Value::Array(schemas) => {
                let mut out = Vec::with_capacity(schemas.len());
                for (i, s) in schemas.iter().enumerate() {
                    out.push(decode_at(s, &child(&at, i.to_string()))?);
                }
                Items::ArrayOfItems(out)
            }
            _ => Items::ItemDefinition(Box::new(decode_at(items_value, &at)?)),
        };
    }
    if let Some(v) = map.get("additionalItems") {
        sub.additional_items = Some(Box::new(decode_at(v, &child(at, "additionalItems"))?));
    }
    sub.max_items = non_negative_field(map, "maxItems", at)?;
    sub.min_items = non_negative_field(map, "minItems", at)?;
    sub.unique_items = map.get("uniqueItems").and_then(Value::as_bool);
    if let Some(v) = map.get("contains") {
        sub.contains = Some(Box::new(decode_at(v, &child(at, "contains"))?));
    }

    sub.max_properties = non_negative_field(map, "maxProperties", at)?;
    sub.min_properties = non_negative_field(map, "minProperties", at)?;
    if let Some(required) = map.get("required") {
        sub.required = Some(string_array(required, &child(at, "required"), "required")?);
    }
    if let Some(props) = map.get("properties") {
        sub.properties = Some(decode_schema_map(props, &child(at, "properties"), "properties")?);
    }
    if let Some(props) = map.get("patternProperties") {
        let at = child(at, "patternProperties");
        let decoded = decode_schema_map(props, &at, "patternProperties")?;
        for pattern in decoded.keys() {
            fancy_regex::Regex::new(pattern).map_err(|source| DecodeError::BadPattern {
                pointer: at.clone(),
                keyword: "patternProperties",
                source: Box::new(source),
            })?;
        }
        sub.pattern_properties = Some(decoded);
    }
    if let Some(v) = map.get("additionalProperties") {
        sub.additional_properties =
            Some(Box::new(decode_at(v, &child(at, "additionalProperties"))?));
    }
    if let Some(deps) = map.get("dependencies") {
        sub.dependencies = Some(decode_dependencies(deps, &child(at, "dependencies"))?);
    }
    if let Some(v) = map.get("propertyNames") {
        sub.property_names = Some(Box::new(decode_at(v, &child(at, "propertyNames"))?));
    }

    if let Some(values) = map.get("enum") {
        let at = child(at, "enum");
        let Value::Array(values) = values else {
            return Err(DecodeError::structurally_invalid(
                at,
                "enum",
                "a non-empty array",
                values.clone(),
            ));
        };
        if values.is_empty() {
            return Err(DecodeError::EmptyArrayForNonEmpty { pointer: at, keyword: "enum" });
        }
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                if structural_eq(&values[i], &values[j]) {
                    return Err(DecodeError::InvalidEnum { pointer: at, first: i, second: j });
                }
            }
        }
        sub.enum_ = Some(values.clone());
    }
    sub.const_ = map.get("const").cloned();

    sub.all_of = decode_non_empty_schema_array(map, "allOf", at)?;
    sub.any_of = decode_non_empty_schema_array(map, "anyOf", at)?;
    sub.one_of = decode_non_empty_schema_array(map, "oneOf", at)?;
    if let Some(v) = map.get("not") {
        sub.not = Some(Box::new(decode_at(v, &child(at, "not"))?));
    }

    Ok(sub)
}

fn string_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn non_negative_field(
    map: &serde_json::Map<String, Value>,
    key: &'static str,
    at: &Pointer,
) -> Result<Option<usize>, DecodeError> {
    match map.get(key) {
        None => Ok(None),
        Some(v) => {
            let n = v.as_u64().ok_or_else(|| DecodeError::NegativeCount {
                pointer: child(at, key),
                keyword: key,
            })?;
            Ok(Some(n as usize))
        }
    }
}

fn bound_field(
    map: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<ExclusiveBoundary>, DecodeError> {
    Ok(match map.get(key) {
        None => None,
        Some(Value::Bool(b)) => Some(ExclusiveBoundary::Toggle(*b)),
        Some(v) => v.as_f64().map(ExclusiveBoundary::Number),
    })
}

fn string_array(
    value: &Value,
    at: &Pointer,
    keyword: &'static str,
) -> Result<Vec<String>, DecodeError> {
    let Value::Array(items) = value else {
        return Err(DecodeError::structurally_invalid(
            at.clone(),
            keyword,
            "an array of strings",
            value.clone(),
        ));
    };
    items
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                DecodeError::structurally_invalid(
                    at.clone(),
                    keyword,
                    "an array of strings",
                    value.clone(),
                )
            })
        })
        .collect()
}

fn decode_schema_map(
    value: &Value,
    at: &Pointer,
    keyword: &'static str,
) -> Result<BTreeMap<String, Schema>, DecodeError> {
    let Value::Object(map) = value else {
        return Err(DecodeError::structurally_invalid(
            at.clone(),
            keyword,
            "an object of schemas",
            value.clone(),
        ));
    };
    let mut out = BTreeMap::new();
    for (k, v) in map {
        out.insert(k.clone(), decode_at(v, &child(at, k.clone()))?);
    }
    Ok(out)
}

fn decode_non_empty_schema_array(
    map: &serde_json::Map<String, Value>,
    keyword: &'static str,
    at: &Pointer,
) -> Result<Option<Vec<Schema>>, DecodeError> {
    let Some(value) = map.get(keyword) else {
        return Ok(None);
    };
    let at = child(at, keyword);
    let Value::Array(items) = value else {
        return Err(DecodeError::structurally_invalid(
            at,
            keyword,
            "a non-empty array",
            value.clone(),
        ));
    };
    if items.is_empty() {
        return Err(DecodeError::EmptyArrayForNonEmpty { pointer: at, keyword });
    }
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(decode_at(item, &child(&at, i.to_string()))?);
    }
    Ok(Some(out))
}

fn decode_dependencies(
    value: &Value,
    at: &Pointer,
) -> Result<Vec<(String, Dependency)>, DecodeError> {
    let Value::Object(map) = value else {
        return Err(DecodeError::structurally_invalid(
            at.clone(),
            "dependencies",
            "an object",
            value.clone(),
        ));
    };
    let mut out = Vec::with_capacity(map.len());
    for (name, dep) in map {
        let at = child(at, name.clone());
        let dependency = match dep {
            Value::Array(_) => Dependency::ArrayPropNames(string_array(dep, &at, "dependencies")?),
            _ => Dependency::PropSchema(Box::new(decode_at(dep, &at)?)),
        };
        out.push((name.clone(), dependency));
    }
    Ok(out)
}

/// Structural JSON equality used for `enum` uniqueness (§3, §8.3): numbers
/// compare by numeric value, not token text, so `1` and `1.0` collide.
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| structural_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|bv| structural_eq(v, bv)))
        }
        _ => a == b,
    }
}
