use jsonptr::Pointer;
use serde_json::{Map, Value};

use super::validate_schema;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::schema::{Dependency, SubSchema};
use crate::validate::context::Context;

/// Checks the object keyword group against an object instance, per §4.5.
pub fn check(
    ctx: &mut Context,
    sub: &SubSchema,
    object: &Map<String, Value>,
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(required) = &sub.required {
        for name in required {
            if !object.contains_key(name) {
                errors.push(ValidationError {
                    instance_location: at.clone(),
                    keyword: "required",
                    kind: ValidationErrorKind::Required(name.clone()),
                });
            }
        }
    }

    let pattern_matches: Vec<(String, fancy_regex::Regex)> = sub
        .pattern_properties
        .as_ref()
        .map(|map| {
            map.keys()
                .filter_map(|p| fancy_regex::Regex::new(p).ok().map(|re| (p.clone(), re)))
                .collect()
        })
        .unwrap_or_default();

    for (key, value) in object {
        let mut matched = false;
        if let Some(props) = &sub.properties {
            if let Some(schema) = props.get(key) {
                matched = true;
                errors.extend(validate_schema(ctx, schema, value, &push(at, key), ns));
            }
        }
        if let Some(pattern_properties) = &sub.pattern_properties {
            for (pattern, re) in &pattern_matches {
                if re.is_match(key).unwrap_or(false) {
                    matched = true;
                    if let Some(schema) = pattern_properties.get(pattern) {
                        errors.extend(validate_schema(ctx, schema, value, &push(at, key), ns));
                    }
                }
            }
        }
        if !matched {
            match sub.additional_properties.as_deref() {
                None => {}
                Some(crate::Schema::BooleanSchema(false)) => {
                    errors.push(ValidationError {
                        instance_location: push(at, key),
                        keyword: "additionalProperties",
                        kind: ValidationErrorKind::AdditionalPropertiesDisallowed(key.clone()),
                    });
                }
                Some(schema) => {
                    errors.extend(validate_schema(ctx, schema, value, &push(at, key), ns));
                }
            }
        }
    }

    if let Some(max) = sub.max_properties {
        if object.len() > max {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "maxProperties",
                kind: ValidationErrorKind::MaxProperties(max),
            });
        }
    }
    if let Some(min) = sub.min_properties {
        if object.len() < min {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "minProperties",
                kind: ValidationErrorKind::MinProperties(min),
            });
        }
    }

    if let Some(dependencies) = &sub.dependencies {
        for (name, dependency) in dependencies {
            if !object.contains_key(name) {
                continue;
            }
            match dependency {
                Dependency::ArrayPropNames(required) => {
                    for req in required {
                        if !object.contains_key(req) {
                            errors.push(ValidationError {
                                instance_location: at.clone(),
                                keyword: "dependencies",
                                kind: ValidationErrorKind::Required(req.clone()),
                            });
                        }
                    }
                }
                Dependency::PropSchema(schema) => {
                    errors.extend(validate_schema(
                        ctx,
                        schema,
                        &Value::Object(object.clone()),
                        at,
                        ns,
                    ));
                }
            }
        }
    }

    if let Some(property_names) = &sub.property_names {
        let mut inner_errors = Vec::new();
        for key in object.keys() {
            inner_errors.extend(validate_schema(
                ctx,
                property_names,
                &Value::String(key.clone()),
                at,
                ns,
            ));
        }
        if !inner_errors.is_empty() {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "propertyNames",
                kind: ValidationErrorKind::PropertyNames(inner_errors),
            });
        }
    }

    errors
}

fn push(at: &Pointer, key: &str) -> Pointer {
    let mut next = at.clone();
    next.push_back(jsonptr::Token::new(key.to_string()));
    next
}
