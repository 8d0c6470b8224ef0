use jsonptr::Pointer;
use serde_json::Value;

use super::validate_schema;
use crate::decode::structural_eq;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::schema::{Items, SubSchema};
use crate::validate::context::Context;

/// Checks the array keyword group against an array instance, per §4.5.
#[allow(clippy::too_many_arguments)]
pub fn check(
    ctx: &mut Context,
    sub: &SubSchema,
    items: &[Value],
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match &sub.items {
        Items::NoItems => {}
        Items::ItemDefinition(schema) => {
            for (i, item) in items.iter().enumerate() {
                errors.extend(validate_schema(ctx, schema, item, &push(at, i), ns));
            }
        }
        Items::ArrayOfItems(schemas) => {
            for (i, item) in items.iter().enumerate() {
                if let Some(schema) = schemas.get(i) {
                    errors.extend(validate_schema(ctx, schema, item, &push(at, i), ns));
                } else {
                    match sub.additional_items.as_deref() {
                        None => {}
                        Some(crate::Schema::BooleanSchema(false)) => {
                            errors.push(ValidationError {
                                instance_location: push(at, i),
                                keyword: "additionalItems",
                                kind: ValidationErrorKind::AdditionalItemsDisallowed(i),
                            });
                        }
                        Some(schema) => {
                            errors.extend(validate_schema(ctx, schema, item, &push(at, i), ns));
                        }
                    }
                }
            }
        }
    }

    if let Some(max) = sub.max_items {
        if items.len() > max {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "maxItems",
                kind: ValidationErrorKind::MaxItems(max),
            });
        }
    }
    if let Some(min) = sub.min_items {
        if items.len() < min {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "minItems",
                kind: ValidationErrorKind::MinItems(min),
            });
        }
    }
    if sub.unique_items == Some(true) {
        'outer: for i in 0..items.len() {
            for j in (i + 1)..items.len() {
                if structural_eq(&items[i], &items[j]) {
                    errors.push(ValidationError {
                        instance_location: at.clone(),
                        keyword: "uniqueItems",
                        kind: ValidationErrorKind::NotUnique(i, j),
                    });
                    break 'outer;
                }
            }
        }
    }
    if let Some(contains) = &sub.contains {
        let any_match = items
            .iter()
            .enumerate()
            .any(|(i, item)| validate_schema(ctx, contains, item, &push(at, i), ns).is_empty());
        if !any_match {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "contains",
                kind: ValidationErrorKind::Contains,
            });
        }
    }

    errors
}

fn push(at: &Pointer, index: usize) -> Pointer {
    let mut next = at.clone();
    next.push_back(jsonptr::Token::new(index.to_string()));
    next
}
