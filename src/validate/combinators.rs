use jsonptr::Pointer;
use serde_json::Value;

use super::validate_schema;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::schema::SubSchema;
use crate::validate::context::Context;

/// Checks `allOf`/`anyOf`/`oneOf`/`not`, per §4.5.
pub fn check(
    ctx: &mut Context,
    sub: &SubSchema,
    instance: &Value,
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(branches) = &sub.all_of {
        for (i, branch) in branches.iter().enumerate() {
            let inner = validate_schema(ctx, branch, instance, at, ns);
            if !inner.is_empty() {
                errors.push(ValidationError {
                    instance_location: at.clone(),
                    keyword: "allOf",
                    kind: ValidationErrorKind::AllOfFailed { branch: i, inner },
                });
            }
        }
    }

    if let Some(branches) = &sub.any_of {
        let results: Vec<Vec<ValidationError>> = branches
            .iter()
            .map(|branch| validate_schema(ctx, branch, instance, at, ns))
            .collect();
        if !results.iter().any(Vec::is_empty) {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "anyOf",
                kind: ValidationErrorKind::AnyOfFailed { branches: results },
            });
        }
    }

    if let Some(branches) = &sub.one_of {
        let matches: Vec<usize> = branches
            .iter()
            .enumerate()
            .filter(|(_, branch)| validate_schema(ctx, branch, instance, at, ns).is_empty())
            .map(|(i, _)| i)
            .collect();
        match matches.len() {
            1 => {}
            0 => errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "oneOf",
                kind: ValidationErrorKind::OneOfNoneMatch,
            }),
            _ => errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "oneOf",
                kind: ValidationErrorKind::OneOfManyMatch(matches),
            }),
        }
    }

    if let Some(not) = &sub.not {
        if validate_schema(ctx, not, instance, at, ns).is_empty() {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "not",
                kind: ValidationErrorKind::NotDisallowed,
            });
        }
    }

    errors
}
