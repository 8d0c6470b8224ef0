//! Interprets a [`Schema`] against a `JsonValue` instance, producing either
//! the instance (optionally with defaults filled in) or an ordered list of
//! structured errors (§4.5).

mod array;
pub(crate) mod context;
mod combinators;
mod numeric;
mod object;
mod string;
mod type_kw;

use std::borrow::Cow;

use jsonptr::Pointer;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ValidationError, ValidationErrorKind};
use crate::options::ValidationOptions;
use crate::pool::SchemataPool;
use crate::schema::Schema;
use context::Context;

/// Validates `instance` against `schema`, the schema's own root (used to
/// resolve `$ref`), and the pool that was built from that root.
///
/// On success, returns the instance (a filled copy if
/// [`ValidationOptions::apply_defaults`] is set and any defaults applied,
/// otherwise the instance unchanged). On failure, returns every error found;
/// evaluation does not stop at the first one.
#[instrument(skip_all)]
pub fn validate<'v>(
    options: &ValidationOptions,
    pool: &SchemataPool,
    instance: &'v Value,
    schema: &Schema,
) -> Result<Cow<'v, Value>, Vec<ValidationError>> {
    let mut ctx = Context::new(pool, options);
    let root = Pointer::default();
    let errors = validate_schema(&mut ctx, schema, instance, &root, &pool.root_namespace);
    if !errors.is_empty() {
        return Err(errors);
    }
    if options.apply_defaults {
        if let Some(filled) = crate::mutate::apply_defaults(schema, instance, pool) {
            return Ok(Cow::Owned(filled));
        }
    }
    Ok(Cow::Borrowed(instance))
}

/// The recursive core: validates `instance` against `schema` at `at`,
/// returning every error found. Resolving `$ref` and recursing through
/// `allOf`/`properties`/`items`/etc. all route back through this function.
pub(crate) fn validate_schema(
    ctx: &mut Context,
    schema: &Schema,
    instance: &Value,
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let Some(result) = ctx.with_depth(|ctx| validate_schema_inner(ctx, schema, instance, at, ns))
    else {
        return vec![ValidationError {
            instance_location: at.clone(),
            keyword: "$recursion",
            kind: ValidationErrorKind::RecursionLimit,
        }];
    };
    result
}

fn validate_schema_inner(
    ctx: &mut Context,
    schema: &Schema,
    instance: &Value,
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let sub = match schema {
        Schema::BooleanSchema(true) => return Vec::new(),
        Schema::BooleanSchema(false) => {
            return vec![ValidationError {
                instance_location: at.clone(),
                keyword: "$schema",
                kind: ValidationErrorKind::AlwaysFail,
            }]
        }
        Schema::ObjectSchema(sub) => sub,
    };

    if let Some(reference) = &sub.ref_ {
        let parsed = crate::pointer::parse_reference(ns, reference);
        let key = crate::pointer::make_key(&parsed);
        let instance_key = at.to_string();
        if !ctx.enter_ref(&key, &instance_key) {
            // already being expanded higher up the stack for this same
            // instance location: treat as satisfied to allow recursive
            // schemas (linked lists, trees) to terminate.
            return if ctx.options.ignore_ref_sibling_keywords {
                Vec::new()
            } else {
                check_siblings(ctx, sub, instance, at, ns)
            };
        }
        let mut visiting = std::collections::HashSet::new();
        let resolved = crate::resolve::resolve_ref(ctx.pool, ns, reference, &mut visiting);
        let result = match resolved {
            Ok(target) => {
                let target_ns = crate::uri::normalize_ns(&parsed.namespace).to_string();
                let mut errors = validate_schema(ctx, target, instance, at, &target_ns);
                if !ctx.options.ignore_ref_sibling_keywords {
                    errors.extend(check_siblings(ctx, sub, instance, at, ns));
                }
                errors
            }
            Err(_) => vec![ValidationError {
                instance_location: at.clone(),
                keyword: "$ref",
                kind: ValidationErrorKind::UnresolvableReference(reference.clone()),
            }],
        };
        ctx.exit_ref(&key, &instance_key);
        debug!(keyword_ref = %reference, errors = result.len(), "resolved $ref");
        return result;
    }

    check_siblings(ctx, sub, instance, at, ns)
}

fn check_siblings(
    ctx: &mut Context,
    sub: &crate::schema::SubSchema,
    instance: &Value,
    at: &Pointer,
    ns: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(type_) = &sub.type_ {
        if let Some(kind) = type_kw::check(type_, instance) {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "type",
                kind,
            });
        }
    }

    if let Some(values) = &sub.enum_ {
        if !values.iter().any(|v| crate::decode::structural_eq(v, instance)) {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "enum",
                kind: ValidationErrorKind::NotInEnum,
            });
        }
    }
    if let Some(const_) = &sub.const_ {
        if !crate::decode::structural_eq(const_, instance) {
            errors.push(ValidationError {
                instance_location: at.clone(),
                keyword: "const",
                kind: ValidationErrorKind::NotConst,
            });
        }
    }

    match instance {
        Value::Number(n) => {
            for kind in numeric::check(sub, n) {
                errors.push(ValidationError {
                    instance_location: at.clone(),
                    keyword: "numeric",
                    kind,
                });
            }
        }
        Value::String(s) => {
            for kind in string::check(sub, s, ctx.options) {
                errors.push(ValidationError {
                    instance_location: at.clone(),
                    keyword: "string",
                    kind,
                });
            }
        }
        Value::Array(items) => {
            errors.extend(array::check(ctx, sub, items, at, ns));
        }
        Value::Object(object) => {
            errors.extend(object::check(ctx, sub, object, at, ns));
        }
        Value::Null | Value::Bool(_) => {}
    }

    errors.extend(combinators::check(ctx, sub, instance, at, ns));

    errors
}
