//! Auxiliary instance-mutation helpers that sit alongside validation but are
//! not part of it: filling in `default`s, and locating where a value of a
//! given shape belongs under a schema (§9's `setValue` open question).

use serde_json::{Map, Value};

use crate::pool::SchemataPool;
use crate::schema::{Items, Schema, SubSchema, Type};

/// Returns a copy of `instance` with `default` values filled in at every
/// object property the schema declares one for and the instance omits, applied
/// recursively through `properties` and `items`. Returns `None` if nothing
/// would change, so callers can skip the clone.
pub fn apply_defaults(schema: &Schema, instance: &Value, pool: &SchemataPool) -> Option<Value> {
    let mut out = instance.clone();
    let changed = fill(schema, &mut out, pool, 0);
    changed.then_some(out)
}

const MAX_DEPTH: usize = 128;

fn fill(schema: &Schema, instance: &mut Value, pool: &SchemataPool, depth: usize) -> bool {
    if depth >= MAX_DEPTH {
        return false;
    }
    let Schema::ObjectSchema(sub) = schema else {
        return false;
    };
    if let Some(reference) = &sub.ref_ {
        let mut visiting = std::collections::HashSet::new();
        if let Ok(target) =
            crate::resolve::resolve_ref(pool, &pool.root_namespace, reference, &mut visiting)
        {
            return fill(target, instance, pool, depth + 1);
        }
        return false;
    }
    let mut changed = false;

    if let Value::Object(object) = instance {
        if let Some(properties) = &sub.properties {
            for (name, prop_schema) in properties {
                if !object.contains_key(name) {
                    if let Some(default) = default_of(prop_schema) {
                        object.insert(name.clone(), default);
                        changed = true;
                    }
                }
            }
        }
        for (name, value) in object.iter_mut() {
            if let Some(properties) = &sub.properties {
                if let Some(prop_schema) = properties.get(name) {
                    changed |= fill(prop_schema, value, pool, depth + 1);
                }
            }
        }
    }

    if let Value::Array(items) = instance {
        match &sub.items {
            Items::ItemDefinition(item_schema) => {
                for item in items.iter_mut() {
                    changed |= fill(item_schema, item, pool, depth + 1);
                }
            }
            Items::ArrayOfItems(schemas) => {
                for (item, item_schema) in items.iter_mut().zip(schemas) {
                    changed |= fill(item_schema, item, pool, depth + 1);
                }
            }
            Items::NoItems => {}
        }
    }

    changed
}

fn default_of(schema: &Schema) -> Option<Value> {
    match schema {
        Schema::ObjectSchema(sub) => sub.default.clone(),
        Schema::BooleanSchema(_) => None,
    }
}

/// Locates the subschema that should govern `value` at `pointer`, descending
/// through `properties`/`additionalProperties`/`items` along the way and, at
/// the final segment, picking the first `anyOf`/`oneOf` branch whose `type`
/// accepts `value`'s kind. Returns `None` if no segment of `pointer` can be
/// followed or no branch matches.
pub fn locate_for_value<'s>(root: &'s Schema, pointer: &[String], value: &Value) -> Option<&'s Schema> {
    let mut current = root;
    for segment in pointer {
        current = step(current, segment)?;
    }
    Some(pick_branch(current, value))
}

fn step<'s>(schema: &'s Schema, segment: &str) -> Option<&'s Schema> {
    let Schema::ObjectSchema(sub) = schema else {
        return None;
    };
    if let Some(properties) = &sub.properties {
        if let Some(found) = properties.get(segment) {
            return Some(found);
        }
    }
    if let Some(additional) = &sub.additional_properties {
        return Some(additional);
    }
    match &sub.items {
        Items::ItemDefinition(item_schema) => Some(item_schema),
        Items::ArrayOfItems(schemas) => segment.parse::<usize>().ok().and_then(|i| schemas.get(i)),
        Items::NoItems => None,
    }
}

fn pick_branch<'s>(schema: &'s Schema, value: &Value) -> &'s Schema {
    let Schema::ObjectSchema(sub) = schema else {
        return schema;
    };
    let kind = crate::schema::PrimitiveType::of(value);
    for branches in [&sub.any_of, &sub.one_of] {
        if let Some(branches) = branches {
            if let Some(matching) = branches.iter().find(|b| accepts(b, kind)) {
                return matching;
            }
        }
    }
    schema
}

fn accepts(schema: &Schema, kind: crate::schema::PrimitiveType) -> bool {
    match schema {
        Schema::BooleanSchema(b) => *b,
        Schema::ObjectSchema(SubSchema { type_: Some(t), .. }) => type_accepts(t, kind),
        Schema::ObjectSchema(_) => true,
    }
}

fn type_accepts(type_: &Type, kind: crate::schema::PrimitiveType) -> bool {
    type_.accepts_kind(kind, true) || type_.accepts_kind(kind, false)
}

/// Places `value` at `pointer` within `instance`, creating intermediate
/// objects or arrays as dictated by `schema`. Returns `false` if an
/// intermediate segment exists and is not a container, leaving `instance`
/// unchanged.
pub fn set_value(schema: &Schema, instance: &mut Value, pointer: &[String], value: Value) -> bool {
    let Some((last, parents)) = pointer.split_last() else {
        *instance = value;
        return true;
    };
    let mut current = instance;
    let mut current_schema = schema;
    for segment in parents {
        current_schema = match step(current_schema, segment) {
            Some(s) => s,
            None => return false,
        };
        current = match ensure_container(current, segment) {
            Some(next) => next,
            None => return false,
        };
    }
    let _ = current_schema;
    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            true
        }
        Value::Array(items) => {
            if let Ok(i) = last.parse::<usize>() {
                if i == items.len() {
                    items.push(value);
                } else if i < items.len() {
                    items[i] = value;
                } else {
                    return false;
                }
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

fn ensure_container<'v>(current: &'v mut Value, segment: &str) -> Option<&'v mut Value> {
    if !matches!(current, Value::Object(_) | Value::Array(_)) {
        return None;
    }
    match current {
        Value::Object(map) => Some(
            map.entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
        ),
        Value::Array(items) => {
            let i: usize = segment.parse().ok()?;
            while items.len() <= i {
                items.push(Value::Null);
            }
            Some(&mut items[i])
        }
        _ => None,
    }
}
