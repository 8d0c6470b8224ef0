//! `$ref` resolution: pool lookup falling back to pointer navigation from a
//! document root, with a cycle guard (§4.4, §9).

use std::collections::HashSet;

use tracing::trace;

use crate::error::ResolveError;
use crate::pointer::{make_key, parse_reference};
use crate::pool::SchemataPool;
use crate::schema::{Items, Schema};

/// Resolves `reference` against `base_ns`, first through the pool, then by
/// navigating the pointer path from the namespace's own root document.
///
/// `visiting` is the cycle guard: the set of pool keys currently being
/// expanded higher up the call stack. Revisiting one is a [`ResolveError::Cycle`].
pub fn resolve_ref<'a>(
    pool: &'a SchemataPool,
    base_ns: &str,
    reference: &str,
    visiting: &mut HashSet<String>,
) -> Result<&'a Schema, ResolveError> {
    let parsed = parse_reference(base_ns, reference);
    let key = make_key(&parsed);

    if !visiting.insert(key.clone()) {
        return Err(ResolveError::Cycle { key });
    }

    trace!(%key, "resolving reference");

    if let Some(schema) = pool.get(&key) {
        return Ok(schema);
    }

    // Fall back to navigating the pointer path from the namespace's root
    // document, for references into subschemas that weren't themselves
    // given an `$id` and so never became their own pool entry.
    let root_key = crate::pointer::make_namespace_key(&parsed.namespace);
    let root = pool
        .get(&root_key)
        .ok_or_else(|| ResolveError::NotFound { key: key.clone() })?;

    navigate(root, &parsed.path, &key)
}

fn navigate<'a>(root: &'a Schema, path: &[String], key: &str) -> Result<&'a Schema, ResolveError> {
    let mut current = root;
    for (i, segment) in path.iter().enumerate() {
        let Schema::ObjectSchema(sub) = current else {
            return Err(ResolveError::BadPath {
                key: key.to_string(),
                pointer: crate::pointer::to_jsonptr(&path[..=i]),
                reason: "cannot navigate into a boolean schema".to_string(),
            });
        };
        current = match segment.as_str() {
            "definitions" => {
                let name = path.get(i + 1).ok_or_else(|| ResolveError::BadPath {
                    key: key.to_string(),
                    pointer: crate::pointer::to_jsonptr(&path[..=i]),
                    reason: "\"definitions\" requires a following name".to_string(),
                })?;
                return navigate_into(
                    sub.definitions.as_ref().and_then(|d| d.get(name)),
                    &path[i + 2..],
                    key,
                    path,
                    i + 1,
                );
            }
            "properties" => {
                let name = path.get(i + 1).ok_or_else(|| ResolveError::BadPath {
                    key: key.to_string(),
                    pointer: crate::pointer::to_jsonptr(&path[..=i]),
                    reason: "\"properties\" requires a following name".to_string(),
                })?;
                return navigate_into(
                    sub.properties.as_ref().and_then(|p| p.get(name)),
                    &path[i + 2..],
                    key,
                    path,
                    i + 1,
                );
            }
            "items" => match &sub.items {
                Items::ItemDefinition(s) => {
                    return navigate_into(Some(s.as_ref()), &path[i + 1..], key, path, i);
                }
                Items::ArrayOfItems(items) => {
                    let idx: usize = path.get(i + 1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                        ResolveError::BadPath {
                            key: key.to_string(),
                            pointer: crate::pointer::to_jsonptr(&path[..=i]),
                            reason: "\"items\" requires a following index".to_string(),
                        }
                    })?;
                    return navigate_into(items.get(idx), &path[i + 2..], key, path, i + 1);
                }
                Items::NoItems => {
                    return Err(ResolveError::BadPath {
                        key: key.to_string(),
                        pointer: crate::pointer::to_jsonptr(&path[..=i]),
                        reason: "no \"items\" schema present".to_string(),
                    })
                }
            },
            "additionalItems" => sub.additional_items.as_deref().ok_or_else(|| ResolveError::BadPath {
                key: key.to_string(),
                pointer: crate::pointer::to_jsonptr(&path[..=i]),
                reason: "no \"additionalItems\" schema present".to_string(),
            })?,
            "additionalProperties" => {
                sub.additional_properties.as_deref().ok_or_else(|| ResolveError::BadPath {
                    key: key.to_string(),
                    pointer: crate::pointer::to_jsonptr(&path[..=i]),
                    reason: "no \"additionalProperties\" schema present".to_string(),
                })?
            }
            "propertyNames" => sub.property_names.as_deref().ok_or_else(|| ResolveError::BadPath {
                key: key.to_string(),
                pointer: crate::pointer::to_jsonptr(&path[..=i]),
                reason: "no \"propertyNames\" schema present".to_string(),
            })?,
            "not" => sub.not.as_deref().ok_or_else(|| ResolveError::BadPath {
                key: key.to_string(),
                pointer: crate::pointer::to_jsonptr(&path[..=i]),
                reason: "no \"not\" schema present".to_string(),
            })?,
            "contains" => sub.contains.as_deref().ok_or_else(|| ResolveError::BadPath {
                key: key.to_string(),
                pointer: crate::pointer::to_jsonptr(&path[..=i]),
                reason: "no \"contains\" schema present".to_string(),
            })?,
            "allOf" | "anyOf" | "oneOf" => {
                let list = match segment.as_str() {
                    "allOf" => sub.all_of.as_ref(),
                    "anyOf" => sub.any_of.as_ref(),
                    _ => sub.one_of.as_ref(),
                };
                let idx: usize = path.get(i + 1).and_then(|s| s.parse().ok()).ok_or_else(|| {
                    ResolveError::BadPath {
                        key: key.to_string(),
                        pointer: crate::pointer::to_jsonptr(&path[..=i]),
                        reason: format!("\"{segment}\" requires a following index"),
                    }
                })?;
                return navigate_into(
                    list.and_then(|l| l.get(idx)),
                    &path[i + 2..],
                    key,
                    path,
                    i + 1,
                );
            }
            other => {
                return Err(ResolveError::BadPath {
                    key: key.to_string(),
                    pointer: crate::pointer::to_jsonptr(&path[..=i]),
                    reason: format!("unsupported pointer segment \"{other}\""),
                })
            }
        };
    }
    Ok(current)
}

fn navigate_into<'a>(
    found: Option<&'a Schema>,
    rest: &[String],
    key: &str,
    full_path: &[String],
    consumed_through: usize,
) -> Result<&'a Schema, ResolveError> {
    let schema = found.ok_or_else(|| ResolveError::BadPath {
        key: key.to_string(),
        pointer: crate::pointer::to_jsonptr(&full_path[..=consumed_through]),
        reason: "not found".to_string(),
    })?;
    if rest.is_empty() {
        Ok(schema)
    } else {
        navigate(schema, rest, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode::decode_schema, id_collector::collect_ids};
    use serde_json::json;

    #[test]
    fn resolves_into_definitions_by_pointer() {
        let raw = json!({
            "definitions": { "node": { "type": "string" } }
        });
        let schema = decode_schema(&raw).unwrap();
        let pool = collect_ids(&schema, "root").unwrap();
        let mut visiting = HashSet::new();
        let resolved = resolve_ref(&pool, "root", "#/definitions/node", &mut visiting).unwrap();
        assert!(matches!(resolved, Schema::ObjectSchema(sub) if sub.type_.is_some()));
    }

    #[test]
    fn detects_cycle() {
        let raw = json!({ "$ref": "#" });
        let schema = decode_schema(&raw).unwrap();
        let pool = {
            let mut pool = SchemataPool::new("root".to_string());
            pool.insert("root".to_string(), schema);
            pool
        };
        let mut visiting = HashSet::new();
        visiting.insert("root".to_string());
        let err = resolve_ref(&pool, "root", "#", &mut visiting).unwrap_err();
        assert!(matches!(err, ResolveError::Cycle { .. }));
    }
}
