//! Walks a decoded schema's raw source JSON to populate a [`SchemataPool`]
//! keyed by fully qualified id (§4.3).

use serde_json::Value;
use tracing::debug;

use crate::decode::decode_schema;
use crate::error::DecodeError;
use crate::pointer::make_namespace_key;
use crate::pool::SchemataPool;
use crate::uri;
use crate::Schema;

/// Collects every `$id`-bearing subtree of `root` into a [`SchemataPool`],
/// keyed by namespace and, where entered via a nested `$id`, also reachable
/// by pointer path from the enclosing namespace.
///
/// `root_namespace` is the caller-assigned identity of the document (its own
/// top-level `$id`, or an opaque name such as `"root"` if it has none).
pub fn collect_ids(root: &Schema, root_namespace: &str) -> Result<SchemataPool, DecodeError> {
    let mut pool = SchemataPool::new(root_namespace.to_string());
    pool.insert(make_namespace_key(root_namespace), root.clone());
    if let Schema::ObjectSchema(sub) = root {
        let ns = sub
            .id
            .as_deref()
            .map(|id| uri::combine(root_namespace, id))
            .unwrap_or_else(|| root_namespace.to_string());
        if ns != root_namespace {
            pool.insert(make_namespace_key(&ns), root.clone());
        }
        walk(&Value::Object(sub.source.clone()), &ns, &mut pool)?;
    }
    Ok(pool)
}

fn walk(value: &Value, ns: &str, pool: &mut SchemataPool) -> Result<(), DecodeError> {
    match value {
        Value::Object(map) => {
            if let Some(id_value) = map.get("$id").or_else(|| map.get("id")) {
                if let Some(id) = id_value.as_str() {
                    let child_ns = uri::combine(ns, id);
                    debug!(%child_ns, "collected nested $id");
                    let decoded = decode_schema(value)?;
                    pool.insert(make_namespace_key(&child_ns), decoded);
                    for (_, v) in map {
                        walk(v, &child_ns, pool)?;
                    }
                    return Ok(());
                }
            }
            for (_, v) in map {
                walk(v, ns, pool)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                walk(item, ns, pool)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_nested_id() {
        let raw = json!({
            "$id": "http://example.com/root.json",
            "definitions": {
                "node": {
                    "$id": "node.json",
                    "type": "object"
                }
            }
        });
        let schema = decode_schema(&raw).unwrap();
        let pool = collect_ids(&schema, "http://example.com/root.json").unwrap();
        assert!(pool.get("http://example.com/root.json").is_some());
        assert!(pool.get("http://example.com/node.json").is_some());
    }
}
