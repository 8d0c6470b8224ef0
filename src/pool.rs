//! The read-only map from fully qualified ids to subschemas built by
//! [`crate::id_collector`] and consulted by [`crate::resolve`] (§4.3, §4.4,
//! §5).

use std::collections::HashMap;

use crate::Schema;

/// Maps a fully qualified pool key (see [`crate::pointer::make_key`]) to the
/// schema it names.
///
/// Built once per root document and immutable thereafter; freely shareable
/// across threads without synchronization (§5).
#[derive(Debug, Clone, Default)]
pub struct SchemataPool {
    entries: HashMap<String, Schema>,
    /// The namespace the root document was collected under, used as the
    /// starting point for pointer navigation when a `$ref`'s namespace has
    /// no entry of its own in `entries`.
    pub root_namespace: String,
}

impl SchemataPool {
    pub fn new(root_namespace: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            root_namespace: root_namespace.into(),
        }
    }

    pub fn insert(&mut self, key: String, schema: Schema) {
        self.entries.insert(key, schema);
    }

    pub fn get(&self, key: &str) -> Option<&Schema> {
        self.entries.get(key)
    }

    pub fn contains_namespace(&self, ns: &str) -> bool {
        self.entries.keys().any(|k| k == ns || k.starts_with(&format!("{ns}#")))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
