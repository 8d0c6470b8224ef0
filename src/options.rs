use std::collections::HashSet;

use crate::format::Format;

/// Knobs controlling a single [`crate::validate::validate`] call (§6).
///
/// There is no global or thread-local configuration anywhere in this crate;
/// every entry point that needs options takes one explicitly.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// When an object instance is missing a property that has a `default`
    /// in its schema, fill it in and return the filled copy instead of the
    /// borrowed instance. Off by default: validation does not mutate.
    pub apply_defaults: bool,

    /// When `true` (the default), a subschema carrying `$ref` alongside
    /// other keywords validates only against the referenced schema, per
    /// this crate's draft-6 handling (§4.5, §9). When `false`, sibling
    /// keywords are checked in addition to the reference.
    pub ignore_ref_sibling_keywords: bool,

    /// `format` is checked only for the formats named here; an instance's
    /// `format` keyword naming a format outside this set is decoded but
    /// never enforced. Empty by default.
    pub enabled_formats: HashSet<Format>,

    /// Upper bound on `$ref` and combinator recursion depth (§5). Exceeding
    /// it produces a [`crate::ValidationErrorKind::RecursionLimit`] rather
    /// than overflowing the stack.
    pub max_depth: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            apply_defaults: false,
            ignore_ref_sibling_keywords: true,
            enabled_formats: HashSet::new(),
            max_depth: 128,
        }
    }
}

impl ValidationOptions {
    /// All formats this crate knows how to check, enabled.
    pub fn with_all_formats() -> Self {
        Self {
            enabled_formats: Format::all().into_iter().collect(),
            ..Self::default()
        }
    }
}
