#![doc = include_str!("../README.md")]
#![cfg_attr(all(doc, CHANNEL_NIGHTLY), feature(doc_auto_cfg))]
#![recursion_limit = "256"]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::result_large_err,
    clippy::large_enum_variant,
    clippy::enum_glob_use,
    clippy::implicit_hasher,
    clippy::missing_errors_doc
)]

//! A draft-6 JSON Schema decoder, `$id`/`$ref` resolver, and validator.
//!
//! The pipeline is: [`decode_schema`] a raw [`serde_json::Value`] into a
//! [`Schema`], [`collect_ids`] it into a [`SchemataPool`] so nested `$id`s
//! and `$ref`s can be resolved, then [`validate`] instances against it.
//! [`encode_schema`] is the inverse of decoding, and [`resolve_ref`] exposes
//! reference resolution directly for callers that want to inspect a
//! referenced subschema without validating anything.

mod decode;
mod encode;
mod error;
mod format;
mod id_collector;
mod mutate;
mod options;
mod pointer;
mod pool;
mod resolve;
mod schema;
mod uri;
mod validate;

pub use decode::{decode_schema, structural_eq};
pub use encode::encode_schema;
pub use error::{DecodeError, ResolveError, ValidationError, ValidationErrorKind};
pub use format::Format;
pub use id_collector::collect_ids;
pub use mutate::{apply_defaults, locate_for_value, set_value};
pub use options::ValidationOptions;
pub use pool::SchemataPool;
pub use resolve::resolve_ref;
pub use schema::{Dependency, ExclusiveBoundary, Items, PrimitiveType, Schema, SubSchema, Type};
pub use validate::validate;

/// The JSON Schema draft-6 type name of `value` (`"null"`, `"boolean"`,
/// `"number"`, `"string"`, `"array"`, or `"object"`). `integer` is never
/// returned here even for whole numbers; see [`PrimitiveType::of`].
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value::*;
    match value {
        Null => "null",
        Bool(_) => "boolean",
        Number(_) => "number",
        String(_) => "string",
        Array(_) => "array",
        Object(_) => "object",
    }
}
