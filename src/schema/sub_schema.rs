use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{Dependency, ExclusiveBoundary, Items, Type};
use crate::Schema;

/// The full keyword record of an object-form schema.
///
/// Every field is optional and defaults to "absent" on an empty object. The
/// raw JSON object this was decoded from is retained in `source` so that
/// keywords this crate doesn't model as typed fields (vendor extensions,
/// unrecognized keywords) survive a decode/encode round trip, and so
/// [`crate::id_collector`] can walk the original structure.
#[derive(Debug, Clone, PartialEq)]
pub struct SubSchema {
    pub source: Map<String, Value>,

    pub type_: Option<Type>,
    pub id: Option<String>,
    pub ref_: Option<String>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub default: Option<Value>,
    pub examples: Option<Vec<Value>>,
    pub definitions: Option<BTreeMap<String, Schema>>,

    pub multiple_of: Option<f64>,
    pub maximum: Option<f64>,
    pub minimum: Option<f64>,
    pub exclusive_maximum: Option<ExclusiveBoundary>,
    pub exclusive_minimum: Option<ExclusiveBoundary>,

    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub pattern: Option<String>,
    pub format: Option<String>,

    pub items: Items,
    pub additional_items: Option<Box<Schema>>,
    pub max_items: Option<usize>,
    pub min_items: Option<usize>,
    pub unique_items: Option<bool>,
    pub contains: Option<Box<Schema>>,

    pub max_properties: Option<usize>,
    pub min_properties: Option<usize>,
    /// Declared order is insignificant to validation but preserved here
    /// because it was present in `source`.
    pub required: Option<Vec<String>>,
    pub properties: Option<BTreeMap<String, Schema>>,
    pub pattern_properties: Option<BTreeMap<String, Schema>>,
    pub additional_properties: Option<Box<Schema>>,
    pub dependencies: Option<Vec<(String, Dependency)>>,
    pub property_names: Option<Box<Schema>>,

    pub enum_: Option<Vec<Value>>,
    pub const_: Option<Value>,
    pub all_of: Option<Vec<Schema>>,
    pub any_of: Option<Vec<Schema>>,
    pub one_of: Option<Vec<Schema>>,
    pub not: Option<Box<Schema>>,
}

impl SubSchema {
    /// An empty subschema decoded from `{}`: every constraint absent, thus
    /// accepting any value (equivalent in effect to `BooleanSchema(true)`).
    pub fn empty() -> Self {
        Self {
            source: Map::new(),
            type_: None,
            id: None,
            ref_: None,
            title: None,
            description: None,
            default: None,
            examples: None,
            definitions: None,
            multiple_of: None,
            maximum: None,
            minimum: None,
            exclusive_maximum: None,
            exclusive_minimum: None,
            max_length: None,
            min_length: None,
            pattern: None,
            format: None,
            items: Items::NoItems,
            additional_items: None,
            max_items: None,
            min_items: None,
            unique_items: None,
            contains: None,
            max_properties: None,
            min_properties: None,
            required: None,
            properties: None,
            pattern_properties: None,
            additional_properties: None,
            dependencies: None,
            property_names: None,
            enum_: None,
            const_: None,
            all_of: None,
            any_of: None,
            one_of: None,
            not: None,
        }
    }
}
