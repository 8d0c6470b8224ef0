use std::fmt;

use jsonptr::Pointer;
use serde_json::Value;

use crate::schema::Type;

/// Errors which can occur while decoding a JSON value into a [`Schema`](crate::Schema).
///
/// Unlike [`ValidationError`], a `DecodeError` means the schema document
/// itself is malformed and carries the path to the offending keyword rather
/// than a location within a validated instance.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// A value was found where a schema (boolean or object) was expected.
    #[error(r#"expected a schema (boolean or object) at "{pointer}", found {found_kind}"#)]
    NotASchema {
        pointer: Pointer,
        found: Box<Value>,
        found_kind: &'static str,
    },

    /// `type` named something other than one of the seven JSON Schema types.
    #[error(r#"unknown type name "{name}" at "{pointer}""#)]
    UnknownType { pointer: Pointer, name: String },

    /// `enum` was present but empty, or `allOf`/`anyOf`/`oneOf` was present
    /// but empty, where the keyword requires a non-empty array.
    #[error(r#""{keyword}" at "{pointer}" must be a non-empty array"#)]
    EmptyArrayForNonEmpty { pointer: Pointer, keyword: &'static str },

    /// `enum` contained two structurally equal values.
    #[error(r#""enum" at "{pointer}" contains duplicate values (indices {first} and {second})"#)]
    InvalidEnum { pointer: Pointer, first: usize, second: usize },

    /// A keyword requiring a non-negative integer (e.g. `maxLength`) held a
    /// negative number.
    #[error(r#""{keyword}" at "{pointer}" must be a non-negative integer"#)]
    NegativeCount { pointer: Pointer, keyword: &'static str },

    /// `pattern` or a `patternProperties` key did not compile as a regex.
    #[error(r#""{keyword}" at "{pointer}" is not a valid pattern: {source}"#)]
    BadPattern {
        pointer: Pointer,
        keyword: &'static str,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    /// A keyword held a value of the wrong JSON kind (e.g. `required` that
    /// isn't an array of strings).
    #[error(r#"expected {expected} for "{keyword}" at "{pointer}", found {found_kind}"#)]
    StructurallyInvalid {
        pointer: Pointer,
        keyword: &'static str,
        expected: &'static str,
        found: Box<Value>,
        found_kind: &'static str,
    },
}

/// Errors which occur while resolving a `$ref` during validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    /// No schema was found in the pool, and none could be located by
    /// navigating the document from its root.
    #[error(r#"schema "{key}" not found"#)]
    NotFound { key: String },

    /// Navigating a JSON Pointer path into a resolved document failed
    /// because an intermediate segment did not exist or was not a container.
    #[error(r#"could not navigate "{pointer}" from "{key}": {reason}"#)]
    BadPath {
        key: String,
        pointer: Pointer,
        reason: String,
    },

    /// Resolving a `$ref` revisited a key already being expanded with no
    /// intervening progress through the instance, and would recurse forever.
    #[error(r#"reference cycle detected resolving "{key}""#)]
    Cycle { key: String },
}

/// A single failure to validate an instance against a schema, located by the
/// JSON Pointer into the instance at which the failure was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub instance_location: Pointer,
    pub keyword: &'static str,
    pub kind: ValidationErrorKind,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at \"{}\": {}", self.instance_location, self.kind)
    }
}

impl std::error::Error for ValidationError {}

/// The closed set of reasons an instance can fail to validate against a
/// subschema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("schema is `false`, which rejects every value")]
    AlwaysFail,

    #[error("expected {expected}, found {actual}")]
    InvalidType { expected: Type, actual: &'static str },

    #[error(r#"missing required property "{0}""#)]
    Required(String),

    #[error("value is not one of the enumerated values")]
    NotInEnum,

    #[error("value does not equal the constant")]
    NotConst,

    #[error("value is not a multiple of {0}")]
    MultipleOf(f64),

    #[error("value is greater than the maximum of {0}")]
    Maximum(f64),

    #[error("value is greater than or equal to the exclusive maximum of {0}")]
    ExclusiveMaximum(f64),

    #[error("value is less than the minimum of {0}")]
    Minimum(f64),

    #[error("value is less than or equal to the exclusive minimum of {0}")]
    ExclusiveMinimum(f64),

    #[error("string is longer than maxLength {0}")]
    MaxLength(usize),

    #[error("string is shorter than minLength {0}")]
    MinLength(usize),

    #[error(r#"string does not match pattern "{0}""#)]
    Pattern(String),

    #[error(r#"string does not satisfy format "{0}""#)]
    Format(crate::format::Format),

    #[error("array has more than maxItems {0} elements")]
    MaxItems(usize),

    #[error("array has fewer than minItems {0} elements")]
    MinItems(usize),

    #[error("array elements at indices {0} and {1} are not unique")]
    NotUnique(usize, usize),

    #[error("array contains no element matching the `contains` schema")]
    Contains,

    #[error("object has more than maxProperties {0} properties")]
    MaxProperties(usize),

    #[error("object has fewer than minProperties {0} properties")]
    MinProperties(usize),

    #[error(r#"additional property "{0}" is not allowed"#)]
    AdditionalPropertiesDisallowed(String),

    #[error("additional item at index {0} is not allowed")]
    AdditionalItemsDisallowed(usize),

    #[error("one or more property names failed validation")]
    PropertyNames(Vec<ValidationError>),

    #[error("branch {branch} of allOf failed")]
    AllOfFailed {
        branch: usize,
        inner: Vec<ValidationError>,
    },

    #[error("no branch of anyOf matched")]
    AnyOfFailed { branches: Vec<Vec<ValidationError>> },

    #[error("no branch of oneOf matched")]
    OneOfNoneMatch,

    #[error("more than one branch of oneOf matched: {0:?}")]
    OneOfManyMatch(Vec<usize>),

    #[error("value matched a schema under `not`")]
    NotDisallowed,

    #[error(r#"could not resolve reference "{0}""#)]
    UnresolvableReference(String),

    #[error("maximum recursion depth exceeded")]
    RecursionLimit,
}

impl DecodeError {
    pub(crate) fn not_a_schema(pointer: Pointer, found: Value) -> Self {
        let found_kind = crate::value_kind(&found);
        Self::NotASchema {
            pointer,
            found: Box::new(found),
            found_kind,
        }
    }

    pub(crate) fn structurally_invalid(
        pointer: Pointer,
        keyword: &'static str,
        expected: &'static str,
        found: Value,
    ) -> Self {
        let found_kind = crate::value_kind(&found);
        Self::StructurallyInvalid {
            pointer,
            keyword,
            expected,
            found: Box::new(found),
            found_kind,
        }
    }
}
