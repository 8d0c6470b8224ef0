use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the seven JSON Schema primitive type names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    pub fn named(name: &str) -> Option<Self> {
        use PrimitiveType::*;
        Some(match name {
            "array" => Array,
            "boolean" => Boolean,
            "integer" => Integer,
            "null" => Null,
            "number" => Number,
            "object" => Object,
            "string" => String,
            _ => return None,
        })
    }

    /// The primitive type of a decoded JSON value. `integer` is never
    /// returned here: a JSON number is always classified as `number`, and
    /// `Type::matches` widens `integer` schemas to accept whole numbers.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => PrimitiveType::Null,
            Value::Bool(_) => PrimitiveType::Boolean,
            Value::Number(_) => PrimitiveType::Number,
            Value::String(_) => PrimitiveType::String,
            Value::Array(_) => PrimitiveType::Array,
            Value::Object(_) => PrimitiveType::Object,
        }
    }
}

/// The closed shape of the `type` keyword, as a tagged sum rather than a
/// bare `Vec<PrimitiveType>` so that the common single-type and
/// nullable-type cases are exhaustively matched without re-deriving them
/// from a slice at every call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `type` absent: any JSON kind is acceptable.
    AnyType,
    /// `type` held exactly one name.
    SingleType(PrimitiveType),
    /// `type` held `[t, "null"]` or `["null", t]` for a single non-null `t`.
    NullableType(PrimitiveType),
    /// `type` held an array naming more than one non-null-paired type,
    /// stored sorted and deduplicated for deterministic display and
    /// comparison.
    UnionType(Vec<PrimitiveType>),
}

impl Type {
    /// Builds a `Type` from the decoded list of primitive names in a `type`
    /// array, applying the nullable-pair and union collapsing rules.
    ///
    /// Returns `None` if `names` is empty.
    pub fn from_names(mut names: Vec<PrimitiveType>) -> Option<Self> {
        names.sort_unstable();
        names.dedup();
        match names.len() {
            0 => None,
            1 => Some(Type::SingleType(names[0])),
            2 if names.contains(&PrimitiveType::Null) => {
                let other = names.into_iter().find(|t| *t != PrimitiveType::Null)?;
                Some(Type::NullableType(other))
            }
            _ => Some(Type::UnionType(names)),
        }
    }

    /// Whether `kind` (the primitive type of some instance value) satisfies
    /// this `type` constraint. `integer` schemas additionally require the
    /// caller to have checked fractional-part-zero for `Number` instances;
    /// see `crate::validate::type_kw`.
    pub fn accepts_kind(&self, kind: PrimitiveType, is_integral: bool) -> bool {
        let accepts_one = |t: PrimitiveType| match t {
            PrimitiveType::Integer => {
                kind == PrimitiveType::Integer || (kind == PrimitiveType::Number && is_integral)
            }
            PrimitiveType::Number => kind == PrimitiveType::Number || kind == PrimitiveType::Integer,
            other => other == kind,
        };
        match self {
            Type::AnyType => true,
            Type::SingleType(t) => accepts_one(*t),
            Type::NullableType(t) => kind == PrimitiveType::Null || accepts_one(*t),
            Type::UnionType(ts) => ts.iter().any(|t| accepts_one(*t)),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::AnyType => write!(f, "any type"),
            Type::SingleType(t) => write!(f, "{t}"),
            Type::NullableType(t) => write!(f, "{t} or null"),
            Type::UnionType(ts) => {
                let names: Vec<_> = ts.iter().map(PrimitiveType::to_string).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
        }
    }
}

impl Serialize for Type {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Type::AnyType => serializer.serialize_none(),
            Type::SingleType(t) => serializer.serialize_str(&t.to_string()),
            Type::NullableType(t) => {
                [t.to_string(), "null".to_string()].serialize(serializer)
            }
            Type::UnionType(ts) => {
                let names: Vec<_> = ts.iter().map(PrimitiveType::to_string).collect();
                names.serialize(serializer)
            }
        }
    }
}

impl<'de> Deserialize<'de> for Type {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let value = Value::deserialize(deserializer)?;
        decode_type(&value).map_err(D::Error::custom)
    }
}

/// Decodes the raw `type` keyword value into a [`Type`], applying draft-6
/// rules (§4.1): a single string, or a non-empty array of distinct, known
/// type names collapsed into `NullableType`/`UnionType` as appropriate.
pub fn decode_type(value: &Value) -> Result<Type, String> {
    match value {
        Value::String(name) => {
            let t = PrimitiveType::named(name).ok_or_else(|| name.clone())?;
            Ok(Type::SingleType(t))
        }
        Value::Array(items) => {
            let mut names = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(name) = item else {
                    return Err(format!("{item}"));
                };
                names.push(PrimitiveType::named(name).ok_or_else(|| name.clone())?);
            }
            Type::from_names(names).ok_or_else(|| "empty type array".to_string())
        }
        other => Err(format!("{other}")),
    }
}
