use serde_json::Value;

use crate::error::ValidationErrorKind;
use crate::schema::{PrimitiveType, Type};

pub fn value_type_name(value: &Value) -> &'static str {
    crate::value_kind(value)
}

fn is_integral(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(|f| f.fract() == 0.0),
        _ => false,
    }
}

/// Checks `instance` against the `type` keyword, per §4.5.
pub fn check(type_: &Type, instance: &Value) -> Option<ValidationErrorKind> {
    let kind = PrimitiveType::of(instance);
    if type_.accepts_kind(kind, is_integral(instance)) {
        return None;
    }
    Some(ValidationErrorKind::InvalidType {
        expected: type_.clone(),
        actual: value_type_name(instance),
    })
}
