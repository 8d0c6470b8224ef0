use serde_json::Number;

use crate::error::ValidationErrorKind;
use crate::schema::{ExclusiveBoundary, SubSchema};

const EPSILON: f64 = 1e-9;

/// Checks the numeric keyword group (`multipleOf`, `maximum`, `minimum`,
/// `exclusiveMaximum`, `exclusiveMinimum`) against a number instance, per
/// §4.5.
pub fn check(sub: &SubSchema, instance: &Number) -> Vec<ValidationErrorKind> {
    let mut errors = Vec::new();
    let Some(x) = instance.as_f64() else {
        return errors;
    };

    if let Some(m) = sub.multiple_of {
        let quotient = x / m;
        if (quotient - quotient.round()).abs() > EPSILON * quotient.round().abs().max(1.0) {
            errors.push(ValidationErrorKind::MultipleOf(m));
        }
    }

    let mut max_exclusive = false;
    if let Some(ExclusiveBoundary::Toggle(true)) = sub.exclusive_maximum {
        max_exclusive = true;
    }
    if let Some(max) = sub.maximum {
        let fails = if max_exclusive { x >= max } else { x > max };
        if fails {
            errors.push(if max_exclusive {
                ValidationErrorKind::ExclusiveMaximum(max)
            } else {
                ValidationErrorKind::Maximum(max)
            });
        }
    }
    if let Some(ExclusiveBoundary::Number(max)) = sub.exclusive_maximum {
        if x >= max {
            errors.push(ValidationErrorKind::ExclusiveMaximum(max));
        }
    }

    let mut min_exclusive = false;
    if let Some(ExclusiveBoundary::Toggle(true)) = sub.exclusive_minimum {
        min_exclusive = true;
    }
    if let Some(min) = sub.minimum {
        let fails = if min_exclusive { x <= min } else { x < min };
        if fails {
            errors.push(if min_exclusive {
                ValidationErrorKind::ExclusiveMinimum(min)
            } else {
                ValidationErrorKind::Minimum(min)
            });
        }
    }
    if let Some(ExclusiveBoundary::Number(min)) = sub.exclusive_minimum {
        if x <= min {
            errors.push(ValidationErrorKind::ExclusiveMinimum(min));
        }
    }

    errors
}
