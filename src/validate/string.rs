use crate::error::ValidationErrorKind;
use crate::format::Format;
use crate::options::ValidationOptions;
use crate::schema::SubSchema;

/// Checks the string keyword group (`maxLength`, `minLength`, `pattern`,
/// `format`) against a string instance, per §4.5. Lengths are counted in
/// Unicode code points, not bytes or UTF-16 units.
pub fn check(sub: &SubSchema, instance: &str, options: &ValidationOptions) -> Vec<ValidationErrorKind> {
    let mut errors = Vec::new();
    let len = instance.chars().count();

    if let Some(max) = sub.max_length {
        if len > max {
            errors.push(ValidationErrorKind::MaxLength(max));
        }
    }
    if let Some(min) = sub.min_length {
        if len < min {
            errors.push(ValidationErrorKind::MinLength(min));
        }
    }
    if let Some(pattern) = &sub.pattern {
        // schemas are decoded once and re-validated many times against
        // different instances; a per-call compile would be wasteful for
        // hot schemas, but correctness doesn't depend on caching it, so we
        // keep this simple and compile on each call.
        match fancy_regex::Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(instance).unwrap_or(false) {
                    errors.push(ValidationErrorKind::Pattern(pattern.clone()));
                }
            }
            Err(_) => errors.push(ValidationErrorKind::Pattern(pattern.clone())),
        }
    }
    if let Some(format_name) = &sub.format {
        if let Some(format) = Format::named(format_name) {
            if options.enabled_formats.contains(&format) && !format.check(instance) {
                errors.push(ValidationErrorKind::Format(format));
            }
        }
    }

    errors
}
