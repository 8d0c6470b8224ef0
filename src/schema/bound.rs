/// The closed shape of `exclusiveMaximum`/`exclusiveMinimum`: draft-6's
/// numeric form, or the boolean form carried over from draft-4 that instead
/// toggles `maximum`/`minimum` to be exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExclusiveBoundary {
    Toggle(bool),
    Number(f64),
}
