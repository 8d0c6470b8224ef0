mod bound;
mod dependency;
mod items;
mod sub_schema;
mod types;

pub use bound::ExclusiveBoundary;
pub use dependency::Dependency;
pub use items::Items;
pub use sub_schema::SubSchema;
pub use types::{decode_type, PrimitiveType, Type};

/// A JSON Schema document: either a boolean (trivially matching everything
/// or nothing) or an object carrying keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    BooleanSchema(bool),
    ObjectSchema(SubSchema),
}

impl Default for Schema {
    fn default() -> Self {
        Schema::BooleanSchema(true)
    }
}

impl Schema {
    pub fn as_object(&self) -> Option<&SubSchema> {
        match self {
            Schema::ObjectSchema(sub) => Some(sub),
            Schema::BooleanSchema(_) => None,
        }
    }
}
