//! Field definition for Quiver schemas.

use crate::types::DataType;
use alloc::string::String;
use core::fmt;

/// A named, typed column slot in a schema.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    /// Field name.
    name: String,
    /// Element type of the column.
    data_type: DataType,
    /// Whether this field allows null values.
    nullable: bool,
}

impl Field {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
        }
    }

    /// Returns a copy of this field under a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: self.data_type,
            nullable: self.nullable,
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the data type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Returns whether this field is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.data_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_field_new() {
        let field = Field::new("id", DataType::Int64, false);
        assert_eq!(field.name(), "id");
        assert_eq!(field.data_type(), DataType::Int64);
        assert!(!field.is_nullable());
    }

    #[test]
    fn test_field_rename() {
        let field = Field::new("salary", DataType::Float64, true);
        let renamed = field.with_name("bonus");
        assert_eq!(renamed.name(), "bonus");
        assert_eq!(renamed.data_type(), DataType::Float64);
        assert!(renamed.is_nullable());
        assert_eq!(field.name(), "salary");
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new("state", DataType::String, true).to_string(), "state: Utf8");
    }
}
