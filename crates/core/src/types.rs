//! Data type definitions for Quiver.
//!
//! This module defines the element kinds a column vector can hold.

use core::fmt;

/// Element type of a column.
///
/// The set is closed: every operation that dispatches on the kind of a column
/// matches on this enum exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean type (true/false)
    Boolean,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point number
    Float32,
    /// 64-bit floating point number
    Float64,
    /// UTF-8 string
    String,
}

impl DataType {
    /// Returns whether arithmetic is defined for this type.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_floating()
    }

    /// Returns whether this is one of the signed integer types.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64
        )
    }

    /// Returns whether this is one of the floating point types.
    pub fn is_floating(&self) -> bool {
        matches!(self, DataType::Float32 | DataType::Float64)
    }

    /// Returns the type name as used in schema display.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "Boolean",
            DataType::Int8 => "Int8",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float32 => "Float32",
            DataType::Float64 => "Float64",
            DataType::String => "Utf8",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_data_type_equality() {
        assert_eq!(DataType::Int32, DataType::Int32);
        assert_ne!(DataType::Int32, DataType::Int64);
    }

    #[test]
    fn test_numeric() {
        assert!(DataType::Int8.is_numeric());
        assert!(DataType::Int64.is_integer());
        assert!(DataType::Float32.is_floating());
        assert!(!DataType::Float64.is_integer());
        assert!(!DataType::Boolean.is_numeric());
        assert!(!DataType::String.is_numeric());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::Int64.to_string(), "Int64");
        assert_eq!(DataType::String.to_string(), "Utf8");
    }
}
