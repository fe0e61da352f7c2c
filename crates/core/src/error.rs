//! Error types for Quiver.

use crate::types::DataType;
use alloc::string::String;

/// Result type alias for Quiver operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while deriving schemas, planning or executing a query.
///
/// Every variant is fatal to the query that raised it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A column name could not be resolved against a schema.
    #[error("no column named '{column}'")]
    ColumnNotFound { column: String },

    /// A table name is not registered with the execution context.
    #[error("table not found: {name}")]
    TableNotFound { name: String },

    /// Operands of a binary expression have different row counts.
    #[error("binary expression operands do not have the same size: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Operands or values have different element types.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: DataType, got: DataType },

    /// Vector access past its length.
    #[error("index out of bounds {index} vecsize: {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An operator or accumulator was given a type it does not implement.
    #[error("unsupported operation: {message}")]
    UnsupportedOperation { message: String },

    /// Integer division or modulus by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Batch or schema construction violated a structural invariant.
    #[error("invalid schema: {message}")]
    InvalidSchema { message: String },
}

impl Error {
    /// Creates a column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Error::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates a table not found error.
    pub fn table_not_found(name: impl Into<String>) -> Self {
        Error::TableNotFound { name: name.into() }
    }

    /// Creates a length mismatch error.
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Error::LengthMismatch { left, right }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: DataType, got: DataType) -> Self {
        Error::TypeMismatch { expected, got }
    }

    /// Creates an index out of bounds error.
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Error::IndexOutOfBounds { index, len }
    }

    /// Creates an unsupported operation error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedOperation {
            message: message.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::type_mismatch(DataType::Int32, DataType::String);
        assert_eq!(err.to_string(), "type mismatch: expected Int32, got Utf8");

        let err = Error::column_not_found("salary");
        assert_eq!(err.to_string(), "no column named 'salary'");

        let err = Error::index_out_of_bounds(5, 3);
        assert_eq!(err.to_string(), "index out of bounds 5 vecsize: 3");
    }

    #[test]
    fn test_error_constructors() {
        match Error::length_mismatch(3, 4) {
            Error::LengthMismatch { left, right } => {
                assert_eq!(left, 3);
                assert_eq!(right, 4);
            }
            _ => panic!("Wrong error type"),
        }
        assert!(Error::unsupported("x").to_string().contains("x"));
    }
}
