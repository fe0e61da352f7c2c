//! Constant-valued vectors.

use super::ColumnVector;
use crate::error::{Error, Result};
use crate::types::DataType;
use crate::value::Value;

/// A vector that reports the same value at every position.
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralVector {
    value: Value,
    len: usize,
}

impl LiteralVector {
    /// Broadcasts `value` to a vector of `len` elements.
    pub fn new(value: Value, len: usize) -> Self {
        Self { value, len }
    }

    /// Returns the repeated value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl ColumnVector for LiteralVector {
    fn len(&self) -> usize {
        self.len
    }

    fn data_type(&self) -> DataType {
        self.value.data_type()
    }

    fn value_at(&self, index: usize) -> Result<Value> {
        if index >= self.len {
            return Err(Error::index_out_of_bounds(index, self.len));
        }
        Ok(self.value.clone())
    }
}
