//! Column vectors.
//!
//! The query layer never looks at how a column is stored. It reads columns
//! through the [`ColumnVector`] capability and creates new ones through
//! [`build_vector`]. Two storages ship with the crate:
//!
//! - [`ArrayVector`]: one contiguous typed buffer per element kind
//! - [`LiteralVector`]: a single value repeated `len` times

mod array;
mod literal;

pub use array::{build_vector, ArrayVector};
pub use literal::LiteralVector;

use crate::error::Result;
use crate::types::DataType;
use crate::value::Value;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Read-only access to a single typed column.
pub trait ColumnVector: fmt::Debug + Send + Sync {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element type.
    fn data_type(&self) -> DataType;

    /// Returns the element at `index`, failing with `IndexOutOfBounds` when
    /// `index >= len()`.
    fn value_at(&self, index: usize) -> Result<Value>;

    /// Returns true if the vector has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads every element into a `Vec`.
    fn to_values(&self) -> Result<Vec<Value>> {
        (0..self.len()).map(|i| self.value_at(i)).collect()
    }
}

/// Shared handle to an immutable column vector.
pub type VectorRef = Arc<dyn ColumnVector>;

impl fmt::Display for dyn ColumnVector + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for i in 0..self.len() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match self.value_at(i).map_err(|_| fmt::Error)? {
                Value::String(s) => write!(f, "{:?}", s)?,
                other => write!(f, "{}", other)?,
            }
        }
        f.write_str("]")
    }
}
