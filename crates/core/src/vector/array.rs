//! Typed array storage.

use super::ColumnVector;
use crate::error::{Error, Result};
use crate::types::DataType;
use crate::value::Value;
use alloc::string::String;
use alloc::vec::Vec;

/// A column backed by one contiguous buffer of its element kind.
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayVector {
    Boolean(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    String(Vec<String>),
}

impl ArrayVector {
    /// Creates an empty vector of the given type.
    pub fn new_empty(data_type: DataType) -> Self {
        Self::with_capacity(data_type, 0)
    }

    /// Creates an empty vector of the given type with reserved capacity.
    pub fn with_capacity(data_type: DataType, capacity: usize) -> Self {
        match data_type {
            DataType::Boolean => ArrayVector::Boolean(Vec::with_capacity(capacity)),
            DataType::Int8 => ArrayVector::Int8(Vec::with_capacity(capacity)),
            DataType::Int16 => ArrayVector::Int16(Vec::with_capacity(capacity)),
            DataType::Int32 => ArrayVector::Int32(Vec::with_capacity(capacity)),
            DataType::Int64 => ArrayVector::Int64(Vec::with_capacity(capacity)),
            DataType::Float32 => ArrayVector::Float32(Vec::with_capacity(capacity)),
            DataType::Float64 => ArrayVector::Float64(Vec::with_capacity(capacity)),
            DataType::String => ArrayVector::String(Vec::with_capacity(capacity)),
        }
    }

    /// Appends a value, which must be of this vector's kind.
    ///
    /// Only used while building; a finished vector is never mutated.
    fn push(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (ArrayVector::Boolean(v), Value::Boolean(x)) => v.push(x),
            (ArrayVector::Int8(v), Value::Int8(x)) => v.push(x),
            (ArrayVector::Int16(v), Value::Int16(x)) => v.push(x),
            (ArrayVector::Int32(v), Value::Int32(x)) => v.push(x),
            (ArrayVector::Int64(v), Value::Int64(x)) => v.push(x),
            (ArrayVector::Float32(v), Value::Float32(x)) => v.push(x),
            (ArrayVector::Float64(v), Value::Float64(x)) => v.push(x),
            (ArrayVector::String(v), Value::String(x)) => v.push(x),
            (this, other) => {
                return Err(Error::type_mismatch(this.data_type(), other.data_type()))
            }
        }
        Ok(())
    }
}

/// Builds a new vector of `data_type` from a sequence of values.
///
/// `capacity` is a sizing hint only. Fails with `TypeMismatch` on the first
/// value whose kind differs from `data_type`.
pub fn build_vector<I>(data_type: DataType, capacity: usize, values: I) -> Result<ArrayVector>
where
    I: IntoIterator<Item = Value>,
{
    let mut vector = ArrayVector::with_capacity(data_type, capacity);
    for value in values {
        vector.push(value)?;
    }
    Ok(vector)
}

impl ColumnVector for ArrayVector {
    fn len(&self) -> usize {
        match self {
            ArrayVector::Boolean(v) => v.len(),
            ArrayVector::Int8(v) => v.len(),
            ArrayVector::Int16(v) => v.len(),
            ArrayVector::Int32(v) => v.len(),
            ArrayVector::Int64(v) => v.len(),
            ArrayVector::Float32(v) => v.len(),
            ArrayVector::Float64(v) => v.len(),
            ArrayVector::String(v) => v.len(),
        }
    }

    fn data_type(&self) -> DataType {
        match self {
            ArrayVector::Boolean(_) => DataType::Boolean,
            ArrayVector::Int8(_) => DataType::Int8,
            ArrayVector::Int16(_) => DataType::Int16,
            ArrayVector::Int32(_) => DataType::Int32,
            ArrayVector::Int64(_) => DataType::Int64,
            ArrayVector::Float32(_) => DataType::Float32,
            ArrayVector::Float64(_) => DataType::Float64,
            ArrayVector::String(_) => DataType::String,
        }
    }

    fn value_at(&self, index: usize) -> Result<Value> {
        let out_of_bounds = || Error::index_out_of_bounds(index, self.len());
        let value = match self {
            ArrayVector::Boolean(v) => v.get(index).copied().map(Value::Boolean),
            ArrayVector::Int8(v) => v.get(index).copied().map(Value::Int8),
            ArrayVector::Int16(v) => v.get(index).copied().map(Value::Int16),
            ArrayVector::Int32(v) => v.get(index).copied().map(Value::Int32),
            ArrayVector::Int64(v) => v.get(index).copied().map(Value::Int64),
            ArrayVector::Float32(v) => v.get(index).copied().map(Value::Float32),
            ArrayVector::Float64(v) => v.get(index).copied().map(Value::Float64),
            ArrayVector::String(v) => v.get(index).cloned().map(Value::String),
        };
        value.ok_or_else(out_of_bounds)
    }
}

macro_rules! impl_from_vec {
    ($native:ty, $variant:ident) => {
        impl From<Vec<$native>> for ArrayVector {
            fn from(values: Vec<$native>) -> Self {
                ArrayVector::$variant(values)
            }
        }
    };
}

impl_from_vec!(bool, Boolean);
impl_from_vec!(i8, Int8);
impl_from_vec!(i16, Int16);
impl_from_vec!(i32, Int32);
impl_from_vec!(i64, Int64);
impl_from_vec!(f32, Float32);
impl_from_vec!(f64, Float64);
impl_from_vec!(String, String);

impl From<Vec<&str>> for ArrayVector {
    fn from(values: Vec<&str>) -> Self {
        ArrayVector::String(values.into_iter().map(String::from).collect())
    }
}
