//! Record batches.
//!
//! A record batch is the unit of data flowing between physical operators: a
//! schema plus one column vector per field, all of the same length.

use crate::error::{Error, Result};
use crate::schema::SchemaRef;
use crate::value::Value;
use crate::vector::{ArrayVector, VectorRef};
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// A column-aligned chunk of rows.
#[derive(Clone, Debug)]
pub struct RecordBatch {
    schema: SchemaRef,
    columns: Vec<VectorRef>,
    row_count: usize,
}

impl RecordBatch {
    /// Creates a batch, checking that the columns match the schema.
    ///
    /// The row count is taken from the first column, so a batch without
    /// columns has zero rows; use [`RecordBatch::try_new_with_row_count`] to
    /// keep rows that carry no columns.
    pub fn try_new(schema: SchemaRef, columns: Vec<VectorRef>) -> Result<Self> {
        let row_count = columns.first().map(|c| c.len()).unwrap_or(0);
        Self::try_new_with_row_count(schema, columns, row_count)
    }

    /// Creates a batch with an explicit row count.
    ///
    /// Fails when the column count differs from the field count, when a
    /// column's type differs from its field's type, or when a column's length
    /// differs from `row_count`.
    pub fn try_new_with_row_count(
        schema: SchemaRef,
        columns: Vec<VectorRef>,
        row_count: usize,
    ) -> Result<Self> {
        if columns.len() != schema.len() {
            return Err(Error::invalid_schema(format!(
                "batch has {} columns but schema has {} fields",
                columns.len(),
                schema.len()
            )));
        }

        for (field, column) in schema.fields().iter().zip(columns.iter()) {
            if column.data_type() != field.data_type() {
                return Err(Error::type_mismatch(field.data_type(), column.data_type()));
            }
            if column.len() != row_count {
                return Err(Error::length_mismatch(row_count, column.len()));
            }
        }

        Ok(Self {
            schema,
            columns,
            row_count,
        })
    }

    /// Creates a batch with zero rows for the given schema.
    pub fn new_empty(schema: SchemaRef) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|f| Arc::new(ArrayVector::new_empty(f.data_type())) as VectorRef)
            .collect();
        Self {
            schema,
            columns,
            row_count: 0,
        }
    }

    /// Returns the schema.
    #[inline]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Returns the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of columns.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the column at the given position.
    pub fn column(&self, index: usize) -> Result<&VectorRef> {
        self.columns
            .get(index)
            .ok_or_else(|| Error::index_out_of_bounds(index, self.columns.len()))
    }

    /// Returns the column with the given field name.
    pub fn column_by_name(&self, name: &str) -> Result<&VectorRef> {
        let index = self.schema.index_of(name)?;
        self.column(index)
    }

    /// Returns all columns.
    #[inline]
    pub fn columns(&self) -> &[VectorRef] {
        &self.columns
    }

    /// Reads one row across all columns.
    pub fn row(&self, index: usize) -> Result<Vec<Value>> {
        if index >= self.row_count {
            return Err(Error::index_out_of_bounds(index, self.row_count));
        }
        self.columns.iter().map(|c| c.value_at(index)).collect()
    }
}
