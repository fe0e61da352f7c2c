//! Selection executor.

use crate::executor::PhysicalExpr;
use crate::planner::PhysicalPlan;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::SchemaRef;
use quiver_core::vector::{build_vector, ColumnVector, VectorRef};
use quiver_core::{DataType, Error, RecordBatch, Result};

/// Selection executor - keeps the rows for which the predicate is true.
#[derive(Debug)]
pub struct SelectionExec {
    input: Box<PhysicalPlan>,
    predicate: PhysicalExpr,
}

impl SelectionExec {
    /// Creates a new selection executor.
    pub fn new(input: PhysicalPlan, predicate: PhysicalExpr) -> Self {
        Self {
            input: Box::new(input),
            predicate,
        }
    }

    pub fn input(&self) -> &PhysicalPlan {
        &self.input
    }

    pub fn predicate(&self) -> &PhysicalExpr {
        &self.predicate
    }

    /// The output schema is the input schema.
    pub fn schema(&self) -> SchemaRef {
        self.input.schema()
    }

    /// Executes the selection batch by batch.
    pub fn execute(&self) -> Result<Vec<RecordBatch>> {
        self.input
            .execute()?
            .iter()
            .map(|batch| {
                let selection = self.predicate.evaluate(batch)?;
                if selection.len() != batch.row_count() {
                    return Err(Error::length_mismatch(batch.row_count(), selection.len()));
                }
                let mask = selection_mask(selection.as_ref())?;
                let columns = batch
                    .columns()
                    .iter()
                    .map(|c| filter_vector(c.as_ref(), &mask))
                    .collect::<Result<Vec<_>>>()?;
                let selected = mask.iter().filter(|&&keep| keep).count();
                tracing::trace!(input = batch.row_count(), selected, "filtered batch");
                RecordBatch::try_new_with_row_count(batch.schema().clone(), columns, selected)
            })
            .collect()
    }
}

impl fmt::Display for SelectionExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SelectionExec: {}", self.predicate)
    }
}

/// Reads a boolean vector into a mask.
pub fn selection_mask(selection: &dyn ColumnVector) -> Result<Vec<bool>> {
    if selection.data_type() != DataType::Boolean {
        return Err(Error::type_mismatch(DataType::Boolean, selection.data_type()));
    }
    (0..selection.len())
        .map(|i| Ok(selection.value_at(i)?.as_bool() == Some(true)))
        .collect()
}

/// Keeps the elements of `vector` whose mask entry is true, preserving order.
pub fn filter_vector(vector: &dyn ColumnVector, mask: &[bool]) -> Result<VectorRef> {
    if vector.len() != mask.len() {
        return Err(Error::length_mismatch(vector.len(), mask.len()));
    }
    let kept = mask.iter().filter(|&&keep| keep).count();
    let values = mask
        .iter()
        .enumerate()
        .filter(|(_, keep)| **keep)
        .map(|(i, _)| vector.value_at(i))
        .collect::<Result<Vec<_>>>()?;
    Ok(Arc::new(build_vector(vector.data_type(), kept, values)?))
}

/// Filters `vector` by a boolean selection vector of the same length.
pub fn filter(vector: &dyn ColumnVector, selection: &dyn ColumnVector) -> Result<VectorRef> {
    let mask = selection_mask(selection)?;
    filter_vector(vector, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use quiver_core::vector::{ArrayVector, LiteralVector};
    use quiver_core::Value;

    #[test]
    fn test_filter() {
        let vector = ArrayVector::from(vec![1i64, 2, 3]);
        let selection = ArrayVector::from(vec![true, false, true]);
        let out = filter(&vector, &selection).unwrap();
        assert_eq!(out.to_values().unwrap(), vec![Value::Int64(1), Value::Int64(3)]);
        assert_eq!(out.data_type(), DataType::Int64);
    }

    #[test]
    fn test_filter_none_selected() {
        let vector = ArrayVector::from(vec!["a", "b"]);
        let selection = LiteralVector::new(Value::Boolean(false), 2);
        let out = filter(&vector, &selection).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.data_type(), DataType::String);
    }

    #[test]
    fn test_filter_rejects_non_boolean() {
        let vector = ArrayVector::from(vec![1i64]);
        let selection = ArrayVector::from(vec![1i64]);
        assert_eq!(
            filter(&vector, &selection).unwrap_err(),
            Error::type_mismatch(DataType::Boolean, DataType::Int64)
        );
    }

    #[test]
    fn test_filter_rejects_length_mismatch() {
        let vector = ArrayVector::from(vec![1i64, 2]);
        assert!(filter_vector(&vector, &[true]).is_err());
    }
}
