//! Projection executor.

use crate::executor::PhysicalExpr;
use crate::planner::{write_list, PhysicalPlan};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::SchemaRef;
use quiver_core::{RecordBatch, Result};

/// Projection executor - evaluates one expression per output column.
#[derive(Debug)]
pub struct ProjectionExec {
    input: Box<PhysicalPlan>,
    schema: SchemaRef,
    exprs: Vec<PhysicalExpr>,
}

impl ProjectionExec {
    /// Creates a projection producing batches of `schema`.
    pub fn new(input: PhysicalPlan, schema: SchemaRef, exprs: Vec<PhysicalExpr>) -> Self {
        Self {
            input: Box::new(input),
            schema,
            exprs,
        }
    }

    pub fn input(&self) -> &PhysicalPlan {
        &self.input
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn exprs(&self) -> &[PhysicalExpr] {
        &self.exprs
    }

    /// Executes the projection batch by batch.
    pub fn execute(&self) -> Result<Vec<RecordBatch>> {
        self.input
            .execute()?
            .iter()
            .map(|batch| {
                let columns = self
                    .exprs
                    .iter()
                    .map(|e| e.evaluate(batch))
                    .collect::<Result<Vec<_>>>()?;
                tracing::trace!(rows = batch.row_count(), "projected batch");
                RecordBatch::try_new_with_row_count(self.schema.clone(), columns, batch.row_count())
            })
            .collect()
    }
}

impl fmt::Display for ProjectionExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ProjectionExec: ")?;
        write_list(f, &self.exprs)
    }
}
