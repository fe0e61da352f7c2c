//! Hash aggregate executor.

use crate::executor::{Accumulator, AggregateExpression, PhysicalExpr};
use crate::planner::{write_list, PhysicalPlan};
use alloc::boxed::Box;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use quiver_core::schema::SchemaRef;
use quiver_core::vector::{build_vector, VectorRef};
use quiver_core::{Error, RecordBatch, Result, Value};

/// Hash aggregate executor - groups rows by key and folds each aggregate's
/// input per group.
///
/// Consumes every input batch before producing output. Emits a single batch
/// with one row per distinct key, in the order keys were first seen, or no
/// rows at all when the input is empty.
#[derive(Debug)]
pub struct HashAggregateExec {
    input: Box<PhysicalPlan>,
    group_by: Vec<PhysicalExpr>,
    aggregates: Vec<AggregateExpression>,
    schema: SchemaRef,
}

/// Per-group running state, indexed in first-seen order.
struct Groups {
    index: HashMap<Vec<Value>, usize>,
    keys: Vec<Vec<Value>>,
    accumulators: Vec<Vec<Box<dyn Accumulator>>>,
}

impl HashAggregateExec {
    /// Creates a hash aggregate producing batches of `schema`: the group
    /// columns followed by the aggregate columns.
    pub fn new(
        input: PhysicalPlan,
        group_by: Vec<PhysicalExpr>,
        aggregates: Vec<AggregateExpression>,
        schema: SchemaRef,
    ) -> Self {
        Self {
            input: Box::new(input),
            group_by,
            aggregates,
            schema,
        }
    }

    pub fn input(&self) -> &PhysicalPlan {
        &self.input
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Executes the aggregation.
    pub fn execute(&self) -> Result<Vec<RecordBatch>> {
        let mut groups = Groups {
            index: HashMap::new(),
            keys: Vec::new(),
            accumulators: Vec::new(),
        };

        for batch in self.input.execute()? {
            self.accumulate_batch(&batch, &mut groups)?;
        }

        tracing::debug!(groups = groups.keys.len(), "hash aggregate finished");
        Ok(vec![self.build_output(groups)?])
    }

    fn accumulate_batch(&self, batch: &RecordBatch, groups: &mut Groups) -> Result<()> {
        let key_columns = self
            .group_by
            .iter()
            .map(|e| e.evaluate(batch))
            .collect::<Result<Vec<_>>>()?;
        let input_columns = self
            .aggregates
            .iter()
            .map(|a| a.input_expr().evaluate(batch))
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.row_count() {
            let key = key_columns
                .iter()
                .map(|c| c.value_at(row))
                .collect::<Result<Vec<_>>>()?;

            let slot = match groups.index.entry(key) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    let slot = groups.keys.len();
                    groups.keys.push(e.key().clone());
                    groups
                        .accumulators
                        .push(self.aggregates.iter().map(|a| a.create_accumulator()).collect());
                    e.insert(slot);
                    slot
                }
            };

            for (acc, column) in groups.accumulators[slot].iter_mut().zip(&input_columns) {
                acc.accumulate(column.value_at(row)?)?;
            }
        }
        Ok(())
    }

    fn build_output(&self, groups: Groups) -> Result<RecordBatch> {
        if self.schema.len() != self.group_by.len() + self.aggregates.len() {
            return Err(Error::invalid_schema(format!(
                "aggregate schema has {} fields for {} output columns",
                self.schema.len(),
                self.group_by.len() + self.aggregates.len()
            )));
        }

        let rows = groups.keys.len();
        let mut columns: Vec<VectorRef> = Vec::with_capacity(self.schema.len());

        for (i, field) in self.schema.fields().iter().enumerate() {
            let values = if i < self.group_by.len() {
                groups.keys.iter().map(|k| k[i].clone()).collect::<Vec<_>>()
            } else {
                let agg = i - self.group_by.len();
                groups
                    .accumulators
                    .iter()
                    .map(|accs| accs[agg].final_value())
                    .collect::<Result<Vec<_>>>()?
            };
            columns.push(Arc::new(build_vector(field.data_type(), rows, values)?));
        }

        RecordBatch::try_new_with_row_count(self.schema.clone(), columns, rows)
    }
}

impl fmt::Display for HashAggregateExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashAggregateExec: groupExpr=[")?;
        write_list(f, &self.group_by)?;
        f.write_str("], aggrExpr=[")?;
        write_list(f, &self.aggregates)?;
        f.write_str("]")
    }
}
