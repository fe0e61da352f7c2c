//! Data sources feeding scans.

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::{Schema, SchemaRef};
use quiver_core::vector::{build_vector, VectorRef};
use quiver_core::{Error, RecordBatch, Result, Value};

/// A provider of record batches.
///
/// `scan` with an empty projection returns every column. Otherwise each
/// returned batch carries exactly the projected columns, in the order the
/// source schema's `select` yields them.
pub trait DataSource: fmt::Debug + Send + Sync {
    /// Returns the full schema of the source.
    fn schema(&self) -> SchemaRef;

    /// Reads all batches, restricted to the given column names.
    fn scan(&self, projection: &[String]) -> Result<Vec<RecordBatch>>;
}

/// A data source over batches held in memory.
#[derive(Clone, Debug)]
pub struct InMemoryDataSource {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl InMemoryDataSource {
    /// Creates a source from prebuilt batches, each of which must carry the
    /// source schema.
    pub fn try_new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Result<Self> {
        for batch in &batches {
            if batch.schema().as_ref() != schema.as_ref() {
                return Err(Error::invalid_schema(format!(
                    "batch schema {} does not match source schema {}",
                    batch.schema(),
                    schema
                )));
            }
        }
        Ok(Self { schema, batches })
    }

    /// Creates a source from rows, chunked into batches of at most
    /// `batch_size` rows.
    pub fn from_rows(schema: SchemaRef, rows: &[Vec<Value>], batch_size: usize) -> Result<Self> {
        let batch_size = batch_size.max(1);
        let mut batches = Vec::with_capacity(rows.len().div_ceil(batch_size));
        for chunk in rows.chunks(batch_size) {
            batches.push(rows_to_batch(&schema, chunk)?);
        }
        tracing::debug!(
            rows = rows.len(),
            batches = batches.len(),
            "built in-memory data source"
        );
        Ok(Self { schema, batches })
    }

    /// Returns the stored batches.
    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }
}

fn rows_to_batch(schema: &SchemaRef, rows: &[Vec<Value>]) -> Result<RecordBatch> {
    if let Some(row) = rows.iter().find(|r| r.len() != schema.len()) {
        return Err(Error::invalid_schema(format!(
            "row has {} values but schema has {} fields",
            row.len(),
            schema.len()
        )));
    }

    let columns = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let values = rows.iter().map(|row| row[i].clone());
            build_vector(field.data_type(), rows.len(), values).map(|v| Arc::new(v) as VectorRef)
        })
        .collect::<Result<Vec<_>>>()?;
    RecordBatch::try_new_with_row_count(schema.clone(), columns, rows.len())
}

impl DataSource for InMemoryDataSource {
    fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    fn scan(&self, projection: &[String]) -> Result<Vec<RecordBatch>> {
        if projection.is_empty() {
            return Ok(self.batches.clone());
        }

        let projected: Schema = self.schema.select(projection);
        let indices = projected
            .fields()
            .iter()
            .map(|f| self.schema.index_of(f.name()))
            .collect::<Result<Vec<_>>>()?;
        let projected = Arc::new(projected);

        self.batches
            .iter()
            .map(|batch| {
                let columns = indices
                    .iter()
                    .map(|&i| batch.column(i).cloned())
                    .collect::<Result<Vec<_>>>()?;
                RecordBatch::try_new_with_row_count(projected.clone(), columns, batch.row_count())
            })
            .collect()
    }
}
