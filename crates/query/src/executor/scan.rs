//! Scan executor.

use crate::datasource::DataSource;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::SchemaRef;
use quiver_core::{Error, RecordBatch, Result};

/// Scan executor - reads batches from a data source.
#[derive(Clone, Debug)]
pub struct ScanExec {
    source: Arc<dyn DataSource>,
    projection: Vec<String>,
    schema: SchemaRef,
}

impl ScanExec {
    /// Creates a scan over the given projection. An empty projection reads
    /// every column.
    pub fn new(source: Arc<dyn DataSource>, projection: Vec<String>) -> Self {
        let schema = Arc::new(source.schema().select(&projection));
        Self {
            source,
            projection,
            schema,
        }
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn projection(&self) -> &[String] {
        &self.projection
    }

    /// Reads the source, checking every batch against the scan schema.
    pub fn execute(&self) -> Result<Vec<RecordBatch>> {
        let batches = self.source.scan(&self.projection)?;
        for batch in &batches {
            if batch.schema().as_ref() != self.schema.as_ref() {
                return Err(Error::invalid_schema(format!(
                    "source returned {} but scan expects {}",
                    batch.schema(),
                    self.schema
                )));
            }
        }
        tracing::trace!(batches = batches.len(), "scan finished");
        Ok(batches)
    }
}

impl fmt::Display for ScanExec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScanExec: schema={}, projection=", self.schema)?;
        if self.projection.is_empty() {
            f.write_str("None")
        } else {
            write!(f, "[{}]", self.projection.join(", "))
        }
    }
}
