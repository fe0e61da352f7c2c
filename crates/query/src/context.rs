//! Execution context for query execution.

use crate::dataframe::DataFrame;
use crate::datasource::{DataSource, InMemoryDataSource};
use crate::planner::{PhysicalPlan, QueryPlanner};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use quiver_core::schema::Schema;
use quiver_core::{Error, RecordBatch, Result, Value};

/// Default number of rows per batch for sources built from rows.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Settings applied by an [`ExecutionContext`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionConfig {
    batch_size: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ExecutionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of rows per batch. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// Registry of named data sources and entry point for running queries.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    config: ExecutionConfig,
    tables: BTreeMap<String, Arc<dyn DataSource>>,
}

impl ExecutionContext {
    /// Creates a context with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given configuration.
    pub fn with_config(config: ExecutionConfig) -> Self {
        Self {
            config,
            tables: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Registers a source under `name`, replacing any previous one.
    pub fn register_data_source(&mut self, name: impl Into<String>, source: Arc<dyn DataSource>) {
        let name = name.into();
        tracing::debug!(table = %name, "registered data source");
        self.tables.insert(name, source);
    }

    /// Registers rows as an in-memory table, batched per the configuration.
    pub fn register_table(
        &mut self,
        name: impl Into<String>,
        schema: Schema,
        rows: &[Vec<Value>],
    ) -> Result<()> {
        let source =
            InMemoryDataSource::from_rows(Arc::new(schema), rows, self.config.batch_size)?;
        self.register_data_source(name, Arc::new(source));
        Ok(())
    }

    /// Removes a registered source, returning it if present.
    pub fn deregister(&mut self, name: &str) -> Option<Arc<dyn DataSource>> {
        self.tables.remove(name)
    }

    /// Returns the registered names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Starts a frame scanning the named source.
    pub fn table(&self, name: &str) -> Result<DataFrame> {
        let source = self
            .tables
            .get(name)
            .ok_or_else(|| Error::table_not_found(name))?;
        Ok(DataFrame::scan(name, source.clone()))
    }

    /// Plans a frame for execution.
    pub fn create_physical_plan(&self, df: &DataFrame) -> Result<PhysicalPlan> {
        QueryPlanner::new().create_physical_plan(df.logical_plan())
    }

    /// Plans and runs a frame, collecting every output batch.
    pub fn execute(&self, df: &DataFrame) -> Result<Vec<RecordBatch>> {
        let plan = self.create_physical_plan(df)?;
        let batches = plan.execute()?;
        tracing::debug!(
            batches = batches.len(),
            rows = batches.iter().map(RecordBatch::row_count).sum::<usize>(),
            "query finished"
        );
        Ok(batches)
    }
}
