//! A fluent builder over logical plans.

use crate::ast::{AggregateExpr, LogicalExpr};
use crate::datasource::DataSource;
use crate::planner::LogicalPlan;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use quiver_core::schema::Schema;
use quiver_core::Result;

/// An immutable logical plan under construction.
///
/// Every transformation returns a new frame whose plan wraps this one.
#[derive(Clone, Debug)]
pub struct DataFrame {
    plan: Arc<LogicalPlan>,
}

impl DataFrame {
    /// Wraps an existing plan.
    pub fn new(plan: impl Into<Arc<LogicalPlan>>) -> Self {
        Self { plan: plan.into() }
    }

    /// Starts a frame from a scan of every column of `source`.
    pub fn scan(path: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        Self::new(LogicalPlan::scan(path, source))
    }

    /// Projects the given expressions.
    pub fn project(&self, exprs: Vec<LogicalExpr>) -> Self {
        Self::new(LogicalPlan::projection(self.plan.clone(), exprs))
    }

    /// Keeps rows matching the predicate.
    pub fn filter(&self, predicate: LogicalExpr) -> Self {
        Self::new(LogicalPlan::selection(self.plan.clone(), predicate))
    }

    /// Groups by `group_by` and computes `aggregates` per group.
    pub fn aggregate(&self, group_by: Vec<LogicalExpr>, aggregates: Vec<AggregateExpr>) -> Self {
        Self::new(LogicalPlan::aggregate(self.plan.clone(), group_by, aggregates))
    }

    /// Derives the output schema.
    pub fn schema(&self) -> Result<Schema> {
        self.plan.schema()
    }

    pub fn logical_plan(&self) -> &LogicalPlan {
        &self.plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{col, lit, max};
    use crate::datasource::InMemoryDataSource;
    use alloc::vec;
    use quiver_core::schema::Field;
    use quiver_core::DataType;

    fn source() -> Arc<dyn DataSource> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("state", DataType::String, true),
            Field::new("salary", DataType::Float64, true),
        ]));
        Arc::new(InMemoryDataSource::try_new(schema, Vec::new()).unwrap())
    }

    #[test]
    fn test_builder_chain() {
        let df = DataFrame::scan("employee", source())
            .filter(LogicalExpr::eq(col("state"), lit("CO")))
            .project(vec![col("id"), col("salary")]);

        assert_eq!(df.schema().unwrap().len(), 2);
        assert_eq!(
            df.logical_plan().pretty(),
            "Projection: #id, #salary\n\tFilter: #state = 'CO'\n\t\tScan: employee; projection=None\n"
        );
    }

    #[test]
    fn test_frames_are_immutable() {
        let base = DataFrame::scan("employee", source());
        let filtered = base.filter(LogicalExpr::gt(col("salary"), lit(1.0f64)));
        assert_eq!(base.logical_plan().children().len(), 0);
        assert_eq!(filtered.logical_plan().children().len(), 1);
    }

    #[test]
    fn test_aggregate() {
        let df = DataFrame::scan("employee", source())
            .aggregate(vec![col("state")], vec![max(col("salary"))]);
        let schema = df.schema().unwrap();
        assert_eq!(schema.field(1).unwrap().name(), "MAX");
    }
}
