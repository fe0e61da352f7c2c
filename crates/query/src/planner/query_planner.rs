//! Translation of logical plans into physical plans.
//!
//! Column names are resolved to positions against the input schema once, at
//! planning time, so executors never look up names. Each node takes its input
//! schema from the already planned child. Aliases exist only to name
//! output fields and vanish from physical expressions.

use crate::ast::LogicalExpr;
use crate::executor::{
    AggregateExpression, HashAggregateExec, PhysicalExpr, ProjectionExec, ScanExec, SelectionExec,
};
use crate::planner::{aggregate_schema, projection_schema, LogicalPlan, PhysicalPlan};
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use quiver_core::schema::Schema;
use quiver_core::{Error, Result};

/// Converts logical plans to executable physical plans.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryPlanner;

impl QueryPlanner {
    /// Creates a new query planner.
    pub fn new() -> Self {
        Self
    }

    /// Creates the physical plan for a logical plan, recursively.
    pub fn create_physical_plan(&self, plan: &LogicalPlan) -> Result<PhysicalPlan> {
        let physical = match plan {
            LogicalPlan::Scan {
                source, projection, ..
            } => PhysicalPlan::Scan(ScanExec::new(source.clone(), projection.clone())),

            LogicalPlan::Projection { input, exprs } => {
                let input = self.create_physical_plan(input)?;
                let input_schema = input.schema();
                let schema = Arc::new(projection_schema(&input_schema, exprs)?);
                let exprs = exprs
                    .iter()
                    .map(|e| self.create_physical_expr(e, &input_schema))
                    .collect::<Result<Vec<_>>>()?;
                PhysicalPlan::Projection(ProjectionExec::new(input, schema, exprs))
            }

            LogicalPlan::Selection { input, predicate } => {
                let input = self.create_physical_plan(input)?;
                let predicate = self.create_physical_expr(predicate, &input.schema())?;
                PhysicalPlan::Selection(SelectionExec::new(input, predicate))
            }

            LogicalPlan::Aggregate {
                input,
                group_by,
                aggregates,
            } => {
                let input = self.create_physical_plan(input)?;
                let input_schema = input.schema();
                let schema = Arc::new(aggregate_schema(&input_schema, group_by, aggregates)?);
                let group_by = group_by
                    .iter()
                    .map(|e| self.create_physical_expr(e, &input_schema))
                    .collect::<Result<Vec<_>>>()?;
                let aggregates = aggregates
                    .iter()
                    .map(|agg| {
                        let expr = self.create_physical_expr(&agg.expr, &input_schema)?;
                        Ok(AggregateExpression::new(agg.func, expr))
                    })
                    .collect::<Result<Vec<_>>>()?;
                PhysicalPlan::HashAggregate(HashAggregateExec::new(
                    input, group_by, aggregates, schema,
                ))
            }
        };

        tracing::debug!(node = %physical, "planned physical node");
        Ok(physical)
    }

    /// Creates the physical form of an expression evaluated against `input`.
    pub fn create_physical_expr(&self, expr: &LogicalExpr, input: &Schema) -> Result<PhysicalExpr> {
        match expr {
            LogicalExpr::Column(name) => Ok(PhysicalExpr::column(input.index_of(name)?)),
            LogicalExpr::Literal(value) => Ok(PhysicalExpr::Literal(value.clone())),
            LogicalExpr::Binary { left, op, right } => Ok(PhysicalExpr::binary(
                self.create_physical_expr(left, input)?,
                *op,
                self.create_physical_expr(right, input)?,
            )),
            LogicalExpr::Alias { expr, .. } => self.create_physical_expr(expr, input),
            LogicalExpr::Aggregate(agg) => Err(Error::unsupported(format!(
                "aggregate expression {} outside of an aggregate",
                agg
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{col, lit, max, BinaryOp};
    use crate::datasource::{DataSource, InMemoryDataSource};
    use crate::ast::count;
    use crate::planner::format_physical;
    use alloc::string::ToString;
    use alloc::vec;
    use quiver_core::schema::Field;
    use quiver_core::{DataType, Value};

    fn source() -> Arc<dyn DataSource> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("state", DataType::String, true),
            Field::new("salary", DataType::Float64, true),
        ]));
        let rows = vec![
            vec![Value::Int64(1), Value::from("CO"), Value::Float64(100.0)],
            vec![Value::Int64(2), Value::from("OH"), Value::Float64(300.0)],
            vec![Value::Int64(3), Value::from("CO"), Value::Float64(200.0)],
        ];
        Arc::new(InMemoryDataSource::from_rows(schema, &rows, 2).unwrap())
    }

    #[test]
    fn test_column_resolution() {
        let schema = source().schema();
        let planner = QueryPlanner::new();
        let expr = LogicalExpr::eq(col("state"), lit("CO")).alias("is_co");
        let physical = planner.create_physical_expr(&expr, &schema).unwrap();
        assert_eq!(
            physical,
            PhysicalExpr::binary(
                PhysicalExpr::column(1),
                BinaryOp::Eq,
                PhysicalExpr::literal("CO")
            )
        );

        let err = planner.create_physical_expr(&col("nope"), &schema).unwrap_err();
        assert_eq!(err, Error::column_not_found("nope"));
    }

    #[test]
    fn test_aggregate_outside_aggregate_node() {
        let schema = source().schema();
        let expr = LogicalExpr::from(max(col("salary")));
        let err = QueryPlanner::new().create_physical_expr(&expr, &schema).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation { .. }));
    }

    #[test]
    fn test_plan_and_execute() {
        let scan = LogicalPlan::scan("employee", source());
        let filter = LogicalPlan::selection(scan, LogicalExpr::eq(col("state"), lit("CO")));
        let plan = LogicalPlan::projection(filter, vec![col("id"), col("salary")]);

        let physical = QueryPlanner::new().create_physical_plan(&plan).unwrap();
        assert_eq!(physical.schema().as_ref(), &plan.schema().unwrap());
        assert_eq!(
            format_physical(&physical, 0),
            "ProjectionExec: #0, #2\n\tSelectionExec: #1 = 'CO'\n\t\tScanExec: schema=[id: Int64, state: Utf8, salary: Float64], projection=None\n"
        );

        let rows: Vec<Vec<Value>> = physical
            .execute()
            .unwrap()
            .iter()
            .flat_map(|b| (0..b.row_count()).map(move |i| b.row(i).unwrap()))
            .collect();
        assert_eq!(
            rows,
            vec![
                vec![Value::Int64(1), Value::Float64(100.0)],
                vec![Value::Int64(3), Value::Float64(200.0)],
            ]
        );
    }

    #[test]
    fn test_plan_aggregate() {
        let scan = LogicalPlan::scan("employee", source());
        let plan = LogicalPlan::aggregate(scan, vec![col("state")], vec![max(col("salary"))]);
        let physical = QueryPlanner::new().create_physical_plan(&plan).unwrap();
        assert_eq!(
            physical.to_string(),
            "HashAggregateExec: groupExpr=[#1], aggrExpr=[MAX(#2)]"
        );

        let batches = physical.execute().unwrap();
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        assert_eq!(batch.row(0).unwrap(), vec![Value::from("CO"), Value::Float64(200.0)]);
        assert_eq!(batch.row(1).unwrap(), vec![Value::from("OH"), Value::Float64(300.0)]);
    }

    #[test]
    fn test_plan_rejects_duplicate_aggregate_names() {
        let scan = LogicalPlan::scan("employee", source());
        let plan = LogicalPlan::aggregate(
            scan,
            vec![col("state")],
            vec![max(col("id")), max(col("salary"))],
        );
        let err = QueryPlanner::new().create_physical_plan(&plan).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));
    }

    #[test]
    fn test_count_over_columnless_scan() {
        let scan = LogicalPlan::scan_with_projection("employee", source(), vec!["zzz".into()]);
        let plan = LogicalPlan::aggregate(scan, Vec::new(), vec![count(lit(1i64))]);
        let batches = QueryPlanner::new().create_physical_plan(&plan).unwrap().execute().unwrap();
        assert_eq!(batches[0].row_count(), 1);
        assert_eq!(batches[0].row(0).unwrap(), vec![Value::Int64(3)]);
    }
}
