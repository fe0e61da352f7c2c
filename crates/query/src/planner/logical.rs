//! Logical query plan definitions.

use crate::ast::{AggregateExpr, LogicalExpr};
use crate::datasource::DataSource;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::Schema;
use quiver_core::Result;

/// Logical query plan node.
#[derive(Clone, Debug)]
pub enum LogicalPlan {
    /// Reads a data source. An empty projection reads every column.
    Scan {
        path: String,
        source: Arc<dyn DataSource>,
        projection: Vec<String>,
    },

    /// Evaluates one expression per output column.
    Projection {
        input: Arc<LogicalPlan>,
        exprs: Vec<LogicalExpr>,
    },

    /// Keeps the rows for which the predicate is true.
    Selection {
        input: Arc<LogicalPlan>,
        predicate: LogicalExpr,
    },

    /// Groups rows and computes aggregates per group.
    Aggregate {
        input: Arc<LogicalPlan>,
        group_by: Vec<LogicalExpr>,
        aggregates: Vec<AggregateExpr>,
    },
}

impl LogicalPlan {
    /// Creates a scan over every column of the source.
    pub fn scan(path: impl Into<String>, source: Arc<dyn DataSource>) -> Self {
        Self::scan_with_projection(path, source, Vec::new())
    }

    /// Creates a scan restricted to the named columns.
    pub fn scan_with_projection(
        path: impl Into<String>,
        source: Arc<dyn DataSource>,
        projection: Vec<String>,
    ) -> Self {
        LogicalPlan::Scan {
            path: path.into(),
            source,
            projection,
        }
    }

    /// Creates a projection node.
    pub fn projection(input: impl Into<Arc<LogicalPlan>>, exprs: Vec<LogicalExpr>) -> Self {
        LogicalPlan::Projection {
            input: input.into(),
            exprs,
        }
    }

    /// Creates a selection node.
    pub fn selection(input: impl Into<Arc<LogicalPlan>>, predicate: LogicalExpr) -> Self {
        LogicalPlan::Selection {
            input: input.into(),
            predicate,
        }
    }

    /// Creates an aggregate node.
    pub fn aggregate(
        input: impl Into<Arc<LogicalPlan>>,
        group_by: Vec<LogicalExpr>,
        aggregates: Vec<AggregateExpr>,
    ) -> Self {
        LogicalPlan::Aggregate {
            input: input.into(),
            group_by,
            aggregates,
        }
    }

    /// Derives the output schema of this node.
    ///
    /// Pure: depends only on the plan tree and the sources' schemas.
    pub fn schema(&self) -> Result<Schema> {
        match self {
            LogicalPlan::Scan {
                source, projection, ..
            } => Ok(source.schema().select(projection)),
            LogicalPlan::Projection { input, exprs } => projection_schema(&input.schema()?, exprs),
            LogicalPlan::Selection { input, .. } => input.schema(),
            LogicalPlan::Aggregate {
                input,
                group_by,
                aggregates,
            } => aggregate_schema(&input.schema()?, group_by, aggregates),
        }
    }

    /// Returns the child nodes.
    pub fn children(&self) -> Vec<&LogicalPlan> {
        match self {
            LogicalPlan::Scan { .. } => Vec::new(),
            LogicalPlan::Projection { input, .. }
            | LogicalPlan::Selection { input, .. }
            | LogicalPlan::Aggregate { input, .. } => alloc::vec![input.as_ref()],
        }
    }

    /// Renders the whole tree, one node per line.
    pub fn pretty(&self) -> String {
        format(self, 0)
    }
}

/// Output schema of a projection over `input`. Output names must be unique.
pub(crate) fn projection_schema(input: &Schema, exprs: &[LogicalExpr]) -> Result<Schema> {
    let fields = exprs
        .iter()
        .map(|e| e.to_field_in(input))
        .collect::<Result<Vec<_>>>()?;
    Schema::try_new(fields)
}

/// Output schema of an aggregate over `input`: grouping columns, then aggregates.
pub(crate) fn aggregate_schema(
    input: &Schema,
    group_by: &[LogicalExpr],
    aggregates: &[AggregateExpr],
) -> Result<Schema> {
    let mut fields = Vec::with_capacity(group_by.len() + aggregates.len());
    for expr in group_by {
        fields.push(expr.to_field_in(input)?);
    }
    for agg in aggregates {
        fields.push(agg.to_field_in(input)?);
    }
    Schema::try_new(fields)
}

/// Renders a plan tree: each node on its own line, preceded by one tab per
/// level of depth starting at `indent`, children after their parent.
pub fn format(plan: &LogicalPlan, indent: usize) -> String {
    let mut out = String::new();
    format_into(plan, indent, &mut out);
    out
}

fn format_into(plan: &LogicalPlan, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push('\t');
    }
    out.push_str(&plan.to_string());
    out.push('\n');
    for child in plan.children() {
        format_into(child, indent + 1, out);
    }
}

pub(crate) fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalPlan::Scan {
                path, projection, ..
            } => {
                write!(f, "Scan: {}; projection=", path)?;
                if projection.is_empty() {
                    f.write_str("None")
                } else {
                    f.write_str("[")?;
                    write_list(f, projection)?;
                    f.write_str("]")
                }
            }
            LogicalPlan::Projection { exprs, .. } => {
                f.write_str("Projection: ")?;
                write_list(f, exprs)
            }
            LogicalPlan::Selection { predicate, .. } => write!(f, "Filter: {}", predicate),
            LogicalPlan::Aggregate {
                group_by,
                aggregates,
                ..
            } => {
                f.write_str("Aggregate: groupExpr=[")?;
                write_list(f, group_by)?;
                f.write_str("], aggregateExpr=[")?;
                write_list(f, aggregates)?;
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{col, lit, max};
    use crate::datasource::InMemoryDataSource;
    use alloc::vec;
    use quiver_core::schema::Field;
    use quiver_core::{DataType, Error};

    fn source() -> Arc<dyn DataSource> {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("state", DataType::String, true),
            Field::new("salary", DataType::Float64, true),
        ]));
        Arc::new(InMemoryDataSource::try_new(schema, Vec::new()).unwrap())
    }

    #[test]
    fn test_scan_schema() {
        let plan = LogicalPlan::scan("employee", source());
        assert_eq!(plan.schema().unwrap().len(), 3);

        let plan = LogicalPlan::scan_with_projection(
            "employee",
            source(),
            vec!["salary".into(), "id".into()],
        );
        let schema = plan.schema().unwrap();
        assert_eq!(schema.field(0).unwrap().name(), "salary");
        assert_eq!(schema.field(1).unwrap().name(), "id");
    }

    #[test]
    fn test_projection_schema() {
        let scan = LogicalPlan::scan("employee", source());
        let plan = LogicalPlan::projection(scan, vec![col("id"), col("state")]);
        let schema = plan.schema().unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.field(1).unwrap().data_type(), DataType::String);

        let scan = LogicalPlan::scan("employee", source());
        let bad = LogicalPlan::projection(scan, vec![col("nope")]);
        assert_eq!(bad.schema().unwrap_err(), Error::column_not_found("nope"));
    }

    #[test]
    fn test_selection_schema_is_input_schema() {
        let scan = Arc::new(LogicalPlan::scan("employee", source()));
        let plan = LogicalPlan::selection(scan.clone(), LogicalExpr::eq(col("state"), lit("CO")));
        assert_eq!(plan.schema().unwrap(), scan.schema().unwrap());
    }

    #[test]
    fn test_aggregate_schema() {
        let scan = LogicalPlan::scan("employee", source());
        let plan = LogicalPlan::aggregate(scan, vec![col("state")], vec![max(col("salary"))]);
        let schema = plan.schema().unwrap();
        assert_eq!(schema.field(0).unwrap().name(), "state");
        assert_eq!(schema.field(1).unwrap().name(), "MAX");
        assert_eq!(schema.field(1).unwrap().data_type(), DataType::Float64);
    }

    #[test]
    fn test_duplicate_output_names_are_rejected() {
        let scan = Arc::new(LogicalPlan::scan("employee", source()));
        let agg = LogicalPlan::aggregate(
            scan.clone(),
            vec![col("state")],
            vec![max(col("id")), max(col("salary"))],
        );
        assert!(matches!(agg.schema().unwrap_err(), Error::InvalidSchema { .. }));

        let proj = LogicalPlan::projection(scan.clone(), vec![col("id"), col("id")]);
        assert!(matches!(proj.schema().unwrap_err(), Error::InvalidSchema { .. }));

        let proj = LogicalPlan::projection(scan, vec![col("id"), col("id").alias("id_again")]);
        let schema = proj.schema().unwrap();
        assert_eq!(schema.field(1).unwrap().name(), "id_again");
    }

    #[test]
    fn test_display() {
        let scan = LogicalPlan::scan("employee", source());
        assert_eq!(scan.to_string(), "Scan: employee; projection=None");

        let scan = LogicalPlan::scan_with_projection("employee", source(), vec!["id".into()]);
        assert_eq!(scan.to_string(), "Scan: employee; projection=[id]");

        let agg = LogicalPlan::aggregate(scan, vec![col("state")], vec![max(col("salary"))]);
        assert_eq!(
            agg.to_string(),
            "Aggregate: groupExpr=[#state], aggregateExpr=[MAX(#salary)]"
        );
    }

    #[test]
    fn test_format_indents_children() {
        let scan = LogicalPlan::scan("employee", source());
        let filter = LogicalPlan::selection(scan, LogicalExpr::eq(col("state"), lit("CO")));
        let plan = LogicalPlan::projection(filter, vec![col("id")]);
        assert_eq!(
            format(&plan, 0),
            "Projection: #id\n\tFilter: #state = 'CO'\n\t\tScan: employee; projection=None\n"
        );
        assert_eq!(plan.pretty(), format(&plan, 0));
        assert!(format(&plan, 1).starts_with("\tProjection"));
    }
}
