//! Physical expressions evaluated against record batches.

use crate::ast::{AggregateFunc, BinaryOp};
use crate::executor::accumulator::{
    Accumulator, AvgAccumulator, CountAccumulator, MaxAccumulator, MinAccumulator, SumAccumulator,
};
use crate::executor::kernels;
use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;
use quiver_core::vector::{LiteralVector, VectorRef};
use quiver_core::{RecordBatch, Result, Value};

/// An expression with column references resolved to positions.
#[derive(Clone, Debug, PartialEq)]
pub enum PhysicalExpr {
    /// The batch column at the given position.
    Column { index: usize },
    /// A constant, broadcast to the batch's row count.
    Literal(Value),
    /// Element-wise binary operation.
    Binary {
        left: Box<PhysicalExpr>,
        op: BinaryOp,
        right: Box<PhysicalExpr>,
    },
}

impl PhysicalExpr {
    /// Creates a column expression.
    pub fn column(index: usize) -> Self {
        PhysicalExpr::Column { index }
    }

    /// Creates a literal expression.
    pub fn literal(value: impl Into<Value>) -> Self {
        PhysicalExpr::Literal(value.into())
    }

    /// Creates a binary expression.
    pub fn binary(left: PhysicalExpr, op: BinaryOp, right: PhysicalExpr) -> Self {
        PhysicalExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Evaluates the expression, producing one value per batch row.
    pub fn evaluate(&self, batch: &RecordBatch) -> Result<VectorRef> {
        match self {
            PhysicalExpr::Column { index } => batch.column(*index).cloned(),
            PhysicalExpr::Literal(value) => {
                Ok(Arc::new(LiteralVector::new(value.clone(), batch.row_count())))
            }
            PhysicalExpr::Binary { left, op, right } => {
                let l = left.evaluate(batch)?;
                let r = right.evaluate(batch)?;
                kernels::evaluate_binary(*op, l.as_ref(), r.as_ref())
            }
        }
    }
}

impl fmt::Display for PhysicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalExpr::Column { index } => write!(f, "#{}", index),
            PhysicalExpr::Literal(Value::String(s)) => write!(f, "'{}'", s),
            PhysicalExpr::Literal(value) => write!(f, "{}", value),
            PhysicalExpr::Binary { left, op, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
        }
    }
}

/// An aggregate function over a physical input expression.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateExpression {
    func: AggregateFunc,
    input: PhysicalExpr,
}

impl AggregateExpression {
    pub fn new(func: AggregateFunc, input: PhysicalExpr) -> Self {
        Self { func, input }
    }

    pub fn func(&self) -> AggregateFunc {
        self.func
    }

    /// Returns the expression producing the values to aggregate.
    pub fn input_expr(&self) -> &PhysicalExpr {
        &self.input
    }

    /// Creates a fresh accumulator for one group.
    pub fn create_accumulator(&self) -> Box<dyn Accumulator> {
        match self.func {
            AggregateFunc::Max => Box::new(MaxAccumulator::new()),
            AggregateFunc::Min => Box::new(MinAccumulator::new()),
            AggregateFunc::Sum => Box::new(SumAccumulator::new()),
            AggregateFunc::Avg => Box::new(AvgAccumulator::new()),
            AggregateFunc::Count => Box::new(CountAccumulator::new()),
        }
    }
}

impl fmt::Display for AggregateExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func.name(), self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use quiver_core::schema::{Field, Schema};
    use quiver_core::vector::ArrayVector;
    use quiver_core::{DataType, Error};

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("salary", DataType::Float64, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(ArrayVector::from(vec![1i64, 2, 3])),
                Arc::new(ArrayVector::from(vec![50000.0f64, 80000.0, 120000.0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_column() {
        let out = PhysicalExpr::column(1).evaluate(&batch()).unwrap();
        assert_eq!(out.data_type(), DataType::Float64);
        assert_eq!(out.len(), 3);

        let err = PhysicalExpr::column(5).evaluate(&batch()).unwrap_err();
        assert_eq!(err, Error::index_out_of_bounds(5, 2));
    }

    #[test]
    fn test_literal_broadcasts() {
        let out = PhysicalExpr::literal("CO").evaluate(&batch()).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out.value_at(2).unwrap(), Value::from("CO"));
    }

    #[test]
    fn test_binary() {
        let expr = PhysicalExpr::binary(
            PhysicalExpr::column(1),
            BinaryOp::Multiply,
            PhysicalExpr::literal(0.1f64),
        );
        let out = expr.evaluate(&batch()).unwrap();
        assert_eq!(out.value_at(0).unwrap(), Value::Float64(5000.0));

        let mismatched = PhysicalExpr::binary(
            PhysicalExpr::column(0),
            BinaryOp::Gt,
            PhysicalExpr::literal(1.0f64),
        );
        assert!(matches!(
            mismatched.evaluate(&batch()),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_display() {
        let expr = PhysicalExpr::binary(
            PhysicalExpr::column(2),
            BinaryOp::Eq,
            PhysicalExpr::literal("CO"),
        );
        assert_eq!(expr.to_string(), "#2 = 'CO'");

        let agg = AggregateExpression::new(AggregateFunc::Max, PhysicalExpr::column(4));
        assert_eq!(agg.to_string(), "MAX(#4)");
    }

    #[test]
    fn test_create_accumulator() {
        let agg = AggregateExpression::new(AggregateFunc::Count, PhysicalExpr::column(0));
        let mut acc = agg.create_accumulator();
        acc.accumulate(Value::Int64(7)).unwrap();
        assert_eq!(acc.final_value().unwrap(), Value::Int64(1));
    }
}
