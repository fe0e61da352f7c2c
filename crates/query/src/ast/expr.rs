//! Logical expression definitions.

use crate::planner::LogicalPlan;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::fmt;
use quiver_core::schema::{Field, Schema};
use quiver_core::{DataType, Result, Value};

/// Binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Comparison
    Eq,
    Neq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    // Logical
    And,
    Or,
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
}

impl BinaryOp {
    /// Returns the operator as written in plan output.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Neq => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulus => "%",
        }
    }

    /// Returns the name given to the field an unaliased expression derives.
    pub fn name(&self) -> &'static str {
        match self {
            BinaryOp::Eq => "eq",
            BinaryOp::Neq => "neq",
            BinaryOp::Gt => "gt",
            BinaryOp::GtEq => "gteq",
            BinaryOp::Lt => "lt",
            BinaryOp::LtEq => "lteq",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Add => "add",
            BinaryOp::Subtract => "subtract",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "divide",
            BinaryOp::Modulus => "modulus",
        }
    }

    /// Returns true for operators producing a boolean column.
    pub fn is_boolean(&self) -> bool {
        !self.is_arithmetic()
    }

    /// Returns true for `+ - * / %`.
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add
                | BinaryOp::Subtract
                | BinaryOp::Multiply
                | BinaryOp::Divide
                | BinaryOp::Modulus
        )
    }
}

/// Aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunc {
    Sum,
    Min,
    Max,
    Avg,
    Count,
}

impl AggregateFunc {
    /// Returns the function name as written in plan output.
    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Count => "COUNT",
        }
    }

    /// Returns the type of the final value given the type of the input.
    pub fn result_type(&self, input: DataType) -> DataType {
        match self {
            AggregateFunc::Sum | AggregateFunc::Min | AggregateFunc::Max => input,
            AggregateFunc::Avg => DataType::Float64,
            AggregateFunc::Count => DataType::Int64,
        }
    }
}

/// An aggregate function applied to one input expression.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregateExpr {
    pub func: AggregateFunc,
    pub expr: Box<LogicalExpr>,
}

impl AggregateExpr {
    /// Creates an aggregate expression.
    pub fn new(func: AggregateFunc, expr: LogicalExpr) -> Self {
        Self {
            func,
            expr: Box::new(expr),
        }
    }

    /// Derives the output field against the given input schema.
    pub fn to_field_in(&self, schema: &Schema) -> Result<Field> {
        let input = self.expr.to_field_in(schema)?;
        Ok(Field::new(
            self.func.name(),
            self.func.result_type(input.data_type()),
            input.is_nullable(),
        ))
    }
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func.name(), self.expr)
    }
}

/// Logical expression AST node.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicalExpr {
    /// Column reference by name.
    Column(String),
    /// Literal value.
    Literal(Value),
    /// Binary operation.
    Binary {
        left: Box<LogicalExpr>,
        op: BinaryOp,
        right: Box<LogicalExpr>,
    },
    /// Aggregate function.
    Aggregate(AggregateExpr),
    /// Renames the field derived by the inner expression.
    Alias {
        expr: Box<LogicalExpr>,
        alias: String,
    },
}

/// Creates a column reference expression.
pub fn col(name: impl Into<String>) -> LogicalExpr {
    LogicalExpr::Column(name.into())
}

/// Creates a literal expression.
pub fn lit(value: impl Into<Value>) -> LogicalExpr {
    LogicalExpr::Literal(value.into())
}

/// Creates a SUM aggregate.
pub fn sum(expr: LogicalExpr) -> AggregateExpr {
    AggregateExpr::new(AggregateFunc::Sum, expr)
}

/// Creates a MIN aggregate.
pub fn min(expr: LogicalExpr) -> AggregateExpr {
    AggregateExpr::new(AggregateFunc::Min, expr)
}

/// Creates a MAX aggregate.
pub fn max(expr: LogicalExpr) -> AggregateExpr {
    AggregateExpr::new(AggregateFunc::Max, expr)
}

/// Creates an AVG aggregate.
pub fn avg(expr: LogicalExpr) -> AggregateExpr {
    AggregateExpr::new(AggregateFunc::Avg, expr)
}

/// Creates a COUNT aggregate.
pub fn count(expr: LogicalExpr) -> AggregateExpr {
    AggregateExpr::new(AggregateFunc::Count, expr)
}

impl LogicalExpr {
    /// Creates a binary expression.
    pub fn binary(left: LogicalExpr, op: BinaryOp, right: LogicalExpr) -> Self {
        LogicalExpr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    pub fn eq(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Eq, right)
    }

    /// Creates a not-equal expression.
    pub fn neq(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Neq, right)
    }

    /// Creates a greater-than expression.
    pub fn gt(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Gt, right)
    }

    /// Creates a greater-than-or-equal expression.
    pub fn gt_eq(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::GtEq, right)
    }

    /// Creates a less-than expression.
    pub fn lt(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Lt, right)
    }

    /// Creates a less-than-or-equal expression.
    pub fn lt_eq(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::LtEq, right)
    }

    /// Creates an AND expression.
    pub fn and(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::And, right)
    }

    /// Creates an OR expression.
    pub fn or(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Or, right)
    }

    /// Creates an addition expression.
    pub fn add(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Add, right)
    }

    /// Creates a subtraction expression.
    pub fn subtract(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Subtract, right)
    }

    /// Creates a multiplication expression.
    pub fn multiply(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Multiply, right)
    }

    /// Creates a division expression.
    pub fn divide(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Divide, right)
    }

    /// Creates a modulus expression.
    pub fn modulus(left: LogicalExpr, right: LogicalExpr) -> Self {
        Self::binary(left, BinaryOp::Modulus, right)
    }

    /// Renames the field this expression derives.
    pub fn alias(self, alias: impl Into<String>) -> Self {
        LogicalExpr::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Derives the field this expression produces when evaluated against the
    /// output of `input`.
    pub fn to_field(&self, input: &LogicalPlan) -> Result<Field> {
        self.to_field_in(&input.schema()?)
    }

    /// Derives the field this expression produces against an input schema.
    pub fn to_field_in(&self, schema: &Schema) -> Result<Field> {
        match self {
            LogicalExpr::Column(name) => schema.field_with_name(name).cloned(),
            LogicalExpr::Literal(value) => {
                Ok(Field::new(value.to_string(), value.data_type(), true))
            }
            LogicalExpr::Binary { left, op, right } => {
                let left = left.to_field_in(schema)?;
                right.to_field_in(schema)?;
                if op.is_arithmetic() {
                    Ok(Field::new(op.name(), left.data_type(), left.is_nullable()))
                } else {
                    Ok(Field::new(op.name(), DataType::Boolean, false))
                }
            }
            LogicalExpr::Aggregate(agg) => agg.to_field_in(schema),
            LogicalExpr::Alias { expr, alias } => Ok(expr.to_field_in(schema)?.with_name(alias.as_str())),
        }
    }
}

impl From<AggregateExpr> for LogicalExpr {
    fn from(agg: AggregateExpr) -> Self {
        LogicalExpr::Aggregate(agg)
    }
}

impl fmt::Display for LogicalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalExpr::Column(name) => write!(f, "#{}", name),
            LogicalExpr::Literal(Value::String(s)) => write!(f, "'{}'", s),
            LogicalExpr::Literal(value) => write!(f, "{}", value),
            LogicalExpr::Binary { left, op, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            LogicalExpr::Aggregate(agg) => write!(f, "{}", agg),
            LogicalExpr::Alias { expr, alias } => write!(f, "{} as {}", expr, alias),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use quiver_core::Error;

    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("state", DataType::String, true),
            Field::new("salary", DataType::Float64, true),
        ])
    }

    #[test]
    fn test_display() {
        assert_eq!(col("id").to_string(), "#id");
        assert_eq!(lit("CO").to_string(), "'CO'");
        assert_eq!(lit(10000i64).to_string(), "10000");
        assert_eq!(lit(0.1f64).to_string(), "0.1");
        assert_eq!(
            LogicalExpr::eq(col("state"), lit("CO")).to_string(),
            "#state = 'CO'"
        );
        assert_eq!(
            LogicalExpr::multiply(col("salary"), lit(0.1f64))
                .alias("bonus")
                .to_string(),
            "#salary * 0.1 as bonus"
        );
        assert_eq!(max(col("salary")).to_string(), "MAX(#salary)");
    }

    #[test]
    fn test_column_to_field() {
        let field = col("state").to_field_in(&schema()).unwrap();
        assert_eq!(field.name(), "state");
        assert_eq!(field.data_type(), DataType::String);

        let err = col("missing").to_field_in(&schema()).unwrap_err();
        assert_eq!(err, Error::column_not_found("missing"));
    }

    #[test]
    fn test_binary_to_field() {
        let cmp = LogicalExpr::gt_eq(col("salary"), lit(1.0f64));
        let field = cmp.to_field_in(&schema()).unwrap();
        assert_eq!(field.name(), "gteq");
        assert_eq!(field.data_type(), DataType::Boolean);

        let math = LogicalExpr::add(col("id"), lit(1i64));
        let field = math.to_field_in(&schema()).unwrap();
        assert_eq!(field.name(), "add");
        assert_eq!(field.data_type(), DataType::Int64);

        let bad = LogicalExpr::add(col("id"), col("nope"));
        assert!(bad.to_field_in(&schema()).is_err());
    }

    #[test]
    fn test_alias_to_field() {
        let expr = LogicalExpr::multiply(col("salary"), lit(0.1f64)).alias("bonus");
        let field = expr.to_field_in(&schema()).unwrap();
        assert_eq!(field.name(), "bonus");
        assert_eq!(field.data_type(), DataType::Float64);
    }

    #[test]
    fn test_aggregate_to_field() {
        let s = schema();
        assert_eq!(max(col("salary")).to_field_in(&s).unwrap().data_type(), DataType::Float64);
        assert_eq!(count(col("state")).to_field_in(&s).unwrap().data_type(), DataType::Int64);
        assert_eq!(avg(col("id")).to_field_in(&s).unwrap().data_type(), DataType::Float64);
        assert_eq!(sum(col("id")).to_field_in(&s).unwrap().name(), "SUM");
    }

    #[test]
    fn test_literal_to_field() {
        let field = lit(42i64).to_field_in(&Schema::empty()).unwrap();
        assert_eq!(field.name(), "42");
        assert_eq!(field.data_type(), DataType::Int64);
    }
}
