//! AST module for logical expressions.

mod expr;

pub use expr::{
    avg, col, count, lit, max, min, sum, AggregateExpr, AggregateFunc, BinaryOp, LogicalExpr,
};
