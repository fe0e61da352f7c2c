//! Query executor module.
//!
//! Physical operators pull record batches from their input, so execution of
//! a plan tree is driven from the root.

mod accumulator;
mod aggregate;
mod expr;
mod filter;
pub mod kernels;
mod project;
mod scan;

pub use accumulator::{
    Accumulator, AvgAccumulator, CountAccumulator, MaxAccumulator, MinAccumulator, SumAccumulator,
};
pub use aggregate::HashAggregateExec;
pub use expr::{AggregateExpression, PhysicalExpr};
pub use filter::{filter, filter_vector, selection_mask, SelectionExec};
pub use project::ProjectionExec;
pub use scan::ScanExec;
