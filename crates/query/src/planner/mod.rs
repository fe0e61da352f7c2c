//! Query planner module.

mod logical;
mod physical;
mod query_planner;

pub use logical::{format, LogicalPlan};
pub(crate) use logical::{aggregate_schema, projection_schema, write_list};
pub use physical::{format_physical, PhysicalPlan};
pub use query_planner::QueryPlanner;
