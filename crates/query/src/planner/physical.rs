//! Physical query plan definitions.

use crate::executor::{HashAggregateExec, ProjectionExec, ScanExec, SelectionExec};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use quiver_core::schema::SchemaRef;
use quiver_core::{RecordBatch, Result};

/// Physical query plan node.
#[derive(Debug)]
pub enum PhysicalPlan {
    /// Reads a data source.
    Scan(ScanExec),
    /// Evaluates expressions per batch.
    Projection(ProjectionExec),
    /// Filters rows per batch.
    Selection(SelectionExec),
    /// Groups and aggregates the whole input.
    HashAggregate(HashAggregateExec),
}

impl PhysicalPlan {
    /// Returns the schema of the batches this node produces.
    pub fn schema(&self) -> SchemaRef {
        match self {
            PhysicalPlan::Scan(exec) => exec.schema(),
            PhysicalPlan::Projection(exec) => exec.schema(),
            PhysicalPlan::Selection(exec) => exec.schema(),
            PhysicalPlan::HashAggregate(exec) => exec.schema(),
        }
    }

    /// Executes the subtree rooted at this node.
    pub fn execute(&self) -> Result<Vec<RecordBatch>> {
        match self {
            PhysicalPlan::Scan(exec) => exec.execute(),
            PhysicalPlan::Projection(exec) => exec.execute(),
            PhysicalPlan::Selection(exec) => exec.execute(),
            PhysicalPlan::HashAggregate(exec) => exec.execute(),
        }
    }

    /// Returns the child nodes.
    pub fn children(&self) -> Vec<&PhysicalPlan> {
        match self {
            PhysicalPlan::Scan(_) => Vec::new(),
            PhysicalPlan::Projection(exec) => alloc::vec![exec.input()],
            PhysicalPlan::Selection(exec) => alloc::vec![exec.input()],
            PhysicalPlan::HashAggregate(exec) => alloc::vec![exec.input()],
        }
    }
}

impl fmt::Display for PhysicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalPlan::Scan(exec) => fmt::Display::fmt(exec, f),
            PhysicalPlan::Projection(exec) => fmt::Display::fmt(exec, f),
            PhysicalPlan::Selection(exec) => fmt::Display::fmt(exec, f),
            PhysicalPlan::HashAggregate(exec) => fmt::Display::fmt(exec, f),
        }
    }
}

/// Renders a physical plan tree the same way `format` renders a logical one.
pub fn format_physical(plan: &PhysicalPlan, indent: usize) -> String {
    let mut out = String::new();
    format_into(plan, indent, &mut out);
    out
}

fn format_into(plan: &PhysicalPlan, indent: usize, out: &mut String) {
    for _ in 0..indent {
        out.push('\t');
    }
    out.push_str(&plan.to_string());
    out.push('\n');
    for child in plan.children() {
        format_into(child, indent + 1, out);
    }
}
