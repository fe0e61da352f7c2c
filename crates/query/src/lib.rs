//! Quiver Query - Query planning and execution for the Quiver columnar engine.
//!
//! This crate provides:
//!
//! - `ast`: Logical expressions and their builders
//! - `planner`: Logical and physical query plans, plan formatting, and the
//!   logical-to-physical query planner
//! - `executor`: Physical expressions, kernels, accumulators and operators
//!   (scan, projection, selection, hash aggregate)
//! - `datasource`: The data source capability and an in-memory source
//! - `dataframe`: A fluent plan builder
//! - `context`: Table registry and query execution entry point
//!
//! # Example
//!
//! ```rust
//! use quiver_core::schema::{Field, Schema};
//! use quiver_core::{DataType, Value};
//! use quiver_query::ast::{col, lit, max, LogicalExpr};
//! use quiver_query::context::ExecutionContext;
//!
//! let mut ctx = ExecutionContext::new();
//! let schema = Schema::new(vec![
//!     Field::new("state", DataType::String, false),
//!     Field::new("salary", DataType::Int64, false),
//! ]);
//! let rows = vec![
//!     vec![Value::from("CO"), Value::Int64(100)],
//!     vec![Value::from("OH"), Value::Int64(300)],
//!     vec![Value::from("CO"), Value::Int64(200)],
//! ];
//! ctx.register_table("employee", schema, &rows).unwrap();
//!
//! let df = ctx
//!     .table("employee")
//!     .unwrap()
//!     .filter(LogicalExpr::eq(col("state"), lit("CO")))
//!     .aggregate(vec![col("state")], vec![max(col("salary"))]);
//!
//! let batches = ctx.execute(&df).unwrap();
//! assert_eq!(batches[0].row(0).unwrap(), vec![Value::from("CO"), Value::Int64(200)]);
//! ```

#![no_std]

extern crate alloc;

pub mod ast;
pub mod context;
pub mod dataframe;
pub mod datasource;
pub mod executor;
pub mod planner;
