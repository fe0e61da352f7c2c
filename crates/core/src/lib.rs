//! Quiver Core - Core types for the Quiver columnar query engine.
//!
//! This crate provides the foundational types shared by the planner and the
//! executors:
//!
//! - `DataType`: Supported element kinds (Boolean, Int8/16/32/64, Float32/64, String)
//! - `Value`: A single dynamically typed element
//! - `schema`: Field and schema definitions
//! - `vector`: The read-only column capability and its storages
//! - `RecordBatch`: A schema plus equally long column vectors
//! - `Error`: Error types for query operations
//!
//! # Example
//!
//! ```rust
//! use quiver_core::schema::{Field, Schema};
//! use quiver_core::vector::{ArrayVector, ColumnVector, VectorRef};
//! use quiver_core::{DataType, RecordBatch, Value};
//! use std::sync::Arc;
//!
//! let schema = Arc::new(Schema::new(vec![
//!     Field::new("id", DataType::Int64, false),
//!     Field::new("name", DataType::String, true),
//! ]));
//!
//! let columns: Vec<VectorRef> = vec![
//!     Arc::new(ArrayVector::from(vec![1i64, 2])),
//!     Arc::new(ArrayVector::from(vec!["Alice", "Bob"])),
//! ];
//! let batch = RecordBatch::try_new(schema, columns).unwrap();
//!
//! assert_eq!(batch.row_count(), 2);
//! assert_eq!(batch.column(1).unwrap().value_at(0).unwrap(), Value::from("Alice"));
//! ```

#![no_std]

extern crate alloc;

mod batch;
mod error;
pub mod schema;
mod types;
mod value;
pub mod vector;

pub use batch::RecordBatch;
pub use error::{Error, Result};
pub use types::DataType;
pub use value::Value;
