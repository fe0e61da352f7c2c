//! Aggregate accumulators.

use crate::ast::BinaryOp;
use crate::executor::kernels::arithmetic_value;
use alloc::format;
use core::cmp::Ordering;
use core::fmt;
use quiver_core::{DataType, Error, Result, Value};

/// Folds the values of one group into a final aggregate value.
pub trait Accumulator: fmt::Debug {
    /// Folds one value into the running state.
    fn accumulate(&mut self, value: Value) -> Result<()>;

    /// Returns the aggregate of everything accumulated so far.
    fn final_value(&self) -> Result<Value>;
}

fn check_numeric(func: &str, value: &Value) -> Result<()> {
    if value.data_type().is_numeric() {
        Ok(())
    } else {
        Err(Error::unsupported(format!(
            "{} is not supported for {}",
            func,
            value.data_type()
        )))
    }
}

fn check_same_type(func: &str, current: DataType, value: &Value) -> Result<()> {
    if current == value.data_type() {
        Ok(())
    } else {
        Err(Error::unsupported(format!(
            "{} cannot mix {} and {}",
            func,
            current,
            value.data_type()
        )))
    }
}

fn empty_input(func: &str) -> Error {
    Error::unsupported(format!("{} over no values", func))
}

/// Keeps `value` when it orders as `wanted` relative to the current state.
fn fold_extreme(
    func: &str,
    state: &mut Option<Value>,
    value: Value,
    wanted: Ordering,
) -> Result<()> {
    check_numeric(func, &value)?;
    match state {
        None => *state = Some(value),
        Some(current) => {
            check_same_type(func, current.data_type(), &value)?;
            if value.compare(current)? == Some(wanted) {
                *current = value;
            }
        }
    }
    Ok(())
}

/// Tracks the largest value seen. The first value seeds the state.
#[derive(Debug, Default)]
pub struct MaxAccumulator {
    value: Option<Value>,
}

impl MaxAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for MaxAccumulator {
    fn accumulate(&mut self, value: Value) -> Result<()> {
        fold_extreme("MAX", &mut self.value, value, Ordering::Greater)
    }

    fn final_value(&self) -> Result<Value> {
        self.value.clone().ok_or_else(|| empty_input("MAX"))
    }
}

/// Tracks the smallest value seen. The first value seeds the state.
#[derive(Debug, Default)]
pub struct MinAccumulator {
    value: Option<Value>,
}

impl MinAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for MinAccumulator {
    fn accumulate(&mut self, value: Value) -> Result<()> {
        fold_extreme("MIN", &mut self.value, value, Ordering::Less)
    }

    fn final_value(&self) -> Result<Value> {
        self.value.clone().ok_or_else(|| empty_input("MIN"))
    }
}

/// Sums values in their own type.
#[derive(Debug, Default)]
pub struct SumAccumulator {
    sum: Option<Value>,
}

impl SumAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for SumAccumulator {
    fn accumulate(&mut self, value: Value) -> Result<()> {
        check_numeric("SUM", &value)?;
        self.sum = Some(match self.sum.take() {
            None => value,
            Some(current) => {
                check_same_type("SUM", current.data_type(), &value)?;
                arithmetic_value(BinaryOp::Add, &current, &value)?
            }
        });
        Ok(())
    }

    fn final_value(&self) -> Result<Value> {
        self.sum.clone().ok_or_else(|| empty_input("SUM"))
    }
}

/// Averages values as `Float64`.
#[derive(Debug, Default)]
pub struct AvgAccumulator {
    data_type: Option<DataType>,
    sum: f64,
    count: u64,
}

impl AvgAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for AvgAccumulator {
    fn accumulate(&mut self, value: Value) -> Result<()> {
        check_numeric("AVG", &value)?;
        match self.data_type {
            Some(dt) => check_same_type("AVG", dt, &value)?,
            None => self.data_type = Some(value.data_type()),
        }
        self.sum += value.to_f64().unwrap_or(0.0);
        self.count += 1;
        Ok(())
    }

    fn final_value(&self) -> Result<Value> {
        if self.count == 0 {
            return Err(empty_input("AVG"));
        }
        Ok(Value::Float64(self.sum / self.count as f64))
    }
}

/// Counts values of any type.
#[derive(Debug, Default)]
pub struct CountAccumulator {
    count: i64,
}

impl CountAccumulator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accumulator for CountAccumulator {
    fn accumulate(&mut self, _value: Value) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn final_value(&self) -> Result<Value> {
        Ok(Value::Int64(self.count))
    }
}
