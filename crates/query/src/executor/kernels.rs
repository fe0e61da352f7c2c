//! Element-wise kernels for binary expressions.

use crate::ast::BinaryOp;
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cmp::Ordering;
use quiver_core::vector::{build_vector, ArrayVector, ColumnVector, VectorRef};
use quiver_core::{DataType, Error, Result, Value};

/// Evaluates `left op right` element-wise.
///
/// Both operands must have the same length and the same element type.
pub fn evaluate_binary(
    op: BinaryOp,
    left: &dyn ColumnVector,
    right: &dyn ColumnVector,
) -> Result<VectorRef> {
    if left.len() != right.len() {
        return Err(Error::length_mismatch(left.len(), right.len()));
    }
    if left.data_type() != right.data_type() {
        return Err(Error::type_mismatch(left.data_type(), right.data_type()));
    }

    let out = match op {
        BinaryOp::Eq => compare(left, right, |o| o == Some(Ordering::Equal))?,
        BinaryOp::Neq => compare(left, right, |o| o != Some(Ordering::Equal))?,
        BinaryOp::Gt => compare(left, right, |o| o == Some(Ordering::Greater))?,
        BinaryOp::GtEq => {
            compare(left, right, |o| matches!(o, Some(Ordering::Greater | Ordering::Equal)))?
        }
        BinaryOp::Lt => compare(left, right, |o| o == Some(Ordering::Less))?,
        BinaryOp::LtEq => {
            compare(left, right, |o| matches!(o, Some(Ordering::Less | Ordering::Equal)))?
        }
        BinaryOp::And => logical(op, left, right, |a, b| a && b)?,
        BinaryOp::Or => logical(op, left, right, |a, b| a || b)?,
        BinaryOp::Add
        | BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulus => arithmetic(op, left, right)?,
    };
    Ok(Arc::new(out))
}

fn compare<F>(left: &dyn ColumnVector, right: &dyn ColumnVector, holds: F) -> Result<ArrayVector>
where
    F: Fn(Option<Ordering>) -> bool,
{
    let mut out = Vec::with_capacity(left.len());
    for i in 0..left.len() {
        let ordering = left.value_at(i)?.compare(&right.value_at(i)?)?;
        out.push(holds(ordering));
    }
    Ok(ArrayVector::Boolean(out))
}

fn logical<F>(
    op: BinaryOp,
    left: &dyn ColumnVector,
    right: &dyn ColumnVector,
    apply: F,
) -> Result<ArrayVector>
where
    F: Fn(bool, bool) -> bool,
{
    if left.data_type() != DataType::Boolean {
        return Err(Error::unsupported(format!(
            "{} is not defined for {}",
            op.symbol(),
            left.data_type()
        )));
    }

    let mut out = Vec::with_capacity(left.len());
    for i in 0..left.len() {
        let a = left.value_at(i)?.as_bool().unwrap_or(false);
        let b = right.value_at(i)?.as_bool().unwrap_or(false);
        out.push(apply(a, b));
    }
    Ok(ArrayVector::Boolean(out))
}

fn arithmetic(op: BinaryOp, left: &dyn ColumnVector, right: &dyn ColumnVector) -> Result<ArrayVector> {
    let data_type = left.data_type();
    if !data_type.is_numeric() {
        return Err(Error::unsupported(format!(
            "{} is not defined for {}",
            op.symbol(),
            data_type
        )));
    }

    let values = (0..left.len())
        .map(|i| arithmetic_value(op, &left.value_at(i)?, &right.value_at(i)?))
        .collect::<Result<Vec<_>>>()?;
    build_vector(data_type, values.len(), values)
}

macro_rules! integer_op {
    ($op:expr, $a:expr, $b:expr, $variant:ident) => {{
        let (a, b) = ($a, $b);
        match $op {
            BinaryOp::Add => Ok(Value::$variant(a.wrapping_add(b))),
            BinaryOp::Subtract => Ok(Value::$variant(a.wrapping_sub(b))),
            BinaryOp::Multiply => Ok(Value::$variant(a.wrapping_mul(b))),
            BinaryOp::Divide | BinaryOp::Modulus if b == 0 => Err(Error::DivisionByZero),
            BinaryOp::Divide => Ok(Value::$variant(a.wrapping_div(b))),
            BinaryOp::Modulus => Ok(Value::$variant(a.wrapping_rem(b))),
            other => Err(not_arithmetic(other)),
        }
    }};
}

macro_rules! float_op {
    ($op:expr, $a:expr, $b:expr, $variant:ident) => {{
        let (a, b) = ($a, $b);
        match $op {
            BinaryOp::Add => Ok(Value::$variant(a + b)),
            BinaryOp::Subtract => Ok(Value::$variant(a - b)),
            BinaryOp::Multiply => Ok(Value::$variant(a * b)),
            BinaryOp::Divide => Ok(Value::$variant(a / b)),
            BinaryOp::Modulus => Ok(Value::$variant(a % b)),
            other => Err(not_arithmetic(other)),
        }
    }};
}

fn not_arithmetic(op: BinaryOp) -> Error {
    Error::unsupported(format!("{} is not an arithmetic operator", op.symbol()))
}

/// Applies an arithmetic operator to two values of the same numeric type.
///
/// Integer arithmetic wraps on overflow; integer division or modulus by zero
/// fails. Floating point follows IEEE 754.
pub fn arithmetic_value(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Int8(a), Value::Int8(b)) => integer_op!(op, *a, *b, Int8),
        (Value::Int16(a), Value::Int16(b)) => integer_op!(op, *a, *b, Int16),
        (Value::Int32(a), Value::Int32(b)) => integer_op!(op, *a, *b, Int32),
        (Value::Int64(a), Value::Int64(b)) => integer_op!(op, *a, *b, Int64),
        (Value::Float32(a), Value::Float32(b)) => float_op!(op, *a, *b, Float32),
        (Value::Float64(a), Value::Float64(b)) => float_op!(op, *a, *b, Float64),
        (a, b) if a.data_type() != b.data_type() => {
            Err(Error::type_mismatch(a.data_type(), b.data_type()))
        }
        (a, _) => Err(Error::unsupported(format!(
            "{} is not defined for {}",
            op.symbol(),
            a.data_type()
        ))),
    }
}
