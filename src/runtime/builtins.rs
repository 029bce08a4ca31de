//! Native procedures and the process-wide initial environment

use lazy_static::lazy_static;

use crate::error::{Error, Result};
use crate::runtime::value::{Symbol, Value};
use crate::runtime::Environment;

lazy_static! {
    // Constructed once at startup, never mutated afterward
    static ref INITIAL_ENV: Environment = Environment::with_bindings([
        native("+", |a, b| match (a, b) {
            (Value::Int(x), Value::Int(y)) => int_arith("+", x.checked_add(*y)),
            _ => Ok(Value::Float(as_number("+", a)? + as_number("+", b)?)),
        }),
        native("-", |a, b| match (a, b) {
            (Value::Int(x), Value::Int(y)) => int_arith("-", x.checked_sub(*y)),
            _ => Ok(Value::Float(as_number("-", a)? - as_number("-", b)?)),
        }),
        native("*", |a, b| match (a, b) {
            (Value::Int(x), Value::Int(y)) => int_arith("*", x.checked_mul(*y)),
            _ => Ok(Value::Float(as_number("*", a)? * as_number("*", b)?)),
        }),
        native("/", |a, b| {
            let dividend = as_number("/", a)?;
            let divisor = as_number("/", b)?;
            if divisor == 0.0 {
                return Err(Error::host("/", "division by zero"));
            }
            // Always a floating-point quotient, even for two ints
            Ok(Value::Float(dividend / divisor))
        }),
        native("<", |a, b| {
            Ok(Value::Bool(as_number("<", a)? < as_number("<", b)?))
        }),
        native(">", |a, b| {
            Ok(Value::Bool(as_number(">", a)? > as_number(">", b)?))
        }),
    ]);
}

/// Returns the frozen base environment
///
/// Binds `+ - * /` to strictly binary arithmetic (division yields a float
/// quotient) and `< >` to strictly binary numeric comparisons. The
/// returned handle shares the single process-wide instance.
pub fn initial_env() -> Environment {
    INITIAL_ENV.clone()
}

/// Wraps a strictly binary host operation as an environment binding
fn native(
    name: &'static str,
    op: impl Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
) -> (Symbol, Value) {
    let value = Value::native(name, 2, move |args: &[Value]| match args {
        [a, b] => op(a, b),
        _ => Err(Error::host(
            name,
            format!("expected 2 arguments, got {}", args.len()),
        )),
    });
    (Symbol::new(name), value)
}

fn as_number(op: &str, value: &Value) -> Result<f64> {
    match value {
        Value::Int(n) => Ok(*n as f64),
        Value::Float(f) => Ok(*f),
        other => Err(Error::host(
            op,
            format!("expected a number, got {}", other.type_name()),
        )),
    }
}

fn int_arith(op: &str, result: Option<i64>) -> Result<Value> {
    result
        .map(Value::Int)
        .ok_or_else(|| Error::host(op, "integer overflow"))
}
