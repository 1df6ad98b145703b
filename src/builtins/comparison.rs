//! Numeric comparisons: =, <, >, <=, >=
//!
//! Each takes exactly two numeric arguments and returns a boolean.

use super::{check_args, define_builtin, expect_number};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

fn compare(
    name: &'static str,
    args: &[Value],
    test: fn(f64, f64) -> bool,
) -> Result<Value, LispError> {
    check_args(name, args, 2, 2)?;
    let lhs = expect_number(name, args, 0)?;
    let rhs = expect_number(name, args, 1)?;
    Ok(Value::Boolean(test(lhs, rhs)))
}

pub fn builtin_num_eq(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    compare("=", args, |a, b| a == b)
}

pub fn builtin_lt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    compare("<", args, |a, b| a < b)
}

pub fn builtin_gt(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    compare(">", args, |a, b| a > b)
}

pub fn builtin_le(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    compare("<=", args, |a, b| a <= b)
}

pub fn builtin_ge(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    compare(">=", args, |a, b| a >= b)
}

/// Register all comparison builtins in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "=", builtin_num_eq);
    define_builtin(env, "<", builtin_lt);
    define_builtin(env, ">", builtin_gt);
    define_builtin(env, "<=", builtin_le);
    define_builtin(env, ">=", builtin_ge);
}
