//! Higher-order and reflective procedures: map, filter, reduce, eval, apply
//!
//! These are the builtins that call back into the evaluator. `eval` runs its
//! argument in the global environment; `apply` passes the elements of its
//! argument list through without re-evaluating them.

use super::{check_args, define_builtin};
use crate::env::Environment;
use crate::error::LispError;
use crate::eval;
use crate::value::Value;
use std::rc::Rc;

fn expect_procedure(name: &'static str, value: &Value) -> Result<(), LispError> {
    if value.is_procedure() {
        Ok(())
    } else {
        Err(LispError::type_mismatch(name, "procedure", value))
    }
}

fn expect_list(name: &'static str, value: &Value) -> Result<Vec<Value>, LispError> {
    if !value.is_list() {
        return Err(LispError::type_mismatch(name, "list", value));
    }
    value.to_vec()
}

/// Applies a procedure to each element, collecting the results.
///
/// ```lisp
/// (map (lambda (x) (* x x)) '(1 2 3)) => (1 4 9)
/// ```
pub fn builtin_map(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("map", args, 2, 2)?;
    expect_procedure("map", &args[0])?;
    let items = expect_list("map", &args[1])?;

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        results.push(eval::apply(&args[0], &[item], env)?);
    }
    Ok(Value::from_vec(results))
}

/// Keeps the elements the predicate accepts, preserving order.
pub fn builtin_filter(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("filter", args, 2, 2)?;
    expect_procedure("filter", &args[0])?;
    let items = expect_list("filter", &args[1])?;

    let mut results = Vec::new();
    for item in items {
        if eval::apply(&args[0], &[item.clone()], env)?.is_true() {
            results.push(item);
        }
    }
    Ok(Value::from_vec(results))
}

/// Left fold over a non-empty list, seeded with its first element.
///
/// ```lisp
/// (reduce + '(1 2 3 4)) => 10
/// ```
pub fn builtin_reduce(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("reduce", args, 2, 2)?;
    expect_procedure("reduce", &args[0])?;
    let items = expect_list("reduce", &args[1])?;

    let mut iter = items.into_iter();
    let mut acc = iter
        .next()
        .ok_or_else(|| LispError::custom("reduce: list must have at least 1 element"))?;
    for item in iter {
        acc = eval::apply(&args[0], &[acc, item], env)?;
    }
    Ok(acc)
}

/// Evaluates an expression in the global environment.
pub fn builtin_eval(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("eval", args, 1, 1)?;
    eval::eval(&args[0], &env.root())
}

/// Applies a procedure to the elements of a list, as-is.
pub fn builtin_apply(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("apply", args, 2, 2)?;
    let call_args = expect_list("apply", &args[1])?;
    eval::apply(&args[0], &call_args, env)
}

/// Register the higher-order and reflective builtins in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "map", builtin_map);
    define_builtin(env, "filter", builtin_filter);
    define_builtin(env, "reduce", builtin_reduce);
    define_builtin(env, "eval", builtin_eval);
    define_builtin(env, "apply", builtin_apply);
}
