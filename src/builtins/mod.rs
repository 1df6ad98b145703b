//! # Built-in Procedures
//!
//! The native procedure library, organized by category:
//!
//! - **[types]** (8): procedure?, list?, boolean?, number?, symbol?, string?, null?, pair? - Type predicates
//! - **[arithmetic]** (13): +, -, *, /, expt, abs, quotient, modulo, remainder, integer?, even?, odd?, zero? - Numeric operations
//! - **[comparison]** (5): =, <, >, <=, >= - Numeric comparisons
//! - **[logic]** (3): not, eq?, equal? - Negation and equality
//! - **[lists]** (6): cons, car, cdr, list, length, append - Pair and list manipulation
//! - **[console]** (4): display, displayln, newline, print - Output
//! - **[control]** (2): error, exit - Error raising and process exit
//! - **[functional]** (5): map, filter, reduce, eval, apply - Higher-order and reflective
//!
//! Each category is a sub-module with a `register` function installing its
//! bindings into an environment frame.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, BuiltinFn, Value};
use std::rc::Rc;

pub mod arithmetic;
pub mod comparison;
pub mod console;
pub mod control;
pub mod functional;
pub mod lists;
pub mod logic;
pub mod types;

/// Every builtin name, exported for the REPL highlighter.
pub const BUILTIN_NAMES: &[&str] = &[
    "procedure?",
    "list?",
    "boolean?",
    "number?",
    "symbol?",
    "string?",
    "null?",
    "pair?",
    "+",
    "-",
    "*",
    "/",
    "expt",
    "abs",
    "quotient",
    "modulo",
    "remainder",
    "integer?",
    "even?",
    "odd?",
    "zero?",
    "=",
    "<",
    ">",
    "<=",
    ">=",
    "not",
    "eq?",
    "equal?",
    "cons",
    "car",
    "cdr",
    "list",
    "length",
    "append",
    "display",
    "displayln",
    "newline",
    "print",
    "error",
    "exit",
    "map",
    "filter",
    "reduce",
    "eval",
    "apply",
];

/// Register the whole builtin table in the environment.
pub fn register_builtins(env: &Rc<Environment>) {
    types::register(env);
    arithmetic::register(env);
    comparison::register(env);
    logic::register(env);
    lists::register(env);
    console::register(env);
    control::register(env);
    functional::register(env);
}

pub(crate) fn define_builtin(env: &Rc<Environment>, name: &'static str, func: BuiltinFn) {
    env.define(name, Value::Builtin(Builtin { name, func }));
}

/// Enforce an argument count range for a builtin.
pub(crate) fn check_args(
    name: &'static str,
    args: &[Value],
    min: usize,
    max: usize,
) -> Result<(), LispError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else if max == usize::MAX {
            format!("at least {}", min)
        } else {
            format!("{}-{}", min, max)
        };
        return Err(LispError::arity(name, expected, args.len()));
    }
    Ok(())
}

/// Extract a numeric argument or fail with a typed error.
pub(crate) fn expect_number(
    name: &'static str,
    args: &[Value],
    index: usize,
) -> Result<f64, LispError> {
    args[index]
        .as_number()
        .ok_or_else(|| LispError::type_mismatch(name, "number", &args[index]))
}
