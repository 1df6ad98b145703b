//! Output operations: display, displayln, newline, print
//!
//! `display` writes strings without their quotes and every other value in
//! its printed form, with no separators and no trailing newline. `print`
//! writes each argument on its own line using the REPL quote convention.
//!
//! All of them return nil.

use super::{check_args, define_builtin};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_display(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    for arg in args {
        match arg {
            Value::String(s) => print!("{}", s),
            other => print!("{}", other),
        }
    }
    Ok(Value::Nil)
}

pub fn builtin_displayln(args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    let result = builtin_display(args, env)?;
    println!();
    Ok(result)
}

pub fn builtin_newline(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("newline", args, 0, 0)?;
    println!();
    Ok(Value::Nil)
}

pub fn builtin_print(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    for arg in args {
        println!("{}", arg.to_repl_string());
    }
    Ok(Value::Nil)
}

/// Register all console builtins in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "display", builtin_display);
    define_builtin(env, "displayln", builtin_displayln);
    define_builtin(env, "newline", builtin_newline);
    define_builtin(env, "print", builtin_print);
}
