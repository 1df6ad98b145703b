//! Error raising and process exit: error, exit

use super::{check_args, define_builtin, expect_number};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

/// Raises a LispError carrying the printed form of the argument.
pub fn builtin_error(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("error", args, 1, 1)?;
    Err(LispError::Custom(args[0].to_string()))
}

/// Terminates the process, with an optional numeric exit code.
pub fn builtin_exit(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("exit", args, 0, 1)?;
    let code = if args.is_empty() {
        0
    } else {
        expect_number("exit", args, 0)? as i32
    };
    std::process::exit(code);
}

/// Register the control builtins in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "error", builtin_error);
    define_builtin(env, "exit", builtin_exit);
}
