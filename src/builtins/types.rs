//! Type predicates: procedure?, list?, boolean?, number?, symbol?, string?, null?, pair?
//!
//! Each takes exactly one argument and returns a boolean. `list?` is the
//! proper-list test: it is true for `()` and for pair chains ending in `()`.

use super::{check_args, define_builtin};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

pub fn builtin_procedure_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("procedure?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_procedure()))
}

pub fn builtin_list_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("list?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_list()))
}

pub fn builtin_boolean_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("boolean?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_boolean()))
}

pub fn builtin_number_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("number?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_number()))
}

pub fn builtin_symbol_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("symbol?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_symbol()))
}

pub fn builtin_string_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("string?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_string()))
}

pub fn builtin_null_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("null?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_nil()))
}

pub fn builtin_pair_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("pair?", args, 1, 1)?;
    Ok(Value::Boolean(args[0].is_pair()))
}

/// Register all type predicates in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "procedure?", builtin_procedure_q);
    define_builtin(env, "list?", builtin_list_q);
    define_builtin(env, "boolean?", builtin_boolean_q);
    define_builtin(env, "number?", builtin_number_q);
    define_builtin(env, "symbol?", builtin_symbol_q);
    define_builtin(env, "string?", builtin_string_q);
    define_builtin(env, "null?", builtin_null_q);
    define_builtin(env, "pair?", builtin_pair_q);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_null_vs_pair_vs_list() {
        let e = env();
        let nil = [Value::Nil];
        let pair = [Value::cons(Value::Number(1.0), Value::Number(2.0))];
        let list = [Value::from_vec(vec![Value::Number(1.0)])];

        assert!(matches!(builtin_null_q(&nil, &e), Ok(Value::Boolean(true))));
        assert!(matches!(builtin_null_q(&pair, &e), Ok(Value::Boolean(false))));

        assert!(matches!(builtin_pair_q(&nil, &e), Ok(Value::Boolean(false))));
        assert!(matches!(builtin_pair_q(&pair, &e), Ok(Value::Boolean(true))));

        // An improper chain is a pair but not a list; nil is a list but not a pair
        assert!(matches!(builtin_list_q(&nil, &e), Ok(Value::Boolean(true))));
        assert!(matches!(builtin_list_q(&pair, &e), Ok(Value::Boolean(false))));
        assert!(matches!(builtin_list_q(&list, &e), Ok(Value::Boolean(true))));
    }

    #[test]
    fn test_atom_predicates() {
        let e = env();
        assert!(matches!(
            builtin_boolean_q(&[Value::Boolean(false)], &e),
            Ok(Value::Boolean(true))
        ));
        assert!(matches!(
            builtin_number_q(&[Value::Number(1.0)], &e),
            Ok(Value::Boolean(true))
        ));
        assert!(matches!(
            builtin_symbol_q(&[Value::symbol("x")], &e),
            Ok(Value::Boolean(true))
        ));
        assert!(matches!(
            builtin_string_q(&[Value::string("s")], &e),
            Ok(Value::Boolean(true))
        ));
        // Nil is its own kind, not a boolean
        assert!(matches!(
            builtin_boolean_q(&[Value::Nil], &e),
            Ok(Value::Boolean(false))
        ));
    }

    #[test]
    fn test_procedure_predicate() {
        let e = Environment::global();
        let plus = e.get("+").unwrap();
        assert!(matches!(
            builtin_procedure_q(&[plus], &e),
            Ok(Value::Boolean(true))
        ));
        assert!(matches!(
            builtin_procedure_q(&[Value::Number(1.0)], &e),
            Ok(Value::Boolean(false))
        ));
    }

    #[test]
    fn test_arity_enforced() {
        let e = env();
        assert!(builtin_null_q(&[], &e).is_err());
        assert!(builtin_pair_q(&[Value::Nil, Value::Nil], &e).is_err());
    }
}
