//! Negation and equality: not, eq?, equal?
//!
//! `eq?` compares atoms by value (numbers, booleans, symbols, nil) and
//! everything else by identity: strings and pairs by shared cell, lambdas by
//! shared closure, builtins by function pointer.
//!
//! `equal?` is the recursive structural version: strings by bytes, pairs by
//! car/cdr recursion, and `eq?` for the rest. It terminates only on acyclic
//! input.

use super::{check_args, define_builtin};
use crate::env::Environment;
use crate::error::LispError;
use crate::value::Value;
use std::rc::Rc;

pub(crate) fn values_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Symbol(x), Value::Symbol(y)) => x == y,
        (Value::String(x), Value::String(y)) => Rc::ptr_eq(x, y),
        (Value::Pair(x), Value::Pair(y)) => Rc::ptr_eq(x, y),
        (Value::Lambda(x), Value::Lambda(y)) => Rc::ptr_eq(x, y),
        (Value::Builtin(x), Value::Builtin(y)) => x.func as usize == y.func as usize,
        _ => false,
    }
}

pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Pair(x), Value::Pair(y)) => {
            values_equal(&x.car, &y.car) && values_equal(&x.cdr, &y.cdr)
        }
        _ => values_eq(a, b),
    }
}

/// Logical negation: #t only for #f.
pub fn builtin_not(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("not", args, 1, 1)?;
    Ok(Value::Boolean(!args[0].is_true()))
}

pub fn builtin_eq_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("eq?", args, 2, 2)?;
    Ok(Value::Boolean(values_eq(&args[0], &args[1])))
}

pub fn builtin_equal_q(args: &[Value], _env: &Rc<Environment>) -> Result<Value, LispError> {
    check_args("equal?", args, 2, 2)?;
    Ok(Value::Boolean(values_equal(&args[0], &args[1])))
}

/// Register the negation and equality builtins in the environment
pub fn register(env: &Rc<Environment>) {
    define_builtin(env, "not", builtin_not);
    define_builtin(env, "eq?", builtin_eq_q);
    define_builtin(env, "equal?", builtin_equal_q);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<Environment> {
        Environment::new()
    }

    #[test]
    fn test_not() {
        let e = env();
        assert!(matches!(
            builtin_not(&[Value::Boolean(false)], &e),
            Ok(Value::Boolean(true))
        ));
        // Nil and zero are true, so their negation is false
        assert!(matches!(builtin_not(&[Value::Nil], &e), Ok(Value::Boolean(false))));
        assert!(matches!(
            builtin_not(&[Value::Number(0.0)], &e),
            Ok(Value::Boolean(false))
        ));
    }

    #[test]
    fn test_eq_atoms_by_value() {
        assert!(values_eq(&Value::Number(2.0), &Value::Number(2.0)));
        assert!(values_eq(&Value::symbol("a"), &Value::symbol("a")));
        assert!(values_eq(&Value::Boolean(true), &Value::Boolean(true)));
        assert!(values_eq(&Value::Nil, &Value::Nil));
        assert!(!values_eq(&Value::symbol("a"), &Value::symbol("b")));
        assert!(!values_eq(&Value::Nil, &Value::Boolean(false)));
    }

    #[test]
    fn test_eq_pairs_by_identity() {
        let pair = Value::cons(Value::Number(1.0), Value::Nil);
        assert!(values_eq(&pair, &pair.clone()));

        let other = Value::cons(Value::Number(1.0), Value::Nil);
        assert!(!values_eq(&pair, &other));
        // Structurally they are still equal
        assert!(values_equal(&pair, &other));
    }

    #[test]
    fn test_eq_strings_by_identity() {
        let s = Value::string("abc");
        assert!(values_eq(&s, &s.clone()));
        assert!(!values_eq(&s, &Value::string("abc")));
        assert!(values_equal(&s, &Value::string("abc")));
    }

    #[test]
    fn test_equal_recursive_structure() {
        let a = Value::from_vec(vec![
            Value::Number(1.0),
            Value::from_vec(vec![Value::Number(2.0), Value::Number(3.0)]),
        ]);
        let b = Value::cons(
            Value::Number(1.0),
            Value::cons(
                Value::from_vec(vec![Value::Number(2.0), Value::Number(3.0)]),
                Value::Nil,
            ),
        );
        assert!(values_equal(&a, &b));
        assert!(!values_equal(&a, &Value::from_vec(vec![Value::Number(1.0)])));
    }

    #[test]
    fn test_equal_is_reflexive_and_symmetric() {
        let values = [
            Value::Nil,
            Value::Number(1.5),
            Value::string("s"),
            Value::symbol("s"),
            Value::cons(Value::Number(1.0), Value::Number(2.0)),
        ];
        for v in &values {
            assert!(values_equal(v, v));
        }
        for a in &values {
            for b in &values {
                assert_eq!(values_equal(a, b), values_equal(b, a));
            }
        }
    }

    #[test]
    fn test_equal_distinguishes_variants() {
        assert!(!values_equal(&Value::Number(0.0), &Value::Boolean(false)));
        assert!(!values_equal(&Value::string("a"), &Value::symbol("a")));
        assert!(!values_equal(&Value::Nil, &Value::from_vec(vec![Value::Nil])));
    }

    #[test]
    fn test_builtins_compare_by_function() {
        let e = Environment::global();
        let plus_a = e.get("+").unwrap();
        let plus_b = e.get("+").unwrap();
        let minus = e.get("-").unwrap();
        assert!(values_eq(&plus_a, &plus_b));
        assert!(!values_eq(&plus_a, &minus));
    }
}
