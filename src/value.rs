// ABOUTME: Value types representing Mini-Lisp data structures and expressions

use crate::env::Environment;
use crate::error::LispError;
use std::fmt;
use std::rc::Rc;

/// Native procedure signature: argument vector plus the environment the
/// call was made in (needed by the higher-order and reflective builtins).
pub type BuiltinFn = fn(&[Value], &Rc<Environment>) -> Result<Value, LispError>;

/// A native procedure together with the name it was registered under.
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

/// An immutable cons cell. Shared behind `Rc` so that `eq?` can observe
/// pair identity.
#[derive(Debug)]
pub struct Pair {
    pub car: Value,
    pub cdr: Value,
}

/// A closure: parameter names, the proper list of body forms, and the
/// environment captured at creation.
#[derive(Debug)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Value,
    pub env: Rc<Environment>,
}

#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    String(Rc<String>),
    Symbol(String),
    Pair(Rc<Pair>),
    Builtin(Builtin),
    Lambda(Rc<Lambda>),
}

/// Integer rendering is used only for finite integral values inside the
/// exact i64 range; everything else falls back to the default f64 display.
const INTEGER_DISPLAY_BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(Rc::new(value.into()))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn cons(car: Value, cdr: Value) -> Self {
        Value::Pair(Rc::new(Pair { car, cdr }))
    }

    /// Build a proper list from a vector, right to left.
    pub fn from_vec(items: Vec<Value>) -> Self {
        let mut list = Value::Nil;
        for item in items.into_iter().rev() {
            list = Value::cons(item, list);
        }
        list
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Lambda(_))
    }

    /// Booleans, numbers, and strings evaluate to themselves. Nil does not:
    /// evaluating `()` is a runtime error.
    pub fn is_self_evaluating(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// Everything is true except `#f`. In particular `()` is true.
    pub fn is_true(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }

    /// A proper list: nil, or a pair chain terminating in nil.
    pub fn is_list(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Value::Nil => return true,
                Value::Pair(pair) => current = &pair.cdr,
                _ => return false,
            }
        }
    }

    pub fn symbol_name(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&Value, &Value)> {
        match self {
            Value::Pair(pair) => Some((&pair.car, &pair.cdr)),
            _ => None,
        }
    }

    /// Convert a proper list to a vector of its elements.
    pub fn to_vec(&self) -> Result<Vec<Value>, LispError> {
        let mut items = Vec::new();
        let mut current = self;
        loop {
            match current {
                Value::Nil => return Ok(items),
                Value::Pair(pair) => {
                    items.push(pair.car.clone());
                    current = &pair.cdr;
                }
                other => return Err(LispError::MalformedList(other.to_string())),
            }
        }
    }

    /// Printed form under the REPL convention: symbols, pairs, and nil get
    /// a leading quote so the output reads back as the same datum.
    pub fn to_repl_string(&self) -> String {
        match self {
            Value::Symbol(_) | Value::Pair(_) | Value::Nil => format!("'{}", self),
            _ => self.to_string(),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < INTEGER_DISPLAY_BOUND {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            _ => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "()"),
            Value::Boolean(b) => write!(f, "{}", if *b { "#t" } else { "#f" }),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => write_string(f, s),
            Value::Symbol(name) => write!(f, "{}", name),
            Value::Pair(pair) => {
                // Standard Scheme list printer: (a b c) / (a b . x)
                write!(f, "({}", pair.car)?;
                let mut cdr = &pair.cdr;
                while let Value::Pair(next) = cdr {
                    write!(f, " {}", next.car)?;
                    cdr = &next.cdr;
                }
                if cdr.is_nil() {
                    write!(f, ")")
                } else {
                    write!(f, " . {})", cdr)
                }
            }
            Value::Builtin(_) => write!(f, "#<procedure:builtin>"),
            Value::Lambda(_) => write!(f, "#<procedure>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: Vec<Value>) -> Value {
        Value::from_vec(items)
    }

    #[test]
    fn test_number_display() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Number(0.0).to_string(), "0");
        assert_eq!(Value::Number(-17.0).to_string(), "-17");
    }

    #[test]
    fn test_huge_number_display_uses_float_form() {
        // Integral but outside the exact i64 range
        let printed = Value::Number(1e20).to_string();
        assert!(printed.parse::<f64>().is_ok());
        assert_ne!(printed, i64::MAX.to_string());
    }

    #[test]
    fn test_bool_display() {
        assert_eq!(Value::Boolean(true).to_string(), "#t");
        assert_eq!(Value::Boolean(false).to_string(), "#f");
    }

    #[test]
    fn test_string_display_quotes_and_escapes() {
        assert_eq!(Value::string("hello").to_string(), "\"hello\"");
        assert_eq!(Value::string("a\"b\\c").to_string(), r#""a\"b\\c""#);
        assert_eq!(Value::string("line\nbreak").to_string(), r#""line\nbreak""#);
    }

    #[test]
    fn test_proper_list_display() {
        let v = list(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]);
        assert_eq!(v.to_string(), "(1 2 3)");
        assert_eq!(Value::Nil.to_string(), "()");
    }

    #[test]
    fn test_dotted_pair_display() {
        let v = Value::cons(Value::symbol("a"), Value::Number(1.0));
        assert_eq!(v.to_string(), "(a . 1)");

        let v = Value::cons(
            Value::symbol("a"),
            Value::cons(Value::symbol("b"), Value::symbol("c")),
        );
        assert_eq!(v.to_string(), "(a b . c)");
    }

    #[test]
    fn test_nested_list_display() {
        let inner = list(vec![Value::Number(2.0), Value::Number(3.0)]);
        let v = list(vec![Value::Number(1.0), inner, Value::Number(4.0)]);
        assert_eq!(v.to_string(), "(1 (2 3) 4)");
    }

    #[test]
    fn test_exactly_one_predicate_holds() {
        let samples = vec![
            Value::Nil,
            Value::Boolean(true),
            Value::Number(1.5),
            Value::string("s"),
            Value::symbol("s"),
            Value::cons(Value::Nil, Value::Nil),
        ];
        for v in samples {
            let count = [
                v.is_nil(),
                v.is_boolean(),
                v.is_number(),
                v.is_string(),
                v.is_symbol(),
                v.is_pair(),
                v.is_procedure(),
            ]
            .iter()
            .filter(|p| **p)
            .count();
            assert_eq!(count, 1, "predicates overlap for {}", v);
        }
    }

    #[test]
    fn test_nil_is_true_but_not_self_evaluating() {
        assert!(Value::Nil.is_true());
        assert!(!Value::Nil.is_self_evaluating());
        assert!(!Value::Boolean(false).is_true());
        assert!(Value::Number(0.0).is_true());
    }

    #[test]
    fn test_is_list() {
        assert!(Value::Nil.is_list());
        assert!(list(vec![Value::Number(1.0)]).is_list());
        assert!(!Value::cons(Value::Number(1.0), Value::Number(2.0)).is_list());
        assert!(!Value::Number(1.0).is_list());
    }

    #[test]
    fn test_to_vec_round_trip() {
        let items = vec![Value::Number(1.0), Value::symbol("x"), Value::Nil];
        let v = Value::from_vec(items.clone());
        let back = v.to_vec().unwrap();
        assert_eq!(back.len(), 3);
        assert_eq!(back[1].symbol_name(), Some("x"));
    }

    #[test]
    fn test_to_vec_rejects_improper_list() {
        let v = Value::cons(Value::Number(1.0), Value::Number(2.0));
        assert!(matches!(v.to_vec(), Err(LispError::MalformedList(_))));
    }

    #[test]
    fn test_repl_string_quotes_data() {
        assert_eq!(Value::symbol("b").to_repl_string(), "'b");
        assert_eq!(Value::Nil.to_repl_string(), "'()");
        assert_eq!(
            list(vec![Value::Number(1.0), Value::Number(2.0)]).to_repl_string(),
            "'(1 2)"
        );
        assert_eq!(Value::Number(3.0).to_repl_string(), "3");
        assert_eq!(Value::string("s").to_repl_string(), "\"s\"");
    }
}
