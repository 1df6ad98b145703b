// ABOUTME: Error types for the tokenizer, reader, and evaluator

use crate::value::Value;
use thiserror::Error;

// ===== Arity constant strings (shared by forms and builtins) =====
pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_AT_LEAST_TWO: &str = "at least 2";

/// Malformed source text, raised by the tokenizer and the reader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SyntaxError(pub String);

/// The token source ran dry at a token boundary. Normal at top level
/// (it is how the REPL exits), fatal in the middle of a form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[error("Unexpected end of input")]
pub struct EofError;

/// Semantic errors raised by the evaluator and the builtin library.
#[derive(Error, Debug, Clone)]
pub enum LispError {
    #[error("Unbound variable {0}")]
    UnboundVariable(String),

    #[error("Shouldn't evaluate empty list")]
    EmptyList,

    #[error("Malformed list {0}")]
    MalformedList(String),

    #[error("Not a procedure {0}")]
    NotAProcedure(String),

    #[error("Duplicate parameter name {0}")]
    DuplicateParameter(String),

    /// Arity error with procedure name, expected count/range, and actual count
    #[error("{name}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    Arity {
        name: String,
        expected: String, // "2", "1-2", "at least 1"
        actual: usize,
    },

    /// Type mismatch with procedure name, expected type, and the offending value
    #[error("{name}: expected {expected}, got {actual}")]
    Type {
        name: String,
        expected: &'static str,
        actual: String,
    },

    /// User-raised (error ...) and one-off form errors
    #[error("{0}")]
    Custom(String),
}

impl LispError {
    /// Create an arity error for a named procedure or form
    pub fn arity(name: &str, expected: impl Into<String>, actual: usize) -> Self {
        LispError::Arity {
            name: name.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a type mismatch error carrying the printed offending value
    pub fn type_mismatch(name: &str, expected: &'static str, actual: &Value) -> Self {
        LispError::Type {
            name: name.to_string(),
            expected,
            actual: actual.to_string(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        LispError::Custom(message.into())
    }
}

/// Anything `Reader::read` can fail with.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eof(#[from] EofError),
}

/// Any failure visible to a driver or an embedding host.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eof(#[from] EofError),
    #[error(transparent)]
    Lisp(#[from] LispError),
}

impl From<ReadError> for Error {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Syntax(e) => Error::Syntax(e),
            ReadError::Eof(e) => Error::Eof(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_singular() {
        let err = LispError::arity("car", ARITY_ONE, 2);
        assert_eq!(err.to_string(), "car: expected 1 argument, got 2");
    }

    #[test]
    fn test_arity_message_plural() {
        let err = LispError::arity("cons", ARITY_TWO, 1);
        assert_eq!(err.to_string(), "cons: expected 2 arguments, got 1");
    }

    #[test]
    fn test_type_message() {
        let err = LispError::type_mismatch("car", "pair", &Value::Number(42.0));
        assert_eq!(err.to_string(), "car: expected pair, got 42");
    }

    #[test]
    fn test_driver_error_from_read_error() {
        let err: Error = ReadError::Eof(EofError).into();
        assert!(matches!(err, Error::Eof(_)));

        let err: Error = ReadError::Syntax(SyntaxError("bad".into())).into();
        assert_eq!(err.to_string(), "bad");
    }
}
