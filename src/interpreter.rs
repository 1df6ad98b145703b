// ABOUTME: Embedding surface - one persistent evaluator fed whole source strings

use crate::env::Environment;
use crate::error::{EofError, Error, ReadError};
use crate::eval::eval;
use crate::reader::Reader;
use crate::token::new_token_queue;
use crate::tokenizer::tokenize_into;
use crate::value::Value;
use std::rc::Rc;

/// A host constructs one `Interpreter` and submits source strings against a
/// persistent global environment; definitions survive between submissions.
pub struct Interpreter {
    env: Rc<Environment>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: Environment::global(),
        }
    }

    pub fn env(&self) -> &Rc<Environment> {
        &self.env
    }

    /// Evaluate every top-level form in the source and return the final
    /// value, or the first error.
    pub fn eval_source_value(&self, source: &str) -> Result<Value, Error> {
        let queue = new_token_queue();
        for line in source.lines() {
            tokenize_into(line, &queue)?;
        }

        let mut reader = Reader::new(queue);
        let mut last = None;
        loop {
            match reader.read() {
                Ok(expr) => last = Some(eval(&expr, &self.env)?),
                Err(ReadError::Eof(_)) => break,
                Err(ReadError::Syntax(e)) => return Err(e.into()),
            }
        }
        last.ok_or_else(|| EofError.into())
    }

    /// Evaluate the source and return the printed form of its final value,
    /// using the REPL quote-prefix convention.
    pub fn eval_source(&self, source: &str) -> Result<String, Error> {
        Ok(self.eval_source_value(source)?.to_repl_string())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
