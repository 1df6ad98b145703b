// ABOUTME: Reader turning the token queue into values, one top-level form per call

use crate::error::{EofError, ReadError, SyntaxError};
use crate::token::{Token, TokenQueue};
use crate::value::Value;

/// Called when the queue runs dry. The flag is true only while no token of
/// the current form has been consumed; a REPL uses it to choose between the
/// top-level and continuation prompts. Returning false signals true
/// end-of-input and surfaces as `EofError`.
pub type EofHandler<'a> = Box<dyn FnMut(bool) -> bool + 'a>;

pub struct Reader<'a> {
    tokens: TokenQueue,
    on_eof: Option<EofHandler<'a>>,
    top_level: bool,
}

impl<'a> Reader<'a> {
    /// A reader over an already-filled queue; an empty queue reads as EOF.
    pub fn new(tokens: TokenQueue) -> Self {
        Reader {
            tokens,
            on_eof: None,
            top_level: true,
        }
    }

    /// A reader that asks the handler for more tokens whenever the queue
    /// runs dry.
    pub fn with_eof_handler(tokens: TokenQueue, handler: impl FnMut(bool) -> bool + 'a) -> Self {
        Reader {
            tokens,
            on_eof: Some(Box::new(handler)),
            top_level: true,
        }
    }

    /// Read one top-level value.
    pub fn read(&mut self) -> Result<Value, ReadError> {
        self.top_level = true;
        self.read_value()
    }

    fn refill(&mut self) -> Result<(), ReadError> {
        let refilled = match self.on_eof.as_mut() {
            Some(handler) => handler(self.top_level),
            None => false,
        };
        if refilled {
            Ok(())
        } else {
            Err(ReadError::Eof(EofError))
        }
    }

    fn peek(&mut self) -> Result<Token, ReadError> {
        loop {
            if let Some(token) = self.tokens.borrow().front() {
                return Ok(token.clone());
            }
            self.refill()?;
        }
    }

    fn pop(&mut self) -> Result<Token, ReadError> {
        loop {
            if let Some(token) = self.tokens.borrow_mut().pop_front() {
                return Ok(token);
            }
            self.refill()?;
        }
    }

    fn read_value(&mut self) -> Result<Value, ReadError> {
        let token = self.pop()?;
        self.top_level = false;

        // Quote-class tokens desugar to ordinary (quote v) forms
        if let Some(name) = token.quote_name() {
            let quoted = self.read_value()?;
            return Ok(Value::cons(
                Value::symbol(name),
                Value::cons(quoted, Value::Nil),
            ));
        }

        match token {
            Token::LeftParen => {
                if self.peek()?.is_dot() {
                    return Err(syntax(". cannot be the first token in a list"));
                }
                self.read_tails()
            }
            Token::Boolean(b) => Ok(Value::Boolean(b)),
            Token::Number(n) => Ok(Value::Number(n)),
            Token::String(s) => Ok(Value::string(s)),
            Token::Identifier(name) if name == "." => {
                Err(syntax(". is only valid inside a list"))
            }
            Token::Identifier(name) => Ok(Value::Symbol(name)),
            token => Err(syntax(format!("Unexpected token {}", token))),
        }
    }

    /// Read the remainder of a list body after its opening paren, handling
    /// the dotted-pair tail.
    fn read_tails(&mut self) -> Result<Value, ReadError> {
        let next = self.peek()?;
        if next == Token::RightParen {
            self.pop()?;
            return Ok(Value::Nil);
        }
        if next.is_dot() {
            self.pop()?;
            let cdr = self.read_value()?;
            if self.pop()? != Token::RightParen {
                return Err(syntax("Expected exactly one element after ."));
            }
            return Ok(cdr);
        }
        let car = self.read_value()?;
        let cdr = self.read_tails()?;
        Ok(Value::cons(car, cdr))
    }
}

fn syntax(message: impl Into<String>) -> ReadError {
    ReadError::Syntax(SyntaxError(message.into()))
}
