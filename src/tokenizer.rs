// ABOUTME: Line-oriented tokenizer built on nom combinators

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_till, take_while1},
    character::complete::{char, multispace1, none_of, one_of},
    combinator::value,
    multi::many0,
    sequence::delimited,
    IResult, Parser,
};

use crate::error::SyntaxError;
use crate::token::{Token, TokenQueue};

/// Characters that end a word: whitespace plus the single-character tokens,
/// string quotes, and the comment marker.
pub(crate) fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !"()'`,\";".contains(c)
}

/// A word is lexed as a number only when it plausibly starts one; this keeps
/// `+`, `-`, `...` and words like `inf` as identifiers while still admitting
/// fractions and exponents through the host f64 parser.
pub(crate) fn looks_numeric(word: &str) -> bool {
    let starts_numeric = word
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
    starts_numeric && word.bytes().any(|b| b.is_ascii_digit())
}

fn lex_comment(input: &str) -> IResult<&str, ()> {
    let (input, _) = char(';').parse(input)?;
    let (input, _) = take_till(|c| c == '\n').parse(input)?;
    Ok((input, ()))
}

/// Skip whitespace and line comments.
fn skip(input: &str) -> IResult<&str, ()> {
    many0(alt((value((), multispace1), lex_comment)))
        .map(|_| ())
        .parse(input)
}

fn lex_punct(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::LeftParen, char('(')),
        value(Token::RightParen, char(')')),
        value(Token::Quote, char('\'')),
        value(Token::Quasiquote, char('`')),
        value(Token::Unquote, char(',')),
    ))
    .parse(input)
}

/// Raw string body between the quotes; escapes are validated here and
/// decoded afterwards by `unescape`.
fn lex_string(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        alt((escaped(none_of("\"\\"), '\\', one_of("\"\\nt")), tag(""))),
        char('"'),
    )
    .parse(input)
}

fn lex_word(input: &str) -> IResult<&str, &str> {
    take_while1(is_word_char).parse(input)
}

/// Decode the escape sequences the string lexer admitted.
fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            _ => {} // unreachable: the lexer only admits the four escapes
        }
    }
    result
}

fn classify_word(word: &str) -> Result<Token, SyntaxError> {
    match word {
        "#t" => Ok(Token::Boolean(true)),
        "#f" => Ok(Token::Boolean(false)),
        w if w.starts_with('#') => Err(SyntaxError(format!("Unexpected token {}", w))),
        w if looks_numeric(w) => match w.parse::<f64>() {
            Ok(n) => Ok(Token::Number(n)),
            Err(_) => Ok(Token::Identifier(w.to_string())),
        },
        w => Ok(Token::Identifier(w.to_string())),
    }
}

/// Produce a precise message for a string literal the lexer rejected.
fn diagnose_string(input: &str) -> SyntaxError {
    let mut chars = input.chars();
    chars.next(); // opening quote
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('"' | '\\' | 'n' | 't') => {}
                Some(bad) => {
                    return SyntaxError(format!("Invalid escape \\{} in string literal", bad))
                }
                None => break,
            },
            '"' => break,
            _ => {}
        }
    }
    SyntaxError("Unterminated string literal".to_string())
}

/// Tokenize one line (or any newline-free chunk) of source text.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut rest = input;
    loop {
        let (after, _) = skip(rest).unwrap_or((rest, ()));
        rest = after;
        if rest.is_empty() {
            return Ok(tokens);
        }

        if let Ok((after, token)) = lex_punct(rest) {
            tokens.push(token);
            rest = after;
            continue;
        }

        if rest.starts_with('"') {
            match lex_string(rest) {
                Ok((after, raw)) => {
                    tokens.push(Token::String(unescape(raw)));
                    rest = after;
                    continue;
                }
                Err(_) => return Err(diagnose_string(rest)),
            }
        }

        match lex_word(rest) {
            Ok((after, word)) => {
                tokens.push(classify_word(word)?);
                rest = after;
            }
            Err(_) => {
                let c = rest.chars().next().unwrap_or_default();
                return Err(SyntaxError(format!("Unexpected character {:?}", c)));
            }
        }
    }
}

/// Tokenize a line and append the result to the shared queue.
pub fn tokenize_into(input: &str, queue: &TokenQueue) -> Result<(), SyntaxError> {
    let tokens = tokenize(input)?;
    queue.borrow_mut().extend(tokens);
    Ok(())
}
