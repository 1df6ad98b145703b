// ABOUTME: Syntax highlighter for the REPL input line
// Implements rustyline's Highlighter trait to provide ANSI color codes
// for Lisp syntax elements while preserving display width

use rustyline::highlight::{CmdKind, Highlighter};
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;

use crate::builtins::BUILTIN_NAMES;
use crate::forms::SPECIAL_FORM_NAMES;
use crate::tokenizer::{is_word_char, looks_numeric};

// ANSI color codes (3-bit/4-bit colors for maximum terminal compatibility)
const COLOR_RESET: &str = "\x1b[0m";
const COLOR_PARENS: &str = "\x1b[1;34m"; // Bold blue
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m"; // Bold magenta
const COLOR_BUILTIN: &str = "\x1b[36m"; // Cyan
const COLOR_LITERAL: &str = "\x1b[33m"; // Yellow (numbers and booleans)
const COLOR_STRING: &str = "\x1b[32m"; // Green
const COLOR_COMMENT: &str = "\x1b[90m"; // Bright black (gray)
const COLOR_QUOTE: &str = "\x1b[1;33m"; // Bold yellow

/// rustyline helper coloring the input line as it is typed.
#[derive(Completer, Helper, Hinter, Validator)]
pub struct LispHelper;

impl LispHelper {
    pub fn new() -> Self {
        LispHelper
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn color_for_word(word: &str) -> Option<&'static str> {
    if word == "#t" || word == "#f" {
        Some(COLOR_LITERAL)
    } else if SPECIAL_FORM_NAMES.contains(&word) {
        Some(COLOR_SPECIAL_FORM)
    } else if BUILTIN_NAMES.contains(&word) {
        Some(COLOR_BUILTIN)
    } else if looks_numeric(word) && word.parse::<f64>().is_ok() {
        Some(COLOR_LITERAL)
    } else {
        None
    }
}

fn push_colored(result: &mut String, color: &str, text: &str) {
    result.push_str(color);
    result.push_str(text);
    result.push_str(COLOR_RESET);
}

fn highlight_line(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            // Comment runs to end of line
            ';' => {
                let rest: String = chars[i..].iter().collect();
                push_colored(&mut result, COLOR_COMMENT, &rest);
                break;
            }

            // String literal, escapes included; may be unterminated while typing
            '"' => {
                let mut text = String::from('"');
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        text.push(chars[i]);
                        text.push(chars[i + 1]);
                        i += 2;
                    } else if chars[i] == '"' {
                        text.push('"');
                        i += 1;
                        break;
                    } else {
                        text.push(chars[i]);
                        i += 1;
                    }
                }
                push_colored(&mut result, COLOR_STRING, &text);
            }

            c @ ('(' | ')') => {
                push_colored(&mut result, COLOR_PARENS, &c.to_string());
                i += 1;
            }

            c @ ('\'' | '`' | ',') => {
                push_colored(&mut result, COLOR_QUOTE, &c.to_string());
                i += 1;
            }

            c if c.is_whitespace() => {
                result.push(c);
                i += 1;
            }

            _ => {
                let mut word = String::new();
                while i < chars.len() && is_word_char(chars[i]) {
                    word.push(chars[i]);
                    i += 1;
                }
                match color_for_word(&word) {
                    Some(color) => push_colored(&mut result, color, &word),
                    None => result.push_str(&word),
                }
            }
        }
    }

    result
}
