// ABOUTME: CLI driver - interactive REPL or script execution

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use mini_lisp::config;
use mini_lisp::env::Environment;
use mini_lisp::error::ReadError;
use mini_lisp::eval::eval;
use mini_lisp::highlighter::LispHelper;
use mini_lisp::reader::Reader;
use mini_lisp::token::new_token_queue;
use mini_lisp::tokenizer::tokenize_into;

/// Mini-Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "mini-lisp")]
#[command(version = config::VERSION)]
#[command(about = "A Scheme-flavored Mini-Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match args.script {
        Some(path) => run_script(&path),
        None => run_repl(),
    }
}

/// Execute a script file: tokenize the whole file, then evaluate each
/// top-level form in order. The first error stops the remaining forms.
/// Only an unopenable file is a failing exit.
fn run_script(path: &Path) -> ExitCode {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Cannot open {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let queue = new_token_queue();
    for line in contents.lines() {
        if let Err(e) = tokenize_into(line, &queue) {
            eprintln!("Error: {}", e);
            return ExitCode::SUCCESS;
        }
    }

    let env = Environment::global();
    let mut reader = Reader::new(queue);
    loop {
        match reader.read() {
            Ok(expr) => {
                if let Err(e) = eval(&expr, &env) {
                    eprintln!("Error: {}", e);
                    break;
                }
            }
            Err(ReadError::Eof(_)) => break,
            Err(ReadError::Syntax(e)) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }
    ExitCode::SUCCESS
}

/// Interactive loop. The reader pulls lines through its EOF handler, so a
/// form left open continues onto the next line under the ` .. ` prompt.
fn run_repl() -> ExitCode {
    let env = Environment::global();
    let queue = new_token_queue();

    let editor_config = Config::builder().auto_add_history(true).build();
    let mut editor = match Editor::<LispHelper, DefaultHistory>::with_config(editor_config) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {}", e);
            return ExitCode::FAILURE;
        }
    };
    editor.set_helper(Some(LispHelper::new()));
    let _ = editor.load_history(config::HISTORY_FILE);

    let editor = Rc::new(RefCell::new(editor));
    // Set when the current form was abandoned (Ctrl-C or a bad line) so the
    // resulting EOF resumes the loop instead of ending the session
    let interrupted = Rc::new(Cell::new(false));

    {
        let editor = editor.clone();
        let handler_queue = queue.clone();
        let handler_interrupted = interrupted.clone();
        let mut reader = Reader::with_eof_handler(queue.clone(), move |top_level| {
            let prompt = if top_level {
                config::PROMPT
            } else {
                config::CONTINUE_PROMPT
            };
            match editor.borrow_mut().readline(prompt) {
                Ok(line) => match tokenize_into(&line, &handler_queue) {
                    Ok(()) => true,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        handler_queue.borrow_mut().clear();
                        handler_interrupted.set(true);
                        false
                    }
                },
                Err(ReadlineError::Interrupted) => {
                    handler_interrupted.set(true);
                    false
                }
                Err(ReadlineError::Eof) => false,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    false
                }
            }
        });

        loop {
            match reader.read() {
                Ok(expr) => match eval(&expr, &env) {
                    Ok(result) => println!("{}", result.to_repl_string()),
                    Err(e) => eprintln!("Error: {}", e),
                },
                Err(ReadError::Syntax(e)) => {
                    eprintln!("Error: {}", e);
                    queue.borrow_mut().clear();
                }
                Err(ReadError::Eof(_)) => {
                    if interrupted.take() {
                        queue.borrow_mut().clear();
                        continue;
                    }
                    break;
                }
            }
        }
    }

    let _ = editor.borrow_mut().save_history(config::HISTORY_FILE);
    ExitCode::SUCCESS
}
