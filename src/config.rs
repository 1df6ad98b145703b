// ABOUTME: Version and REPL constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prompt at the start of a top-level form.
pub const PROMPT: &str = ">>> ";
/// Prompt while a form is still open across lines.
pub const CONTINUE_PROMPT: &str = " .. ";

pub const HISTORY_FILE: &str = ".mini_lisp_history";
