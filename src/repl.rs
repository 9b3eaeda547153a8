//! The read / split / expand / dispatch loop
//!
//! One iteration reads a line, records it in history, and walks its chain
//! segments. Each permitted segment is expanded, tokenized, and handed to
//! the builtin dispatcher or the launcher; the segment status feeds both
//! `$?` and the gating decision for the next segment. Only `exit`, end of
//! input, or a read error leave the loop, and history is persisted exactly
//! once on the way out.

use crate::builtins::{self, BuiltinOutcome};
use crate::chain::{ChainBuffer, ChainOp};
use crate::expand;
use crate::history;
use crate::input::{LineReader, ReadOutcome};
use crate::launcher::{self, LaunchError, STATUS_NOT_FOUND, STATUS_NO_PERMISSION};
use crate::session::Session;
use crate::signals;
use crate::tokens;

/// Prompt shown when reading from a terminal.
pub const PROMPT: &str = "$ ";

/// What processing one line asked the caller to do.
#[derive(Debug)]
pub enum LineOutcome {
    Continue,
    Exit(i32),
}

/// Drive the loop over an input source until exit or end of input,
/// returning the process exit status.
pub fn run_source(session: &mut Session, mut input: LineReader) -> i32 {
    let status = drive(session, &mut input);
    history::write_history(session);
    session.console.flush();
    status
}

/// Execute a single command string (the `-c` invocation mode). The line is
/// not recorded in history.
pub fn run_command(session: &mut Session, command: &str) -> i32 {
    let status = match run_line(session, command) {
        LineOutcome::Exit(code) => code,
        LineOutcome::Continue => session.last_status,
    };
    history::write_history(session);
    session.console.flush();
    status
}

fn drive(session: &mut Session, input: &mut LineReader) -> i32 {
    loop {
        if signals::take_interrupt() && input.is_interactive() {
            session.console.write_str("\n");
        }
        if input.is_interactive() {
            session.console.write_str(PROMPT);
        }
        session.console.flush();

        match input.next_line() {
            Ok(ReadOutcome::Eof) => {
                if input.is_interactive() {
                    session.console.write_str("\n");
                }
                break;
            }
            Ok(ReadOutcome::Interrupted) => continue,
            Ok(ReadOutcome::Line(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                session.line_count += 1;
                history::append_entry(session, &line);
                if let LineOutcome::Exit(code) = run_line(session, &line) {
                    return code;
                }
            }
            Err(err) => {
                log::warn!("read error on input source: {}", err);
                break;
            }
        }
    }
    session.last_status
}

/// Run every chain segment of one input line through the pipeline.
pub fn run_line(session: &mut Session, line: &str) -> LineOutcome {
    let mut chain = ChainBuffer::default();
    chain.load(line);

    // The operator gating the segment about to run; the first one is free.
    let mut gate = ChainOp::Norm;
    while let Some((segment, next_op)) = chain.next_segment() {
        if gate.permits(session.last_status) {
            if let LineOutcome::Exit(code) = run_segment(session, &segment) {
                return LineOutcome::Exit(code);
            }
        }
        gate = next_op;
    }
    session.console.flush();
    LineOutcome::Continue
}

/// Expand, tokenize, and dispatch a single segment.
fn run_segment(session: &mut Session, segment: &str) -> LineOutcome {
    let expanded = expand::expand(session, segment);
    let argv = tokens::split_words(&expanded, tokens::ARG_DELIMS);
    if argv.is_empty() {
        return LineOutcome::Continue;
    }

    match builtins::dispatch(session, &argv) {
        BuiltinOutcome::Exit(code) => return LineOutcome::Exit(code),
        BuiltinOutcome::Status(status) => session.last_status = status,
        BuiltinOutcome::NotBuiltin => launch(session, &argv),
    }
    LineOutcome::Continue
}

fn launch(session: &mut Session, argv: &[String]) {
    match launcher::execute(session, argv) {
        Ok(status) => session.last_status = status,
        Err(LaunchError::NotFound) => {
            session.last_status = STATUS_NOT_FOUND;
            session.report(&argv[0], "not found");
        }
        Err(LaunchError::PermissionDenied) => {
            session.last_status = STATUS_NO_PERMISSION;
            session.report(&argv[0], "Permission denied");
        }
        Err(LaunchError::Spawn(err)) => {
            session.last_status = 1;
            session.report(&argv[0], &format!("can't launch: {}", err));
        }
    }
}
