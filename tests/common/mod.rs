//! Common test utilities for husk integration tests

use std::path::Path;

use husk::repl::{self, LineOutcome};
use husk::Session;

/// Build a session whose HOME points at a scratch directory so history and
/// `cd` never touch the developer's real files.
pub fn scratch_session(home: &Path) -> Session {
    let mut session = Session::new("husk");
    session.set_env("HOME", &home.display().to_string());
    session
}

/// Run one input line, returning the resulting status.
#[allow(dead_code)]
pub fn run(session: &mut Session, line: &str) -> i32 {
    match repl::run_line(session, line) {
        LineOutcome::Exit(code) => code,
        LineOutcome::Continue => session.last_status,
    }
}
