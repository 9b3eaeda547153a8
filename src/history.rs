//! Command history persistence
//!
//! History lives in the session's record list during a run and in a plain
//! text file (one command per line) between runs. The file is read
//! permissively at startup and rewritten in full at exit; I/O failures
//! degrade history to empty instead of failing the interpreter.

use std::fs;
use std::path::PathBuf;

use crate::session::Session;

/// History file name, created under `$HOME`.
pub const HIST_FILE: &str = ".husk_history";

/// Cap on retained entries; exceeding it drops the oldest and renumbers.
pub const HIST_MAX: usize = 4096;

/// Resolve the per-user history file path from the session environment.
pub fn history_file(session: &Session) -> Option<PathBuf> {
    session
        .getenv("HOME")
        .map(|home| PathBuf::from(home).join(HIST_FILE))
}

/// Load history from disk. Missing or unreadable files leave it empty.
pub fn read_history(session: &mut Session) {
    let Some(path) = history_file(session) else {
        return;
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) => {
            log::debug!("no history loaded from {}: {}", path.display(), err);
            return;
        }
    };
    for line in content.lines() {
        if !line.is_empty() {
            session.history.push_tail(line);
        }
    }
    enforce_cap(session);
    session.history.renumber();
}

/// Record one just-read input line. Blank lines are not recorded.
pub fn append_entry(session: &mut Session, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    session.history.push_tail(line);
    enforce_cap(session);
}

/// Rewrite the whole history file from the session list.
pub fn write_history(session: &Session) {
    let Some(path) = history_file(session) else {
        return;
    };
    let mut content = String::new();
    for text in session.history.texts() {
        content.push_str(text);
        content.push('\n');
    }
    if let Err(err) = fs::write(&path, content) {
        log::warn!("could not write history to {}: {}", path.display(), err);
    }
}

fn enforce_cap(session: &mut Session) {
    if session.history.len() <= HIST_MAX {
        return;
    }
    while session.history.len() > HIST_MAX {
        session.history.remove_at(0);
    }
    session.history.renumber();
}
