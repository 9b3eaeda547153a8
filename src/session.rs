//! Session state threaded through every pipeline stage
//!
//! One [`Session`] exists per interpreter process. It owns the environment,
//! alias, and history lists, the last exit status consulted by chain gating
//! and `$?`, and the buffered console writer. Children never see the
//! inherited process environment directly; they get a view materialized
//! from the session's own list, rebuilt lazily after mutations.

use crate::output::Console;
use crate::records::RecordList;

/// The single mutable context record carried across loop iterations.
pub struct Session {
    /// Program name used as the prefix of diagnostics.
    pub prog: String,
    /// Number of non-empty input lines read so far.
    pub line_count: u64,
    /// Number of external commands launched so far.
    pub exec_count: u64,
    /// Exit status of the most recently completed segment.
    pub last_status: i32,
    /// `NAME=VALUE` environment entries, seeded from the process environment.
    pub env: RecordList,
    /// `NAME=VALUE` alias entries.
    pub aliases: RecordList,
    /// Command history, one entry per input line.
    pub history: RecordList,
    /// Buffered writer for the prompt and builtin output.
    pub console: Console,
    environ_cache: Vec<String>,
    environ_dirty: bool,
}

impl Session {
    /// Create a session seeded from the inherited process environment.
    pub fn new(prog: impl Into<String>) -> Self {
        let mut session = Session {
            prog: prog.into(),
            line_count: 0,
            exec_count: 0,
            last_status: 0,
            env: RecordList::new(),
            aliases: RecordList::new(),
            history: RecordList::new(),
            console: Console::new(),
            environ_cache: Vec::new(),
            environ_dirty: true,
        };
        for (key, value) in std::env::vars() {
            session.env.push_tail(format!("{}={}", key, value));
        }
        session
    }

    /// Look up the value of `name` in the session environment.
    pub fn getenv(&self, name: &str) -> Option<&str> {
        self.env
            .find(|text| is_entry_for(text, name))
            .and_then(|record| record.text.split_once('=').map(|(_, value)| value))
    }

    /// Insert or replace `NAME=VALUE`, replacing in place when the key exists.
    pub fn set_env(&mut self, name: &str, value: &str) {
        let entry = format!("{}={}", name, value);
        match self.env.position(|text| is_entry_for(text, name)) {
            Some(pos) => self.env.replace_at(pos, entry),
            None => {
                self.env.push_tail(entry);
            }
        }
        self.environ_dirty = true;
    }

    /// Remove `name` from the environment. Returns false when not present.
    pub fn unset_env(&mut self, name: &str) -> bool {
        match self.env.position(|text| is_entry_for(text, name)) {
            Some(pos) => {
                self.env.remove_at(pos);
                self.environ_dirty = true;
                true
            }
            None => false,
        }
    }

    /// The array-of-strings view handed to spawned children, rebuilt lazily
    /// after any environment mutation.
    pub fn environ(&mut self) -> &[String] {
        if self.environ_dirty {
            self.environ_cache = self.env.texts().map(String::from).collect();
            self.environ_dirty = false;
        }
        &self.environ_cache
    }

    /// Value of the alias `name`, if defined.
    pub fn alias_value(&self, name: &str) -> Option<&str> {
        self.aliases
            .find(|text| is_entry_for(text, name))
            .and_then(|record| record.text.split_once('=').map(|(_, value)| value))
    }

    /// Insert or replace the alias `name`.
    pub fn set_alias(&mut self, name: &str, value: &str) {
        let entry = format!("{}={}", name, value);
        match self.aliases.position(|text| is_entry_for(text, name)) {
            Some(pos) => self.aliases.replace_at(pos, entry),
            None => {
                self.aliases.push_tail(entry);
            }
        }
    }

    /// Remove the alias `name`. Returns false when not present.
    pub fn unset_alias(&mut self, name: &str) -> bool {
        match self.aliases.position(|text| is_entry_for(text, name)) {
            Some(pos) => self.aliases.remove_at(pos),
            None => false,
        }
    }

    /// Counter-tagged diagnostic on standard error.
    pub fn report(&self, subject: &str, message: &str) {
        eprintln!(
            "{}: {}: {}: {}",
            self.prog, self.line_count, subject, message
        );
    }
}

/// True when `entry` is the `NAME=VALUE` record for `name`.
fn is_entry_for(entry: &str, name: &str) -> bool {
    entry
        .strip_prefix(name)
        .map_or(false, |rest| rest.starts_with('='))
}
