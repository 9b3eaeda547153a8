//! Line acquisition
//!
//! Reads raw bytes from the input source through a fixed-capacity buffer
//! and yields one line at a time with the trailing newline stripped.
//! Comments (everything after the first `#`) are removed before the line
//! reaches the chain splitter. End of stream is reported distinctly from an
//! empty line, so an interactive empty line re-prompts instead of
//! terminating the session.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, IsTerminal, Read};

/// Capacity of the internal read buffer.
pub const READ_BUF_SIZE: usize = 1024;

/// What a single read attempt produced.
#[derive(Debug)]
pub enum ReadOutcome {
    /// One full line, newline stripped, comment removed.
    Line(String),
    /// End of the input stream.
    Eof,
    /// The read was interrupted; the caller redraws the prompt and retries.
    Interrupted,
}

pub struct LineReader {
    source: BufReader<Box<dyn Read>>,
    interactive: bool,
}

impl LineReader {
    /// Read from standard input; interactive when stdin is a terminal.
    pub fn stdin() -> Self {
        let interactive = io::stdin().is_terminal();
        LineReader {
            source: BufReader::with_capacity(READ_BUF_SIZE, Box::new(io::stdin())),
            interactive,
        }
    }

    /// Read from a script file; never interactive.
    pub fn file(file: File) -> Self {
        LineReader {
            source: BufReader::with_capacity(READ_BUF_SIZE, Box::new(file)),
            interactive: false,
        }
    }

    /// Read from an in-memory buffer; never interactive.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        LineReader {
            source: BufReader::with_capacity(READ_BUF_SIZE, Box::new(Cursor::new(bytes))),
            interactive: false,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Pull the next line from the source.
    pub fn next_line(&mut self) -> io::Result<ReadOutcome> {
        let mut raw = String::new();
        match self.source.read_line(&mut raw) {
            Ok(0) => Ok(ReadOutcome::Eof),
            Ok(_) => {
                if raw.ends_with('\n') {
                    raw.pop();
                }
                strip_comment(&mut raw);
                Ok(ReadOutcome::Line(raw))
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Ok(ReadOutcome::Interrupted),
            Err(err) => Err(err),
        }
    }
}

/// Remove everything after the first `#`.
fn strip_comment(line: &mut String) {
    if let Some(pos) = line.find('#') {
        line.truncate(pos);
    }
}
