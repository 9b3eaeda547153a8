//! Buffered console output
//!
//! The prompt and all builtin output go through one buffered writer so that
//! ordering against child-process output (which writes to the inherited
//! descriptor directly) is controlled by explicit flush points: after the
//! prompt, at the end of each input line, before a child spawns, and at
//! process exit.

use std::io::{self, BufWriter, Stdout, Write};

pub struct Console {
    out: BufWriter<Stdout>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Console {
            out: BufWriter::new(io::stdout()),
        }
    }

    /// Write a string without a trailing newline (prompt text).
    pub fn write_str(&mut self, s: &str) {
        let _ = self.out.write_all(s.as_bytes());
    }

    /// Write a string followed by a newline.
    pub fn write_line(&mut self, s: &str) {
        let _ = self.out.write_all(s.as_bytes());
        let _ = self.out.write_all(b"\n");
    }

    pub fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
