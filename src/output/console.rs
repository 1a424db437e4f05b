//! Line-oriented console sink
//!
//! Child output from concurrent installs and status notices all go through
//! here. Every line is written while holding the stream lock, so lines from
//! different children never interleave mid-line.

use super::Verbosity;
use colored::Colorize;
use std::io::{self, Write};

/// Console sink configured by verbosity and output format
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    verbosity: Verbosity,
    /// When stdout carries machine-readable output, everything else goes to stderr
    machine_output: bool,
}

impl Console {
    /// Create a new console
    pub fn new(verbosity: Verbosity, machine_output: bool) -> Self {
        Self {
            verbosity,
            machine_output,
        }
    }

    /// Whether spinners may be drawn
    pub fn show_progress(&self) -> bool {
        self.verbosity != Verbosity::Quiet && !self.machine_output
    }

    /// Forward one line of child stdout
    pub fn stdout_line(&self, line: &[u8]) {
        if self.machine_output {
            write_line(&mut io::stderr().lock(), line);
        } else {
            write_line(&mut io::stdout().lock(), line);
        }
    }

    /// Forward one line of child stderr
    pub fn stderr_line(&self, line: &[u8]) {
        write_line(&mut io::stderr().lock(), line);
    }

    /// Status message shown unless quiet
    pub fn notice(&self, message: &str) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        self.stdout_line(message.as_bytes());
    }

    /// Success message shown unless quiet
    pub fn success(&self, message: &str) {
        self.notice(&message.green().to_string());
    }

    /// Failure message, always shown on stderr
    pub fn failure(&self, message: &str) {
        self.stderr_line(message.red().to_string().as_bytes());
    }

    /// Warning shown unless quiet
    pub fn warn(&self, message: &str) {
        if self.verbosity == Verbosity::Quiet {
            return;
        }
        let line = format!("{} {}", "warning:".yellow().bold(), message);
        self.stderr_line(line.as_bytes());
    }

    /// Diagnostic shown only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.verbosity != Verbosity::Verbose {
            return;
        }
        self.stderr_line(message.dimmed().to_string().as_bytes());
    }
}

/// Write `line` terminated by exactly one newline; console write errors are ignored
fn write_line(out: &mut dyn Write, line: &[u8]) {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    let _ = out.write_all(line);
    let _ = out.write_all(b"\n");
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_adds_newline() {
        let mut buf = Vec::new();
        write_line(&mut buf, b"added 1 package");
        assert_eq!(buf, b"added 1 package\n");
    }

    #[test]
    fn test_write_line_keeps_single_newline() {
        let mut buf = Vec::new();
        write_line(&mut buf, b"done\r\n");
        write_line(&mut buf, b"next\n");
        assert_eq!(buf, b"done\nnext\n");
    }

    #[test]
    fn test_show_progress() {
        assert!(Console::new(Verbosity::Normal, false).show_progress());
        assert!(!Console::new(Verbosity::Quiet, false).show_progress());
        assert!(!Console::new(Verbosity::Verbose, true).show_progress());
    }

    #[test]
    fn test_quiet_console() {
        let console = Console::new(Verbosity::Quiet, false);
        assert_eq!(console.verbosity, Verbosity::Quiet);
        assert!(!console.show_progress());
        console.notice("not shown");
        console.verbose("not shown");
    }
}
