//! Colored terminal output.

#![allow(dead_code)] // Public API - items may be used by external consumers

use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Console output manager with colored message levels.
///
/// Write failures on the console are ignored; diagnostics must never abort
/// a packaging run on their own.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Prints a bold section header, set off by a blank line.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        Self::print_stdout(&spec, &format!("\n{}", title));
    }

    /// Prints a plain informational message.
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        println!("{}", message);
    }

    /// Prints an informational message in verbose mode only.
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            self.info(message);
        }
    }

    /// Prints a green success message.
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green));
        Self::print_stdout(&spec, message);
    }

    /// Prints a yellow warning message.
    pub fn warn(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        Self::print_stdout(&spec, message);
    }

    /// Prints a bold red error message to stderr.
    pub fn error(&self, message: &str) {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        let mut stream = StandardStream::stderr(ColorChoice::Auto);
        let _ = stream.set_color(&spec);
        let _ = writeln!(stream, "Error: {}", message);
        let _ = stream.reset();
    }

    fn print_stdout(spec: &ColorSpec, message: &str) {
        let mut stream = StandardStream::stdout(ColorChoice::Auto);
        let _ = stream.set_color(spec);
        let _ = writeln!(stream, "{}", message);
        let _ = stream.reset();
    }
}
