//! CLI output implementation.

use super::{Output, OutputConfig};
use crate::styles::{self, colors_enabled, colors_enabled_stderr};

/// Output implementation that writes to the terminal.
///
/// Git-like format:
/// - `step()` → verbose only, no prefix
/// - `success()` → green, always shown (unless quiet)
/// - `warning()` → `warning: msg` on stderr
#[derive(Debug)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Print a human-readable line on the configured stream.
    fn emit(&self, style: &str, msg: &str) {
        if self.config.to_stderr {
            if colors_enabled_stderr() && !style.is_empty() {
                eprintln!("{style}{msg}{}", styles::RESET);
            } else {
                eprintln!("{msg}");
            }
        } else if colors_enabled() && !style.is_empty() {
            println!("{style}{msg}{}", styles::RESET);
        } else {
            println!("{msg}");
        }
    }
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            self.emit("", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if !self.config.quiet {
            self.emit(styles::GREEN, msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if colors_enabled_stderr() {
            eprintln!("{}warning:{} {msg}", styles::YELLOW, styles::RESET);
        } else {
            eprintln!("warning: {msg}");
        }
    }

    fn debug(&mut self, msg: &str) {
        if self.config.verbose {
            if colors_enabled_stderr() {
                eprintln!("{}debug: {msg}{}", styles::DIM, styles::RESET);
            } else {
                eprintln!("debug: {msg}");
            }
        }
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose && !self.config.quiet {
            self.emit(styles::DIM, msg);
        }
    }

    fn detail(&mut self, key: &str, value: &str) {
        if !self.config.quiet {
            self.emit("", &format!("  {key}: {value}"));
        }
    }

    fn raw(&mut self, content: &str) {
        print!("{content}");
    }
}
