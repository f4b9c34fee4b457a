//! Output abstraction layer for separating IO from business logic.
//!
//! Commands accept `&mut dyn Output` and use its methods instead of direct
//! `println!` or `eprintln!` calls, so tests can capture what a command says
//! with [`TestOutput`].

mod cli;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

/// Configuration for output behavior.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Suppress most output when true.
    pub quiet: bool,
    /// Enable debug/verbose output when true.
    pub verbose: bool,
    /// Send human-readable messages to stderr.
    ///
    /// Set by commands whose stdout is consumed by other programs
    /// (`pwd`, `new --cd`, `ls --json`).
    pub to_stderr: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            to_stderr: false,
        }
    }

    /// Same settings, with messages routed to stderr.
    pub fn on_stderr(mut self) -> Self {
        self.to_stderr = true;
        self
    }
}

/// Trait for abstracting output operations.
///
/// Implementors should respect `quiet` and `verbose` modes where appropriate.
/// `debug` is reserved for internal detail such as resolved settings.
pub trait Output {
    // ─────────────────────────────────────────────────────────────────────────
    // Basic Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Display an informational message. Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Display a success message. Respects quiet mode.
    fn success(&mut self, msg: &str);

    /// Display a warning message on stderr. Always shown.
    fn warning(&mut self, msg: &str);

    /// Display a debug message. Only shown in verbose mode.
    fn debug(&mut self, msg: &str);

    // ─────────────────────────────────────────────────────────────────────────
    // Structured Output
    // ─────────────────────────────────────────────────────────────────────────

    /// Display an intermediate step message. Only shown in verbose mode.
    fn step(&mut self, msg: &str);

    /// Display a key-value detail, rendered as `  key: value`.
    fn detail(&mut self, key: &str, value: &str);

    // ─────────────────────────────────────────────────────────────────────────
    // Special Output
    // ─────────────────────────────────────────────────────────────────────────

    /// Output raw, unformatted content on stdout.
    ///
    /// Used for machine-readable output. Not affected by quiet mode or by
    /// [`OutputConfig::to_stderr`].
    fn raw(&mut self, content: &str);
}
