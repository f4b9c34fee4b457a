//! Terminal text styling utilities.
//!
//! Keeps ANSI escape codes isolated from application code. Colors are
//! emitted only when the target stream is a terminal, `NO_COLOR` is unset
//! and `--no-color` was not given.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const RESET: &str = "\x1b[0m";

static COLORS_DISABLED: AtomicBool = AtomicBool::new(false);

/// Turn off colors for the rest of the process.
pub fn disable_colors() {
    COLORS_DISABLED.store(true, Ordering::Relaxed);
}

fn allowed() -> bool {
    !COLORS_DISABLED.load(Ordering::Relaxed) && std::env::var_os("NO_COLOR").is_none()
}

/// Whether colored output may be written to stdout.
pub fn colors_enabled() -> bool {
    allowed() && std::io::stdout().is_terminal()
}

/// Whether colored output may be written to stderr.
pub fn colors_enabled_stderr() -> bool {
    allowed() && std::io::stderr().is_terminal()
}

fn paint(code: &str, text: &str, enabled: bool) -> String {
    if enabled {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    paint(BOLD, text, colors_enabled())
}

pub fn dim(text: &str) -> String {
    paint(DIM, text, colors_enabled())
}

/// Formats a definition list item with a bold term.
/// Matches clap's command list formatting (2-space indent, 9-char term width).
pub fn def(term: &str, description: &str) -> String {
    let padding = " ".repeat(9_usize.saturating_sub(term.len()));
    format!("  {}{padding}{description}", bold(term))
}
