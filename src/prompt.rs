//! Interactive prompts.
//!
//! Questions are written to stderr so that they stay visible when stdout is
//! captured by a shell function.

use crate::error::{Error, Result};
use std::io::{self, BufRead, Write};

/// Ask a yes/no question; only `y` or `yes` (any case) count as yes.
pub fn confirm(question: &str) -> Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stderr(), question)
}

/// Ask for a line of text, offering `default` when the answer is empty.
pub fn ask(label: &str, default: &str) -> Result<String> {
    ask_with(&mut io::stdin().lock(), &mut io::stderr(), label, default)
}

pub fn confirm_with(
    input: &mut impl BufRead,
    out: &mut impl Write,
    question: &str,
) -> Result<bool> {
    write!(out, "{question} [y/N] ")
        .and_then(|_| out.flush())
        .map_err(|e| Error::io("failed to write prompt", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| Error::io("failed to read answer", e))?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

pub fn ask_with(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    default: &str,
) -> Result<String> {
    let prompt = if default.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{default}]: ")
    };
    out.write_all(prompt.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| Error::io("failed to write prompt", e))?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| Error::io("failed to read answer", e))?;
    let answer = line.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm_answer(answer: &str) -> bool {
        let mut out = Vec::new();
        confirm_with(&mut answer.as_bytes(), &mut out, "Remove worktree main?").unwrap()
    }

    #[test]
    fn test_confirm_accepts_only_yes() {
        assert!(confirm_answer("y\n"));
        assert!(confirm_answer("YES\n"));
        assert!(confirm_answer("  yes  \n"));
        assert!(!confirm_answer("\n"));
        assert!(!confirm_answer("n\n"));
        assert!(!confirm_answer("yep\n"));
        assert!(!confirm_answer(""));
    }

    #[test]
    fn test_confirm_prompt_text() {
        let mut out = Vec::new();
        confirm_with(&mut "n\n".as_bytes(), &mut out, "Prune stale worktrees?").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Prune stale worktrees? [y/N] ");
    }

    #[test]
    fn test_ask_uses_default_on_empty() {
        let mut out = Vec::new();
        let value = ask_with(&mut "\n".as_bytes(), &mut out, "Base branch", "main").unwrap();
        assert_eq!(value, "main");
        assert_eq!(String::from_utf8(out).unwrap(), "Base branch [main]: ");

        let mut out = Vec::new();
        let value = ask_with(&mut " dev \n".as_bytes(), &mut out, "Branch prefix", "").unwrap();
        assert_eq!(value, "dev");
        assert_eq!(String::from_utf8(out).unwrap(), "Branch prefix: ");
    }
}
