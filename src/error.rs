//! Error types for willow's core operations.
//!
//! Core modules return [`Result`]; the command layer wraps these in
//! `anyhow` with additional context before they reach `main`.

use crate::core::worktree::Worktree;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The current directory (or named repo) is not a willow-managed repository.
    #[error("{0}")]
    NotARepository(String),

    /// A config file exists but does not contain valid JSON.
    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A key outside the fixed config key set was requested.
    #[error("unknown config key: {key}\n\nValid keys: {}", crate::config::keys::KEYS.join(", "))]
    UnknownConfigKey { key: String },

    /// A config value could not be parsed for its key.
    #[error("invalid value for {key}: {reason}")]
    InvalidConfigValue { key: String, reason: String },

    /// More than one worktree matched a target.
    #[error("{}", format_ambiguous(.target, .candidates))]
    AmbiguousMatch {
        target: String,
        candidates: Vec<Worktree>,
    },

    /// Nothing matched a target.
    #[error("{0}")]
    NotFound(String),

    /// The version-control backend exited unsuccessfully.
    #[error("{command}: {output}")]
    Backend { command: String, output: String },

    /// A setup or teardown command failed.
    #[error("hook failed: {command}: {reason}")]
    Hook { command: String, reason: String },

    /// The clone destination is already taken.
    #[error("repository {name:?} already exists at {}", .path.display())]
    AlreadyExists { name: String, path: PathBuf },

    /// Two branches strip to the same worktree directory.
    #[error(
        "worktree directory {} for branch {branch:?} is already in use{}",
        .path.display(),
        .owner.as_ref().map(|b| format!(" by branch {b:?}")).unwrap_or_default()
    )]
    DirectoryCollision {
        branch: String,
        path: PathBuf,
        owner: Option<String>,
    },

    /// A program started by `run` or `config --edit` failed.
    #[error("{command}: {reason}")]
    Program { command: String, reason: String },

    /// `run --all` failed in at least one worktree.
    #[error("command failed in {}/{total} worktrees: {}", .failed.len(), .failed.join(", "))]
    RunFailed { failed: Vec<String>, total: usize },

    /// Malformed arguments that clap cannot catch on its own.
    #[error("{0}")]
    Usage(String),

    /// Filesystem error with context.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an IO error with a short description of what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

fn format_ambiguous(target: &str, candidates: &[Worktree]) -> String {
    let mut msg = format!("ambiguous match {target:?}, could be:");
    for wt in candidates {
        msg.push_str(&format!("\n  {}  {}", wt.branch, wt.path.display()));
    }
    msg
}
