//! Subprocess access to git.
//!
//! Everything willow asks of git goes through [`RepositoryBackend::run`].
//! `GitCommand` is the real implementation; tests substitute a scripted
//! fake. [`GitDir`] binds a backend to one directory and exposes the typed
//! helpers defined across the submodules of this module.

use crate::error::{Error, Result};
use crate::log_debug;
use std::path::{Path, PathBuf};
use std::process::Command;

mod branch;
mod clone;
mod config;
mod refs;
mod status;
mod worktree;

#[cfg(test)]
pub(crate) mod fake;

pub use refs::HEADS_PREFIX;

/// Executes version-control subcommands in a directory.
///
/// Returns the combined, trimmed stdout/stderr of the invocation, or
/// [`Error::Backend`] when the tool exits unsuccessfully.
pub trait RepositoryBackend {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String>;
}

/// Runs the `git` executable as a child process.
#[derive(Debug, Clone, Default)]
pub struct GitCommand {
    pub(crate) verbose: bool,
}

impl GitCommand {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl RepositoryBackend for GitCommand {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        if self.verbose {
            log_debug!("$ git -C {} {}", dir.display(), args.join(" "));
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|e| Error::io("Failed to execute git", e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if !output.status.success() {
            return Err(Error::Backend {
                command: format!("git {}", args.join(" ")),
                output: combined,
            });
        }

        Ok(combined)
    }
}

/// A backend bound to a working directory.
pub struct GitDir<'a> {
    backend: &'a dyn RepositoryBackend,
    dir: PathBuf,
}

impl<'a> GitDir<'a> {
    pub fn new(backend: &'a dyn RepositoryBackend, dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Bind the same backend to another directory.
    pub fn at(&self, dir: impl Into<PathBuf>) -> GitDir<'a> {
        GitDir::new(self.backend, dir)
    }

    pub fn run(&self, args: &[&str]) -> Result<String> {
        self.backend.run(&self.dir, args)
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeBackend;
    use super::*;

    #[test]
    fn test_git_command_new() {
        let git = GitCommand::new(true);
        assert!(git.verbose);

        let git = GitCommand::new(false);
        assert!(!git.verbose);
    }

    #[test]
    fn test_git_dir_runs_in_bound_directory() {
        let fake = FakeBackend::new().respond(&["status"], "clean");
        let git = GitDir::new(&fake, "/repo");
        assert_eq!(git.run(&["status"]).unwrap(), "clean");

        let other = git.at("/elsewhere");
        other.run(&["status"]).unwrap();

        let calls = fake.calls();
        assert_eq!(calls[0].0, PathBuf::from("/repo"));
        assert_eq!(calls[1].0, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_git_command_reports_failure_with_output() {
        if which::which("git").is_err() {
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let git = GitCommand::new(false);
        let err = git.run(dir.path(), &["no-such-subcommand"]).unwrap_err();
        match err {
            Error::Backend { command, output } => {
                assert_eq!(command, "git no-such-subcommand");
                assert!(output.contains("no-such-subcommand"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
