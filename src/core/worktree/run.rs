//! Core logic for the `run` command: run a program in one worktree or in
//! every worktree of the repository.

use super::{listing, matcher};
use crate::core::ProgressSink;
use crate::error::{Error, Result};
use crate::git::{GitDir, RepositoryBackend};
use std::path::Path;

const USAGE: &str = "Usage: willow run <branch> -- <command...>\n       willow run --all -- <command...>";

/// Parsed `run` arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct RunRequest {
    pub all: bool,
    pub target: Option<String>,
    /// Program and arguments, everything after `--`.
    pub command: Vec<String>,
}

/// Split raw arguments at the first `--` into selector and command.
///
/// Before the terminator, `--all` selects every worktree and any other word
/// is the target. An empty command is an error, as is a missing target
/// without `--all`.
pub fn split_run_args(args: &[String]) -> Result<RunRequest> {
    let mut all = false;
    let mut target = None;
    let mut command = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            command = args[i + 1..].to_vec();
            break;
        }
        if arg == "--all" {
            all = true;
        } else {
            target = Some(arg.clone());
        }
    }

    if command.is_empty() {
        return Err(Error::Usage(format!(
            "no command specified after --\n\n{USAGE}"
        )));
    }
    if !all && target.is_none() {
        return Err(Error::Usage(format!("branch name is required\n\n{USAGE}")));
    }

    Ok(RunRequest {
        all,
        target: if all { None } else { target },
        command,
    })
}

/// Run the requested command.
///
/// With `--all` the command runs once per worktree in listing order; a
/// failure is reported and the loop continues, and the operation fails at
/// the end naming every worktree that failed. Otherwise the target is
/// resolved first and the command runs once.
pub fn execute<F>(
    request: &RunRequest,
    bare_dir: &Path,
    backend: &dyn RepositoryBackend,
    mut run_in: F,
    progress: &mut dyn ProgressSink,
) -> Result<()>
where
    F: FnMut(&[String], &Path) -> Result<()>,
{
    let worktrees = listing::list_worktrees(&GitDir::new(backend, bare_dir))?;

    if !request.all {
        let target = request.target.as_deref().unwrap_or_default();
        let wt = matcher::find_worktree(&worktrees, target)?;
        progress.on_step(&format!("Running in {}", wt.path.display()));
        return run_in(&request.command, &wt.path);
    }

    let mut failed = Vec::new();
    for wt in &worktrees {
        progress.on_info(&format!("==> {}", wt.branch));
        if let Err(e) = run_in(&request.command, &wt.path) {
            progress.on_warning(&format!("command failed in {}: {e}", wt.branch));
            failed.push(wt.branch.clone());
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::RunFailed {
            failed,
            total: worktrees.len(),
        })
    }
}
