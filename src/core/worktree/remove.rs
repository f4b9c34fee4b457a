//! Core logic for the `rm` command.
//!
//! Resolves the target worktree, checks it for work that would be lost,
//! runs the teardown commands, removes the checkout and finally deletes its
//! branch on a best-effort basis.

use super::{listing, matcher};
use crate::config::{self, ConfigSources};
use crate::core::{run_hook_commands, HookRunner, HookStage, ProgressSink, Prompter};
use crate::error::Result;
use crate::git::{GitDir, RepositoryBackend};
use std::path::{Path, PathBuf};

/// Input parameters for the remove operation.
pub struct RemoveParams {
    /// Branch, branch fragment or directory name of the worktree.
    pub target: String,
    /// Skip the safety checks and the confirmation.
    pub force: bool,
    /// Skip the confirmation only.
    pub yes: bool,
    /// Leave the branch in place after removing the worktree.
    pub keep_branch: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed {
        branch: String,
        path: PathBuf,
        branch_deleted: bool,
    },
    /// The user declined the confirmation; nothing was changed.
    Aborted,
}

/// Execute the remove operation against the bare repository at `bare_dir`.
pub fn execute<B>(
    params: &RemoveParams,
    bare_dir: &Path,
    sources: &ConfigSources,
    backend: &dyn RepositoryBackend,
    bridge: &mut B,
) -> Result<RemoveOutcome>
where
    B: HookRunner + ProgressSink + Prompter,
{
    let repo = GitDir::new(backend, bare_dir);

    // MatchTarget
    let worktrees = listing::list_worktrees(&repo)?;
    let wt = matcher::find_worktree(&worktrees, &params.target)?;
    bridge.on_step(&format!("Matched worktree {} at {}", wt.branch, wt.path.display()));
    let config = config::resolve(sources)?;

    // InspectSafety + Confirm
    if !params.force {
        let checkout = repo.at(&wt.path);

        let dirty = checkout.has_uncommitted_changes()?;
        if dirty {
            bridge.on_warning(&format!("Worktree {} has uncommitted changes", wt.branch));
        }
        let unpushed = checkout.has_unpushed_commits();
        if unpushed {
            bridge.on_warning(&format!("Worktree {} has unpushed commits", wt.branch));
        }

        if !params.yes {
            let question = if dirty || unpushed {
                "Remove anyway?".to_string()
            } else {
                format!("Remove worktree {}?", wt.branch)
            };
            if !bridge.confirm(&question)? {
                return Ok(RemoveOutcome::Aborted);
            }
        }
    }

    // RunTeardownHooks
    run_hook_commands(
        bridge,
        HookStage::Teardown,
        &config.teardown,
        &wt.path,
        &wt.branch,
    )?;

    // RemoveWorktree
    bridge.on_step(&format!("Removing worktree {}", wt.path.display()));
    repo.worktree_remove(&wt.path, true)?;

    // DeleteBranch
    let branch_deleted = if params.keep_branch || wt.is_detached() {
        false
    } else {
        match repo.branch_delete(&wt.branch, true) {
            Ok(()) => true,
            Err(e) => {
                bridge.on_warning(&format!("Failed to delete branch {}: {e}", wt.branch));
                false
            }
        }
    };

    Ok(RemoveOutcome::Removed {
        branch: wt.branch.clone(),
        path: wt.path.clone(),
        branch_deleted,
    })
}
