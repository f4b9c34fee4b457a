//! Core logic for the `prune` command.
//!
//! Removes git's bookkeeping for worktrees whose directories are gone,
//! after showing a preview and asking for confirmation.

use crate::core::{ProgressSink, Prompter};
use crate::error::Result;
use crate::git::{GitDir, RepositoryBackend};
use std::path::Path;

/// Input parameters for the prune operation.
pub struct PruneParams {
    /// Only show the preview.
    pub dry_run: bool,
    /// Skip the confirmation.
    pub yes: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PruneOutcome {
    NothingToPrune,
    /// Preview shown, nothing changed.
    DryRun,
    Aborted,
    Pruned,
}

/// Execute the prune operation against the bare repository at `bare_dir`.
pub fn execute<B>(
    params: &PruneParams,
    bare_dir: &Path,
    backend: &dyn RepositoryBackend,
    bridge: &mut B,
) -> Result<PruneOutcome>
where
    B: ProgressSink + Prompter,
{
    let repo = GitDir::new(backend, bare_dir);

    let preview = repo.worktree_prune(true)?;
    if preview.trim().is_empty() {
        return Ok(PruneOutcome::NothingToPrune);
    }
    bridge.on_info(&preview);

    if params.dry_run {
        return Ok(PruneOutcome::DryRun);
    }

    if !params.yes && !bridge.confirm("Prune stale worktrees?")? {
        return Ok(PruneOutcome::Aborted);
    }

    repo.worktree_prune(false)?;
    Ok(PruneOutcome::Pruned)
}
