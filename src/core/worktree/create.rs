//! Core logic for the `new` command.
//!
//! Creates a worktree for a new or existing branch under
//! `<root>/worktrees/<repo>/`, then runs the configured setup commands in
//! it. A failing setup command fails the operation but leaves the worktree
//! in place for inspection.

use super::listing;
use crate::config::{self, ConfigSources};
use crate::core::{run_hook_commands, HookRunner, HookStage, ProgressSink};
use crate::error::{Error, Result};
use crate::git::{GitDir, RepositoryBackend};
use crate::layout::{apply_branch_prefix, repo_name_from_dir, Layout};
use crate::utils::validate_branch_name;
use std::path::{Path, PathBuf};

const REMOTE: &str = "origin";

/// Input parameters for the create operation.
pub struct CreateParams {
    /// Branch name as typed; the configured prefix is applied to it.
    pub branch: String,
    /// Base branch override.
    pub base: Option<String>,
    /// Check out an existing branch instead of creating one.
    pub existing: bool,
    /// Skip fetching the base branch even if configured.
    pub no_fetch: bool,
}

/// Result of a create operation.
#[derive(Debug)]
pub struct CreateResult {
    pub branch: String,
    pub base_branch: String,
    pub worktree_path: PathBuf,
    pub existing: bool,
}

/// Execute the create operation against the bare repository at `bare_dir`.
pub fn execute<B>(
    params: &CreateParams,
    layout: &Layout,
    bare_dir: &Path,
    sources: &ConfigSources,
    backend: &dyn RepositoryBackend,
    bridge: &mut B,
) -> Result<CreateResult>
where
    B: HookRunner + ProgressSink,
{
    // ResolveConfig
    let config = config::resolve(sources)?;
    bridge.on_debug(&format!(
        "fetch={}, autoSetupRemote={}, {} setup command(s)",
        config.fetch,
        config.auto_setup_remote,
        config.setup.len()
    ));

    // ApplyPrefix
    let branch = apply_branch_prefix(&params.branch, config.branch_prefix.as_deref());
    validate_branch_name(&branch)?;
    if branch != params.branch {
        bridge.on_step(&format!("Applied branch prefix: '{branch}'"));
    }

    // ResolveBaseBranch
    let repo = GitDir::new(backend, bare_dir);
    let base_branch = match params
        .base
        .clone()
        .filter(|b| !b.is_empty())
        .or_else(|| config.base_branch.clone())
    {
        Some(base) => base,
        None => repo.default_branch().map_err(|e| match e {
            Error::Backend { command, output } => Error::Backend {
                command,
                output: format!(
                    "{output}\nfailed to detect default branch (use --base to specify)"
                ),
            },
            other => other,
        })?,
    };
    bridge.on_step(&format!("Base branch: '{base_branch}'"));

    // FetchBase
    if config.fetch && !params.no_fetch {
        bridge.on_info(&format!("Fetching {base_branch} from {REMOTE}..."));
        repo.fetch(REMOTE, Some(&base_branch))?;
    }

    // ComputeDirName
    let repo_name = repo_name_from_dir(bare_dir);
    let worktree_path = layout.worktree_path(&repo_name, &branch);
    check_collision(&repo, &branch, &worktree_path)?;

    // CreateWorktree
    if params.existing {
        bridge.on_info(&format!(
            "Creating worktree for existing branch {branch}..."
        ));
        repo.worktree_add(&worktree_path, &branch)?;
    } else {
        let start_point = format!("{REMOTE}/{base_branch}");
        bridge.on_info(&format!("Creating worktree {branch} from {start_point}..."));
        repo.worktree_add_new_branch(&worktree_path, &branch, &start_point)?;
    }

    // ConfigureUpstream
    if config.auto_setup_remote {
        bridge.on_step("Enabling push.autoSetupRemote");
        repo.at(&worktree_path).enable_push_auto_setup_remote()?;
    }

    // RunSetupHooks
    run_hook_commands(
        bridge,
        HookStage::Setup,
        &config.setup,
        &worktree_path,
        &branch,
    )?;

    Ok(CreateResult {
        branch,
        base_branch,
        worktree_path,
        existing: params.existing,
    })
}

/// Refuse a directory that exists on disk or belongs to another worktree.
///
/// Branch names map many-to-one onto directory names (`a/b` and `ab` both
/// become `ab`), so this is the only guard against reusing a directory.
fn check_collision(repo: &GitDir, branch: &str, worktree_path: &Path) -> Result<()> {
    let owner = listing::list_all(repo)?
        .into_iter()
        .find(|wt| wt.path == worktree_path)
        .map(|wt| wt.branch);

    if owner.is_some() || worktree_path.exists() {
        return Err(Error::DirectoryCollision {
            branch: branch.to_string(),
            path: worktree_path.to_path_buf(),
            owner,
        });
    }
    Ok(())
}
