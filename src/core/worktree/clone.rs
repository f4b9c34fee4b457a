//! Core logic for the `clone` command.
//!
//! Clones a repository as a bare repo under `<root>/repos/` and checks out
//! its default branch as the first worktree under `<root>/worktrees/<name>/`.
//! Once the bare clone exists, any later failure removes everything this
//! operation created.

use crate::config;
use crate::core::{run_hook_commands, HookRunner, HookStage, ProgressSink};
use crate::error::{Error, Result};
use crate::git::{GitDir, RepositoryBackend};
use crate::layout::{repo_name_from_url, Layout};
use crate::utils::{create_directory, remove_directory, validate_repo_name};
use std::path::{Path, PathBuf};

const REMOTE: &str = "origin";

/// Input parameters for the clone operation.
pub struct CloneParams {
    /// The repository URL to clone.
    pub url: String,
    /// Directory name under `repos/`; derived from the URL when absent.
    pub name: Option<String>,
    /// Replace an existing clone of the same name.
    pub force: bool,
}

/// Result of a clone operation.
#[derive(Debug)]
pub struct CloneResult {
    pub repo_name: String,
    pub bare_dir: PathBuf,
    pub default_branch: String,
    pub worktree_path: PathBuf,
}

/// Paths created so far, deleted newest first if a later step fails.
#[derive(Default)]
struct CreatedResources {
    paths: Vec<PathBuf>,
}

impl CreatedResources {
    fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    fn rollback(self, progress: &mut dyn ProgressSink) {
        for path in self.paths.into_iter().rev() {
            progress.on_step(&format!("Removing {}", path.display()));
            if let Err(e) = remove_directory(&path) {
                progress.on_warning(&format!("Cleanup incomplete: {e}"));
            }
        }
    }
}

/// Execute the clone operation.
pub fn execute<B>(
    params: &CloneParams,
    layout: &Layout,
    backend: &dyn RepositoryBackend,
    bridge: &mut B,
) -> Result<CloneResult>
where
    B: HookRunner + ProgressSink,
{
    let repo_name = match &params.name {
        Some(name) => {
            validate_repo_name(name)?;
            name.clone()
        }
        None => repo_name_from_url(&params.url)?,
    };
    bridge.on_step(&format!("Repository name detected: '{repo_name}'"));

    let bare_dir = layout.repo_dir(&repo_name);
    let worktree_root = layout.worktree_root(&repo_name);

    // CheckDest: both directories must be ours to roll back.
    if let Some(taken) = [&bare_dir, &worktree_root].into_iter().find(|p| p.exists()) {
        if !params.force {
            return Err(Error::AlreadyExists {
                name: repo_name,
                path: taken.clone(),
            });
        }
        bridge.on_warning(&format!(
            "Replacing existing repository at {}",
            taken.display()
        ));
        remove_directory(&bare_dir)?;
        remove_directory(&worktree_root)?;
    }

    // CreateDirs
    let mut created = CreatedResources::default();
    create_directory(&layout.repos_dir())?;
    create_directory(&worktree_root)?;
    created.track(worktree_root.clone());

    // BareClone: nothing of ours exists yet inside the bare dir, so a
    // failure here only undoes the directories created above.
    bridge.on_info(&format!("Cloning {} into {}...", params.url, bare_dir.display()));
    let git = GitDir::new(backend, layout.repos_dir());
    if let Err(e) = git.clone_bare(&params.url, &bare_dir) {
        created.rollback(bridge);
        return Err(e);
    }
    created.track(bare_dir.clone());

    let checkout = checkout_default_branch(&git.at(&bare_dir), layout, &repo_name, bridge);

    let (default_branch, worktree_path) = match checkout {
        Ok(done) => done,
        Err(e) => {
            created.rollback(bridge);
            return Err(e);
        }
    };

    run_post_checkout(layout, &bare_dir, &worktree_path, &default_branch, bridge);

    Ok(CloneResult {
        repo_name,
        bare_dir,
        default_branch,
        worktree_path,
    })
}

/// ConfigureFetch → FetchOrigin → DetectDefaultBranch → CreateInitialWorktree.
fn checkout_default_branch(
    repo: &GitDir,
    layout: &Layout,
    repo_name: &str,
    progress: &mut dyn ProgressSink,
) -> Result<(String, PathBuf)> {
    progress.on_step("Setting up fetch refspec for remote tracking...");
    repo.setup_fetch_refspec(REMOTE)?;

    progress.on_info(&format!("Fetching latest from {REMOTE}..."));
    repo.fetch(REMOTE, None)?;

    let default_branch = repo.default_branch()?;
    progress.on_step(&format!("Default branch detected: '{default_branch}'"));

    let worktree_path = layout.worktree_path(repo_name, &default_branch);
    progress.on_info(&format!(
        "Creating worktree {default_branch} at {}...",
        worktree_path.display()
    ));
    repo.worktree_add(&worktree_path, &default_branch)?;

    Ok((default_branch, worktree_path))
}

/// Run the effective setup commands in the fresh checkout. Failures are
/// reported and otherwise ignored; the clone is already complete.
fn run_post_checkout<B>(
    layout: &Layout,
    bare_dir: &Path,
    worktree_path: &Path,
    branch: &str,
    bridge: &mut B,
) where
    B: HookRunner + ProgressSink,
{
    let sources = layout
        .config_sources()
        .with_shared(worktree_path)
        .with_local(bare_dir);

    let result = config::resolve(&sources).and_then(|cfg| {
        run_hook_commands(
            bridge,
            HookStage::PostCheckout,
            &cfg.setup,
            worktree_path,
            branch,
        )
    });

    if let Err(e) = result {
        bridge.on_warning(&format!("post-checkout hook failed: {e}"));
    }
}
