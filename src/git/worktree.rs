use super::GitDir;
use crate::error::Result;
use std::path::Path;

impl GitDir<'_> {
    /// Raw `git worktree list --porcelain` output.
    pub fn worktree_list_porcelain(&self) -> Result<String> {
        self.run(&["worktree", "list", "--porcelain"])
    }

    /// Check out an existing branch into a new worktree.
    pub fn worktree_add(&self, path: &Path, branch: &str) -> Result<()> {
        let path = path.to_string_lossy();
        self.run(&["worktree", "add", &path, branch])?;
        Ok(())
    }

    /// Create `new_branch` from `start_point` and check it out into a new worktree.
    pub fn worktree_add_new_branch(
        &self,
        path: &Path,
        new_branch: &str,
        start_point: &str,
    ) -> Result<()> {
        let path = path.to_string_lossy();
        self.run(&["worktree", "add", &path, "-b", new_branch, start_point])?;
        Ok(())
    }

    pub fn worktree_remove(&self, path: &Path, force: bool) -> Result<()> {
        let path = path.to_string_lossy();
        let mut args = vec!["worktree", "remove"];
        if force {
            args.push("--force");
        }
        args.push(&path);
        self.run(&args)?;
        Ok(())
    }

    /// Preview (`dry_run`) or perform removal of stale worktree bookkeeping.
    ///
    /// Returns git's verbose report of the affected entries.
    pub fn worktree_prune(&self, dry_run: bool) -> Result<String> {
        if dry_run {
            self.run(&["worktree", "prune", "--dry-run", "-v"])
        } else {
            self.run(&["worktree", "prune", "-v"])
        }
    }
}
