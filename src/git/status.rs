use super::GitDir;
use crate::error::Result;

impl GitDir<'_> {
    /// Whether the worktree has staged, unstaged or untracked changes.
    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        let status = self.run(&["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    /// Whether `HEAD` has commits that are not on its upstream.
    ///
    /// A branch without an upstream counts as unpushed.
    pub fn has_unpushed_commits(&self) -> bool {
        match self.run(&["rev-list", "--count", "@{upstream}..HEAD"]) {
            Ok(count) => count.trim() != "0",
            Err(_) => true,
        }
    }
}
