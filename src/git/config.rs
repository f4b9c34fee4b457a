use super::GitDir;
use crate::error::Result;

impl GitDir<'_> {
    /// Set a git config value.
    pub fn config_set(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", key, value])?;
        Ok(())
    }

    /// Set a git config value in the repository-local (per-worktree checkout) file.
    pub fn config_set_local(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--local", key, value])?;
        Ok(())
    }

    /// Make `git push` create the matching upstream branch on first push.
    pub fn enable_push_auto_setup_remote(&self) -> Result<()> {
        self.config_set_local("push.autoSetupRemote", "true")
    }
}
