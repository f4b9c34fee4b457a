use super::GitDir;
use crate::error::Result;
use std::path::PathBuf;

/// Namespace prefix of local branch references.
pub const HEADS_PREFIX: &str = "refs/heads/";

impl GitDir<'_> {
    /// Branch that `HEAD` points to, without the `refs/heads/` prefix.
    ///
    /// In a bare repository this is the default branch of the remote it was
    /// cloned from.
    pub fn default_branch(&self) -> Result<String> {
        let reference = self.run(&["symbolic-ref", "HEAD"])?;
        Ok(reference
            .strip_prefix(HEADS_PREFIX)
            .unwrap_or(&reference)
            .to_string())
    }

    /// The shared git directory, resolved against the bound directory when
    /// git reports it relative (e.g. `.` inside a bare repository).
    pub fn git_common_dir(&self) -> Result<PathBuf> {
        let raw = self.run(&["rev-parse", "--git-common-dir"])?;
        let path = PathBuf::from(raw);
        Ok(if path.is_absolute() {
            path
        } else {
            self.dir().join(path)
        })
    }

    /// Top-level directory of the worktree containing the bound directory.
    pub fn show_toplevel(&self) -> Result<PathBuf> {
        self.run(&["rev-parse", "--show-toplevel"]).map(PathBuf::from)
    }
}
