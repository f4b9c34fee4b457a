use super::GitDir;
use crate::error::Result;
use std::path::Path;

impl GitDir<'_> {
    pub fn clone_bare(&self, repo_url: &str, target_dir: &Path) -> Result<()> {
        let target = target_dir.to_string_lossy();
        self.run(&["clone", "--bare", repo_url, &target])?;
        Ok(())
    }

    /// Set up the fetch refspec for a remote.
    ///
    /// Bare clones do not configure one, so without it `git fetch` never
    /// populates `refs/remotes/<remote>/*`.
    pub fn setup_fetch_refspec(&self, remote_name: &str) -> Result<()> {
        let refspec = format!("+refs/heads/*:refs/remotes/{remote_name}/*");
        self.config_set(&format!("remote.{remote_name}.fetch"), &refspec)
    }

    /// Fetch a remote, optionally limited to a single refspec.
    pub fn fetch(&self, remote_name: &str, refspec: Option<&str>) -> Result<()> {
        let mut args = vec!["fetch", remote_name];
        if let Some(refspec) = refspec {
            args.push(refspec);
        }
        self.run(&args)?;
        Ok(())
    }
}
