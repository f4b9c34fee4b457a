//! On-disk layout of the willow root directory.
//!
//! ```text
//! <root>/repos/<name>.git          bare repositories
//! <root>/worktrees/<name>/<dir>    working copies, <dir> = branch without '/'
//! ```
//!
//! The root is resolved once by the command layer and passed down; nothing
//! below this module reads the environment for it.

use crate::config::ConfigSources;
use crate::error::{Error, Result};
use crate::git::GitDir;
use crate::utils::validate_repo_name;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Environment variable overriding the root directory.
pub const HOME_ENV: &str = "WILLOW_HOME";

/// Suffix of bare repository directories under `repos/`.
const BARE_SUFFIX: &str = ".git";

pub const NOT_MANAGED: &str = "not inside a willow-managed repo\n\nRun this command from a worktree under ~/.willow, or use 'willow ls' to see your repos.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    global_config: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, global_config: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_config: global_config.into(),
        }
    }

    /// `$WILLOW_HOME` or `~/.willow`, with the global config under
    /// `~/.config/willow/config.json`.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::NotFound("could not determine home directory".into()))?;
        let root = match env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => home.join(".willow"),
        };
        let global_config = home.join(".config").join("willow").join("config.json");
        Ok(Self::new(root, global_config))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn global_config(&self) -> &Path {
        &self.global_config
    }

    pub fn repos_dir(&self) -> PathBuf {
        self.root.join("repos")
    }

    pub fn worktrees_dir(&self) -> PathBuf {
        self.root.join("worktrees")
    }

    pub fn repo_dir(&self, name: &str) -> PathBuf {
        self.repos_dir().join(format!("{name}{BARE_SUFFIX}"))
    }

    pub fn worktree_root(&self, name: &str) -> PathBuf {
        self.worktrees_dir().join(name)
    }

    /// Where the worktree for `branch` of repo `name` lives.
    pub fn worktree_path(&self, name: &str, branch: &str) -> PathBuf {
        self.worktree_root(name).join(dir_name_for_branch(branch))
    }

    /// Config sources with only the global tier set.
    pub fn config_sources(&self) -> ConfigSources {
        ConfigSources::new(&self.global_config)
    }

    /// Names of all managed repositories, sorted.
    pub fn list_repos(&self) -> Result<Vec<String>> {
        let repos_dir = self.repos_dir();
        let entries = match fs::read_dir(&repos_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(Error::io(
                    format!("Failed to read {}", repos_dir.display()),
                    e,
                ))
            }
        };

        let mut repos: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix(BARE_SUFFIX))
                    .map(str::to_string)
            })
            .collect();
        repos.sort();
        Ok(repos)
    }

    /// Bare directory of the managed repo called `name`.
    pub fn resolve_repo(&self, name: &str) -> Result<PathBuf> {
        let dir = self.repo_dir(name);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::NotFound(format!(
                "repo {name:?} not found in {}",
                self.repos_dir().display()
            )))
        }
    }

    /// Whether `bare_dir` lives under `<root>/repos/`, symlinks resolved.
    pub fn is_managed_repo(&self, bare_dir: &Path) -> bool {
        let repos = canonical(&self.repos_dir());
        let bare = canonical(bare_dir);
        bare != repos && bare.starts_with(&repos)
    }

    /// Repo implied by standing in `<root>/worktrees/<name>[/...]` when that
    /// directory is not itself a checkout.
    pub fn repo_from_dir(&self, dir: &Path) -> Option<PathBuf> {
        let worktrees = canonical(&self.worktrees_dir());
        let dir = canonical(dir);
        let rest = dir.strip_prefix(&worktrees).ok()?;
        match rest.components().next()? {
            Component::Normal(name) => self.resolve_repo(name.to_str()?).ok(),
            _ => None,
        }
    }

    /// Find the managed bare repository for the directory `git` is bound to.
    pub fn locate_repo(&self, git: &GitDir) -> Result<PathBuf> {
        if let Ok(common) = git.git_common_dir() {
            let bare = canonical(&common);
            if self.is_managed_repo(&bare) {
                return Ok(bare);
            }
        }
        self.repo_from_dir(git.dir())
            .ok_or_else(|| Error::NotARepository(NOT_MANAGED.to_string()))
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// `~/.willow/repos/app.git` → `app`.
pub fn repo_name_from_dir(bare_dir: &Path) -> String {
    let name = bare_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(BARE_SUFFIX)
        .map(str::to_string)
        .unwrap_or(name)
}

/// Repository name from a clone URL: the last path segment without `.git`.
///
/// Handles `https://host/org/repo.git`, `git@host:org/repo.git` and local
/// paths.
pub fn repo_name_from_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed
        .rsplit(|c| c == '/' || c == ':')
        .next()
        .unwrap_or(trimmed);
    let name = segment.strip_suffix(BARE_SUFFIX).unwrap_or(segment);

    validate_repo_name(name).map_err(|_| {
        Error::Usage(format!(
            "could not determine repository name from {url:?}; pass a name explicitly"
        ))
    })?;
    Ok(name.to_string())
}

/// Directory name for a branch: the branch with every `/` removed.
pub fn dir_name_for_branch(branch: &str) -> String {
    branch.replace('/', "")
}

/// Prefix `branch` with `<prefix>/` unless it already carries it.
pub fn apply_branch_prefix(branch: &str, prefix: Option<&str>) -> String {
    match prefix.filter(|p| !p.is_empty()) {
        Some(prefix) if !branch.starts_with(&format!("{prefix}/")) => {
            format!("{prefix}/{branch}")
        }
        _ => branch.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::fake::FakeBackend;
    use serial_test::serial;
    use tempfile::TempDir;

    fn layout(temp: &TempDir) -> Layout {
        Layout::new(temp.path().join("root"), temp.path().join("config.json"))
    }

    #[test]
    fn test_paths() {
        let layout = Layout::new("/h/.willow", "/h/.config/willow/config.json");
        assert_eq!(layout.repo_dir("app"), PathBuf::from("/h/.willow/repos/app.git"));
        assert_eq!(
            layout.worktree_path("app", "feature/auth"),
            PathBuf::from("/h/.willow/worktrees/app/featureauth")
        );
        assert_eq!(
            layout.config_sources().global,
            PathBuf::from("/h/.config/willow/config.json")
        );
    }

    #[test]
    fn test_repo_name_from_url() {
        assert_eq!(repo_name_from_url("https://github.com/org/app.git").unwrap(), "app");
        assert_eq!(repo_name_from_url("git@github.com:org/app.git").unwrap(), "app");
        assert_eq!(repo_name_from_url("git@github.com:app.git").unwrap(), "app");
        assert_eq!(repo_name_from_url("https://github.com/org/app/").unwrap(), "app");
        assert_eq!(repo_name_from_url("/srv/git/tool").unwrap(), "tool");
        assert!(repo_name_from_url("https://github.com/org/..").is_err());
        assert!(repo_name_from_url("").is_err());
    }

    #[test]
    fn test_dir_name_strips_separators() {
        assert_eq!(dir_name_for_branch("main"), "main");
        assert_eq!(dir_name_for_branch("alice/feature/auth"), "alicefeatureauth");
    }

    #[test]
    fn test_branch_prefix_is_idempotent() {
        assert_eq!(apply_branch_prefix("auth", Some("alice")), "alice/auth");
        assert_eq!(apply_branch_prefix("alice/auth", Some("alice")), "alice/auth");
        let once = apply_branch_prefix("auth", Some("alice"));
        assert_eq!(apply_branch_prefix(&once, Some("alice")), once);
        assert_eq!(apply_branch_prefix("aliceauth", Some("alice")), "alice/aliceauth");
        assert_eq!(apply_branch_prefix("auth", Some("")), "auth");
        assert_eq!(apply_branch_prefix("auth", None), "auth");
    }

    #[test]
    fn test_repo_name_from_dir() {
        assert_eq!(repo_name_from_dir(Path::new("/r/repos/app.git")), "app");
        assert_eq!(repo_name_from_dir(Path::new("/r/repos/plain")), "plain");
    }

    #[test]
    fn test_list_and_resolve_repos() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        assert!(layout.list_repos().unwrap().is_empty());

        fs::create_dir_all(layout.repo_dir("zeta")).unwrap();
        fs::create_dir_all(layout.repo_dir("alpha")).unwrap();
        fs::create_dir_all(layout.repos_dir().join("not-a-repo")).unwrap();
        fs::write(layout.repos_dir().join("file.git"), "").unwrap();

        assert_eq!(layout.list_repos().unwrap(), vec!["alpha", "zeta"]);
        assert_eq!(layout.resolve_repo("alpha").unwrap(), layout.repo_dir("alpha"));
        assert!(matches!(layout.resolve_repo("missing"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_is_managed_repo() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        fs::create_dir_all(layout.repo_dir("app")).unwrap();
        fs::create_dir_all(temp.path().join("elsewhere.git")).unwrap();

        assert!(layout.is_managed_repo(&layout.repo_dir("app")));
        assert!(!layout.is_managed_repo(&temp.path().join("elsewhere.git")));
        assert!(!layout.is_managed_repo(&layout.repos_dir()));
    }

    #[test]
    fn test_locate_repo_from_common_dir() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let bare = layout.repo_dir("app");
        fs::create_dir_all(&bare).unwrap();

        let reported = bare.to_string_lossy().into_owned();
        let fake = FakeBackend::new().respond(&["rev-parse", "--git-common-dir"], &reported);
        let git = GitDir::new(&fake, temp.path());
        assert_eq!(layout.locate_repo(&git).unwrap(), bare.canonicalize().unwrap());
    }

    #[test]
    fn test_locate_repo_from_worktrees_dir() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        fs::create_dir_all(layout.repo_dir("app")).unwrap();
        let wt_root = layout.worktree_root("app");
        fs::create_dir_all(&wt_root).unwrap();

        let fake = FakeBackend::new().fail(&["rev-parse"], "fatal: not a git repository");
        let git = GitDir::new(&fake, &wt_root);
        assert_eq!(layout.locate_repo(&git).unwrap(), layout.repo_dir("app"));
    }

    #[test]
    fn test_locate_repo_outside_root() {
        let temp = TempDir::new().unwrap();
        let layout = layout(&temp);
        let fake = FakeBackend::new().fail(&["rev-parse"], "fatal: not a git repository");
        let git = GitDir::new(&fake, temp.path());
        let err = layout.locate_repo(&git).unwrap_err();
        assert!(matches!(err, Error::NotARepository(_)));
        assert!(err.to_string().starts_with("not inside a willow-managed repo"));
    }

    #[test]
    #[serial]
    fn test_from_env_honours_willow_home() {
        let temp = TempDir::new().unwrap();
        let previous = env::var_os(HOME_ENV);
        env::set_var(HOME_ENV, temp.path());
        let layout = Layout::from_env();
        match previous {
            Some(value) => env::set_var(HOME_ENV, value),
            None => env::remove_var(HOME_ENV),
        }

        let layout = layout.unwrap();
        assert_eq!(layout.root(), temp.path());
        assert_eq!(layout.repo_dir("app"), temp.path().join("repos").join("app.git"));
        assert!(layout
            .global_config()
            .ends_with(Path::new(".config").join("willow").join("config.json")));
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_empty_willow_home() {
        let previous = env::var_os(HOME_ENV);
        env::set_var(HOME_ENV, "");
        let layout = Layout::from_env();
        match previous {
            Some(value) => env::set_var(HOME_ENV, value),
            None => env::remove_var(HOME_ENV),
        }

        assert!(layout.unwrap().root().ends_with(".willow"));
    }
}
