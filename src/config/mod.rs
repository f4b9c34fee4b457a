//! Layered willow configuration.
//!
//! Three JSON tiers are read in order, global, shared and local, and folded
//! onto hard-coded defaults:
//!
//! - **global**: `~/.config/willow/config.json`, per user
//! - **shared**: `<worktree>/.willow/config.json`, committed with the project
//! - **local**: `<bare repo>/willow.json`, private to this clone
//!
//! Every tier field is optional so that "absent" can be told apart from an
//! explicit value. Strings only override when non-empty; lists and booleans
//! override whenever the tier states them, so `"setup": []` clears inherited
//! setup commands.

pub mod keys;
mod store;

pub use store::{load_tier, save_tier};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Hard-coded defaults applied before any tier.
pub mod defaults {
    /// Fetch the base branch before creating a worktree.
    pub const FETCH: bool = true;

    /// Configure `push.autoSetupRemote` in new worktrees.
    pub const AUTO_SETUP_REMOTE: bool = true;
}

/// Raw contents of one config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teardown: Option<Vec<String>>,

    #[serde(default)]
    pub defaults: TierDefaults,
}

/// The `defaults` object of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_setup_remote: Option<bool>,
}

/// Fully resolved configuration for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub base_branch: Option<String>,
    pub branch_prefix: Option<String>,
    pub setup: Vec<String>,
    pub teardown: Vec<String>,
    pub fetch: bool,
    pub auto_setup_remote: bool,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            base_branch: None,
            branch_prefix: None,
            setup: Vec::new(),
            teardown: Vec::new(),
            fetch: defaults::FETCH,
            auto_setup_remote: defaults::AUTO_SETUP_REMOTE,
        }
    }
}

impl EffectiveConfig {
    /// Overlay one tier onto this configuration.
    pub fn merge(&mut self, overlay: &TierConfig) {
        if let Some(base) = non_empty(&overlay.base_branch) {
            self.base_branch = Some(base.to_string());
        }
        if let Some(prefix) = non_empty(&overlay.branch_prefix) {
            self.branch_prefix = Some(prefix.to_string());
        }
        if let Some(setup) = &overlay.setup {
            self.setup = setup.clone();
        }
        if let Some(teardown) = &overlay.teardown {
            self.teardown = teardown.clone();
        }
        if let Some(fetch) = overlay.defaults.fetch {
            self.fetch = fetch;
        }
        if let Some(auto) = overlay.defaults.auto_setup_remote {
            self.auto_setup_remote = auto;
        }
    }

    /// Fold tiers, lowest precedence first, onto the defaults.
    pub fn from_tiers<'a>(tiers: impl IntoIterator<Item = &'a TierConfig>) -> Self {
        let mut config = Self::default();
        for tier in tiers {
            config.merge(tier);
        }
        config
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Configuration tier, in ascending precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Global,
    Shared,
    Local,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Global => "global",
            Tier::Shared => "shared",
            Tier::Local => "local",
        })
    }
}

/// Locations of the three config files for one invocation.
///
/// `shared` and `local` are absent when the command runs outside a worktree
/// or outside a managed repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSources {
    pub global: PathBuf,
    pub shared: Option<PathBuf>,
    pub local: Option<PathBuf>,
}

impl ConfigSources {
    pub fn new(global: impl Into<PathBuf>) -> Self {
        Self {
            global: global.into(),
            shared: None,
            local: None,
        }
    }

    /// Shared tier for the worktree rooted at `worktree_root`.
    pub fn with_shared(mut self, worktree_root: &Path) -> Self {
        self.shared = Some(shared_config_path(worktree_root));
        self
    }

    /// Local tier for the bare repository at `bare_dir`.
    pub fn with_local(mut self, bare_dir: &Path) -> Self {
        self.local = Some(local_config_path(bare_dir));
        self
    }

    pub fn path(&self, tier: Tier) -> Option<&Path> {
        match tier {
            Tier::Global => Some(&self.global),
            Tier::Shared => self.shared.as_deref(),
            Tier::Local => self.local.as_deref(),
        }
    }

    /// The tiers that have a location, in precedence order.
    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &Path)> {
        [Tier::Global, Tier::Shared, Tier::Local]
            .into_iter()
            .filter_map(|tier| self.path(tier).map(|path| (tier, path)))
    }

    /// Read every tier file that exists.
    pub fn load(&self) -> Result<Vec<(Tier, TierConfig)>> {
        let mut loaded = Vec::new();
        for (tier, path) in self.tiers() {
            if let Some(config) = load_tier(path)? {
                loaded.push((tier, config));
            }
        }
        Ok(loaded)
    }
}

pub fn shared_config_path(worktree_root: &Path) -> PathBuf {
    worktree_root.join(".willow").join("config.json")
}

pub fn local_config_path(bare_dir: &Path) -> PathBuf {
    bare_dir.join("willow.json")
}

/// Merge the tier files named by `sources` onto the defaults.
///
/// A missing file is an absent tier. A file that exists but is not valid
/// JSON is an error.
pub fn resolve(sources: &ConfigSources) -> Result<EffectiveConfig> {
    let tiers = sources.load()?;
    Ok(EffectiveConfig::from_tiers(tiers.iter().map(|(_, c)| c)))
}
