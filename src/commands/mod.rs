//! Command modules for willow.
//!
//! Each module holds the clap `Args` of one subcommand and a `run()` entry
//! point that parses them, calls into `core`, and renders the result.

pub mod clone;
pub mod config;
pub mod docs;
pub mod init;
pub mod list;
pub mod new;
pub mod prune;
pub mod pwd;
pub mod remove;
pub mod run;

use crate::config::ConfigSources;
use crate::git::{GitCommand, GitDir};
use crate::layout::Layout;
use crate::logging::init_logging;
use crate::output::OutputConfig;
use crate::styles;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use which::which;

/// Flags accepted by every subcommand.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    #[arg(
        short = 'C',
        value_name = "PATH",
        env = "WILLOW_DIR",
        help = "Run as if willow was started in PATH"
    )]
    pub dir: Option<PathBuf>,

    #[arg(short, long, help = "Be verbose; show detailed progress")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Operate quietly; suppress progress reporting"
    )]
    pub quiet: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

impl GlobalArgs {
    /// Apply the process-wide settings (log level, colors).
    pub fn init(&self) {
        init_logging(self.verbose);
        if self.no_color {
            styles::disable_colors();
        }
    }

    pub fn output_config(&self) -> OutputConfig {
        OutputConfig::new(self.quiet, self.verbose)
    }
}

/// Everything a command needs to reach the repository it runs against.
pub struct Context {
    pub layout: Layout,
    pub git: GitCommand,
    pub cwd: PathBuf,
}

impl Context {
    pub fn new(global: &GlobalArgs) -> Result<Self> {
        let cwd = match &global.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        if !cwd.is_dir() {
            anyhow::bail!("cannot change to '{}': no such directory", cwd.display());
        }
        which("git").context("git is required but was not found in PATH")?;
        Ok(Self {
            layout: Layout::from_env()?,
            git: GitCommand::new(global.verbose),
            cwd,
        })
    }

    /// Git bound to the directory the command runs in.
    pub fn git_dir(&self) -> GitDir<'_> {
        GitDir::new(&self.git, &self.cwd)
    }

    /// Bare directory of the managed repo for the working directory.
    pub fn locate_repo(&self) -> Result<PathBuf> {
        Ok(self.layout.locate_repo(&self.git_dir())?)
    }

    /// The named repo if given, otherwise the one around the working
    /// directory.
    pub fn repo_or_current(&self, name: Option<&str>) -> Result<PathBuf> {
        match name {
            Some(name) => Ok(self.layout.resolve_repo(name)?),
            None => self.locate_repo(),
        }
    }

    /// Config tiers for this invocation.
    ///
    /// The shared tier belongs to the checkout containing the working
    /// directory, if any; the local tier to `bare_dir`.
    pub fn config_sources(&self, bare_dir: Option<&Path>) -> ConfigSources {
        let mut sources = self.layout.config_sources();
        if let Ok(toplevel) = self.git_dir().show_toplevel() {
            sources = sources.with_shared(&toplevel);
        }
        if let Some(bare) = bare_dir {
            sources = sources.with_local(bare);
        }
        sources
    }
}
