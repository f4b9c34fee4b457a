//! willow: a git worktree manager built on bare repositories.
//!
//! Every repository is cloned bare into `~/.willow/repos/<name>.git` and each
//! branch is checked out into its own directory under
//! `~/.willow/worktrees/<name>/`. The library holds the whole tool; the
//! binary only dispatches to [`commands`].

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod exec;
pub mod git;
pub mod layout;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod styles;
pub mod utils;

/// Clean package version, used by clap's `--version`.
pub const VERSION: &str = env!("WILLOW_VERSION");

/// Version shown by `willow --version`, with the commit for dev builds.
pub const VERSION_DISPLAY: &str = env!("WILLOW_VERSION_DISPLAY");

/// Arguments for the clap parser of `willow <command>`.
///
/// The binary name becomes `willow <command>` so that usage lines and
/// errors name the subcommand, and the subcommand word itself is dropped.
pub fn get_clap_args(command: &str) -> Vec<String> {
    clap_args_from(command, std::env::args())
}

fn clap_args_from(command: &str, args: impl IntoIterator<Item = String>) -> Vec<String> {
    std::iter::once(format!("willow {command}"))
        .chain(args.into_iter().skip(2))
        .collect()
}
