use super::{Context, GlobalArgs};
use crate::config::{self, keys, ConfigSources, TierConfig};
use crate::error::Result as CoreResult;
use crate::git::GitDir;
use crate::output::{CliOutput, Output};
use crate::prompt;
use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "willow init")]
#[command(version = crate::VERSION)]
#[command(about = "Initialize config for a willow-managed repo")]
#[command(long_about = r#"
Asks for the base branch, branch prefix, setup commands and teardown
commands, and writes them to one config file: the repository's local file
by default, the global file with --global, or the current worktree's shared
file with --shared.

Answers default to the values already in the file; the base branch falls
back to the repository's default branch. Separate several commands with
commas.
"#)]
pub struct Args {
    #[arg(long, conflicts_with = "shared", help = "Write ~/.config/willow/config.json")]
    global: bool,

    #[arg(long, help = "Write the shared config tracked in the repository")]
    shared: bool,

    #[command(flatten)]
    global_args: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("init"));
    args.global_args.init();

    let ctx = Context::new(&args.global_args)?;
    let mut output = CliOutput::new(args.global_args.output_config().on_stderr());

    let (path, bare_dir) = if args.global {
        (ctx.layout.global_config().to_path_buf(), None)
    } else {
        let bare_dir = ctx.locate_repo().map_err(|_| {
            anyhow::anyhow!("not inside a willow-managed repo (use --global for global config)")
        })?;
        (target_path(&ctx, &bare_dir, args.shared)?, Some(bare_dir))
    };

    let existing = config::load_tier(&path)?.unwrap_or_default();
    let detected = bare_dir
        .and_then(|bare| GitDir::new(&ctx.git, bare).default_branch().ok())
        .unwrap_or_default();

    let answers = fill(&existing, &detected, prompt::ask)?;
    config::save_tier(&answers, &path)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    output.success(&format!("Config saved to {}", path.display()));
    Ok(())
}

fn target_path(ctx: &Context, bare_dir: &std::path::Path, shared: bool) -> Result<PathBuf> {
    let sources: ConfigSources = ctx.config_sources(Some(bare_dir));
    let path = if shared { sources.shared } else { sources.local };
    path.ok_or_else(|| anyhow::anyhow!("not inside a worktree (run from a worktree to use --shared)"))
}

/// Build the new file contents from the user's answers.
///
/// `ask(label, default)` returns the answer, or `default` when left empty.
/// The `defaults` object of the existing file is carried over untouched.
fn fill<F>(existing: &TierConfig, detected_branch: &str, mut ask: F) -> CoreResult<TierConfig>
where
    F: FnMut(&str, &str) -> CoreResult<String>,
{
    let base_default = config::non_empty(&existing.base_branch).unwrap_or(detected_branch);
    let prefix_default = existing.branch_prefix.clone().unwrap_or_default();
    let setup_default = keys::join_commands(existing.setup.as_deref().unwrap_or_default());
    let teardown_default = keys::join_commands(existing.teardown.as_deref().unwrap_or_default());

    let base = ask("Base branch", base_default)?;
    let prefix = ask("Branch prefix (e.g. your-username)", &prefix_default)?;
    let setup = ask("Setup command (run after creating worktree)", &setup_default)?;
    let teardown = ask("Teardown command (run before removing worktree)", &teardown_default)?;

    Ok(TierConfig {
        base_branch: Some(base).filter(|b| !b.is_empty()),
        branch_prefix: Some(prefix).filter(|p| !p.is_empty()),
        setup: answered_commands(&setup, &setup_default, &existing.setup),
        teardown: answered_commands(&teardown, &teardown_default, &existing.teardown),
        defaults: existing.defaults.clone(),
    })
}

/// An unchanged answer keeps the file's list as it was, including an
/// explicit `[]`; a new answer is split, and an empty one means absent.
fn answered_commands(
    answer: &str,
    offered: &str,
    existing: &Option<Vec<String>>,
) -> Option<Vec<String>> {
    if answer == offered {
        return existing.clone();
    }
    Some(keys::split_commands(answer)).filter(|c| !c.is_empty())
}
