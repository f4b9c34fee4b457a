use super::{Context, GlobalArgs};
use crate::core::worktree::{listing, Worktree};
use crate::git::GitDir;
use crate::log_warning;
use crate::output::{CliOutput, Output};
use crate::styles;
use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::Path;
use tabled::{builder::Builder, settings::Style};

#[derive(Parser)]
#[command(name = "willow ls")]
#[command(version = crate::VERSION)]
#[command(about = "List worktrees, or repos when outside a willow repo")]
#[command(long_about = r#"
Lists the worktrees of the current repository, or of REPO when given, with
their branch, path and age. The age is the time since the worktree
directory last changed: now, Nm, Nh, Nd or Nw.

Outside a willow-managed repository, lists the managed repositories with
the number of worktrees each one has.

Use --json for machine-readable output and --path-only for one path per
line.
"#)]
pub struct Args {
    #[arg(help = "Name of a managed repository")]
    repo: Option<String>,

    #[arg(long, help = "Output in JSON format")]
    json: bool,

    #[arg(long, conflicts_with = "json", help = "Print only worktree paths")]
    path_only: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("ls"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let mut output = CliOutput::new(args.global.output_config());

    let bare_dir = match args.repo.as_deref() {
        Some(name) => Some(ctx.layout.resolve_repo(name)?),
        None => ctx.locate_repo().ok(),
    };

    let Some(bare_dir) = bare_dir else {
        return print_repo_list(&ctx, &mut output);
    };

    let worktrees = listing::list_worktrees(&GitDir::new(&ctx.git, &bare_dir))?;
    if args.path_only {
        print_paths(&worktrees, &mut output);
    } else if args.json {
        output.raw(&format!("{}\n", serde_json::to_string_pretty(&worktrees)?));
    } else {
        print_table(&worktrees, Utc::now(), &mut output);
    }
    Ok(())
}

fn print_paths(worktrees: &[Worktree], output: &mut dyn Output) {
    for wt in worktrees {
        output.raw(&format!("{}\n", wt.path.display()));
    }
}

fn print_table(worktrees: &[Worktree], now: DateTime<Utc>, output: &mut dyn Output) {
    if worktrees.is_empty() {
        output.info("No worktrees found.");
        return;
    }

    let mut builder = Builder::new();
    builder.push_record(["BRANCH", "PATH", "AGE"].map(styles::bold));
    for wt in worktrees {
        let age = worktree_age(&wt.path, now);
        builder.push_record([
            wt.branch.clone(),
            styles::dim(&wt.path.display().to_string()),
            styles::dim(&age),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::blank());
    output.info(&table.to_string());
}

fn print_repo_list(ctx: &Context, output: &mut dyn Output) -> Result<()> {
    let repos = ctx.layout.list_repos()?;
    if repos.is_empty() {
        output.info("No willow-managed repos. Use 'willow clone <url>' to get started.");
        return Ok(());
    }

    let mut builder = Builder::new();
    builder.push_record(["REPO", "WORKTREES"].map(styles::bold));
    for (name, bare_dir) in repos.iter().map(|r| (r, ctx.layout.repo_dir(r))) {
        let worktrees = match listing::list_worktrees(&GitDir::new(&ctx.git, &bare_dir)) {
            Ok(worktrees) => worktrees,
            Err(e) => {
                log_warning!("skipping {name}: {e}");
                continue;
            }
        };
        builder.push_record([name.clone(), worktrees.len().to_string()]);
    }

    let mut table = builder.build();
    table.with(Style::blank());
    output.info(&table.to_string());
    Ok(())
}

/// Age of a worktree directory from its modification time, `?` if unknown.
fn worktree_age(path: &Path, now: DateTime<Utc>) -> String {
    let modified: Option<DateTime<Utc>> = std::fs::metadata(path)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::from);
    match modified {
        Some(modified) => shorthand_from_seconds((now - modified).num_seconds()),
        None => "?".to_string(),
    }
}

/// Convert seconds elapsed into a compact shorthand string.
///
/// Examples: `now`, `5m`, `3h`, `2d`, `3w`.
fn shorthand_from_seconds(secs: i64) -> String {
    let minutes = secs / 60;
    let hours = secs / 3600;
    let days = secs / 86400;

    if minutes < 1 {
        "now".to_string()
    } else if hours < 1 {
        format!("{minutes}m")
    } else if days < 1 {
        format!("{hours}h")
    } else if days < 7 {
        format!("{days}d")
    } else {
        format!("{}w", days / 7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;
    use tempfile::TempDir;

    #[test]
    fn test_shorthand_from_seconds() {
        assert_eq!(shorthand_from_seconds(-5), "now");
        assert_eq!(shorthand_from_seconds(59), "now");
        assert_eq!(shorthand_from_seconds(60), "1m");
        assert_eq!(shorthand_from_seconds(3599), "59m");
        assert_eq!(shorthand_from_seconds(3600), "1h");
        assert_eq!(shorthand_from_seconds(86399), "23h");
        assert_eq!(shorthand_from_seconds(86400), "1d");
        assert_eq!(shorthand_from_seconds(6 * 86400), "6d");
        assert_eq!(shorthand_from_seconds(7 * 86400), "1w");
        assert_eq!(shorthand_from_seconds(100 * 86400), "14w");
    }

    #[test]
    fn test_age_of_missing_directory() {
        assert_eq!(worktree_age(Path::new("/no/such/worktree"), Utc::now()), "?");
    }

    #[test]
    fn test_age_of_fresh_directory() {
        let temp = TempDir::new().unwrap();
        assert_eq!(worktree_age(temp.path(), Utc::now()), "now");
        let later = Utc::now() + chrono::Duration::minutes(181);
        assert_eq!(worktree_age(temp.path(), later), "3h");
    }

    #[test]
    fn test_table_lists_every_worktree() {
        styles::disable_colors();
        let wts = vec![
            Worktree::new("/wt/app/main", "main", "aaa"),
            Worktree::new("/wt/app/featureauth", "feature/auth", "bbb"),
        ];
        let mut output = TestOutput::new();
        print_table(&wts, Utc::now(), &mut output);

        let table = output.infos()[0].to_string();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("BRANCH") && lines[0].contains("AGE"));
        assert!(lines[2].contains("feature/auth") && lines[2].contains("/wt/app/featureauth"));
    }

    #[test]
    fn test_empty_table_message() {
        let mut output = TestOutput::new();
        print_table(&[], Utc::now(), &mut output);
        assert_eq!(output.infos(), vec!["No worktrees found."]);
    }

    #[test]
    fn test_path_only() {
        let wts = vec![
            Worktree::new("/wt/app/main", "main", "aaa"),
            Worktree::new("/wt/app/dev", "dev", "bbb"),
        ];
        let mut output = TestOutput::new();
        print_paths(&wts, &mut output);
        assert_eq!(output.raw_output(), "/wt/app/main\n/wt/app/dev\n");
    }
}
