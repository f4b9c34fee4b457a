use super::{Context, GlobalArgs};
use crate::core::worktree::{find_worktree, listing, Worktree};
use crate::git::GitDir;
use crate::output::{CliOutput, Output};
use anyhow::{Context as _, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "willow pwd")]
#[command(version = crate::VERSION)]
#[command(about = "Print the path of a worktree")]
#[command(long_about = r#"
Prints the path of the worktree matching TARGET, so that a shell function
can change into it: cd "$(willow pwd auth)".

Without TARGET, a numbered list of worktrees is shown on stderr and the
path of the chosen one is printed.
"#)]
pub struct Args {
    #[arg(help = "Branch, branch fragment or directory name")]
    target: Option<String>,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("pwd"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let bare_dir = ctx.locate_repo()?;
    let worktrees = listing::list_worktrees(&GitDir::new(&ctx.git, &bare_dir))?;
    let mut output = CliOutput::new(args.global.output_config().on_stderr());

    let chosen = match args.target.as_deref() {
        Some(target) => find_worktree(&worktrees, target)?,
        None => pick(&worktrees, &mut io::stdin().lock(), &mut io::stderr())?,
    };
    output.raw(&format!("{}\n", chosen.path.display()));
    Ok(())
}

/// Show a numbered menu on `out` and read the choice from `input`.
fn pick<'a>(
    worktrees: &'a [Worktree],
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<&'a Worktree> {
    if worktrees.is_empty() {
        anyhow::bail!("no worktrees found");
    }

    for (i, wt) in worktrees.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, wt.branch)?;
    }
    write!(out, "Select worktree [1-{}]: ", worktrees.len())?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read selection")?;
    if read == 0 {
        anyhow::bail!("aborted");
    }

    line.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| worktrees.get(i))
        .ok_or_else(|| anyhow::anyhow!("invalid selection"))
}
