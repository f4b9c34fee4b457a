use super::{Context, GlobalArgs};
use crate::core::worktree::run::{self, split_run_args};
use crate::core::OutputSink;
use crate::exec::run_program;
use crate::output::CliOutput;
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "willow run")]
#[command(version = crate::VERSION)]
#[command(about = "Run a command in one or all worktrees")]
#[command(override_usage = "willow run <TARGET> -- <COMMAND>...\n       willow run --all -- <COMMAND>...")]
#[command(long_about = r#"
Runs COMMAND inside the worktree matching TARGET, or with --all inside every
worktree of the repository in turn. Everything after `--` is the command;
it is executed directly, without a shell.

With --all, a failing command does not stop the loop. The command fails at
the end if it failed in any worktree, naming each of them.
"#)]
pub struct Args {
    /// `[TARGET | --all] -- COMMAND...`, split by hand so that the command
    /// may contain its own flags and `--`.
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..,
        value_name = "ARGS"
    )]
    rest: Vec<String>,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("run"));
    args.global.init();

    let request = split_run_args(&args.rest)?;
    let ctx = Context::new(&args.global)?;
    let bare_dir = ctx.locate_repo()?;
    let mut output = CliOutput::new(args.global.output_config());

    let mut sink = OutputSink(&mut output);
    run::execute(&request, &bare_dir, &ctx.git, run_program, &mut sink)?;
    Ok(())
}
