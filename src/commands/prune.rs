use super::{Context, GlobalArgs};
use crate::core::worktree::prune::{self, PruneOutcome, PruneParams};
use crate::core::CommandBridge;
use crate::exec::ShellHookRunner;
use crate::output::{CliOutput, Output};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "willow prune")]
#[command(version = crate::VERSION)]
#[command(about = "Clean up stale worktree records")]
#[command(long_about = r#"
Removes git's records of worktrees whose directories no longer exist, for
example after a worktree directory was deleted by hand. The stale records
are listed first and removed after confirmation.
"#)]
pub struct Args {
    #[arg(short = 'n', long, help = "Only show what would be pruned")]
    dry_run: bool,

    #[arg(short, long, help = "Do not ask for confirmation")]
    yes: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("prune"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let bare_dir = ctx.locate_repo()?;
    let mut output = CliOutput::new(args.global.output_config());

    let params = PruneParams {
        dry_run: args.dry_run,
        yes: args.yes,
    };
    let outcome = {
        let mut bridge = CommandBridge::new(&mut output, ShellHookRunner::new());
        prune::execute(&params, &bare_dir, &ctx.git, &mut bridge)?
    };

    render_outcome(outcome, &mut output);
    Ok(())
}

fn render_outcome(outcome: PruneOutcome, output: &mut dyn Output) {
    match outcome {
        PruneOutcome::NothingToPrune => output.info("Nothing to prune."),
        PruneOutcome::DryRun => output.step("Dry run, nothing pruned"),
        PruneOutcome::Aborted => output.info("Aborted."),
        PruneOutcome::Pruned => output.success("Pruned stale worktrees"),
    }
}
