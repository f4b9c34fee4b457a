use super::{Context, GlobalArgs};
use crate::core::worktree::remove::{self, RemoveOutcome, RemoveParams};
use crate::core::CommandBridge;
use crate::exec::ShellHookRunner;
use crate::output::{CliOutput, Output};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "willow rm")]
#[command(version = crate::VERSION)]
#[command(about = "Remove a worktree and delete its branch")]
#[command(long_about = r#"
Removes the worktree matching TARGET and deletes its local branch.

TARGET is matched against the worktrees of the current repository: an exact
branch name wins, otherwise it may be a fragment of a branch name or the
worktree's directory name. An ambiguous TARGET lists the candidates.

Before removing, willow warns about uncommitted changes and commits that
were never pushed, and asks for confirmation. Configured teardown commands
run in the worktree before it is removed.
"#)]
pub struct Args {
    #[arg(help = "Branch, branch fragment or directory name")]
    target: String,

    #[arg(short, long, help = "Skip the safety checks and the confirmation")]
    force: bool,

    #[arg(long, help = "Keep the branch after removing the worktree")]
    keep_branch: bool,

    #[arg(short, long, help = "Do not ask for confirmation")]
    yes: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("rm"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let bare_dir = ctx.locate_repo()?;
    let sources = ctx.config_sources(Some(&bare_dir));
    let mut output = CliOutput::new(args.global.output_config());

    let params = RemoveParams {
        target: args.target,
        force: args.force,
        yes: args.yes,
        keep_branch: args.keep_branch,
    };

    let outcome = {
        let mut bridge = CommandBridge::new(&mut output, ShellHookRunner::new());
        remove::execute(&params, &bare_dir, &sources, &ctx.git, &mut bridge)?
    };

    render_outcome(&outcome, &mut output);
    Ok(())
}

fn render_outcome(outcome: &RemoveOutcome, output: &mut dyn Output) {
    match outcome {
        RemoveOutcome::Aborted => output.info("Aborted."),
        RemoveOutcome::Removed {
            branch,
            branch_deleted,
            ..
        } => {
            output.success(&format!("Removed worktree {branch}"));
            if *branch_deleted {
                output.step(&format!("Deleted branch {branch}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;
    use std::path::PathBuf;

    #[test]
    fn test_render_outcome() {
        let mut output = TestOutput::verbose();
        render_outcome(
            &RemoveOutcome::Removed {
                branch: "dev".into(),
                path: PathBuf::from("/wt/app/dev"),
                branch_deleted: true,
            },
            &mut output,
        );
        assert_eq!(output.entries().len(), 2);

        let mut output = TestOutput::new();
        render_outcome(&RemoveOutcome::Aborted, &mut output);
        assert!(output.has_info("Aborted."));
    }
}
