use super::{Context, GlobalArgs};
use crate::core::worktree::create::{self, CreateParams, CreateResult};
use crate::core::CommandBridge;
use crate::exec::ShellHookRunner;
use crate::output::{CliOutput, Output};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "willow new")]
#[command(version = crate::VERSION)]
#[command(about = "Create a worktree for a new or existing branch")]
#[command(long_about = r#"
Creates a worktree under ~/.willow/worktrees/<repo>/ for BRANCH. The
directory name is the branch name with every '/' removed.

A new branch starts from origin/<base>, where the base is --base, then the
configured baseBranch, then the repository's default branch. The base is
fetched first unless --no-fetch is given or defaults.fetch is false.

With --existing, an existing branch is checked out instead of creating one.

If a branchPrefix is configured it is prepended to BRANCH unless BRANCH
already starts with it. Configured setup commands run in the new worktree.

With --cd, only the worktree path is printed on stdout so that a shell
function can change into it; everything else goes to stderr.
"#)]
pub struct Args {
    #[arg(help = "Name of the branch")]
    branch: String,

    #[arg(short = 'b', long, value_name = "BASE", help = "Branch to start from")]
    base: Option<String>,

    #[arg(short = 'e', long, help = "Check out an existing branch")]
    existing: bool,

    #[arg(long, help = "Do not fetch the base branch first")]
    no_fetch: bool,

    #[arg(long, help = "Print only the worktree path")]
    cd: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("new"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let bare_dir = ctx.locate_repo()?;
    let sources = ctx.config_sources(Some(&bare_dir));

    let mut config = args.global.output_config();
    if args.cd {
        config = config.on_stderr();
    }
    let mut output = CliOutput::new(config);

    let params = CreateParams {
        branch: args.branch,
        base: args.base,
        existing: args.existing,
        no_fetch: args.no_fetch,
    };

    let result = {
        let hooks = ShellHookRunner::new().with_stdout_to_stderr(args.cd);
        let mut bridge = CommandBridge::new(&mut output, hooks);
        create::execute(&params, &ctx.layout, &bare_dir, &sources, &ctx.git, &mut bridge)?
    };

    render_created(&result, args.cd, &mut output);
    Ok(())
}

fn render_created(result: &CreateResult, cd: bool, output: &mut dyn Output) {
    if cd {
        output.raw(&format!("{}\n", result.worktree_path.display()));
        return;
    }
    output.success(&format!("Created worktree {}", result.branch));
    output.detail("path", &result.worktree_path.display().to_string());
    if !result.existing {
        output.detail("base", &format!("origin/{}", result.base_branch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;
    use std::path::PathBuf;

    fn result(existing: bool) -> CreateResult {
        CreateResult {
            branch: "feature/auth".into(),
            base_branch: "main".into(),
            worktree_path: PathBuf::from("/h/.willow/worktrees/app/featureauth"),
            existing,
        }
    }

    #[test]
    fn test_render_created() {
        let mut output = TestOutput::new();
        render_created(&result(false), false, &mut output);
        assert_eq!(output.entries().len(), 3);
        assert!(output.raw_output().is_empty());

        let mut output = TestOutput::new();
        render_created(&result(true), false, &mut output);
        assert_eq!(output.entries().len(), 2);
    }

    #[test]
    fn test_render_cd_prints_only_path() {
        let mut output = TestOutput::new();
        render_created(&result(false), true, &mut output);
        assert_eq!(output.raw_output(), "/h/.willow/worktrees/app/featureauth\n");
        assert_eq!(output.entries().len(), 1);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["willow new", "auth", "-b", "develop", "--no-fetch", "--cd"]);
        assert_eq!(args.branch, "auth");
        assert_eq!(args.base.as_deref(), Some("develop"));
        assert!(args.no_fetch && args.cd && !args.existing);
    }
}
