use super::{Context, GlobalArgs};
use crate::core::worktree::clone::{self, CloneParams, CloneResult};
use crate::core::CommandBridge;
use crate::exec::ShellHookRunner;
use crate::output::{CliOutput, Output};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "willow clone")]
#[command(version = crate::VERSION)]
#[command(about = "Clone a repository as a bare repo with a first worktree")]
#[command(long_about = r#"
Clones a repository into ~/.willow/repos/<name>.git as a bare repository,
configures origin so that remote-tracking branches are fetched, and checks
out the default branch as the first worktree under
~/.willow/worktrees/<name>/.

The repository name is taken from the last path segment of the URL, with
any .git suffix removed, unless NAME is given.

If any step after the bare clone fails, everything created by this command
is removed again. The configured setup commands run in the new worktree
afterwards; a failing setup command only produces a warning.
"#)]
pub struct Args {
    #[arg(help = "Repository URL (SSH or HTTPS)")]
    url: String,

    #[arg(help = "Name for the repository (default: derived from the URL)")]
    name: Option<String>,

    #[arg(short, long, help = "Replace an existing repository of the same name")]
    force: bool,

    #[command(flatten)]
    global: GlobalArgs,
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("clone"));
    args.global.init();

    let ctx = Context::new(&args.global)?;
    let mut output = CliOutput::new(args.global.output_config());

    let params = CloneParams {
        url: args.url,
        name: args.name,
        force: args.force,
    };

    let result = {
        let mut bridge = CommandBridge::new(&mut output, ShellHookRunner::new());
        clone::execute(&params, &ctx.layout, &ctx.git, &mut bridge)?
    };

    render_cloned(&result, &mut output);
    Ok(())
}

fn render_cloned(result: &CloneResult, output: &mut dyn Output) {
    output.success(&format!("Cloned {}", result.repo_name));
    output.detail("bare repo", &result.bare_dir.display().to_string());
    output.detail("worktree", &result.worktree_path.display().to_string());
}
