//! Running external programs: hook commands, `run` targets and the editor.
//!
//! All of them inherit the terminal so that interactive tools keep working.

use crate::core::{HookContext, HookRunner};
use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Environment variables exported to every hook command.
pub const HOOK_STAGE_ENV: &str = "WILLOW_HOOK";
pub const HOOK_BRANCH_ENV: &str = "WILLOW_BRANCH";
pub const HOOK_WORKTREE_ENV: &str = "WILLOW_WORKTREE_PATH";

fn describe(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Runs hook commands through `sh -c` inside the worktree.
#[derive(Debug, Default)]
pub struct ShellHookRunner {
    stdout_to_stderr: bool,
}

impl ShellHookRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send hook stdout to stderr, for commands whose stdout is a path.
    pub fn with_stdout_to_stderr(mut self, yes: bool) -> Self {
        self.stdout_to_stderr = yes;
        self
    }

    fn command(&self, ctx: &HookContext) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(ctx.command)
            .current_dir(ctx.worktree_path)
            .env(HOOK_STAGE_ENV, ctx.stage.to_string())
            .env(HOOK_BRANCH_ENV, ctx.branch)
            .env(HOOK_WORKTREE_ENV, ctx.worktree_path)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit());
        if self.stdout_to_stderr {
            cmd.stdout(Stdio::from(std::io::stderr()));
        } else {
            cmd.stdout(Stdio::inherit());
        }
        cmd
    }
}

impl HookRunner for ShellHookRunner {
    fn run_hook(&mut self, ctx: &HookContext) -> Result<()> {
        crate::log_debug!("$ sh -c {:?} (in {})", ctx.command, ctx.worktree_path.display());
        let status = self.command(ctx).status().map_err(|e| Error::Hook {
            command: ctx.command.to_string(),
            reason: e.to_string(),
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::Hook {
                command: ctx.command.to_string(),
                reason: describe(status),
            })
        }
    }
}

/// Run `argv` directly (no shell) in `dir` with inherited stdio.
pub fn run_program(argv: &[String], dir: &Path) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        return Err(Error::Usage("no command given".to_string()));
    };
    let command = argv.join(" ");
    crate::log_debug!("$ {command} (in {})", dir.display());

    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::Program {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Program {
            command,
            reason: describe(status),
        })
    }
}

/// Open `path` in `$EDITOR` (default `vi`) and wait for it to exit.
///
/// The editor value goes through the shell so that `EDITOR="code -w"` works.
pub fn open_editor(path: &Path) -> Result<()> {
    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{editor} \"$1\""))
        .arg("sh")
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::Program {
            command: editor.clone(),
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Program {
            command: editor,
            reason: describe(status),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HookStage;
    use tempfile::TempDir;

    fn ctx<'a>(command: &'a str, dir: &'a Path) -> HookContext<'a> {
        HookContext {
            stage: HookStage::Setup,
            command,
            worktree_path: dir,
            branch: "feature/x",
        }
    }

    #[test]
    fn test_hook_runs_in_worktree_with_env() {
        let temp = TempDir::new().unwrap();
        let mut runner = ShellHookRunner::new();
        runner
            .run_hook(&ctx(
                "printf '%s %s' \"$WILLOW_HOOK\" \"$WILLOW_BRANCH\" > out.txt",
                temp.path(),
            ))
            .unwrap();
        let written = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(written, "setup feature/x");
    }

    #[test]
    fn test_hook_failure_reports_status() {
        let temp = TempDir::new().unwrap();
        let err = ShellHookRunner::new()
            .run_hook(&ctx("exit 3", temp.path()))
            .unwrap_err();
        match err {
            Error::Hook { command, reason } => {
                assert_eq!(command, "exit 3");
                assert_eq!(reason, "exit status 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_program_status() {
        let temp = TempDir::new().unwrap();
        run_program(&["true".to_string()], temp.path()).unwrap();

        let err = run_program(&["false".to_string()], temp.path()).unwrap_err();
        assert_eq!(err.to_string(), "false: exit status 1");

        let err = run_program(&[], temp.path()).unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
    }

    #[test]
    fn test_run_program_missing_binary() {
        let temp = TempDir::new().unwrap();
        let err = run_program(&["willow-no-such-program".to_string()], temp.path()).unwrap_err();
        assert!(matches!(err, Error::Program { .. }));
    }
}
