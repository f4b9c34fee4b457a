//! Core business logic abstractions.
//!
//! This module defines the traits that let core operations report progress,
//! run hook commands and ask for confirmation without depending on a
//! specific UI (CLI, tests, etc.).

mod progress;
pub mod worktree;

pub use progress::{CommandBridge, OutputSink};

use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

// ─────────────────────────────────────────────────────────────────────────
// Progress reporting
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations to report progress without depending on `Output`.
///
/// Commands create an adapter (e.g., `OutputSink`) that bridges this trait
/// to the actual output implementation.
pub trait ProgressSink {
    /// Report an intermediate step (shown in verbose mode).
    fn on_step(&mut self, msg: &str);

    /// Report something the user should always see (e.g. a preview).
    fn on_info(&mut self, msg: &str);

    /// Report a warning (always shown).
    fn on_warning(&mut self, msg: &str);

    /// Report a debug message (shown in verbose mode).
    fn on_debug(&mut self, msg: &str);
}

// ─────────────────────────────────────────────────────────────────────────
// Hook execution
// ─────────────────────────────────────────────────────────────────────────

/// Lifecycle point at which a hook command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookStage {
    /// After the initial worktree of a fresh clone is checked out.
    PostCheckout,
    /// After `new` creates a worktree.
    Setup,
    /// Before `rm` removes a worktree.
    Teardown,
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookStage::PostCheckout => "post-checkout",
            HookStage::Setup => "setup",
            HookStage::Teardown => "teardown",
        };
        f.write_str(name)
    }
}

/// Everything a hook runner needs to execute one command.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    pub stage: HookStage,
    pub command: &'a str,
    pub worktree_path: &'a Path,
    pub branch: &'a str,
}

/// Trait for core operations to execute hook commands.
///
/// Commands provide a shell-backed implementation; tests record the
/// invocations instead.
pub trait HookRunner {
    /// Run a single hook command. A non-successful command is an
    /// [`Error::Hook`].
    fn run_hook(&mut self, ctx: &HookContext) -> Result<()>;
}

/// Run `commands` one after another in `worktree_path`.
///
/// Stops at the first failure and returns it; the remaining commands are
/// not run. Returns how many commands ran.
pub fn run_hook_commands(
    runner: &mut (impl HookRunner + ProgressSink + ?Sized),
    stage: HookStage,
    commands: &[String],
    worktree_path: &Path,
    branch: &str,
) -> Result<usize> {
    if commands.is_empty() {
        return Ok(0);
    }

    runner.on_info(&format!("Running {stage} hooks..."));
    runner.on_debug(&format!(
        "{stage} hooks for {branch} in {}",
        worktree_path.display()
    ));
    for command in commands {
        runner.on_info(&format!("  → {command}"));
        runner
            .run_hook(&HookContext {
                stage,
                command,
                worktree_path,
                branch,
            })
            .map_err(|e| match e {
                Error::Hook { .. } => e,
                other => Error::Hook {
                    command: command.clone(),
                    reason: other.to_string(),
                },
            })?;
    }
    Ok(commands.len())
}

// ─────────────────────────────────────────────────────────────────────────
// Confirmation
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations that need a yes/no answer from the user.
pub trait Prompter {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}


#[cfg(test)]
mod tests {
    use super::testing::Recorder;
    use super::*;

    fn cmds(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_hooks_run_in_order() {
        let mut rec = Recorder::default();
        let ran = run_hook_commands(
            &mut rec,
            HookStage::Setup,
            &cmds(&["npm install", "make build"]),
            Path::new("/wt/repo/feat"),
            "feat",
        )
        .unwrap();
        assert_eq!(ran, 2);
        assert_eq!(rec.hook_commands(), vec!["npm install", "make build"]);
        assert!(rec.infos.iter().any(|m| m == "Running setup hooks..."));
        assert_eq!(rec.debugs, vec!["setup hooks for feat in /wt/repo/feat"]);
    }

    #[test]
    fn test_first_hook_failure_stops_the_rest() {
        let mut rec = Recorder::failing_on("false");
        let err = run_hook_commands(
            &mut rec,
            HookStage::Teardown,
            &cmds(&["echo one", "false", "echo three"]),
            Path::new("/wt/repo/feat"),
            "feat",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Hook { ref command, .. } if command == "false"));
        assert_eq!(rec.hook_commands(), vec!["echo one", "false"]);
    }

    #[test]
    fn test_no_hooks_is_silent() {
        let mut rec = Recorder::default();
        let ran =
            run_hook_commands(&mut rec, HookStage::Setup, &[], Path::new("/x"), "x").unwrap();
        assert_eq!(ran, 0);
        assert!(rec.infos.is_empty());
        assert!(rec.debugs.is_empty());
    }

    #[test]
    fn test_hook_stage_names() {
        assert_eq!(HookStage::PostCheckout.to_string(), "post-checkout");
        assert_eq!(HookStage::Setup.to_string(), "setup");
        assert_eq!(HookStage::Teardown.to_string(), "teardown");
    }
}
