//! Adapters bridging core traits to the command layer.

use super::{HookContext, HookRunner, ProgressSink, Prompter};
use crate::error::Result;
use crate::exec::ShellHookRunner;
use crate::output::Output;

/// Adapter that forwards `ProgressSink` calls to an `Output` implementation.
///
/// Use this for operations that neither run hooks nor ask questions
/// (e.g. `run`).
pub struct OutputSink<'a>(pub &'a mut dyn Output);

impl ProgressSink for OutputSink<'_> {
    fn on_step(&mut self, msg: &str) {
        self.0.step(msg);
    }

    fn on_info(&mut self, msg: &str) {
        self.0.info(msg);
    }

    fn on_warning(&mut self, msg: &str) {
        self.0.warning(msg);
    }

    fn on_debug(&mut self, msg: &str) {
        self.0.debug(msg);
    }
}

/// Combined adapter for operations that report progress, run hooks and
/// ask for confirmation (clone, new, rm, prune).
///
/// ```ignore
/// let result = {
///     let mut bridge = CommandBridge::new(&mut output, ShellHookRunner::new());
///     core::worktree::create::execute(&params, &layout, &bare, &sources, &git, &mut bridge)?
/// };
/// // bridge dropped, output is available again for rendering
/// render_created(&result, &mut output);
/// ```
pub struct CommandBridge<'a> {
    output: &'a mut dyn Output,
    hooks: ShellHookRunner,
}

impl<'a> CommandBridge<'a> {
    pub fn new(output: &'a mut dyn Output, hooks: ShellHookRunner) -> Self {
        Self { output, hooks }
    }
}

impl ProgressSink for CommandBridge<'_> {
    fn on_step(&mut self, msg: &str) {
        self.output.step(msg);
    }

    fn on_info(&mut self, msg: &str) {
        self.output.info(msg);
    }

    fn on_warning(&mut self, msg: &str) {
        self.output.warning(msg);
    }

    fn on_debug(&mut self, msg: &str) {
        self.output.debug(msg);
    }
}

impl HookRunner for CommandBridge<'_> {
    fn run_hook(&mut self, ctx: &HookContext) -> Result<()> {
        self.hooks.run_hook(ctx)
    }
}

impl Prompter for CommandBridge<'_> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        crate::prompt::confirm(question)
    }
}
