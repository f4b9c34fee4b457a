//! Scripted in-memory backend for unit tests.

use super::RepositoryBackend;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::path::{Path, PathBuf};

type Handler = Box<dyn Fn(&Path, &[&str]) -> Result<String>>;

struct Rule {
    prefix: Vec<String>,
    handler: Handler,
}

/// Records every invocation and answers from a list of prefix rules.
///
/// The first rule whose argument prefix matches wins; unmatched calls
/// succeed with empty output.
#[derive(Default)]
pub(crate) struct FakeBackend {
    rules: Vec<Rule>,
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, prefix: &[&str], output: &str) -> Self {
        let output = output.to_string();
        self.handle(prefix, move |_, _| Ok(output.clone()))
    }

    pub(crate) fn fail(self, prefix: &[&str], output: &str) -> Self {
        let output = output.to_string();
        self.handle(prefix, move |_, args| {
            Err(Error::Backend {
                command: format!("git {}", args.join(" ")),
                output: output.clone(),
            })
        })
    }

    pub(crate) fn handle(
        mut self,
        prefix: &[&str],
        handler: impl Fn(&Path, &[&str]) -> Result<String> + 'static,
    ) -> Self {
        self.rules.push(Rule {
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            handler: Box::new(handler),
        });
        self
    }

    pub(crate) fn calls(&self) -> Vec<(PathBuf, Vec<String>)> {
        self.calls.borrow().clone()
    }

    /// Joined argument lists of every call, in order.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(_, args)| args.join(" "))
            .collect()
    }

    pub(crate) fn was_called(&self, prefix: &[&str]) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|(_, args)| starts_with(&args[..], prefix))
    }
}

fn starts_with<S: AsRef<str>>(args: &[S], prefix: &[impl AsRef<str>]) -> bool {
    args.len() >= prefix.len()
        && args
            .iter()
            .zip(prefix)
            .all(|(a, p)| a.as_ref() == p.as_ref())
}

impl RepositoryBackend for FakeBackend {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String> {
        self.calls.borrow_mut().push((
            dir.to_path_buf(),
            args.iter().map(|s| s.to_string()).collect(),
        ));
        for rule in &self.rules {
            if starts_with(args, &rule.prefix[..]) {
                return (rule.handler)(dir, args);
            }
        }
        Ok(String::new())
    }
}
