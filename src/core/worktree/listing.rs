//! Parsing of `git worktree list --porcelain` into [`Worktree`] snapshots.

use crate::error::Result;
use crate::git::{GitDir, HEADS_PREFIX};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Branch value of a worktree whose HEAD is not on a branch.
pub const DETACHED: &str = "(detached)";

/// One checked-out working copy, as reported by git.
///
/// Serializes as `{branch, path, head}` for `ls --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worktree {
    pub branch: String,
    pub path: PathBuf,
    pub head: String,
    #[serde(skip)]
    pub is_bare: bool,
}

impl Worktree {
    pub fn new(path: impl Into<PathBuf>, branch: impl Into<String>, head: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            path: path.into(),
            head: head.into(),
            is_bare: false,
        }
    }

    pub fn is_detached(&self) -> bool {
        self.branch == DETACHED
    }
}

#[derive(Default)]
struct Block {
    path: Option<PathBuf>,
    head: String,
    branch: String,
    is_bare: bool,
}

impl Block {
    fn finish(self) -> Option<Worktree> {
        let path = self.path?;
        Some(Worktree {
            branch: self.branch,
            path,
            head: self.head,
            is_bare: self.is_bare,
        })
    }
}

/// Parse porcelain listing text.
///
/// Blocks are separated by blank lines. A block without a `worktree` line
/// is dropped, unknown lines are ignored, and a path that was already seen
/// keeps its first entry. Never fails.
pub fn parse_porcelain(output: &str) -> Vec<Worktree> {
    let mut blocks = Vec::new();
    let mut current = Block::default();
    let mut in_block = false;

    for line in output.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            if in_block {
                blocks.push(std::mem::take(&mut current));
                in_block = false;
            }
            continue;
        }
        in_block = true;

        if let Some(path) = line.strip_prefix("worktree ") {
            current.path = Some(PathBuf::from(path));
        } else if let Some(head) = line.strip_prefix("HEAD ") {
            current.head = head.to_string();
        } else if let Some(reference) = line.strip_prefix("branch ") {
            current.branch = reference
                .strip_prefix(HEADS_PREFIX)
                .unwrap_or(reference)
                .to_string();
        } else if line == "bare" {
            current.is_bare = true;
        } else if line == "detached" {
            current.branch = DETACHED.to_string();
        }
    }
    if in_block {
        blocks.push(current);
    }

    let mut seen = HashSet::new();
    blocks
        .into_iter()
        .filter_map(Block::finish)
        .filter(|wt| seen.insert(wt.path.clone()))
        .collect()
}

/// Snapshot of every worktree of the repository, bare entry included.
pub fn list_all(git: &GitDir) -> Result<Vec<Worktree>> {
    Ok(parse_porcelain(&git.worktree_list_porcelain()?))
}

/// Snapshot of the user-facing worktrees, in listing order.
pub fn list_worktrees(git: &GitDir) -> Result<Vec<Worktree>> {
    Ok(list_all(git)?.into_iter().filter(|wt| !wt.is_bare).collect())
}
