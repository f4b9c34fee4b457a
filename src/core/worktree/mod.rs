//! Core worktree operations.
//!
//! `listing` and `matcher` read and resolve the worktree set; the remaining
//! submodules hold the business logic for one willow command each, separated
//! from argument parsing and output rendering. Operations accept structured
//! params, a `RepositoryBackend` and the collaborators they need (progress,
//! hooks, prompts), and return structured results.

pub mod clone;
pub mod create;
pub mod listing;
pub mod matcher;
pub mod prune;
pub mod remove;
pub mod run;

pub use listing::{parse_porcelain, Worktree, DETACHED};
pub use matcher::find_worktree;
