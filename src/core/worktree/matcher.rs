//! Resolve a user-typed identifier to one worktree.

use super::listing::Worktree;
use crate::error::{Error, Result};
use std::path::MAIN_SEPARATOR;

/// Find the single worktree `target` refers to.
///
/// An exact branch name wins outright. Otherwise every worktree whose branch
/// contains `target`, or whose path ends in `/<target>`, is a candidate; more
/// than one candidate is an [`Error::AmbiguousMatch`] listing them in input
/// order.
pub fn find_worktree<'a>(worktrees: &'a [Worktree], target: &str) -> Result<&'a Worktree> {
    if let Some(exact) = worktrees.iter().find(|wt| wt.branch == target) {
        return Ok(exact);
    }

    let dir_suffix = format!("{MAIN_SEPARATOR}{target}");
    let candidates: Vec<&Worktree> = worktrees
        .iter()
        .filter(|wt| {
            wt.branch.contains(target) || wt.path.to_string_lossy().ends_with(&dir_suffix)
        })
        .collect();

    match candidates.len() {
        0 => Err(Error::NotFound(format!(
            "no worktree found matching {target:?}"
        ))),
        1 => Ok(candidates[0]),
        _ => Err(Error::AmbiguousMatch {
            target: target.to_string(),
            candidates: candidates.into_iter().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Worktree> {
        vec![
            Worktree::new("/wt/app/main", "main", "a1"),
            Worktree::new("/wt/app/feature-auth", "feature/auth", "b2"),
            Worktree::new("/wt/app/featurepayments", "feature/payments", "c3"),
            Worktree::new("/wt/app/alicebugfix", "alice/bugfix", "d4"),
        ]
    }

    #[test]
    fn test_exact_branch() {
        let wts = sample();
        assert_eq!(find_worktree(&wts, "feature/auth").unwrap().branch, "feature/auth");
    }

    #[test]
    fn test_substring_of_branch() {
        let wts = sample();
        assert_eq!(find_worktree(&wts, "bugfix").unwrap().branch, "alice/bugfix");
    }

    #[test]
    fn test_directory_name() {
        let wts = sample();
        assert_eq!(find_worktree(&wts, "feature-auth").unwrap().branch, "feature/auth");
    }

    #[test]
    fn test_ambiguous_keeps_input_order() {
        let wts = sample();
        match find_worktree(&wts, "feature").unwrap_err() {
            Error::AmbiguousMatch { target, candidates } => {
                assert_eq!(target, "feature");
                let branches: Vec<_> = candidates.iter().map(|c| c.branch.as_str()).collect();
                assert_eq!(branches, vec!["feature/auth", "feature/payments"]);
            }
            other => panic!("expected ambiguity, got {other}"),
        }
    }

    #[test]
    fn test_not_found() {
        let wts = sample();
        let err = find_worktree(&wts, "nonexistent").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let mut wts = sample();
        wts.push(Worktree::new("/wt/app/mainline", "mainline", "e5"));
        assert_eq!(find_worktree(&wts, "main").unwrap().branch, "main");
    }

    #[test]
    fn test_partial_directory_name_is_not_a_path_match() {
        let wts = vec![Worktree::new("/wt/app/xyzauth", "topic", "a")];
        assert!(find_worktree(&wts, "auth").is_err());
    }

    #[test]
    fn test_empty_set() {
        assert!(matches!(find_worktree(&[], "main"), Err(Error::NotFound(_))));
    }
}
