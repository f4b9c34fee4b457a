use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub fn create_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .map_err(|e| Error::io(format!("Failed to create directory: {}", path.display()), e))
}

/// Remove a directory tree; a missing directory is not an error.
pub fn remove_directory(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .map_err(|e| Error::io(format!("Failed to remove directory: {}", path.display()), e))?;
    }
    Ok(())
}

pub fn validate_branch_name(branch_name: &str) -> Result<()> {
    if branch_name.is_empty() {
        return Err(Error::Usage("Branch name cannot be empty".into()));
    }

    if branch_name.contains("..") {
        return Err(Error::Usage("Branch name cannot contain '..'".into()));
    }

    if branch_name.starts_with('/') || branch_name.ends_with('/') {
        return Err(Error::Usage(
            "Branch name cannot start or end with '/'".into(),
        ));
    }

    if branch_name.starts_with('-') {
        return Err(Error::Usage("Branch name cannot start with '-'".into()));
    }

    if branch_name
        .chars()
        .any(|c| c.is_control() || c.is_whitespace())
    {
        return Err(Error::Usage(
            "Branch name cannot contain whitespace or control characters".into(),
        ));
    }

    Ok(())
}

pub fn validate_repo_name(repo_name: &str) -> Result<()> {
    if repo_name.is_empty() {
        return Err(Error::Usage("Repository name cannot be empty".into()));
    }

    if repo_name.contains("..") {
        return Err(Error::Usage("Repository name cannot contain '..'".into()));
    }

    if repo_name.contains('/') || repo_name.contains('\\') || repo_name.contains(':') {
        return Err(Error::Usage(
            "Repository name cannot contain path separators. Use a simple name like 'my-project', not 'path/to/my-project'".into(),
        ));
    }

    if repo_name.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(Error::Usage(
            "Repository name cannot contain whitespace or control characters".into(),
        ));
    }

    if repo_name.starts_with('.') {
        return Err(Error::Usage("Repository name cannot start with '.'".into()));
    }

    if repo_name.len() > 255 {
        return Err(Error::Usage(
            "Repository name too long (max 255 characters)".into(),
        ));
    }

    Ok(())
}
