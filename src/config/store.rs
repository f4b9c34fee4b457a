use super::TierConfig;
use crate::error::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read one tier file. `Ok(None)` when the file does not exist.
pub fn load_tier(path: &Path) -> Result<Option<TierConfig>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            ))
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
}

/// Write one tier file as indented JSON, creating parent directories.
pub fn save_tier(config: &TierConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::io(
                format!("Failed to create directory {}", parent.display()),
                e,
            )
        })?;
    }

    let mut json = serde_json::to_string_pretty(config).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    fs::write(path, json)
        .map_err(|e| Error::io(format!("Failed to write config file {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TierDefaults;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_tier(&temp.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_save_creates_parents_and_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("config.json");
        let config = TierConfig {
            base_branch: Some("develop".into()),
            setup: Some(vec![]),
            defaults: TierDefaults {
                fetch: Some(false),
                auto_setup_remote: None,
            },
            ..TierConfig::default()
        };

        save_tier(&config, &path).unwrap();
        assert_eq!(load_tier(&path).unwrap(), Some(config));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"baseBranch\": \"develop\""));
        assert!(text.contains("\"setup\": []"));
        assert!(!text.contains("teardown"));
        assert!(!text.contains("autoSetupRemote"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("willow.json");
        fs::write(&path, "[1, 2").unwrap();
        match load_tier(&path).unwrap_err() {
            Error::ConfigParse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("willow.json");
        fs::write(&path, r#"{"baseBranch": "main", "somethingNew": 1}"#).unwrap();
        let config = load_tier(&path).unwrap().unwrap();
        assert_eq!(config.base_branch.as_deref(), Some("main"));
    }
}
