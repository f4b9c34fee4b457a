use super::{Context, GlobalArgs};
use crate::config::{self, keys, ConfigSources, Tier, TierConfig};
use crate::exec::open_editor;
use crate::output::{CliOutput, Output};
use crate::styles;
use anyhow::{Context as _, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "willow config")]
#[command(version = crate::VERSION)]
#[command(about = "View or edit configuration")]
#[command(long_about = r#"
Reads and writes willow's configuration. Three files are merged, later ones
winning key by key:

  global   ~/.config/willow/config.json
  shared   <worktree>/.willow/config.json (committed with the project)
  local    ~/.willow/repos/<repo>.git/willow.json

Without arguments, or with --list, every key is shown with its effective
value and the file it came from. With KEY, the effective value is printed.
With KEY and VALUE, the key is written to the local file, or to the global
or shared file with --global or --shared.

Keys: baseBranch, branchPrefix, setup, teardown, defaults.fetch,
defaults.autoSetupRemote. setup and teardown take comma-separated commands.
"#)]
pub struct Args {
    #[arg(help = "Config key")]
    key: Option<String>,

    #[arg(help = "New value for the key")]
    value: Option<String>,

    #[arg(short, long, help = "List all keys with their sources")]
    list: bool,

    #[arg(long, help = "Open the config file in $EDITOR")]
    edit: bool,

    #[arg(long, conflicts_with = "shared", help = "Use the global config file")]
    global: bool,

    #[arg(long, help = "Use the shared config file of the current worktree")]
    shared: bool,

    #[command(flatten)]
    global_args: GlobalArgs,
}

impl Args {
    fn tier(&self) -> Tier {
        if self.global {
            Tier::Global
        } else if self.shared {
            Tier::Shared
        } else {
            Tier::Local
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse_from(crate::get_clap_args("config"));
    args.global_args.init();

    let ctx = Context::new(&args.global_args)?;
    let bare_dir = ctx.locate_repo().ok();
    let sources = ctx.config_sources(bare_dir.as_deref());
    let mut output = CliOutput::new(args.global_args.output_config());

    if args.list {
        return list(&sources, &mut output);
    }
    if args.edit {
        let path = writable_path(&sources, args.tier())?;
        ensure_exists(&path)?;
        open_editor(&path)?;
        return Ok(());
    }

    match (args.key.as_deref(), args.value.as_deref()) {
        (None, _) => list(&sources, &mut output),
        (Some(key), None) => get(&sources, key, &mut output),
        (Some(key), Some(value)) => {
            let path = writable_path(&sources, args.tier())?;
            set(&path, key, value, &mut output)
        }
    }
}

fn list(sources: &ConfigSources, output: &mut dyn Output) -> Result<()> {
    let tiers = sources.load()?;
    for entry in keys::describe(&tiers)? {
        let source = entry
            .tier
            .map(|t| t.to_string())
            .unwrap_or_else(|| "default".to_string());
        output.info(&format!(
            "{} = {} {}",
            entry.key,
            entry.value,
            styles::dim(&format!("({source})"))
        ));
    }
    Ok(())
}

fn get(sources: &ConfigSources, key: &str, output: &mut dyn Output) -> Result<()> {
    keys::validate(key)?;
    let effective = config::resolve(sources)?;
    output.raw(&format!("{}\n", keys::effective(&effective, key)?));
    Ok(())
}

fn set(path: &Path, key: &str, value: &str, output: &mut dyn Output) -> Result<()> {
    let mut tier = config::load_tier(path)?.unwrap_or_default();
    keys::set(&mut tier, key, value)?;
    config::save_tier(&tier, path)
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    let stored = keys::get(&tier, key)?.unwrap_or_default();
    output.success(&format!("{key} = {stored}"));
    Ok(())
}

/// File the given tier writes to, if it exists for this invocation.
fn writable_path(sources: &ConfigSources, tier: Tier) -> Result<PathBuf> {
    match sources.path(tier) {
        Some(path) => Ok(path.to_path_buf()),
        None if tier == Tier::Shared => {
            anyhow::bail!("not inside a worktree (use --global or run from a worktree)")
        }
        None => anyhow::bail!("not inside a willow-managed repo (use --global for global config)"),
    }
}

/// Create an empty config file so the editor opens something valid.
fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        config::save_tier(&TierConfig::default(), path)
            .with_context(|| format!("Failed to create config {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::TestOutput;
    use std::fs;
    use tempfile::TempDir;

    fn sources(temp: &TempDir) -> ConfigSources {
        ConfigSources::new(temp.path().join("global.json")).with_local(&temp.path().join("app.git"))
    }

    #[test]
    fn test_list_shows_sources() {
        styles::disable_colors();
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("global.json"), r#"{"baseBranch": "main"}"#).unwrap();
        fs::create_dir_all(temp.path().join("app.git")).unwrap();
        fs::write(
            temp.path().join("app.git/willow.json"),
            r#"{"baseBranch": "develop", "defaults": {"fetch": false}}"#,
        )
        .unwrap();

        let mut output = TestOutput::new();
        list(&sources(&temp), &mut output).unwrap();

        let lines = output.infos();
        assert_eq!(lines.len(), keys::KEYS.len());
        assert_eq!(lines[0], "baseBranch = develop (local)");
        assert!(lines.contains(&"defaults.fetch = false (local)"));
        assert!(lines.contains(&"defaults.autoSetupRemote = true (default)"));
    }

    #[test]
    fn test_get_prints_effective_value() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("global.json"),
            r#"{"setup": ["npm install", "cp .env.example .env"]}"#,
        )
        .unwrap();

        let mut output = TestOutput::new();
        get(&sources(&temp), "setup", &mut output).unwrap();
        assert_eq!(output.raw_output(), "npm install, cp .env.example .env\n");

        let err = get(&sources(&temp), "nope", &mut output).unwrap_err();
        assert!(err.to_string().contains("unknown config key: nope"));
    }

    #[test]
    fn test_set_writes_only_that_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.git/willow.json");

        let mut output = TestOutput::new();
        set(&path, "teardown", "docker compose down , rm -rf tmp", &mut output).unwrap();
        set(&path, "defaults.fetch", "no", &mut output).unwrap();

        let saved = config::load_tier(&path).unwrap().unwrap();
        assert_eq!(
            saved.teardown,
            Some(vec!["docker compose down".to_string(), "rm -rf tmp".to_string()])
        );
        assert_eq!(saved.defaults.fetch, Some(false));
        assert_eq!(saved.base_branch, None);
        assert_eq!(
            output.entries().len(),
            2,
            "one confirmation per successful set"
        );
    }

    #[test]
    fn test_set_rejects_bad_bool() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("willow.json");
        let err = set(&path, "defaults.fetch", "maybe", &mut TestOutput::new()).unwrap_err();
        assert!(err.to_string().contains("defaults.fetch"));
        assert!(!path.exists());
    }

    #[test]
    fn test_writable_path_requires_tier() {
        let sources = ConfigSources::new("/h/.config/willow/config.json");
        assert_eq!(
            writable_path(&sources, Tier::Global).unwrap(),
            PathBuf::from("/h/.config/willow/config.json")
        );
        let err = writable_path(&sources, Tier::Local).unwrap_err();
        assert!(err.to_string().contains("use --global"));
        assert!(writable_path(&sources, Tier::Shared).is_err());
    }

    #[test]
    fn test_ensure_exists_creates_empty_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.json");
        ensure_exists(&path).unwrap();
        assert_eq!(config::load_tier(&path).unwrap(), Some(TierConfig::default()));
    }
}
