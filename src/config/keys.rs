//! The fixed set of config keys and their string forms.
//!
//! Lists are written comma-separated on the command line; booleans accept
//! `true/false`, `1/0` and `yes/no`.

use super::{defaults, non_empty, EffectiveConfig, Tier, TierConfig};
use crate::error::{Error, Result};

pub const BASE_BRANCH: &str = "baseBranch";
pub const BRANCH_PREFIX: &str = "branchPrefix";
pub const SETUP: &str = "setup";
pub const TEARDOWN: &str = "teardown";
pub const FETCH: &str = "defaults.fetch";
pub const AUTO_SETUP_REMOTE: &str = "defaults.autoSetupRemote";

/// Every valid key, in display order.
pub const KEYS: [&str; 6] = [
    BASE_BRANCH,
    BRANCH_PREFIX,
    SETUP,
    TEARDOWN,
    FETCH,
    AUTO_SETUP_REMOTE,
];

pub fn validate(key: &str) -> Result<()> {
    if KEYS.contains(&key) {
        Ok(())
    } else {
        Err(Error::UnknownConfigKey {
            key: key.to_string(),
        })
    }
}

/// Value a tier explicitly sets for `key`, or `None` if the tier would not
/// override it during a merge.
pub fn get(config: &TierConfig, key: &str) -> Result<Option<String>> {
    validate(key)?;
    Ok(match key {
        BASE_BRANCH => non_empty(&config.base_branch).map(str::to_string),
        BRANCH_PREFIX => non_empty(&config.branch_prefix).map(str::to_string),
        SETUP => config.setup.as_deref().map(join_commands),
        TEARDOWN => config.teardown.as_deref().map(join_commands),
        FETCH => config.defaults.fetch.map(|b| b.to_string()),
        AUTO_SETUP_REMOTE => config.defaults.auto_setup_remote.map(|b| b.to_string()),
        _ => None,
    })
}

/// Value of `key` in a resolved configuration.
pub fn effective(config: &EffectiveConfig, key: &str) -> Result<String> {
    validate(key)?;
    Ok(match key {
        BASE_BRANCH => config.base_branch.clone().unwrap_or_default(),
        BRANCH_PREFIX => config.branch_prefix.clone().unwrap_or_default(),
        SETUP => join_commands(&config.setup),
        TEARDOWN => join_commands(&config.teardown),
        FETCH => config.fetch.to_string(),
        AUTO_SETUP_REMOTE => config.auto_setup_remote.to_string(),
        _ => String::new(),
    })
}

/// Value of `key` before any tier is applied.
pub fn default_value(key: &str) -> Result<String> {
    validate(key)?;
    Ok(match key {
        FETCH => defaults::FETCH.to_string(),
        AUTO_SETUP_REMOTE => defaults::AUTO_SETUP_REMOTE.to_string(),
        _ => String::new(),
    })
}

/// Parse `value` for `key` and store it in `config`.
pub fn set(config: &mut TierConfig, key: &str, value: &str) -> Result<()> {
    validate(key)?;
    match key {
        BASE_BRANCH => config.base_branch = Some(value.to_string()),
        BRANCH_PREFIX => config.branch_prefix = Some(value.to_string()),
        SETUP => config.setup = Some(split_commands(value)),
        TEARDOWN => config.teardown = Some(split_commands(value)),
        FETCH => config.defaults.fetch = Some(parse_bool(key, value)?),
        AUTO_SETUP_REMOTE => config.defaults.auto_setup_remote = Some(parse_bool(key, value)?),
        _ => {}
    }
    Ok(())
}

/// Where the effective value of one key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySource {
    pub key: &'static str,
    pub value: String,
    /// `None` when no tier sets the key and the default applies.
    pub tier: Option<Tier>,
}

/// For every key, the winning value and the tier it came from.
///
/// `tiers` must be in precedence order, lowest first.
pub fn describe(tiers: &[(Tier, TierConfig)]) -> Result<Vec<KeySource>> {
    let mut sources = Vec::with_capacity(KEYS.len());
    for key in KEYS {
        let mut source = KeySource {
            key,
            value: default_value(key)?,
            tier: None,
        };
        for (tier, config) in tiers {
            if let Some(value) = get(config, key)? {
                source.value = value;
                source.tier = Some(*tier);
            }
        }
        sources.push(source);
    }
    Ok(sources)
}

pub fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::InvalidConfigValue {
            key: key.to_string(),
            reason: format!("must be true or false, got {value:?}"),
        }),
    }
}

/// Split a comma-separated command list, dropping blank entries.
pub fn split_commands(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_commands(commands: &[String]) -> String {
    commands.join(", ")
}
