//! Configuration file loading for quickfix.
//!
//! Discovers and loads `quickfix.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "quickfix.toml";

/// Top-level configuration from quickfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuickfixConfig {
    pub policy: PolicyConfig,
    pub resolve: ResolveConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Allowlist patterns for fix keys. If non-empty, other fixes are filtered.
    pub allow: Vec<String>,

    /// Denylist patterns for fix keys.
    pub deny: Vec<String>,

    /// Allow guarded fixes to be written.
    pub allow_guarded: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Resolve a pass's diagnostics on the rayon pool.
    pub parallel: bool,

    /// Attach diff previews to reported fixes.
    pub preview: bool,
}

pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<QuickfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<QuickfixConfig> {
    toml::from_str(contents).context("invalid TOML")
}

/// Load config from `root`, or the default if there is none.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<QuickfixConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(QuickfixConfig::default()),
    }
}

/// Config file and CLI arguments combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedConfig {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    pub allow_guarded: bool,
    pub parallel: bool,
    pub preview: bool,
}

pub struct ConfigMerger {
    config: QuickfixConfig,
}

impl ConfigMerger {
    pub fn new(config: QuickfixConfig) -> Self {
        Self { config }
    }

    /// CLI `allow`/`deny` extend the config lists; boolean flags turn
    /// settings on.
    pub fn merge_resolve_args(
        self,
        cli_allow: &[String],
        cli_deny: &[String],
        cli_parallel: bool,
        cli_preview: bool,
    ) -> MergedConfig {
        let mut allow = self.config.policy.allow;
        let mut deny = self.config.policy.deny;
        extend_unique(&mut allow, cli_allow);
        extend_unique(&mut deny, cli_deny);

        MergedConfig {
            allow,
            deny,
            allow_guarded: self.config.policy.allow_guarded,
            parallel: cli_parallel || self.config.resolve.parallel,
            preview: cli_preview || self.config.resolve.preview,
        }
    }

    pub fn merge_apply_args(self, cli_allow_guarded: bool) -> MergedConfig {
        MergedConfig {
            allow: self.config.policy.allow,
            deny: self.config.policy.deny,
            allow_guarded: cli_allow_guarded || self.config.policy.allow_guarded,
            parallel: self.config.resolve.parallel,
            preview: self.config.resolve.preview,
        }
    }
}

fn extend_unique(into: &mut Vec<String>, patterns: &[String]) {
    for pattern in patterns {
        if !into.contains(pattern) {
            into.push(pattern.clone());
        }
    }
}
