//! Assembler configuration loading.
//!
//! Configuration comes from an optional YAML file; command-line flags and
//! their environment variables override individual keys.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use whereabouts::{AssemblerConfig, NestedPolicy, Presence, Zone};

/// Per-key overrides collected from flags.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Overrides {
    pub presence: Option<Presence>,
    pub nested: Option<NestedPolicy>,
    pub zone: Option<Zone>,
}

/// Loads the configuration file (if any) and applies overrides.
pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<AssemblerConfig> {
    let base = match path {
        Some(path) => read_file(path)?,
        None => AssemblerConfig::default(),
    };
    let config = apply(base, overrides);
    tracing::debug!(?config, "assembler configuration loaded");
    Ok(config)
}

fn read_file(path: &Path) -> Result<AssemblerConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid config file {}", path.display()))
}

/// Parses YAML configuration text. Empty text yields the defaults.
pub fn parse(text: &str) -> Result<AssemblerConfig> {
    if text.trim().is_empty() {
        return Ok(AssemblerConfig::default());
    }
    Ok(serde_yaml::from_str(text)?)
}

fn apply(mut config: AssemblerConfig, overrides: Overrides) -> AssemblerConfig {
    if let Some(presence) = overrides.presence {
        config.presence = presence;
    }
    if let Some(nested) = overrides.nested {
        config.nested = nested;
    }
    if let Some(zone) = overrides.zone {
        config.zone = zone;
    }
    config
}
