//! Optional `strata.toml` configuration.
//!
//! ```toml
//! [analysis]
//! level_strategy = "longest-path"   # or "relaxation"
//!
//! [output]
//! format = "pretty"                 # pretty | text | json
//! ```
//!
//! A missing file yields the defaults. Command-line flags and environment
//! variables override the file; that precedence is resolved by the caller.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::LevelStrategy;

/// File name looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "strata.toml";

/// Environment variable overriding `analysis.level_strategy`.
pub const LEVEL_STRATEGY_ENV: &str = "STRATA_LEVEL_STRATEGY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrataConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub level_strategy: LevelStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Preferred output mode name (`pretty`, `text` or `json`). The CLI logs a
    /// warning for any other value and falls back to its default.
    #[serde(default)]
    pub format: Option<String>,
}

/// Load `strata.toml` from `project_root`, or the defaults if it is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(project_root: &Path) -> Result<StrataConfig> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(StrataConfig::default());
    }
    load_config_file(&path)
}

/// Load configuration from an explicit file path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config_file(path: &Path) -> Result<StrataConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<StrataConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

/// Pick the level strategy: explicit flag, then environment, then config.
///
/// # Errors
///
/// Returns an error if the environment value names no known strategy.
pub fn resolve_level_strategy(
    flag: Option<LevelStrategy>,
    env_value: Option<&str>,
    config: &StrataConfig,
) -> Result<LevelStrategy> {
    if let Some(strategy) = flag {
        return Ok(strategy);
    }

    if let Some(raw) = env_value.filter(|raw| !raw.trim().is_empty()) {
        return raw
            .parse::<LevelStrategy>()
            .with_context(|| format!("Invalid {LEVEL_STRATEGY_ENV} value"));
    }

    Ok(config.analysis.level_strategy)
}
