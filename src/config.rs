//! Configuration for citecheck.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CITECHECK_MIN_TOKENS, CITECHECK_REQUIRE_CHECKPOINT)
//! 2. Config file (.citecheck/config.yaml)
//! 3. Built-in defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .citecheck/config.yaml
//! - Falls back to ~/.citecheck/config.yaml if present

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verify::MatcherConfig;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub verify: Option<VerifySection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifySection {
    /// Minimum tokens for a checkpoint segment (default 2)
    pub min_segment_tokens: Option<usize>,
    /// Reject quotes with zero qualifying checkpoints (default false)
    pub require_checkpoint: Option<bool>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Matching policy for the verifier
    pub matcher: MatcherConfig,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents,
/// then the home directory
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".citecheck").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".citecheck").join("config.yaml");
    if home_config.exists() {
        return Some(home_config);
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();
    let mut matcher = MatcherConfig::default();

    if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        if let Some(verify) = config.verify {
            if let Some(tokens) = verify.min_segment_tokens {
                matcher.min_segment_tokens = tokens;
            }
            if let Some(required) = verify.require_checkpoint {
                matcher.require_checkpoint = required;
            }
        }
    }

    if let Ok(value) = std::env::var("CITECHECK_MIN_TOKENS") {
        matcher.min_segment_tokens = value
            .parse()
            .with_context(|| format!("Invalid CITECHECK_MIN_TOKENS value: {}", value))?;
    }
    if let Ok(value) = std::env::var("CITECHECK_REQUIRE_CHECKPOINT") {
        matcher.require_checkpoint = matches!(value.as_str(), "1" | "true" | "yes");
    }

    Ok(ResolvedConfig {
        matcher,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
