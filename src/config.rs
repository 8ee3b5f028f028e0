//! Configuration management for HashLedger

use crate::error::{LedgerError, Result};
use crate::ledger::DEFAULT_GENESIS_PAYLOAD;
use crate::record::DIGEST_HEX_LEN;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "hashledger.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    #[serde(default = "default_genesis_payload")]
    pub genesis_payload: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_payload: default_genesis_payload(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Hash characters shown in record dumps.
    #[serde(default = "default_hash_preview_len")]
    pub hash_preview_len: usize,
    /// Hash characters shown per node in the chain diagram.
    #[serde(default = "default_diagram_hash_len")]
    pub diagram_hash_len: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hash_preview_len: default_hash_preview_len(),
            diagram_hash_len: default_diagram_hash_len(),
        }
    }
}

fn default_genesis_payload() -> String {
    DEFAULT_GENESIS_PAYLOAD.to_string()
}

fn default_hash_preview_len() -> usize {
    16
}

fn default_diagram_hash_len() -> usize {
    8
}

/// Load `hashledger.toml` from the working directory, falling back to defaults
/// when it is absent.
pub fn load_config() -> Result<Config> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let config = if path.exists() {
        let config_str = fs::read_to_string(path)?;
        parse_config(&config_str)?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config = toml::from_str(config_str)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    for (name, len) in [
        ("display.hash_preview_len", config.display.hash_preview_len),
        ("display.diagram_hash_len", config.display.diagram_hash_len),
    ] {
        if len == 0 || len > DIGEST_HEX_LEN {
            return Err(LedgerError::Config(format!(
                "{} must be between 1 and {}, got {}",
                name, DIGEST_HEX_LEN, len
            )));
        }
    }

    Ok(())
}
