//! Configuration management.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// USB transfer settings
    #[serde(default)]
    pub usb: UsbConfig,

    /// Echo test settings
    #[serde(default)]
    pub echo: EchoConfig,
}

/// USB transfer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UsbConfig {
    /// Per-transfer timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl UsbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Echo test configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EchoConfig {
    /// Run the echo test before anything else
    #[serde(default = "default_echo_enabled")]
    pub enabled: bool,

    /// Number of echo rounds
    #[serde(default = "default_echo_rounds")]
    pub rounds: u32,

    /// Fixed RNG seed; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            enabled: default_echo_enabled(),
            rounds: default_echo_rounds(),
            seed: None,
        }
    }
}

// Default value functions
fn default_timeout_ms() -> u64 {
    lcd2usb_hw::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_echo_enabled() -> bool {
    true
}

fn default_echo_rounds() -> u32 {
    lcd2usb_hw::DEFAULT_ECHO_ROUNDS
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}
