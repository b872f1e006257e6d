// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::alerts::MinSteerSpeedConfig;
use crate::types::{Fingerprint, FirmwareRecord, VehicleSnapshot, VehicleVariant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub alerts: MinSteerSpeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Snapshots replayed by the host binary, one per cycle
    #[serde(default)]
    pub cycles: Vec<VehicleSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehicleConfig {
    pub variant: VehicleVariant,
    #[serde(default)]
    pub firmware: Vec<FirmwareRecord>,
    /// Message ids observed on bus 0
    #[serde(default)]
    pub fingerprint: Vec<u32>,
}

impl VehicleConfig {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_ids(0, self.fingerprint.iter().copied())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid config {}", path))
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }
}
