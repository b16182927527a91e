// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Connection settings for a BNO055 on a Linux I2C bus.
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! bus = 1
//! address = 0x28
//! retries = 3
//! retry_delay_ms = 10
//! ```

use std::{fs, io, path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ADDRESS;
use crate::interface::RetryPolicy;

/// Errors while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Bus number N of `/dev/i2c-N`
    pub bus: u8,
    /// 7-bit device address, 0x28 or 0x29
    pub address: u8,
    /// Extra attempts per register transaction
    pub retries: u32,
    /// Wait between attempts, in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            bus: 1,
            address: DEFAULT_ADDRESS,
            retries: 0,
            retry_delay_ms: 0,
        }
    }
}

impl SensorConfig {
    pub fn new(address: u8, bus: u8) -> Self {
        Self {
            bus,
            address,
            ..Self::default()
        }
    }

    /// Retry every register transaction up to `retries` extra times
    pub fn with_retry(mut self, retries: u32, delay: Duration) -> Self {
        self.retries = retries;
        self.retry_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn device_path(&self) -> String {
        format!("/dev/i2c-{}", self.bus)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
