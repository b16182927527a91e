// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Driver for the Bosch BNO055 9-axis absolute orientation sensor on Linux.
//!
//! ```no_run
//! use bno055::{I2cBno055, SensorConfig};
//!
//! let imu = I2cBno055::open(&SensorConfig::default())?;
//! let euler = imu.euler()?;
//! println!("heading {} roll {} pitch {}", euler.x, euler.y, euler.z);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod axis;
pub mod calibration;
pub mod codec;
pub mod config;
pub mod constants;
pub mod driver;
pub mod interface;
pub mod types;

pub use axis::{AxisConfig, AxisPlacement};
pub use calibration::{CalibrationOffsets, CalibrationStatus};
pub use config::{ConfigError, SensorConfig};
pub use driver::{Bno055, I2cBno055};
pub use interface::{RegisterBus, RegisterInterface, RetryPolicy};
pub use types::{OperationMode, PowerMode, Quaternion, Revision, Status, Vector};

/// Errors in this crate, generic over the bus error `E`
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// A register transaction failed after exhausting its retries
    #[error("bus transaction failed: {0:?}")]
    Comm(E),

    /// The chip ID register never read back 0xA0
    #[error("sensor not found (last chip id read: 0x{last_id:02X})")]
    SensorNotFound { last_id: u8 },

    /// Calibration offsets must be exactly 22 bytes
    #[error("calibration offsets must be {expected} bytes, got {actual}")]
    InvalidCalibrationLength { expected: usize, actual: usize },

    /// Axis mapping is not a permutation of X, Y and Z
    #[error("axis remap is not a permutation of X/Y/Z: {0:?}")]
    InvalidAxisRemap(AxisConfig),

    /// OPR_MODE held a reserved value
    #[error("unknown operation mode 0x{0:02X}")]
    UnknownMode(u8),

    /// The driver was closed
    #[error("sensor is closed")]
    Closed,

    /// The bus device could not be opened
    #[error("failed to open {path}: {reason}")]
    Open { path: String, reason: String },
}

impl<E> Error<E> {
    /// Caller passed bad input; nothing was sent to the device
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidCalibrationLength { .. } | Error::InvalidAxisRemap(_)
        )
    }
}
