// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Typed values returned by the BNO055 driver.

use serde::{Deserialize, Serialize};

use crate::constants::{
    OPERATION_MODE_ACC_GYRO, OPERATION_MODE_ACC_MAG, OPERATION_MODE_ACC_ONLY, OPERATION_MODE_AMG,
    OPERATION_MODE_COMPASS, OPERATION_MODE_CONFIG, OPERATION_MODE_GYRO_ONLY,
    OPERATION_MODE_IMU_PLUS, OPERATION_MODE_M4G, OPERATION_MODE_MAG_GYRO, OPERATION_MODE_MAG_ONLY,
    OPERATION_MODE_NDOF, OPERATION_MODE_NDOF_FMC_OFF, OPR_MODE_MASK, POWER_MODE_LOW_POWER,
    POWER_MODE_NORMAL, POWER_MODE_SUSPEND,
};

/// Device operation mode (OPR_MODE register).
///
/// Only `Config` allows writes to the configuration registers. The fusion
/// modes (`ImuPlus` and later) compute orientation on-chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationMode {
    Config,
    AccOnly,
    MagOnly,
    GyroOnly,
    AccMag,
    AccGyro,
    MagGyro,
    Amg,
    ImuPlus,
    Compass,
    M4g,
    NdofFmcOff,
    Ndof,
}

impl OperationMode {
    /// Raw register value
    pub fn bits(self) -> u8 {
        match self {
            OperationMode::Config => OPERATION_MODE_CONFIG,
            OperationMode::AccOnly => OPERATION_MODE_ACC_ONLY,
            OperationMode::MagOnly => OPERATION_MODE_MAG_ONLY,
            OperationMode::GyroOnly => OPERATION_MODE_GYRO_ONLY,
            OperationMode::AccMag => OPERATION_MODE_ACC_MAG,
            OperationMode::AccGyro => OPERATION_MODE_ACC_GYRO,
            OperationMode::MagGyro => OPERATION_MODE_MAG_GYRO,
            OperationMode::Amg => OPERATION_MODE_AMG,
            OperationMode::ImuPlus => OPERATION_MODE_IMU_PLUS,
            OperationMode::Compass => OPERATION_MODE_COMPASS,
            OperationMode::M4g => OPERATION_MODE_M4G,
            OperationMode::NdofFmcOff => OPERATION_MODE_NDOF_FMC_OFF,
            OperationMode::Ndof => OPERATION_MODE_NDOF,
        }
    }

    /// Decode the low nibble of an OPR_MODE read. Returns `None` for the
    /// reserved values 0x0D..=0x0F.
    pub fn from_bits(value: u8) -> Option<Self> {
        let mode = match value & OPR_MODE_MASK {
            OPERATION_MODE_CONFIG => OperationMode::Config,
            OPERATION_MODE_ACC_ONLY => OperationMode::AccOnly,
            OPERATION_MODE_MAG_ONLY => OperationMode::MagOnly,
            OPERATION_MODE_GYRO_ONLY => OperationMode::GyroOnly,
            OPERATION_MODE_ACC_MAG => OperationMode::AccMag,
            OPERATION_MODE_ACC_GYRO => OperationMode::AccGyro,
            OPERATION_MODE_MAG_GYRO => OperationMode::MagGyro,
            OPERATION_MODE_AMG => OperationMode::Amg,
            OPERATION_MODE_IMU_PLUS => OperationMode::ImuPlus,
            OPERATION_MODE_COMPASS => OperationMode::Compass,
            OPERATION_MODE_M4G => OperationMode::M4g,
            OPERATION_MODE_NDOF_FMC_OFF => OperationMode::NdofFmcOff,
            OPERATION_MODE_NDOF => OperationMode::Ndof,
            _ => return None,
        };
        Some(mode)
    }

    /// True for the modes where the chip runs its fusion algorithm
    pub fn is_fusion(self) -> bool {
        self.bits() >= OPERATION_MODE_IMU_PLUS
    }
}

/// Device power mode (PWR_MODE register)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerMode {
    Normal,
    LowPower,
    Suspend,
}

impl PowerMode {
    pub fn bits(self) -> u8 {
        match self {
            PowerMode::Normal => POWER_MODE_NORMAL,
            PowerMode::LowPower => POWER_MODE_LOW_POWER,
            PowerMode::Suspend => POWER_MODE_SUSPEND,
        }
    }
}

/// Three-axis reading, already scaled to physical units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Unit quaternion reported by the fusion engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    pub fn norm(&self) -> f32 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Snapshot of the system status registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// SYS_STATUS: 0 idle, 1 system error, 2 initializing peripherals,
    /// 3 system initialization, 4 executing self test, 5 fusion running,
    /// 6 running without fusion
    pub system: u8,
    /// SYS_ERR: 0 means no error, see datasheet section 4.3.59
    pub system_error: u8,
    /// ST_RESULT: bit 0 accelerometer, bit 1 magnetometer, bit 2 gyroscope,
    /// bit 3 MCU; a set bit means the test passed
    pub self_test: u8,
}

impl Status {
    /// All four self tests passed
    pub fn self_test_passed(&self) -> bool {
        self.self_test & 0x0F == 0x0F
    }
}

/// Firmware and sensor revision numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub software: u16,
    pub bootloader: u8,
    pub accelerometer: u8,
    pub magnetometer: u8,
    pub gyroscope: u8,
}
