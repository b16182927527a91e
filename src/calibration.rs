// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Calibration status and the offset/radius block.

use serde::{Deserialize, Serialize};

use crate::codec::read_i16;
use crate::constants::CALIBRATION_OFFSETS_LEN;

/// Highest calibration level reported for each subsystem
pub const FULLY_CALIBRATED: u8 = 3;

/// Decoded CALIB_STAT register, each field in 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalibrationStatus {
    pub system: u8,
    pub gyroscope: u8,
    pub accelerometer: u8,
    pub magnetometer: u8,
}

impl CalibrationStatus {
    /// Unpack `SYS[7:6] GYR[5:4] ACC[3:2] MAG[1:0]`
    pub fn from_register(status: u8) -> Self {
        Self {
            system: (status >> 6) & 0x03,
            gyroscope: (status >> 4) & 0x03,
            accelerometer: (status >> 2) & 0x03,
            magnetometer: status & 0x03,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.system == FULLY_CALIBRATED
            && self.gyroscope == FULLY_CALIBRATED
            && self.accelerometer == FULLY_CALIBRATED
            && self.magnetometer == FULLY_CALIBRATED
    }
}

/// Raw contents of the 22-byte offset/radius block (0x55..=0x6A).
///
/// Meant to be read once the sensor is fully calibrated, stored by the
/// caller, and written back with `Bno055::calibrate` after the next power up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalibrationOffsets([u8; CALIBRATION_OFFSETS_LEN]);

impl CalibrationOffsets {
    pub fn new(bytes: [u8; CALIBRATION_OFFSETS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build from a slice, returning `None` unless it holds exactly 22 bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; CALIBRATION_OFFSETS_LEN] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; CALIBRATION_OFFSETS_LEN] {
        &self.0
    }

    /// Accelerometer offset X/Y/Z in LSB
    pub fn accelerometer_offset(&self) -> [i16; 3] {
        self.triple(0)
    }

    /// Magnetometer offset X/Y/Z in LSB
    pub fn magnetometer_offset(&self) -> [i16; 3] {
        self.triple(6)
    }

    /// Gyroscope offset X/Y/Z in LSB
    pub fn gyroscope_offset(&self) -> [i16; 3] {
        self.triple(12)
    }

    pub fn accelerometer_radius(&self) -> i16 {
        read_i16(&self.0, 18)
    }

    pub fn magnetometer_radius(&self) -> i16 {
        read_i16(&self.0, 20)
    }

    fn triple(&self, offset: usize) -> [i16; 3] {
        [
            read_i16(&self.0, offset),
            read_i16(&self.0, offset + 2),
            read_i16(&self.0, offset + 4),
        ]
    }
}

impl AsRef<[u8]> for CalibrationOffsets {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; CALIBRATION_OFFSETS_LEN]> for CalibrationOffsets {
    fn from(bytes: [u8; CALIBRATION_OFFSETS_LEN]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_CALIBRATION_OFFSETS;

    #[test]
    fn test_status_all_calibrated() {
        let status = CalibrationStatus::from_register(0xFF);
        assert_eq!(
            status,
            CalibrationStatus {
                system: 3,
                gyroscope: 3,
                accelerometer: 3,
                magnetometer: 3
            }
        );
        assert!(status.is_calibrated());
    }

    #[test]
    fn test_status_uncalibrated() {
        let status = CalibrationStatus::from_register(0x00);
        assert_eq!(status, CalibrationStatus::default());
        assert!(!status.is_calibrated());
    }

    #[test]
    fn test_status_magnetometer_lagging() {
        let status = CalibrationStatus::from_register(0xFE);
        assert_eq!(status.magnetometer, 2);
        assert_eq!(status.system, 3);
        assert!(!status.is_calibrated());
    }

    #[test]
    fn test_status_field_positions() {
        // SYS=1, GYR=2, ACC=3, MAG=0
        let status = CalibrationStatus::from_register(0b01_10_11_00);
        assert_eq!(status.system, 1);
        assert_eq!(status.gyroscope, 2);
        assert_eq!(status.accelerometer, 3);
        assert_eq!(status.magnetometer, 0);
    }

    #[test]
    fn test_offsets_from_slice_length() {
        assert!(CalibrationOffsets::from_slice(&[0u8; 21]).is_none());
        assert!(CalibrationOffsets::from_slice(&[0u8; 23]).is_none());
        assert!(CalibrationOffsets::from_slice(&[0u8; 22]).is_some());
    }

    #[test]
    fn test_offsets_named_fields() {
        let offsets = CalibrationOffsets::new(DEFAULT_CALIBRATION_OFFSETS);
        assert_eq!(offsets.accelerometer_offset(), [-17, -72, 10]);
        assert_eq!(offsets.magnetometer_offset(), [196, 193, -171]);
        assert_eq!(offsets.gyroscope_offset(), [128, 0, 1]);
        assert_eq!(offsets.accelerometer_radius(), 1000);
        assert_eq!(offsets.magnetometer_radius(), 0);
        assert_eq!(offsets.as_ref(), &DEFAULT_CALIBRATION_OFFSETS[..]);
    }
}
