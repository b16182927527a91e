// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register map and protocol constants for the BNO055.
//!
//! Addresses are for register page 0, which is the only page this driver
//! selects. Multi-byte values are little-endian, LSB at the lower address.

/// Default I2C address (COM3 pin low)
pub const DEFAULT_ADDRESS: u8 = 0x28;
/// Alternate I2C address (COM3 pin high)
pub const ALTERNATE_ADDRESS: u8 = 0x29;

/// Value of the chip ID register on a genuine BNO055
pub const CHIP_ID: u8 = 0xA0;

/// Page select register, readable on both pages
pub const REG_PAGE_ID: u8 = 0x07;

// =============================================================================
// Identification
// =============================================================================

pub const REG_CHIP_ID: u8 = 0x00;
pub const REG_ACC_REV_ID: u8 = 0x01;
pub const REG_MAG_REV_ID: u8 = 0x02;
pub const REG_GYR_REV_ID: u8 = 0x03;
pub const REG_SW_REV_ID_LSB: u8 = 0x04;
pub const REG_SW_REV_ID_MSB: u8 = 0x05;
pub const REG_BL_REV_ID: u8 = 0x06;

// =============================================================================
// Sensor data (each block is X/Y/Z or W/X/Y/Z, LSB first)
// =============================================================================

/// Accelerometer, 1 m/s^2 = 100 LSB
pub const REG_ACC_DATA_X_LSB: u8 = 0x08;
/// Magnetometer, 1 uT = 16 LSB
pub const REG_MAG_DATA_X_LSB: u8 = 0x0E;
/// Gyroscope, 1 dps = 16 LSB
pub const REG_GYR_DATA_X_LSB: u8 = 0x14;
/// Euler angles heading/roll/pitch, 1 degree = 16 LSB
pub const REG_EUL_HEADING_LSB: u8 = 0x1A;
/// Quaternion W/X/Y/Z, 1 = 2^14 LSB
pub const REG_QUA_DATA_W_LSB: u8 = 0x20;
/// Linear acceleration, 1 m/s^2 = 100 LSB
pub const REG_LIA_DATA_X_LSB: u8 = 0x28;
/// Gravity vector, 1 m/s^2 = 100 LSB
pub const REG_GRV_DATA_X_LSB: u8 = 0x2E;
/// Temperature, signed, 1 degree = 1 LSB
pub const REG_TEMP: u8 = 0x34;

// =============================================================================
// Status
// =============================================================================

pub const REG_CALIB_STAT: u8 = 0x35;
pub const REG_ST_RESULT: u8 = 0x36;
pub const REG_INT_STA: u8 = 0x37;
pub const REG_SYS_CLK_STATUS: u8 = 0x38;
pub const REG_SYS_STATUS: u8 = 0x39;
pub const REG_SYS_ERR: u8 = 0x3A;

// =============================================================================
// Configuration
// =============================================================================

pub const REG_UNIT_SEL: u8 = 0x3B;
pub const REG_DATA_SELECT: u8 = 0x3C;
pub const REG_OPR_MODE: u8 = 0x3D;
pub const REG_PWR_MODE: u8 = 0x3E;
pub const REG_SYS_TRIGGER: u8 = 0x3F;
pub const REG_TEMP_SOURCE: u8 = 0x40;
pub const REG_AXIS_MAP_CONFIG: u8 = 0x41;
pub const REG_AXIS_MAP_SIGN: u8 = 0x42;

/// Soft-iron correction matrix, nine 16-bit entries up to 0x54
pub const REG_SIC_MATRIX_0_LSB: u8 = 0x43;

// =============================================================================
// Offsets and radius (written only in CONFIG mode)
// =============================================================================

pub const REG_ACC_OFFSET_X_LSB: u8 = 0x55;
pub const REG_MAG_OFFSET_X_LSB: u8 = 0x5B;
pub const REG_GYR_OFFSET_X_LSB: u8 = 0x61;
pub const REG_ACC_RADIUS_LSB: u8 = 0x67;
pub const REG_MAG_RADIUS_LSB: u8 = 0x69;

/// Size of the offset/radius block starting at `REG_ACC_OFFSET_X_LSB`
pub const CALIBRATION_OFFSETS_LEN: usize = 22;

// =============================================================================
// Register values
// =============================================================================

/// SYS_TRIGGER: start self test
pub const SYS_TRIGGER_SELF_TEST: u8 = 0x01;
/// SYS_TRIGGER: reset system
pub const SYS_TRIGGER_RST_SYS: u8 = 0x20;
/// SYS_TRIGGER: use external 32 kHz crystal
pub const SYS_TRIGGER_CLK_SEL: u8 = 0x80;

/// TEMP_SOURCE: gyroscope
pub const TEMP_SOURCE_GYROSCOPE: u8 = 0x01;

/// UNIT_SEL: m/s^2, dps, degrees, Celsius, Windows orientation
pub const UNIT_SEL_DEFAULT: u8 = 0x00;

/// OPR_MODE carries the mode in its low nibble
pub const OPR_MODE_MASK: u8 = 0x0F;

pub const POWER_MODE_NORMAL: u8 = 0x00;
pub const POWER_MODE_LOW_POWER: u8 = 0x01;
pub const POWER_MODE_SUSPEND: u8 = 0x02;

pub const OPERATION_MODE_CONFIG: u8 = 0x00;
pub const OPERATION_MODE_ACC_ONLY: u8 = 0x01;
pub const OPERATION_MODE_MAG_ONLY: u8 = 0x02;
pub const OPERATION_MODE_GYRO_ONLY: u8 = 0x03;
pub const OPERATION_MODE_ACC_MAG: u8 = 0x04;
pub const OPERATION_MODE_ACC_GYRO: u8 = 0x05;
pub const OPERATION_MODE_MAG_GYRO: u8 = 0x06;
pub const OPERATION_MODE_AMG: u8 = 0x07;
pub const OPERATION_MODE_IMU_PLUS: u8 = 0x08;
pub const OPERATION_MODE_COMPASS: u8 = 0x09;
pub const OPERATION_MODE_M4G: u8 = 0x0A;
pub const OPERATION_MODE_NDOF_FMC_OFF: u8 = 0x0B;
pub const OPERATION_MODE_NDOF: u8 = 0x0C;

// =============================================================================
// Axis placement presets (datasheet section 3.4)
// =============================================================================

/// AXIS_MAP_CONFIG value for placements P0..P7
pub const REMAP_CONFIG_P: [u8; 8] = [0x21, 0x24, 0x24, 0x21, 0x24, 0x21, 0x21, 0x24];
/// AXIS_MAP_SIGN value for placements P0..P7
pub const REMAP_SIGN_P: [u8; 8] = [0x04, 0x00, 0x06, 0x02, 0x03, 0x01, 0x07, 0x05];

// =============================================================================
// Timing
// =============================================================================

/// Chip ID polls before giving up
pub const CHIP_ID_ATTEMPTS: u32 = 10;
/// Delay between chip ID polls
pub const CHIP_ID_POLL_MS: u32 = 100;
/// Wait after a system reset
pub const RESET_SETTLE_MS: u32 = 1000;
/// Wait for the self test to finish
pub const SELF_TEST_SETTLE_MS: u32 = 1000;

/// Factory-like offsets written at start-up so fusion output is usable
/// before a real calibration has been restored.
pub const DEFAULT_CALIBRATION_OFFSETS: [u8; CALIBRATION_OFFSETS_LEN] = [
    239, 255, 184, 255, 10, 0, // accelerometer
    196, 0, 193, 0, 85, 255, // magnetometer
    128, 0, 0, 0, 1, 0, // gyroscope
    232, 3, // accelerometer radius
    0, 0, // magnetometer radius
];
