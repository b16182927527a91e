// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Decoding of raw register bursts into scaled values.
//!
//! All functions here are pure; bus access lives in the driver.

use crate::types::{Quaternion, Vector};

/// LSB per m/s^2 for accelerometer, linear acceleration and gravity
pub const ACCEL_LSB_PER_UNIT: f32 = 100.0;
/// LSB per uT for the magnetometer
pub const MAG_LSB_PER_UNIT: f32 = 16.0;
/// LSB per dps for the gyroscope
pub const GYRO_LSB_PER_UNIT: f32 = 16.0;
/// LSB per degree for Euler angles
pub const EULER_LSB_PER_UNIT: f32 = 16.0;
/// Q point of the quaternion registers
pub const QUATERNION_Q_POINT: usize = 14;

/// Length of a vector burst read
pub const VECTOR_LEN: usize = 6;
/// Length of a quaternion burst read
pub const QUATERNION_LEN: usize = 8;

/// Read a little-endian i16 at `offset`
#[inline]
pub fn read_i16(buf: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([buf[offset], buf[offset + 1]])
}

/// Convert Q-point fixed-point value to f32
#[inline]
pub fn q_to_f32(q_val: i16, q_point: usize) -> f32 {
    (q_val as f32) / ((1u32 << q_point) as f32)
}

/// Decode an X/Y/Z burst, dividing each axis by `lsb_per_unit`
pub fn decode_vector(buf: &[u8; VECTOR_LEN], lsb_per_unit: f32) -> Vector {
    Vector {
        x: read_i16(buf, 0) as f32 / lsb_per_unit,
        y: read_i16(buf, 2) as f32 / lsb_per_unit,
        z: read_i16(buf, 4) as f32 / lsb_per_unit,
    }
}

/// Decode a W/X/Y/Z quaternion burst
pub fn decode_quaternion(buf: &[u8; QUATERNION_LEN]) -> Quaternion {
    Quaternion {
        w: q_to_f32(read_i16(buf, 0), QUATERNION_Q_POINT),
        x: q_to_f32(read_i16(buf, 2), QUATERNION_Q_POINT),
        y: q_to_f32(read_i16(buf, 4), QUATERNION_Q_POINT),
        z: q_to_f32(read_i16(buf, 6), QUATERNION_Q_POINT),
    }
}
