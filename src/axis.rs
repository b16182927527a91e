// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Axis remapping (AXIS_MAP_CONFIG / AXIS_MAP_SIGN).
//!
//! By default the axes of the chip look like this, seen from above with the
//! pin-1 dot in the corner (datasheet section 3.4):
//!
//! ```text
//!                   | Z axis
//!                   |
//!                   |   / X axis
//!               ____|__/____
//!  Y axis     / *   | /    /|
//!  _________ /______|/    //
//!           /___________ //
//!          |____________|/
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{REMAP_CONFIG_P, REMAP_SIGN_P};

/// Physical channel index used in AXIS_MAP_CONFIG
pub const AXIS_X: u8 = 0;
pub const AXIS_Y: u8 = 1;
pub const AXIS_Z: u8 = 2;

/// Output-axis to physical-channel mapping plus sign inversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisConfig {
    /// Physical channel reported as X (2 bits)
    pub x: u8,
    /// Physical channel reported as Y (2 bits)
    pub y: u8,
    /// Physical channel reported as Z (2 bits)
    pub z: u8,
    pub invert_x: bool,
    pub invert_y: bool,
    pub invert_z: bool,
}

impl AxisConfig {
    /// Decode the two remap registers
    pub fn from_registers(map_config: u8, map_sign: u8) -> Self {
        Self {
            x: map_config & 0x03,
            y: (map_config >> 2) & 0x03,
            z: (map_config >> 4) & 0x03,
            invert_x: (map_sign >> 2) & 0x01 != 0,
            invert_y: (map_sign >> 1) & 0x01 != 0,
            invert_z: map_sign & 0x01 != 0,
        }
    }

    /// AXIS_MAP_CONFIG value: `Z[5:4] Y[3:2] X[1:0]`
    pub fn mappings(&self) -> u8 {
        ((self.z & 0x03) << 4) | ((self.y & 0x03) << 2) | (self.x & 0x03)
    }

    /// AXIS_MAP_SIGN value: `X[2] Y[1] Z[0]`
    pub fn signs(&self) -> u8 {
        ((self.invert_x as u8) << 2) | ((self.invert_y as u8) << 1) | (self.invert_z as u8)
    }

    /// The chip accepts any bit pattern, but only a permutation of the three
    /// physical axes yields meaningful fusion output.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; 3];
        for axis in [self.x, self.y, self.z] {
            match seen.get_mut(axis as usize) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisPlacement::P1.config()
    }
}

/// Mounting presets from datasheet section 3.4; `P1` is the power-on default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPlacement {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
}

impl AxisPlacement {
    pub fn config(self) -> AxisConfig {
        let i = self as usize;
        AxisConfig::from_registers(REMAP_CONFIG_P[i], REMAP_SIGN_P[i])
    }
}

impl From<AxisPlacement> for AxisConfig {
    fn from(placement: AxisPlacement) -> Self {
        placement.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEMENTS: [AxisPlacement; 8] = [
        AxisPlacement::P0,
        AxisPlacement::P1,
        AxisPlacement::P2,
        AxisPlacement::P3,
        AxisPlacement::P4,
        AxisPlacement::P5,
        AxisPlacement::P6,
        AxisPlacement::P7,
    ];

    #[test]
    fn test_round_trip_all_fields() {
        for x in 0..4u8 {
            for y in 0..4u8 {
                for z in 0..4u8 {
                    for signs in 0..8u8 {
                        let config = AxisConfig {
                            x,
                            y,
                            z,
                            invert_x: signs & 0x04 != 0,
                            invert_y: signs & 0x02 != 0,
                            invert_z: signs & 0x01 != 0,
                        };
                        let decoded =
                            AxisConfig::from_registers(config.mappings(), config.signs());
                        assert_eq!(decoded, config);
                        assert_eq!(config.signs(), signs);
                    }
                }
            }
        }
    }

    #[test]
    fn test_default_is_identity() {
        let config = AxisConfig::default();
        assert_eq!((config.x, config.y, config.z), (AXIS_X, AXIS_Y, AXIS_Z));
        assert!(!config.invert_x && !config.invert_y && !config.invert_z);
        assert_eq!(config.mappings(), 0x24);
        assert_eq!(config.signs(), 0x00);
    }

    #[test]
    fn test_decode_ignores_reserved_bits() {
        let config = AxisConfig::from_registers(0xE4, 0xF8);
        assert_eq!(config, AxisConfig::default());
    }

    #[test]
    fn test_placements_are_valid_permutations() {
        for placement in PLACEMENTS {
            let config = placement.config();
            assert!(config.is_valid(), "{:?} -> {:?}", placement, config);
        }
        let p0 = AxisPlacement::P0.config();
        assert_eq!((p0.x, p0.y, p0.z), (AXIS_Y, AXIS_X, AXIS_Z));
        assert!(p0.invert_x && !p0.invert_y && !p0.invert_z);
    }

    #[test]
    fn test_validation_rejects_duplicates() {
        let mut config = AxisConfig::default();
        config.y = AXIS_X;
        assert!(!config.is_valid());
        config.y = 3;
        assert!(!config.is_valid());
    }
}
