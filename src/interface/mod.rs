// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register-level access to the sensor.

pub mod delay;
pub mod i2c;

pub use i2c::{RegisterBus, RetryPolicy};

/// Byte-oriented register access, as consumed by the driver.
///
/// Implementations may retry transient failures internally; an `Err` means
/// the transaction is given up.
pub trait RegisterInterface {
    type Error: core::fmt::Debug;

    /// Read one register
    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error>;

    /// Write one register
    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error>;

    /// Burst read `buf.len()` consecutive registers starting at `reg`
    fn read_buffer(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Burst write `data` to consecutive registers starting at `reg`
    fn write_buffer(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Release the underlying device
    fn close(self) -> Result<(), Self::Error>
    where
        Self: Sized,
    {
        Ok(())
    }
}
