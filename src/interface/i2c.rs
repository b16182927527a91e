// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Register access over an `embedded-hal` I2C bus, with per-transaction retry.

use std::time::Duration;

use embedded_hal::i2c::I2c;
use linux_embedded_hal::{I2CError, I2cdev};
use log::{trace, warn};

use super::delay::{DelayMs, TimerMs};
use super::RegisterInterface;
use crate::config::SensorConfig;
use crate::Error;

/// Retry budget applied to every single register transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure
    pub retries: u32,
    /// Fixed wait between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    /// Fail on the first error
    pub fn none() -> Self {
        Self::default()
    }

    /// Run `op` until it succeeds or the budget is spent, waiting on `delay`
    /// between attempts; the last error is returned on exhaustion.
    pub fn run<T, E, F, D>(&self, delay: &mut D, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        D: DelayMs,
        E: core::fmt::Debug,
    {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(val) => return Ok(val),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "bus transaction failed ({:?}), retry {}/{}",
                        e, attempt, self.retries
                    );
                    delay.delay_ms(self.delay.as_millis().min(u32::MAX as u128) as u32);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// A BNO055 at a fixed 7-bit address on an I2C bus.
///
/// `D` paces retries; it defaults to a thread sleep.
pub struct RegisterBus<I, D = TimerMs> {
    i2c: I,
    address: u8,
    retry: RetryPolicy,
    delay: D,
}

impl<I> RegisterBus<I> {
    pub fn new(i2c: I, address: u8, retry: RetryPolicy) -> Self {
        Self {
            i2c,
            address,
            retry,
            delay: TimerMs,
        }
    }
}

impl<I, D> RegisterBus<I, D> {
    /// Wait between retries on `delay` instead
    pub fn with_delay<D2: DelayMs>(self, delay: D2) -> RegisterBus<I, D2> {
        RegisterBus {
            i2c: self.i2c,
            address: self.address,
            retry: self.retry,
            delay,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Returns the wrapped bus
    pub fn free(self) -> I {
        self.i2c
    }
}

impl RegisterBus<I2cdev> {
    /// Open `/dev/i2c-N` as described by `config`
    pub fn open(config: &SensorConfig) -> Result<Self, Error<I2CError>> {
        let path = config.device_path();
        let i2c = I2cdev::new(&path).map_err(|e| Error::Open {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        trace!("opened {} for address 0x{:02X}", path, config.address);
        Ok(Self::new(i2c, config.address, config.retry_policy()))
    }
}

impl<I: I2c, D: DelayMs> RegisterInterface for RegisterBus<I, D> {
    type Error = I::Error;

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_buffer(reg, &mut buf)?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> Result<(), Self::Error> {
        let (i2c, address) = (&mut self.i2c, self.address);
        self.retry.run(&mut self.delay, || i2c.write(address, &[reg, value]))?;
        trace!("wr 0x{:02X} <- 0x{:02X}", reg, value);
        Ok(())
    }

    fn read_buffer(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        let (i2c, address) = (&mut self.i2c, self.address);
        self.retry.run(&mut self.delay, || i2c.write_read(address, &[reg], buf))?;
        trace!("rd 0x{:02X} -> {:02X?}", reg, buf);
        Ok(())
    }

    fn write_buffer(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame = Vec::with_capacity(data.len() + 1);
        frame.push(reg);
        frame.extend_from_slice(data);

        let (i2c, address) = (&mut self.i2c, self.address);
        self.retry.run(&mut self.delay, || i2c.write(address, &frame))?;
        trace!("wr 0x{:02X} <- {:02X?}", reg, data);
        Ok(())
    }

    fn close(self) -> Result<(), Self::Error> {
        trace!("releasing bus for 0x{:02X}", self.address);
        drop(self.i2c);
        Ok(())
    }
}
