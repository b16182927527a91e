// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! Blocking delays.
//!
//! The driver only needs coarse waits (chip ID polling, reset and self-test
//! settle times), so a millisecond granularity is enough.

use std::{thread, time::Duration};

/// Millisecond delay
pub trait DelayMs {
    /// Pauses execution for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

/// Delay backed by `std::thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerMs;

impl DelayMs for TimerMs {
    fn delay_ms(&mut self, ms: u32) {
        delay_ms(ms);
    }
}

/// Sleep the current thread for `ms` milliseconds
pub fn delay_ms(ms: u32) {
    if ms > 0 {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}
