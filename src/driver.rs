// Copyright 2025 Au-Zone Technologies Inc.
// SPDX-License-Identifier: Apache-2.0

//! BNO055 driver implementation.
//!
//! [`Bno055`] owns the register interface and the operation mode the chip was
//! last switched to. Every public call takes one lock for its whole duration,
//! so the "switch to CONFIG, write, switch back" sequence used by
//! configuration writes never interleaves with another caller.
//!
//! Register writes are not transactional. When a multi-step call fails half
//! way, the writes already made stay on the chip, and the tracked mode only
//! reflects mode writes that succeeded. Use [`Bno055::resync_mode`] after such
//! an error before relying on the mode again.

use linux_embedded_hal::{I2CError, I2cdev};
use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::{
    axis::AxisConfig,
    calibration::{CalibrationOffsets, CalibrationStatus},
    codec::{
        decode_quaternion, decode_vector, ACCEL_LSB_PER_UNIT, EULER_LSB_PER_UNIT,
        GYRO_LSB_PER_UNIT, MAG_LSB_PER_UNIT, QUATERNION_LEN, VECTOR_LEN,
    },
    config::SensorConfig,
    constants::{
        CALIBRATION_OFFSETS_LEN, CHIP_ID, CHIP_ID_ATTEMPTS, CHIP_ID_POLL_MS,
        DEFAULT_CALIBRATION_OFFSETS, REG_ACC_DATA_X_LSB, REG_ACC_OFFSET_X_LSB, REG_ACC_REV_ID,
        REG_AXIS_MAP_CONFIG, REG_AXIS_MAP_SIGN, REG_CALIB_STAT, REG_CHIP_ID, REG_EUL_HEADING_LSB,
        REG_GRV_DATA_X_LSB, REG_GYR_DATA_X_LSB, REG_LIA_DATA_X_LSB, REG_MAG_DATA_X_LSB,
        REG_OPR_MODE, REG_PAGE_ID, REG_PWR_MODE, REG_QUA_DATA_W_LSB, REG_ST_RESULT,
        REG_SYS_ERR, REG_SYS_STATUS, REG_SYS_TRIGGER, REG_TEMP, REG_TEMP_SOURCE, REG_UNIT_SEL,
        RESET_SETTLE_MS, SELF_TEST_SETTLE_MS, SYS_TRIGGER_CLK_SEL, SYS_TRIGGER_RST_SYS,
        SYS_TRIGGER_SELF_TEST, TEMP_SOURCE_GYROSCOPE, UNIT_SEL_DEFAULT,
    },
    interface::{
        delay::{DelayMs, TimerMs},
        RegisterBus, RegisterInterface,
    },
    types::{OperationMode, PowerMode, Quaternion, Revision, Status, Vector},
    Error,
};

type DriverResult<T, B> = Result<T, Error<<B as RegisterInterface>::Error>>;

/// Everything guarded by the driver lock
struct State<B, D> {
    /// `None` once closed
    bus: Option<B>,
    delay: D,
    /// Last mode successfully written to OPR_MODE
    mode: OperationMode,
}

impl<B, D> State<B, D>
where
    B: RegisterInterface,
    D: DelayMs,
{
    fn bus(&mut self) -> DriverResult<&mut B, B> {
        self.bus.as_mut().ok_or(Error::Closed)
    }

    fn read_byte(&mut self, reg: u8) -> DriverResult<u8, B> {
        self.bus()?.read_byte(reg).map_err(Error::Comm)
    }

    fn write_byte(&mut self, reg: u8, value: u8) -> DriverResult<(), B> {
        self.bus()?.write_byte(reg, value).map_err(Error::Comm)
    }

    fn read_buffer(&mut self, reg: u8, buf: &mut [u8]) -> DriverResult<(), B> {
        self.bus()?.read_buffer(reg, buf).map_err(Error::Comm)
    }

    fn set_mode(&mut self, mode: OperationMode) -> DriverResult<(), B> {
        trace!("mode {:?} -> {:?}", self.mode, mode);
        self.write_byte(REG_OPR_MODE, mode.bits())?;
        self.mode = mode;
        Ok(())
    }

    /// Run `op` with the chip in CONFIG mode, then put the previous mode back.
    ///
    /// `op` only sees the bus and the delay source, so it cannot start a
    /// nested switch that would lose the previous mode. On error nothing is
    /// restored.
    fn in_config_mode<T, F>(&mut self, op: F) -> DriverResult<T, B>
    where
        F: FnOnce(&mut B, &mut D) -> Result<T, B::Error>,
    {
        let prev = self.mode;
        if prev != OperationMode::Config {
            self.set_mode(OperationMode::Config)?;
        }

        let State { bus, delay, .. } = self;
        let bus = bus.as_mut().ok_or(Error::Closed)?;
        let out = op(bus, delay).map_err(|e| {
            warn!("configuration write failed in CONFIG mode, {:?} not restored", prev);
            Error::Comm(e)
        })?;

        if prev != OperationMode::Config {
            self.set_mode(prev).inspect_err(|_| {
                warn!("failed to restore {:?}, tracked mode is CONFIG", prev);
            })?;
        }
        Ok(out)
    }

    fn read_vector(&mut self, reg: u8, lsb_per_unit: f32) -> DriverResult<Vector, B> {
        let mut buf = [0u8; VECTOR_LEN];
        self.read_buffer(reg, &mut buf)?;
        Ok(decode_vector(&buf, lsb_per_unit))
    }

    fn read_status(&mut self) -> DriverResult<Status, B> {
        let system = self.read_byte(REG_SYS_STATUS)?;
        let self_test = self.read_byte(REG_ST_RESULT)?;
        let system_error = self.read_byte(REG_SYS_ERR)?;
        Ok(Status {
            system,
            system_error,
            self_test,
        })
    }

    /// Poll the chip ID register until it reads 0xA0
    fn check_exists(&mut self) -> DriverResult<(), B> {
        let mut last_id = 0;
        for attempt in 1..=CHIP_ID_ATTEMPTS {
            last_id = self.read_byte(REG_CHIP_ID)?;
            if last_id == CHIP_ID {
                return Ok(());
            }
            trace!("chip id 0x{:02X} on attempt {}", last_id, attempt);
            if attempt < CHIP_ID_ATTEMPTS {
                self.delay.delay_ms(CHIP_ID_POLL_MS);
            }
        }
        Err(Error::SensorNotFound { last_id })
    }

    fn initialize(&mut self) -> DriverResult<(), B> {
        trace!("driver init");
        self.check_exists()?;
        self.set_mode(OperationMode::Config)?;

        self.write_byte(REG_SYS_TRIGGER, SYS_TRIGGER_RST_SYS)?;
        self.delay.delay_ms(RESET_SETTLE_MS);
        self.check_exists()?;
        debug!("sensor reset complete");

        self.write_byte(REG_PWR_MODE, PowerMode::Normal.bits())?;
        self.write_byte(REG_PAGE_ID, 0)?;
        // internal oscillator
        self.write_byte(REG_SYS_TRIGGER, 0)?;
        self.write_byte(REG_TEMP_SOURCE, TEMP_SOURCE_GYROSCOPE)?;
        self.write_byte(REG_UNIT_SEL, UNIT_SEL_DEFAULT)?;
        self.set_mode(OperationMode::Ndof)?;
        debug!("sensor configured, fusion running");
        Ok(())
    }
}

/// BNO055 driver
///
/// Safe to share between threads (`Arc<Bno055<..>>`); calls are serialized.
pub struct Bno055<B, D = TimerMs> {
    state: Mutex<State<B, D>>,
}

/// Driver on a Linux `/dev/i2c-N` device
pub type I2cBno055 = Bno055<RegisterBus<I2cdev>, TimerMs>;

impl I2cBno055 {
    /// Open the Linux I2C bus from `config` and initialize the sensor.
    pub fn open(config: &SensorConfig) -> Result<Self, Error<I2CError>> {
        let bus = RegisterBus::open(config)?;
        Self::new(bus, TimerMs)
    }
}

impl<B, D> Bno055<B, D>
where
    B: RegisterInterface,
    D: DelayMs,
{
    /// Initialize the sensor behind `bus`.
    ///
    /// Verifies the chip ID (10 polls, 100 ms apart), resets the chip, waits
    /// one second, re-verifies, selects normal power, page 0, the internal
    /// oscillator, gyroscope temperature and default units, switches to NDOF
    /// and writes [`DEFAULT_CALIBRATION_OFFSETS`]. Any failure drops the bus.
    pub fn new(bus: B, delay: D) -> DriverResult<Self, B> {
        let mut state = State {
            bus: Some(bus),
            delay,
            mode: OperationMode::Ndof,
        };
        state.initialize()?;

        let sensor = Self {
            state: Mutex::new(state),
        };
        sensor.calibrate(DEFAULT_CALIBRATION_OFFSETS)?;
        Ok(sensor)
    }

    /// Mode the driver last switched the chip to.
    ///
    /// Answered from the driver's own bookkeeping without a bus transaction,
    /// so it keeps working after [`Bno055::close`]. Use
    /// [`Bno055::resync_mode`] to ask the chip.
    pub fn operation_mode(&self) -> OperationMode {
        self.state.lock().mode
    }

    /// Switch the chip to `mode`
    pub fn set_operation_mode(&self, mode: OperationMode) -> DriverResult<(), B> {
        self.state.lock().set_mode(mode)
    }

    /// Read OPR_MODE back from the chip and adopt it as the tracked mode.
    pub fn resync_mode(&self) -> DriverResult<OperationMode, B> {
        let mut state = self.state.lock();
        let raw = state.read_byte(REG_OPR_MODE)?;
        let mode = OperationMode::from_bits(raw).ok_or(Error::UnknownMode(raw))?;
        if mode != state.mode {
            warn!("tracked mode {:?} but chip reports {:?}", state.mode, mode);
        }
        state.mode = mode;
        Ok(mode)
    }

    /// Run the built-in self test and report the status registers.
    ///
    /// This is slow and disruptive: it switches to CONFIG mode, triggers the
    /// self test and blocks for one second before restoring the mode. Use
    /// [`Bno055::system_status`] for a plain read.
    pub fn status(&self) -> DriverResult<Status, B> {
        let mut state = self.state.lock();
        state.write_byte(REG_PAGE_ID, 0)?;
        state.in_config_mode(|bus, delay| {
            let trigger = bus.read_byte(REG_SYS_TRIGGER)?;
            bus.write_byte(REG_SYS_TRIGGER, trigger | SYS_TRIGGER_SELF_TEST)?;
            delay.delay_ms(SELF_TEST_SETTLE_MS);
            Ok(())
        })?;
        state.read_status()
    }

    /// Read the status registers without triggering a self test
    pub fn system_status(&self) -> DriverResult<Status, B> {
        self.state.lock().read_status()
    }

    pub fn revision(&self) -> DriverResult<Revision, B> {
        // ACC, MAG, GYR, SW LSB, SW MSB, BL
        let mut buf = [0u8; 6];
        self.state.lock().read_buffer(REG_ACC_REV_ID, &mut buf)?;
        Ok(Revision {
            accelerometer: buf[0],
            magnetometer: buf[1],
            gyroscope: buf[2],
            software: u16::from_le_bytes([buf[3], buf[4]]),
            bootloader: buf[5],
        })
    }

    /// Clock from the external 32 kHz crystal instead of the internal
    /// oscillator
    pub fn use_external_crystal(&self, enable: bool) -> DriverResult<(), B> {
        let value = if enable { SYS_TRIGGER_CLK_SEL } else { 0 };
        self.state.lock().in_config_mode(|bus, _| {
            bus.write_byte(REG_PAGE_ID, 0)?;
            bus.write_byte(REG_SYS_TRIGGER, value)
        })
    }

    pub fn calibration_status(&self) -> DriverResult<CalibrationStatus, B> {
        let status = self.state.lock().read_byte(REG_CALIB_STAT)?;
        Ok(CalibrationStatus::from_register(status))
    }

    /// Read the offset/radius block. Switches to CONFIG mode and back.
    pub fn calibration_offsets(&self) -> DriverResult<CalibrationOffsets, B> {
        let mut state = self.state.lock();
        Self::read_offsets(&mut state)
    }

    /// Read offsets and calibration status in one locked sequence
    pub fn calibration(&self) -> DriverResult<(CalibrationOffsets, CalibrationStatus), B> {
        let mut state = self.state.lock();
        let status = CalibrationStatus::from_register(state.read_byte(REG_CALIB_STAT)?);
        let offsets = Self::read_offsets(&mut state)?;
        Ok((offsets, status))
    }

    fn read_offsets(state: &mut State<B, D>) -> DriverResult<CalibrationOffsets, B> {
        let mut buf = [0u8; CALIBRATION_OFFSETS_LEN];
        state.in_config_mode(|bus, _| bus.read_buffer(REG_ACC_OFFSET_X_LSB, &mut buf))?;
        Ok(CalibrationOffsets::new(buf))
    }

    /// Write a previously saved offset/radius block.
    ///
    /// `offsets` must be exactly 22 bytes; anything else is rejected before
    /// the bus is touched.
    pub fn calibrate(&self, offsets: impl AsRef<[u8]>) -> DriverResult<(), B> {
        let offsets = offsets.as_ref();
        if offsets.len() != CALIBRATION_OFFSETS_LEN {
            return Err(Error::InvalidCalibrationLength {
                expected: CALIBRATION_OFFSETS_LEN,
                actual: offsets.len(),
            });
        }
        self.state
            .lock()
            .in_config_mode(|bus, _| bus.write_buffer(REG_ACC_OFFSET_X_LSB, offsets))
    }

    pub fn axis_config(&self) -> DriverResult<AxisConfig, B> {
        let mut state = self.state.lock();
        let map_config = state.read_byte(REG_AXIS_MAP_CONFIG)?;
        let map_sign = state.read_byte(REG_AXIS_MAP_SIGN)?;
        Ok(AxisConfig::from_registers(map_config, map_sign))
    }

    /// Remap the output axes. `config` must map X, Y and Z to distinct
    /// physical axes.
    pub fn remap_axis(&self, config: impl Into<AxisConfig>) -> DriverResult<(), B> {
        let config = config.into();
        if !config.is_valid() {
            return Err(Error::InvalidAxisRemap(config));
        }
        self.state.lock().in_config_mode(|bus, _| {
            bus.write_byte(REG_AXIS_MAP_CONFIG, config.mappings())?;
            bus.write_byte(REG_AXIS_MAP_SIGN, config.signs())
        })
    }

    /// Chip temperature in degrees Celsius
    pub fn temperature(&self) -> DriverResult<i8, B> {
        Ok(self.state.lock().read_byte(REG_TEMP)? as i8)
    }

    /// Magnetic field in uT
    pub fn magnetometer(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_MAG_DATA_X_LSB, MAG_LSB_PER_UNIT)
    }

    /// Angular velocity in dps
    pub fn gyroscope(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_GYR_DATA_X_LSB, GYRO_LSB_PER_UNIT)
    }

    /// Heading, roll and pitch in degrees as x, y, z
    pub fn euler(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_EUL_HEADING_LSB, EULER_LSB_PER_UNIT)
    }

    /// Acceleration including gravity in m/s^2
    pub fn accelerometer(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_ACC_DATA_X_LSB, ACCEL_LSB_PER_UNIT)
    }

    /// Acceleration with gravity removed in m/s^2
    pub fn linear_acceleration(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_LIA_DATA_X_LSB, ACCEL_LSB_PER_UNIT)
    }

    /// Gravity vector in m/s^2
    pub fn gravity(&self) -> DriverResult<Vector, B> {
        self.state
            .lock()
            .read_vector(REG_GRV_DATA_X_LSB, ACCEL_LSB_PER_UNIT)
    }

    pub fn quaternion(&self) -> DriverResult<Quaternion, B> {
        let mut buf = [0u8; QUATERNION_LEN];
        self.state.lock().read_buffer(REG_QUA_DATA_W_LSB, &mut buf)?;
        Ok(decode_quaternion(&buf))
    }

    pub fn set_power_mode(&self, mode: PowerMode) -> DriverResult<(), B> {
        self.state
            .lock()
            .in_config_mode(|bus, _| bus.write_byte(REG_PWR_MODE, mode.bits()))
    }

    /// Enter suspend mode
    pub fn sleep(&self) -> DriverResult<(), B> {
        self.set_power_mode(PowerMode::Suspend)
    }

    /// Return to normal power mode
    pub fn wakeup(&self) -> DriverResult<(), B> {
        self.set_power_mode(PowerMode::Normal)
    }

    /// Release the bus. Every later call, including another `close`, fails
    /// with [`Error::Closed`].
    pub fn close(&self) -> DriverResult<(), B> {
        let bus = self.state.lock().bus.take().ok_or(Error::Closed)?;
        debug!("closing sensor");
        bus.close().map_err(Error::Comm)
    }
}
