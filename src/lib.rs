//! Platform-agnostic driver for the DFRobot SEN0460 laser dust sensor,
//! built on the [`embedded-hal`](https://docs.rs/embedded-hal) 1.0 blocking
//! I2C traits.
//!
//! The sensor reports particulate-matter mass concentrations (PM1.0, PM2.5,
//! PM10 in standard and atmospheric calibration) and particle counts for six
//! size bins in one checksummed 32-byte frame. The driver validates every
//! frame, tracks the sensor's sleep/wake state and 30-second warmup period,
//! and derives a US EPA Air Quality Index from the atmospheric PM2.5 value.
//!
//! The I2C bus is injected, so any `embedded-hal` implementation works —
//! including a mock for host-side tests. The driver takes the bus by value;
//! `&mut self` on every transaction keeps bus access serialized (wrap the bus
//! with `embedded-hal-bus` if it must be shared). Timestamps are plain
//! milliseconds supplied by the caller, so the crate works without a clock.
//!
//! # Example
//!
//! ```
//! use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
//! use sen0460_rs::Sen0460;
//!
//! # let mut frame = [0u8; 32];
//! # frame[0] = 0x42;
//! # frame[1] = 0x4D;
//! # frame[3] = 28;
//! # frame[13] = 7; // atmospheric PM2.5 = 7 µg/m³
//! # let sum: u16 = frame[..30].iter().map(|&b| b as u16).sum();
//! # frame[30..32].copy_from_slice(&sum.to_be_bytes());
//! let expectations = [
//!     I2cTransaction::write(0x19, vec![0x01, 0x02]),
//!     I2cTransaction::write_read(0x19, vec![0x00], frame.to_vec()),
//! ];
//! let mut i2c = I2cMock::new(&expectations);
//!
//! let mut sensor = Sen0460::new(i2c.clone());
//! sensor.wake(0)?;
//! // ... at least 30 s later ...
//! let reading = sensor.read(31_000)?;
//! assert_eq!(reading.measurement.pm2_5_atm, 7);
//! assert_eq!(reading.aqi.value, 29);
//! assert!(reading.warmed_up);
//!
//! i2c.done();
//! # Ok::<(), sen0460_rs::Error<embedded_hal::i2c::ErrorKind>>(())
//! ```

#![cfg_attr(not(test), no_std)]

use embedded_hal::i2c::I2c;

pub mod aqi;
mod error;
mod frame;
mod power;
mod types;

pub use aqi::{compute_aqi, Aqi, AqiError, Category};
pub use error::Error;
pub use frame::{FrameError, FRAME_LEN};
pub use power::{PowerMode, WARMUP_PERIOD_MS};
pub use types::{FirmwareVersion, Measurement, Reading};

use power::PowerState;

/// Default 7-bit I2C address of the SEN0460.
pub const SENSOR_ADDR: u8 = 0x19;

const REG_DATA: u8 = 0x00;
const REG_POWER: u8 = 0x01;
const REG_VERSION: u8 = 0x1D;

const CMD_LOW_POWER: u8 = 0x01;
const CMD_WAKE: u8 = 0x02;

/// Addressable 16-bit measurement registers, for reading a single field
/// without transferring the whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRegister {
    /// PM1.0 [μg/m³], standard particle
    Pm1_0Std = 0x05,
    /// PM2.5 [μg/m³], standard particle
    Pm2_5Std = 0x07,
    /// PM10 [μg/m³], standard particle
    Pm10Std = 0x09,
    /// PM1.0 [μg/m³], atmospheric environment
    Pm1_0Atm = 0x0B,
    /// PM2.5 [μg/m³], atmospheric environment
    Pm2_5Atm = 0x0D,
    /// PM10 [μg/m³], atmospheric environment
    Pm10Atm = 0x0F,
    /// Particles ≥0.3 μm per 0.1 L of air
    Particles0_3um = 0x11,
    /// Particles ≥0.5 μm per 0.1 L of air
    Particles0_5um = 0x13,
    /// Particles ≥1.0 μm per 0.1 L of air
    Particles1_0um = 0x15,
    /// Particles ≥2.5 μm per 0.1 L of air
    Particles2_5um = 0x17,
    /// Particles ≥5.0 μm per 0.1 L of air
    Particles5_0um = 0x19,
    /// Particles ≥10 μm per 0.1 L of air
    Particles10um = 0x1B,
}

/// SEN0460 driver. Owns the injected I2C bus and the sensor's power state.
#[derive(Debug)]
pub struct Sen0460<I2C> {
    i2c: I2C,
    address: u8,
    power: PowerState,
}

impl<I2C, E> Sen0460<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Creates a driver at the default address. The sensor is assumed to be
    /// in low-power mode until [`wake`](Self::wake) is called.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SENSOR_ADDR)
    }

    /// Creates a driver at a non-default address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Sen0460 {
            i2c,
            address,
            power: PowerState::new(),
        }
    }

    /// Powers up the laser and fan and starts the warmup timer.
    ///
    /// Idempotent: waking an already-active sensor re-sends the command but
    /// does not restart the timer. If the bus write fails the recorded power
    /// state is left unchanged.
    pub fn wake(&mut self, now_ms: u64) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[REG_POWER, CMD_WAKE])
            .map_err(Error::Bus)?;
        self.power.wake(now_ms);
        Ok(())
    }

    /// Puts the sensor into low-power mode.
    ///
    /// Clears the warmup timer: a reading taken after the next wake must
    /// satisfy the full warmup period again. If the bus write fails the
    /// recorded power state is left unchanged.
    pub fn sleep(&mut self) -> Result<(), Error<E>> {
        self.i2c
            .write(self.address, &[REG_POWER, CMD_LOW_POWER])
            .map_err(Error::Bus)?;
        self.power.sleep();
        Ok(())
    }

    /// Power mode as last successfully commanded.
    pub fn power_mode(&self) -> PowerMode {
        self.power.mode()
    }

    /// Whether the sensor is active and past its 30-second warmup period.
    pub fn is_warmed_up(&self, now_ms: u64) -> bool {
        self.power.is_warmed_up(now_ms)
    }

    /// Milliseconds of warmup left, or `None` while the sensor sleeps.
    pub fn warmup_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.power.warmup_remaining_ms(now_ms)
    }

    /// Reads and decodes one data frame.
    ///
    /// Issues a single 32-byte register read and runs the frame through the
    /// validation pipeline; a frame that fails validation is discarded and
    /// surfaced as [`Error::Frame`], never as data.
    pub fn read_frame(&mut self) -> Result<Measurement, Error<E>> {
        let mut buf = [0u8; FRAME_LEN];
        self.i2c
            .write_read(self.address, &[REG_DATA], &mut buf)
            .map_err(Error::Bus)?;
        Ok(frame::parse(&buf)?)
    }

    /// Reads one measurement register directly.
    ///
    /// Lighter-weight than [`read_frame`](Self::read_frame): two bytes on the
    /// wire instead of 32, but without the frame's checksum protection. Use
    /// the full frame read where integrity matters.
    pub fn read_word(&mut self, register: DataRegister) -> Result<u16, Error<E>> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register as u8], &mut buf)
            .map_err(Error::Bus)?;
        Ok(u16::from_be_bytes(buf))
    }

    /// Reads the firmware version register.
    pub fn read_version(&mut self) -> Result<FirmwareVersion, Error<E>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[REG_VERSION], &mut buf)
            .map_err(Error::Bus)?;
        Ok(FirmwareVersion(buf[0]))
    }

    /// Reads one frame and derives the AQI from its atmospheric PM2.5 value.
    ///
    /// The returned [`Reading`] also carries whether the warmup period had
    /// elapsed at `now_ms`; readings taken before that are usable but not
    /// trustworthy.
    pub fn read(&mut self, now_ms: u64) -> Result<Reading, Error<E>> {
        let measurement = self.read_frame()?;
        let aqi = compute_aqi(measurement.pm2_5_atm as f32)?;
        Ok(Reading {
            measurement,
            aqi,
            warmed_up: self.is_warmed_up(now_ms),
        })
    }

    /// Destroys the driver and hands back the I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    fn sample() -> Measurement {
        Measurement {
            pm1_0_std: 9,
            pm2_5_std: 14,
            pm10_std: 20,
            pm1_0_atm: 9,
            pm2_5_atm: 13,
            pm10_atm: 19,
            particles_0_3um: 1_800,
            particles_0_5um: 510,
            particles_1_0um: 92,
            particles_2_5um: 10,
            particles_5_0um: 4,
            particles_10um: 2,
            version: 0x13,
            error_code: 0,
        }
    }

    fn frame_read(response: [u8; FRAME_LEN]) -> I2cTransaction {
        I2cTransaction::write_read(SENSOR_ADDR, vec![REG_DATA], response.to_vec())
    }

    #[test]
    fn read_frame_decodes_register_values() {
        let m = sample();
        let mut i2c = I2cMock::new(&[frame_read(frame::encode(&m))]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.read_frame().unwrap(), m);

        i2c.done();
    }

    #[test]
    fn read_frame_surfaces_bus_errors() {
        let mut i2c = I2cMock::new(&[frame_read([0u8; FRAME_LEN]).with_error(ErrorKind::Other)]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.read_frame(), Err(Error::Bus(ErrorKind::Other)));

        i2c.done();
    }

    #[test]
    fn read_frame_rejects_corrupt_data() {
        let mut buf = frame::encode(&sample());
        buf[17] ^= 0x40;
        let mut i2c = I2cMock::new(&[frame_read(buf)]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert!(matches!(
            sensor.read_frame(),
            Err(Error::Frame(FrameError::Checksum { .. }))
        ));

        i2c.done();
    }

    #[test]
    fn wake_and_sleep_issue_power_commands() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE]),
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_LOW_POWER]),
        ]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.power_mode(), PowerMode::Sleeping);
        sensor.wake(0).unwrap();
        assert_eq!(sensor.power_mode(), PowerMode::Active);
        sensor.sleep().unwrap();
        assert_eq!(sensor.power_mode(), PowerMode::Sleeping);

        i2c.done();
    }

    #[test]
    fn failed_wake_leaves_state_unchanged() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE])
                .with_error(ErrorKind::Other),
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE]),
        ]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.wake(0), Err(Error::Bus(ErrorKind::Other)));
        assert_eq!(sensor.power_mode(), PowerMode::Sleeping);
        assert!(!sensor.is_warmed_up(60_000));

        // Warmup counts from the wake that actually reached the sensor.
        sensor.wake(50_000).unwrap();
        assert!(!sensor.is_warmed_up(60_000));
        assert!(sensor.is_warmed_up(80_000));

        i2c.done();
    }

    #[test]
    fn warmup_timer_resets_after_sleep() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE]),
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_LOW_POWER]),
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE]),
        ]);

        let mut sensor = Sen0460::new(i2c.clone());
        sensor.wake(0).unwrap();
        assert!(sensor.is_warmed_up(35_000));
        sensor.sleep().unwrap();
        sensor.wake(40_000).unwrap();
        assert!(!sensor.is_warmed_up(69_000));
        assert!(sensor.is_warmed_up(70_000));

        i2c.done();
    }

    #[test]
    fn read_combines_measurement_aqi_and_warmup() {
        let m = sample(); // atmospheric PM2.5 = 13 µg/m³ -> AQI 53, Moderate
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write(SENSOR_ADDR, vec![REG_POWER, CMD_WAKE]),
            frame_read(frame::encode(&m)),
            frame_read(frame::encode(&m)),
        ]);

        let mut sensor = Sen0460::new(i2c.clone());
        sensor.wake(0).unwrap();

        let early = sensor.read(5_000).unwrap();
        assert_eq!(early.measurement, m);
        assert_eq!(early.aqi.value, 53);
        assert_eq!(early.aqi.category, Category::Moderate);
        assert_eq!(early.aqi.color(), "#FFFF00");
        assert!(!early.warmed_up);

        let settled = sensor.read(30_000).unwrap();
        assert!(settled.warmed_up);

        i2c.done();
    }

    #[test]
    fn read_word_addresses_the_field_register() {
        let mut i2c = I2cMock::new(&[
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x0D], vec![0x01, 0x2C]),
            I2cTransaction::write_read(SENSOR_ADDR, vec![0x11], vec![0x07, 0x08]),
        ]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.read_word(DataRegister::Pm2_5Atm).unwrap(), 300);
        assert_eq!(
            sensor.read_word(DataRegister::Particles0_3um).unwrap(),
            1_800
        );

        i2c.done();
    }

    #[test]
    fn read_version_uses_the_version_register() {
        let mut i2c = I2cMock::new(&[I2cTransaction::write_read(
            SENSOR_ADDR,
            vec![REG_VERSION],
            vec![0x13],
        )]);

        let mut sensor = Sen0460::new(i2c.clone());
        assert_eq!(sensor.read_version().unwrap(), FirmwareVersion(0x13));

        i2c.done();
    }

    #[test]
    fn with_address_talks_to_that_address() {
        let m = sample();
        let mut i2c = I2cMock::new(&[I2cTransaction::write_read(
            0x20,
            vec![REG_DATA],
            frame::encode(&m).to_vec(),
        )]);

        let mut sensor = Sen0460::with_address(i2c.clone(), 0x20);
        assert_eq!(sensor.read_frame().unwrap(), m);

        i2c.done();
    }

    #[test]
    fn release_returns_the_bus() {
        let mut i2c = I2cMock::new(&[]);
        let sensor = Sen0460::new(i2c.clone());
        sensor.release();
        i2c.done();
    }
}
