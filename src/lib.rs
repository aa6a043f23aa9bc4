#![cfg_attr(not(test), no_std)]

mod bus;
mod calibration;
mod conf;
mod error;
mod register;

#[cfg(test)]
mod mock;

use embedded_hal as hal;

use hal::blocking::delay::DelayMs;

pub use accelerometer::{self, Accelerometer, RawAccelerometer, vector::{I16x3, F32x3}};

pub use bus::{HalBus, TwoWire, BUFFER_LENGTH};
pub use calibration::{offsets_for, CalibrationReport};
pub use conf::*;
pub use error::Error;
pub use register::{Register, I2C_ADDRESS};
use register::*;

/// Output data rate with the 62.5 Hz filter band width
const ODR_DEFAULT_HZ: f32 = 125.0;
/// Output data rate with the 125 Hz filter band width
const ODR_WIDE_HZ: f32 = 250.0;

/// MMA7455 driver
pub struct Mma7455<BUS> {
    bus: BUS,
    /// MCTL bits 0-1 of the last accepted mode write
    mode: u8,
    /// MCTL bits 2-3 of the last accepted mode write
    sensitivity: u8,
    /// Last accepted CTL1 byte
    control: u8,
    calibration: CalibrationReport,
}

impl<BUS> Mma7455<BUS>
    where
        BUS: TwoWire
{
    /// Writes `mask` to the mode control register, then runs the default
    /// offset calibration
    pub fn new<D: DelayMs<u16>>(bus: BUS, mask: u8, delay: &mut D) -> Self {
        Self::with_calibration(bus, mask, CalibrationConfig::default(), delay)
    }

    /// Like [`Mma7455::new`] with explicit calibration settings.
    ///
    /// Never fails: if the mode write is not accepted the driver stays in
    /// standby at 8g, and calibration failures end up in
    /// [`Mma7455::calibration_report`].
    pub fn with_calibration<D: DelayMs<u16>>(
        bus: BUS,
        mask: u8,
        config: CalibrationConfig,
        delay: &mut D,
    ) -> Self {
        let mut mma7455 = Mma7455 {
            bus,
            mode: Mode::Standby.val(),
            sensitivity: Sensitivity::G8.val(),
            control: 0,
            calibration: CalibrationReport::default(),
        };

        if let Err(e) = mma7455.set_mode(mask) {
            log::warn!("mode {:#04x} not applied: {}", mask, e);
        }
        mma7455.calibrate_with(config, delay);

        mma7455
    }

    /// Destroy driver instance, return the bus
    pub fn destroy(self) -> BUS {
        self.bus
    }

    /// Writes the mode control byte. Cached mode and sensitivity only change
    /// when the device accepted it.
    pub fn set_mode(&mut self, mask: u8) -> Result<(), Error> {
        self.write_reg(Register::MCTL, mask)?;
        self.mode = mask & MODE_MASK;
        self.sensitivity = mask & SENSITIVITY_MASK;
        log::debug!("mode set to {:#04x}", mask);
        Ok(())
    }

    /// Current measurement mode bits
    pub fn get_mode(&self) -> u8 {
        self.mode
    }

    pub fn mode(&self) -> Mode {
        Mode::from_bits(self.mode)
    }

    /// Counts per g for the current sensitivity
    pub fn get_sensitivity(&self) -> u8 {
        decode_scale(self.sensitivity)
    }

    pub fn sensitivity(&self) -> Option<Sensitivity> {
        Sensitivity::from_bits(self.sensitivity)
    }

    /// Writes the interrupt configuration (CTL1), see [`InterruptConfig`]
    pub fn set_interrupts(&mut self, mask: u8) -> Result<(), Error> {
        self.write_reg(Register::CTL1, mask)?;
        self.control = mask;
        log::debug!("interrupts set to {:#04x}", mask);
        Ok(())
    }

    /// Clears both interrupt latches and re-enables them. The enable write
    /// is only sent once the clear was accepted.
    pub fn clear_interrupt_latch(&mut self) -> Result<(), Error> {
        self.write_reg(Register::INTRST, LATCH_CLEAR)?;
        self.write_reg(Register::INTRST, LATCH_ENABLE)
    }

    /// Writes detection polarity and drive strength (CTL2), see
    /// [`DetectionControl`]
    pub fn set_detection_control(&mut self, mask: u8) -> Result<(), Error> {
        self.write_reg(Register::CTL2, mask)
    }

    pub fn set_level_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        self.write_reg(Register::LDTH, threshold)
    }

    pub fn set_pulse_threshold(&mut self, threshold: u8) -> Result<(), Error> {
        self.write_reg(Register::PDTH, threshold & 0b0111_1111)
    }

    /// Pulse duration, 0.5 ms per count
    pub fn set_pulse_duration(&mut self, duration: u8) -> Result<(), Error> {
        self.write_reg(Register::PW, duration)
    }

    /// Latency between double pulses, 1 ms per count
    pub fn set_latency_time(&mut self, latency: u8) -> Result<(), Error> {
        self.write_reg(Register::LT, latency)
    }

    /// Window for the second pulse of a double pulse, 1 ms per count
    pub fn set_time_window(&mut self, window: u8) -> Result<(), Error> {
        self.write_reg(Register::TW, window)
    }

    /// Current 10 bit reading of all three axes
    pub fn orientation(&mut self) -> Result<I16x3, Error> {
        // One burst, so no axis is updated halfway through the read
        let mut bytes = [0u8; 6];
        self.read_regs(Register::XOUTL, &mut bytes)?;
        Ok(x_y_z_values(bytes))
    }

    /// Current 8 bit reading of all three axes
    pub fn orientation_8bit(&mut self) -> Result<(i8, i8, i8), Error> {
        let mut bytes = [0u8; 3];
        self.read_regs(Register::XOUT8, &mut bytes)?;
        Ok((bytes[0] as i8, bytes[1] as i8, bytes[2] as i8))
    }

    /// Writes the three offset drift registers in one burst
    pub fn write_offsets(&mut self, x: i16, y: i16, z: i16) -> Result<(), Error> {
        self.write_regs(Register::XOFFL, &offset_bytes(x, y, z))
    }

    pub fn read_offsets(&mut self) -> Result<(i16, i16, i16), Error> {
        let mut bytes = [0u8; 6];
        self.read_regs(Register::XOFFL, &mut bytes)?;
        Ok((
            i16::from_le_bytes([bytes[0], bytes[1]]),
            i16::from_le_bytes([bytes[2], bytes[3]]),
            i16::from_le_bytes([bytes[4], bytes[5]]),
        ))
    }

    pub fn status(&mut self) -> Result<DataStatus, Error> {
        self.read_reg(Register::STATUS).map(DataStatus::new)
    }

    pub fn detection_source(&mut self) -> Result<DetectionSource, Error> {
        self.read_reg(Register::DETSRC).map(DetectionSource::new)
    }

    pub fn who_am_i(&mut self) -> Result<u8, Error> {
        self.read_reg(Register::WHOAMI)
    }

    fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        self.write_regs(reg, &[value])
    }

    fn read_reg(&mut self, reg: Register) -> Result<u8, Error> {
        let mut buffer = [0u8; 1];
        self.read_regs(reg, &mut buffer)?;
        Ok(buffer[0])
    }

    /// Selects `reg` and writes `bytes` in one transaction, releasing the bus
    fn write_regs(&mut self, reg: Register, bytes: &[u8]) -> Result<(), Error> {
        self.bus.begin_transmission(I2C_ADDRESS);
        if self.bus.write(&[reg.addr()]) != 1 {
            return Err(Error::WriteRejected);
        }
        if self.bus.write(bytes) != bytes.len() {
            return Err(Error::WriteRejected);
        }
        Error::from_status(self.bus.end_transmission(true))
    }

    /// Selects `reg` holding the bus, then reads `buffer.len()` bytes.
    /// `buffer` is only touched when every byte arrived.
    fn read_regs(&mut self, reg: Register, buffer: &mut [u8]) -> Result<(), Error> {
        let size = buffer.len();
        if size > BUFFER_LENGTH {
            return Err(Error::OversizedPayload);
        }

        self.bus.begin_transmission(I2C_ADDRESS);
        if self.bus.write(&[reg.addr()]) != 1 {
            return Err(Error::WriteRejected);
        }
        Error::from_status(self.bus.end_transmission(false))?;

        if self.bus.request_from(I2C_ADDRESS, size) != size {
            return Err(Error::LengthMismatch);
        }

        let mut bytes = [0u8; BUFFER_LENGTH];
        let mut i = 0;
        while self.bus.available() > 0 && i < size {
            match self.bus.read() {
                Some(b) => bytes[i] = b,
                None => break,
            }
            i += 1;
        }
        if i != size {
            return Err(Error::LengthMismatch);
        }

        buffer.copy_from_slice(&bytes[..size]);
        Ok(())
    }
}

/// Combines the low and high byte of one axis. Bit 1 of the high byte is
/// the sign of the 10 bit value and is stretched over the upper bits.
pub fn axis_value(low: u8, high: u8) -> i16 {
    let high = if high & 0x02 != 0 { high | 0xFC } else { high };
    i16::from_le_bytes([low, high])
}

fn x_y_z_values(buffer: [u8; 6]) -> I16x3 {
    I16x3::new(
        axis_value(buffer[0], buffer[1]),
        axis_value(buffer[2], buffer[3]),
        axis_value(buffer[4], buffer[5]),
    )
}

fn offset_bytes(x: i16, y: i16, z: i16) -> [u8; 6] {
    let [x0, x1] = x.to_le_bytes();
    let [y0, y1] = y.to_le_bytes();
    let [z0, z1] = z.to_le_bytes();
    [x0, x1, y0, y1, z0, z1]
}

impl<BUS> RawAccelerometer<I16x3> for Mma7455<BUS>
    where
        BUS: TwoWire
{
    type Error = Error;

    /// Gets acceleration vector reading from the accelerometer
    /// Returns a 3D vector with x,y,z, fields in a Result
    fn accel_raw(&mut self) -> Result<I16x3, accelerometer::Error<Error>> {
        Ok(self.orientation()?)
    }
}

impl<BUS> Accelerometer for Mma7455<BUS>
    where
        BUS: TwoWire
{
    type Error = Error;

    fn accel_norm(&mut self) -> Result<F32x3, accelerometer::Error<Self::Error>> {
        let raw_data: I16x3 = self.accel_raw()?;
        let scale = self.get_sensitivity() as f32; // counts per g

        let x = raw_data.x as f32 / scale;
        let y = raw_data.y as f32 / scale;
        let z = raw_data.z as f32 / scale;

        Ok(F32x3::new(x, y, z))
    }

    fn sample_rate(&mut self) -> Result<f32, accelerometer::Error<Self::Error>> {
        if self.control & BANDWIDTH_125_HZ != 0 {
            Ok(ODR_WIDE_HZ)
        } else {
            Ok(ODR_DEFAULT_HZ)
        }
    }
}
