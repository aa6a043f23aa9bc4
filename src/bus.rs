//! Two-wire bus transaction adapter

use core::fmt::Debug;

use embedded_hal::blocking::i2c::{Read, Write, WriteRead};

/// Size of the adapter's transmit and receive buffers
pub const BUFFER_LENGTH: usize = 32;

/// Addressed byte transfers on a shared two-wire bus.
///
/// A transaction is opened with `begin_transmission`, filled with `write`
/// and closed with `end_transmission`. Closing without a stop keeps the bus
/// held so that a following `request_from` is issued as a repeated start.
pub trait TwoWire {
    /// Starts queueing bytes for the device at `address`
    fn begin_transmission(&mut self, address: u8);

    /// Queues bytes, returns how many were accepted
    fn write(&mut self, bytes: &[u8]) -> usize;

    /// Sends the queued bytes. Returns 0 on success, otherwise a status code
    /// (see [`Error::from_status`](crate::Error::from_status))
    fn end_transmission(&mut self, stop: bool) -> u8;

    /// Reads `count` bytes from the device, returns how many were granted
    fn request_from(&mut self, address: u8, count: usize) -> usize;

    /// Bytes received and not yet read
    fn available(&self) -> usize;

    fn read(&mut self) -> Option<u8>;
}

/// [`TwoWire`] over an embedded-hal blocking I2C peripheral
pub struct HalBus<I2C, E> {
    i2c: I2C,
    address: u8,
    tx: [u8; BUFFER_LENGTH],
    tx_len: usize,
    held: bool,
    rx: [u8; BUFFER_LENGTH],
    rx_len: usize,
    rx_pos: usize,
    last_error: Option<E>,
}

impl<I2C, E> HalBus<I2C, E>
where
    I2C: Write<Error = E> + WriteRead<Error = E> + Read<Error = E>,
    E: Debug,
{
    pub fn new(i2c: I2C) -> Self {
        HalBus {
            i2c,
            address: 0,
            tx: [0; BUFFER_LENGTH],
            tx_len: 0,
            held: false,
            rx: [0; BUFFER_LENGTH],
            rx_len: 0,
            rx_pos: 0,
            last_error: None,
        }
    }

    /// Peripheral error behind the most recent failed transfer
    pub fn take_error(&mut self) -> Option<E> {
        self.last_error.take()
    }

    /// Destroy adapter instance, return `I2C` bus instance
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> TwoWire for HalBus<I2C, E>
where
    I2C: Write<Error = E> + WriteRead<Error = E> + Read<Error = E>,
    E: Debug,
{
    fn begin_transmission(&mut self, address: u8) {
        self.address = address;
        self.tx_len = 0;
        self.held = false;
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(BUFFER_LENGTH - self.tx_len);
        self.tx[self.tx_len..self.tx_len + n].copy_from_slice(&bytes[..n]);
        self.tx_len += n;
        n
    }

    fn end_transmission(&mut self, stop: bool) -> u8 {
        if !stop {
            // Sent together with the next read
            self.held = true;
            return 0;
        }
        self.held = false;
        let result = self.i2c.write(self.address, &self.tx[..self.tx_len]);
        self.tx_len = 0;
        match result {
            Ok(()) => 0,
            Err(e) => {
                log::debug!("i2c write to {:#04x} failed: {:?}", self.address, e);
                self.last_error = Some(e);
                crate::Error::UnspecifiedFault.code()
            }
        }
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        self.rx_len = 0;
        self.rx_pos = 0;
        if count > BUFFER_LENGTH {
            return 0;
        }
        let result = if self.held && address == self.address {
            self.i2c
                .write_read(address, &self.tx[..self.tx_len], &mut self.rx[..count])
        } else {
            self.i2c.read(address, &mut self.rx[..count])
        };
        self.held = false;
        self.tx_len = 0;
        match result {
            Ok(()) => {
                self.rx_len = count;
                count
            }
            Err(e) => {
                log::debug!("i2c read from {:#04x} failed: {:?}", address, e);
                self.last_error = Some(e);
                0
            }
        }
    }

    fn available(&self) -> usize {
        self.rx_len - self.rx_pos
    }

    fn read(&mut self) -> Option<u8> {
        if self.rx_pos < self.rx_len {
            let b = self.rx[self.rx_pos];
            self.rx_pos += 1;
            Some(b)
        } else {
            None
        }
    }
}
