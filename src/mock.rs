//! Scripted register-file bus for driver tests

use std::collections::VecDeque;

use embedded_hal::blocking::delay::DelayMs;

use crate::bus::TwoWire;
use crate::register::I2C_ADDRESS;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A closed write transaction, whether or not it succeeded
    Write { register: u8, payload: Vec<u8> },
    /// A read request
    Read { register: u8, count: usize },
}

/// Simulated MMA7455 behind a two-wire bus.
///
/// Writes land in `registers` starting at the selected register, reads
/// come from `samples` first and from `registers` after that.
pub struct FakeWire {
    pub registers: [u8; 0x20],
    pub samples: VecDeque<Vec<u8>>,
    pub events: Vec<Event>,
    /// Status returned by `end_transmission(true)`, per write (0 once exhausted)
    pub stop_status: VecDeque<u8>,
    pub reject_address: bool,
    pub accept_limit: Option<usize>,
    /// Grant one byte less than requested
    pub short_grant: bool,
    /// Deliver one byte less than granted
    pub short_drain: bool,
    tx: Vec<u8>,
    pointer: u8,
    rx: VecDeque<u8>,
}

impl FakeWire {
    pub fn new() -> Self {
        FakeWire {
            registers: [0; 0x20],
            samples: VecDeque::new(),
            events: Vec::new(),
            stop_status: VecDeque::new(),
            reject_address: false,
            accept_limit: None,
            short_grant: false,
            short_drain: false,
            tx: Vec::new(),
            pointer: 0,
            rx: VecDeque::new(),
        }
    }

    pub fn with_sample(mut self, bytes: &[u8]) -> Self {
        self.samples.push_back(bytes.to_vec());
        self
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Write { register, payload } => Some((*register, payload.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn writes_to(&self, register: u8) -> Vec<Vec<u8>> {
        self.writes()
            .into_iter()
            .filter(|(r, _)| *r == register)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn reads(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Read { .. }))
            .count()
    }
}

impl TwoWire for FakeWire {
    fn begin_transmission(&mut self, address: u8) {
        assert_eq!(address, I2C_ADDRESS);
        self.tx.clear();
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        if self.tx.is_empty() && self.reject_address {
            return 0;
        }
        let n = match self.accept_limit {
            Some(limit) if !self.tx.is_empty() => bytes.len().min(limit),
            _ => bytes.len(),
        };
        self.tx.extend_from_slice(&bytes[..n]);
        n
    }

    fn end_transmission(&mut self, stop: bool) -> u8 {
        if !stop {
            self.pointer = self.tx[0];
            return 0;
        }
        let register = self.tx[0];
        let payload = self.tx[1..].to_vec();
        self.events.push(Event::Write {
            register,
            payload: payload.clone(),
        });
        let status = self.stop_status.pop_front().unwrap_or(0);
        if status == 0 {
            for (i, b) in payload.iter().enumerate() {
                self.registers[register as usize + i] = *b;
            }
        }
        status
    }

    fn request_from(&mut self, address: u8, count: usize) -> usize {
        assert_eq!(address, I2C_ADDRESS);
        self.events.push(Event::Read {
            register: self.pointer,
            count,
        });
        let mut bytes = match self.samples.pop_front() {
            Some(sample) => sample,
            None => {
                let start = self.pointer as usize;
                self.registers[start..start + count].to_vec()
            }
        };
        bytes.truncate(count);
        if self.short_drain {
            bytes.pop();
        }
        self.rx = bytes.into_iter().collect();
        if self.short_grant {
            count - 1
        } else {
            count
        }
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

/// Records every requested delay
#[derive(Default)]
pub struct FakeDelay {
    pub calls: Vec<u16>,
}

impl DelayMs<u16> for FakeDelay {
    fn delay_ms(&mut self, ms: u16) {
        self.calls.push(ms);
    }
}
