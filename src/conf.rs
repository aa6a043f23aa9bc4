#![allow(non_camel_case_types)]

use crate::register::*;

/// Measurement mode, MCTL bits 0-1
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Standby = 0b00,
    Measurement = 0b01,
    LevelDetection = 0b10,
    PulseDetection = 0b11,
}

impl Mode {
    pub fn val(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Mode {
        match bits & MODE_MASK {
            0b00 => Mode::Standby,
            0b01 => Mode::Measurement,
            0b10 => Mode::LevelDetection,
            _ => Mode::PulseDetection,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Standby
    }
}

/// Measurement range, MCTL bits 2-3
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sensitivity {
    /// +/-8g, 8 or 10 bit output
    G8 = 0b0000,
    /// +/-2g, 8 bit output
    G2 = 0b0100,
    /// +/-4g, 8 bit output
    G4 = 0b1000,
}

impl Sensitivity {
    pub fn val(self) -> u8 {
        self as u8
    }

    /// `None` for the reserved `0b1100` field value
    pub fn from_bits(bits: u8) -> Option<Sensitivity> {
        match bits & SENSITIVITY_MASK {
            0b0000 => Some(Sensitivity::G8),
            0b0100 => Some(Sensitivity::G2),
            0b1000 => Some(Sensitivity::G4),
            _ => None,
        }
    }

    /// Counts per g; the reading of an axis at rest along gravity
    pub fn scale(self) -> u8 {
        match self {
            Sensitivity::G8 => 0x10,
            Sensitivity::G2 => 0x40,
            Sensitivity::G4 => 0x20,
        }
    }
}

impl From<Sensitivity> for f32 {
    fn from(sensitivity: Sensitivity) -> f32 {
        match sensitivity {
            Sensitivity::G2 => 2.0,
            Sensitivity::G4 => 4.0,
            Sensitivity::G8 => 8.0,
        }
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Sensitivity::G8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelfTest {
    DISABLED = 0,
    ENABLED = 1,
}

impl Default for SelfTest {
    fn default() -> Self {
        SelfTest::DISABLED
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpiWires {
    _4_WIRE = 0,
    _3_WIRE = 1,
}

impl Default for SpiWires {
    fn default() -> Self {
        SpiWires::_4_WIRE
    }
}

/// Whether data ready is signalled on INT1/DRDY
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataReadyPin {
    ROUTED = 0,
    NOT_ROUTED = 1,
}

impl Default for DataReadyPin {
    fn default() -> Self {
        DataReadyPin::ROUTED
    }
}

/// Packs a measurement mode and sensitivity into an MCTL byte
pub fn encode(mode: Mode, sensitivity: Sensitivity) -> u8 {
    mode.val() | sensitivity.val()
}

/// Recovers mode and sensitivity from an MCTL byte; `None` if the
/// sensitivity field holds the reserved value
pub fn decode(bits: u8) -> Option<(Mode, Sensitivity)> {
    Sensitivity::from_bits(bits).map(|sensitivity| (Mode::from_bits(bits), sensitivity))
}

/// Scale byte for raw sensitivity bits, `0x01` if they name no sensitivity
pub fn decode_scale(sensitivity_bits: u8) -> u8 {
    match sensitivity_bits {
        0x00 => Sensitivity::G8.scale(),
        0x04 => Sensitivity::G2.scale(),
        0x08 => Sensitivity::G4.scale(),
        _ => 0x01,
    }
}

/// MMA7455 mode control (MCTL) byte
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModeConfig {
    pub(crate) mode: Mode,
    pub(crate) sensitivity: Sensitivity,
    pub(crate) self_test: SelfTest,
    pub(crate) spi_wires: SpiWires,
    pub(crate) data_ready_pin: DataReadyPin,
}

impl ModeConfig {
    /// Mode and sensitivity, other fields at their defaults
    pub fn new(mode: Mode, sensitivity: Sensitivity) -> Self {
        ModeConfig {
            mode,
            sensitivity,
            ..Default::default()
        }
    }

    pub fn mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn sensitivity(&mut self, sensitivity: Sensitivity) -> &mut Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn self_test(&mut self, self_test: SelfTest) -> &mut Self {
        self.self_test = self_test;
        self
    }

    pub fn spi_wires(&mut self, spi_wires: SpiWires) -> &mut Self {
        self.spi_wires = spi_wires;
        self
    }

    pub fn data_ready_pin(&mut self, pin: DataReadyPin) -> &mut Self {
        self.data_ready_pin = pin;
        self
    }

    pub fn bits(&self) -> u8 {
        let mut val = encode(self.mode, self.sensitivity);
        if self.self_test == SelfTest::ENABLED {
            val |= SELF_TEST;
        }
        if self.spi_wires == SpiWires::_3_WIRE {
            val |= SPI_3_WIRE;
        }
        if self.data_ready_pin == DataReadyPin::NOT_ROUTED {
            val |= DRDY_NO_PIN;
        }
        val
    }
}

/// Which detection drives which interrupt pin, CTL1 bits 1-2
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterruptRouting {
    /// Level on INT1, pulse on INT2
    LevelPulse = 0b000,
    /// Pulse on INT1, level on INT2
    PulseLevel = 0b010,
    /// Single pulse on INT1, single or double pulse on INT2
    DoublePulse = 0b100,
}

impl InterruptRouting {
    pub fn val(self) -> u8 {
        self as u8
    }
}

impl Default for InterruptRouting {
    fn default() -> Self {
        InterruptRouting::LevelPulse
    }
}

/// Control 1 (CTL1) byte: interrupt routing, axis enables, threshold and
/// bandwidth options
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InterruptConfig {
    pub(crate) routing: InterruptRouting,
    pub(crate) swap_pins: bool,
    pub(crate) disable_x: bool,
    pub(crate) disable_y: bool,
    pub(crate) disable_z: bool,
    pub(crate) absolute_threshold: bool,
    pub(crate) wide_bandwidth: bool,
}

impl InterruptConfig {
    pub fn new(routing: InterruptRouting) -> Self {
        InterruptConfig {
            routing,
            ..Default::default()
        }
    }

    pub fn swap_pins(&mut self, swap: bool) -> &mut Self {
        self.swap_pins = swap;
        self
    }

    /// Exclude axes from level and pulse detection
    pub fn disable_axes(&mut self, x: bool, y: bool, z: bool) -> &mut Self {
        self.disable_x = x;
        self.disable_y = y;
        self.disable_z = z;
        self
    }

    /// Compare the absolute value against the level threshold
    pub fn absolute_threshold(&mut self, absolute: bool) -> &mut Self {
        self.absolute_threshold = absolute;
        self
    }

    /// Digital filter band width 125 Hz instead of 62.5 Hz
    pub fn wide_bandwidth(&mut self, wide: bool) -> &mut Self {
        self.wide_bandwidth = wide;
        self
    }

    pub fn bits(&self) -> u8 {
        let mut val = self.routing.val();
        let flags = [
            (self.swap_pins, INT_PIN_SWAP),
            (self.disable_x, X_DISABLE),
            (self.disable_y, Y_DISABLE),
            (self.disable_z, Z_DISABLE),
            (self.absolute_threshold, THRESHOLD_ABSOLUTE),
            (self.wide_bandwidth, BANDWIDTH_125_HZ),
        ];
        for (set, bit) in flags.iter() {
            if *set {
                val |= bit;
            }
        }
        val
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Positive, OR of the three axes
    Motion = 0,
    /// Negative, AND of the three axes
    Freefall = 1,
}

impl Default for Polarity {
    fn default() -> Self {
        Polarity::Motion
    }
}

/// Control 2 (CTL2) byte: detection polarity and drive strength
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectionControl {
    pub(crate) level: Polarity,
    pub(crate) pulse: Polarity,
    pub(crate) strong_drive: bool,
}

impl DetectionControl {
    pub fn new(level: Polarity, pulse: Polarity) -> Self {
        DetectionControl {
            level,
            pulse,
            strong_drive: false,
        }
    }

    pub fn strong_drive(&mut self, strong: bool) -> &mut Self {
        self.strong_drive = strong;
        self
    }

    pub fn bits(&self) -> u8 {
        let mut val = 0;
        if self.level == Polarity::Freefall {
            val |= LEVEL_FREEFALL;
        }
        if self.pulse == Polarity::Freefall {
            val |= PULSE_FREEFALL;
        }
        if self.strong_drive {
            val |= DRIVE_STRONG;
        }
        val
    }
}

/// Decoded detection source (DETSRC) register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DetectionSource {
    pub value: u8,
}

impl DetectionSource {
    pub fn new(value: u8) -> DetectionSource {
        DetectionSource { value }
    }

    /// (x, y, z) level detection flags
    pub fn level(&self) -> (bool, bool, bool) {
        (self.value & LDX != 0, self.value & LDY != 0, self.value & LDZ != 0)
    }

    /// (x, y, z) pulse detection flags
    pub fn pulse(&self) -> (bool, bool, bool) {
        (self.value & PDX != 0, self.value & PDY != 0, self.value & PDZ != 0)
    }

    pub fn int1(&self) -> bool {
        self.value & INT1 != 0
    }

    pub fn int2(&self) -> bool {
        self.value & INT2 != 0
    }
}

/// Decoded STATUS register
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DataStatus {
    pub data_ready: bool,
    pub data_overrun: bool,
    pub parity_error: bool,
}

impl DataStatus {
    pub fn new(val: u8) -> DataStatus {
        DataStatus {
            data_ready: val & DRDY != 0,
            data_overrun: val & DOVR != 0,
            parity_error: val & PERR != 0,
        }
    }
}

/// Offset calibration loop settings
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CalibrationConfig {
    pub(crate) iterations: u8,
    pub(crate) interval_ms: u16,
}

impl CalibrationConfig {
    /// Three passes, 200 ms apart
    pub fn new() -> Self {
        CalibrationConfig {
            iterations: 3,
            interval_ms: 200,
        }
    }

    pub fn iterations(&mut self, iterations: u8) -> &mut Self {
        self.iterations = iterations;
        self
    }

    /// Wait after each offset write
    pub fn interval_ms(&mut self, interval_ms: u16) -> &mut Self {
        self.interval_ms = interval_ms;
        self
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        CalibrationConfig::new()
    }
}
