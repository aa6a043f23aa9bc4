//! MMA7455 register addresses and bit fields
#![allow(non_camel_case_types)]

/// Fixed I2C address of the MMA7455
pub const I2C_ADDRESS: u8 = 0x1D;

#[allow(dead_code)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    XOUTL       = 0x00,
    XOUTH       = 0x01,
    YOUTL       = 0x02,
    YOUTH       = 0x03,
    ZOUTL       = 0x04,
    ZOUTH       = 0x05,
    XOUT8       = 0x06,
    YOUT8       = 0x07,
    ZOUT8       = 0x08,
    STATUS      = 0x09,
    DETSRC      = 0x0A,
    TOUT        = 0x0B,
    I2CAD       = 0x0D,
    USRINF      = 0x0E,
    WHOAMI      = 0x0F,
    XOFFL       = 0x10,
    XOFFH       = 0x11,
    YOFFL       = 0x12,
    YOFFH       = 0x13,
    ZOFFL       = 0x14,
    ZOFFH       = 0x15,
    MCTL        = 0x16,
    INTRST      = 0x17,
    CTL1        = 0x18,
    CTL2        = 0x19,
    LDTH        = 0x1A,
    PDTH        = 0x1B,
    PW          = 0x1C,
    LT          = 0x1D,
    TW          = 0x1E,
}

impl Register {
    /// Get register address
    pub fn addr(self) -> u8 {
        self as u8
    }
}

// MCTL $16
pub const MODE_MASK: u8 = 0b0000_0011;
pub const SENSITIVITY_MASK: u8 = 0b0000_1100;
pub const SELF_TEST: u8 = 0b0001_0000;
pub const SPI_3_WIRE: u8 = 0b0010_0000;
pub const DRDY_NO_PIN: u8 = 0b0100_0000;

// INTRST $17
pub const LATCH_CLEAR: u8 = 0x03;
pub const LATCH_ENABLE: u8 = 0x00;

// CTL1 $18
pub const INT_PIN_SWAP: u8 = 0b0000_0001;
pub const X_DISABLE: u8 = 0b0000_1000;
pub const Y_DISABLE: u8 = 0b0001_0000;
pub const Z_DISABLE: u8 = 0b0010_0000;
pub const THRESHOLD_ABSOLUTE: u8 = 0b0100_0000;
pub const BANDWIDTH_125_HZ: u8 = 0b1000_0000;

// CTL2 $19
pub const LEVEL_FREEFALL: u8 = 0b0000_0001;
pub const PULSE_FREEFALL: u8 = 0b0000_0010;
pub const DRIVE_STRONG: u8 = 0b0000_0100;

// STATUS $09
pub const DRDY: u8 = 0b0000_0001;
pub const DOVR: u8 = 0b0000_0010;
pub const PERR: u8 = 0b0000_0100;

// DETSRC $0A
pub const LDX: u8 = 0b1000_0000;
pub const LDY: u8 = 0b0100_0000;
pub const LDZ: u8 = 0b0010_0000;
pub const PDX: u8 = 0b0001_0000;
pub const PDY: u8 = 0b0000_1000;
pub const PDZ: u8 = 0b0000_0100;
pub const INT2: u8 = 0b0000_0010;
pub const INT1: u8 = 0b0000_0001;
