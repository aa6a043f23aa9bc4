use core::fmt;

/// Bus transaction failure.
///
/// Discriminants are the status codes the two-wire transport reports when a
/// transaction is closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Error {
    /// Data too long to fit in the transmit buffer
    OversizedPayload = 1,
    /// NACK received while transmitting the device address
    AddressNack = 2,
    /// NACK received while transmitting data
    DataNack = 3,
    /// Unknown or other bus error
    UnspecifiedFault = 4,
    /// No data returned
    NoData = 5,
    /// The bus did not accept the bytes handed to it
    WriteRejected = 6,
    /// Received byte count differs from the requested one
    LengthMismatch = 7,
}

impl Error {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Interprets a transaction-close status. Zero is success; unknown
    /// non-zero codes are reported as `UnspecifiedFault`.
    pub fn from_status(status: u8) -> Result<(), Error> {
        match status {
            0 => Ok(()),
            1 => Err(Error::OversizedPayload),
            2 => Err(Error::AddressNack),
            3 => Err(Error::DataNack),
            5 => Err(Error::NoData),
            6 => Err(Error::WriteRejected),
            7 => Err(Error::LengthMismatch),
            _ => Err(Error::UnspecifiedFault),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::OversizedPayload => "payload too long for transmit buffer",
            Error::AddressNack => "address not acknowledged",
            Error::DataNack => "data not acknowledged",
            Error::UnspecifiedFault => "unspecified bus fault",
            Error::NoData => "no data returned",
            Error::WriteRejected => "write not accepted",
            Error::LengthMismatch => "byte count mismatch",
        };
        write!(f, "{} (status {})", msg, self.code())
    }
}
