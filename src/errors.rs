//! Custom error types used by this crate

/// Custom `Result` to prepopulate `Error` type
pub type Result<T> = std::result::Result<T, Error>;

/// Every way parsing or tracking can fail.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// The outer NMEA 0183 envelope (talker id, fields, framing) is malformed.
    InvalidNmea { msg: String },
    /// The NMEA checksum did not match the computed checksum.
    InvalidChecksum { expected: u8, found: u8 },
    /// The armored payload contained a byte outside the printable 6-bit alphabet.
    NonPrintable { byte: u8 },
    /// The 6-bit message type in the payload has no known schema.
    UnknownMessage { message_type: u8 },
    /// A fragment referenced a multipart sequence that was never started, or was
    /// started and abandoned (wrong fragment number / message id).
    MissingMultipart { msg: String },
    /// More fragments showed up for a sequence than `num_fragments` declared.
    TooManyMessages { msg: String },
    /// A sentence claimed to carry a payload, but none was present.
    MissingPayload,
    /// A tracker update arrived with a timestamp older than the track's
    /// `last_updated`, while operating in ordered/strict mode.
    OrderError { msg: String },
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            Self::InvalidNmea { msg } => format!("invalid NMEA sentence: {}", msg),
            Self::InvalidChecksum { expected, found } => {
                format!("checksum error; expected 0x{expected:x}, found 0x{found:x}")
            }
            Self::NonPrintable { byte } => {
                format!("non-printable byte 0x{byte:x} in armored payload")
            }
            Self::UnknownMessage { message_type } => {
                format!("no schema for AIS message type {message_type}")
            }
            Self::MissingMultipart { msg } => format!("multipart sequence error: {}", msg),
            Self::TooManyMessages { msg } => format!("too many fragments: {}", msg),
            Self::MissingPayload => "sentence has no payload".to_string(),
            Self::OrderError { msg } => format!("out-of-order update: {}", msg),
        };
        f.write_str(&msg)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Self::InvalidNmea { msg: err.into() }
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Self::InvalidNmea { msg: err }
    }
}

impl From<nom::Err<&[u8]>> for Error {
    fn from(err: nom::Err<&[u8]>) -> Self {
        Self::InvalidNmea {
            msg: err.to_string(),
        }
    }
}

impl From<nom::Err<(&[u8], nom::error::ErrorKind)>> for Error {
    fn from(err: nom::Err<(&[u8], nom::error::ErrorKind)>) -> Self {
        Self::InvalidNmea {
            msg: err.to_string(),
        }
    }
}

impl<T: std::fmt::Debug> From<nom::Err<nom::error::Error<T>>> for Error {
    fn from(err: nom::Err<nom::error::Error<T>>) -> Self {
        Self::InvalidNmea {
            msg: format!("{:?}", err),
        }
    }
}
