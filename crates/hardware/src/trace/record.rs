//! Trace record parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::common::AccessKind;

/// One memory access from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessRecord {
    /// Operation kind.
    pub kind: AccessKind,
    /// Accessed address.
    pub address: u64,
    /// Bytes accessed. Only echoed in verbose output.
    pub size: u32,
}

impl AccessRecord {
    /// Creates a record.
    pub const fn new(kind: AccessKind, address: u64, size: u32) -> Self {
        Self {
            kind,
            address,
            size,
        }
    }
}

impl fmt::Display for AccessRecord {
    /// Formats as `<kind> <hex-address>,<size>`, the way the record appears in verbose output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind, self.address, self.size)
    }
}

/// Reason a trace line was not turned into a record.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseRecordError {
    /// The line is empty or whitespace.
    #[error("empty line")]
    Empty,
    /// The operation letter is not one of `I`, `L`, `S`, `M`.
    #[error("unknown access kind '{0}'")]
    UnknownKind(char),
    /// The `,` between address and size is missing.
    #[error("missing ',' between address and size")]
    MissingComma,
    /// The address is not valid hexadecimal.
    #[error("invalid hex address '{0}'")]
    InvalidAddress(String),
    /// The size is not a valid non-negative decimal integer.
    #[error("invalid size '{0}'")]
    InvalidSize(String),
}

impl FromStr for AccessRecord {
    type Err = ParseRecordError;

    /// Parses `<ws>* <kind> <ws>* <hex-address>,<size> <ws>*`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let mut chars = line.chars();
        let kind_char = chars.next().ok_or(ParseRecordError::Empty)?;
        let kind =
            AccessKind::from_char(kind_char).ok_or(ParseRecordError::UnknownKind(kind_char))?;

        let (addr_str, size_str) = chars
            .as_str()
            .split_once(',')
            .ok_or(ParseRecordError::MissingComma)?;

        let addr_str = addr_str.trim();
        let digits = addr_str
            .strip_prefix("0x")
            .or_else(|| addr_str.strip_prefix("0X"))
            .unwrap_or(addr_str);
        let address = u64::from_str_radix(digits, 16)
            .map_err(|_| ParseRecordError::InvalidAddress(addr_str.to_string()))?;

        let size_str = size_str.trim();
        let size = size_str
            .parse::<u32>()
            .map_err(|_| ParseRecordError::InvalidSize(size_str.to_string()))?;

        Ok(Self::new(kind, address, size))
    }
}
