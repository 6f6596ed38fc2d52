//! Error types for the Kava review core.
//!
//! Errors carry no payload. A failure to render any field means the
//! transaction cannot be shown and therefore must not be signed; the
//! caller only needs to know which class of failure occurred.

use core::fmt;
use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};

/// Error codes for the review core.
///
/// Each variant maps to a single byte in the status reported to the host.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive,
)]
#[repr(u8)]
pub enum Error {
    /// Empty input, or the tokenizer produced no tokens.
    NoData = 0x01,
    /// Display index (or page index) past the end.
    IndexOutOfRange = 0x02,
    /// Internal invariant violated.
    UnexpectedError = 0x03,
    /// Degenerate or out-of-range span, or a write past a fixed buffer.
    UnexpectedBufferEnd = 0x04,
    /// Structure did not match the expected shape.
    UnexpectedField = 0x05,
    /// Item requested from a transaction with no items.
    ItemCountError = 0x06,
}

impl Error {
    /// Returns the error code as a u8.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Maps a wire code back to an error, if it names one.
    pub fn from_code(code: u8) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoData => write!(f, "No data"),
            Error::IndexOutOfRange => write!(f, "Index out of range"),
            Error::UnexpectedError => write!(f, "Unexpected error"),
            Error::UnexpectedBufferEnd => write!(f, "Unexpected buffer end"),
            Error::UnexpectedField => write!(f, "Unexpected field"),
            Error::ItemCountError => write!(f, "Unexpected number of items"),
        }
    }
}
