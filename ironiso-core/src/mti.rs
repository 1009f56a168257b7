/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message Type Indicator.
//!
//! The MTI is the four-decimal-digit prefix of every ISO 8583 message,
//! identifying protocol version, message class, function, and origin.

use crate::error::ParseError;
use crate::types::{IsoVersion, MessageClass, MessageFunction, MessageOrigin};
use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message Type Indicator: exactly four ASCII decimal digits.
///
/// Construction guarantees the digit invariant, so downstream code can index
/// positions without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Mti(ArrayString<4>);

impl Mti {
    /// Creates an MTI from a string slice.
    ///
    /// # Arguments
    /// * `s` - The candidate MTI string
    ///
    /// # Returns
    /// `Some(Mti)` if `s` is exactly four ASCII decimal digits, `None` otherwise.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        ArrayString::from(s).ok().map(Self)
    }

    /// Returns the MTI as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the digit at the given position (0-3).
    #[inline]
    #[must_use]
    fn digit(&self, pos: usize) -> char {
        self.0.as_bytes()[pos] as char
    }

    /// Returns the protocol version announced by the first digit, if valid.
    #[must_use]
    pub fn version(&self) -> Option<IsoVersion> {
        IsoVersion::from_mti_digit(self.digit(0))
    }

    /// Returns the message class from the second digit, if valid.
    #[must_use]
    pub fn class(&self) -> Option<MessageClass> {
        MessageClass::from_digit(self.digit(1))
    }

    /// Returns the message function from the third digit, if valid.
    #[must_use]
    pub fn function(&self) -> Option<MessageFunction> {
        MessageFunction::from_digit(self.digit(2))
    }

    /// Returns the message origin from the fourth digit, if valid.
    #[must_use]
    pub fn origin(&self) -> Option<MessageOrigin> {
        MessageOrigin::from_digit(self.digit(3))
    }

    /// Returns true if this is a request (function digit 0).
    #[must_use]
    pub fn is_request(&self) -> bool {
        self.digit(2) == '0'
    }

    /// Returns the response MTI for this message: the function digit becomes 1.
    ///
    /// `0100` becomes `0110`, `0200` becomes `0210`.
    #[must_use]
    pub fn to_response(&self) -> Self {
        self.with_digit(2, b'1')
    }

    /// Returns the reversal MTI for this message: class becomes 4, function
    /// and origin are kept.
    ///
    /// `0100` becomes `0400`, `0220` becomes `0420`.
    #[must_use]
    pub fn to_reversal(&self) -> Self {
        self.with_digit(1, b'4')
    }

    /// Returns a copy with the digit at `pos` replaced.
    fn with_digit(&self, pos: usize, digit: u8) -> Self {
        let b = self.0.as_bytes();
        let mut bytes = [b[0], b[1], b[2], b[3]];
        bytes[pos] = digit;
        let s = std::str::from_utf8(&bytes).unwrap_or("0000");
        Self(ArrayString::from(s).unwrap_or_default())
    }
}

impl Default for Mti {
    fn default() -> Self {
        Self(ArrayString::from("0000").unwrap_or_default())
    }
}

impl fmt::Display for Mti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Mti {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or_else(|| ParseError::InvalidMti(s.to_string()))
    }
}

impl AsRef<str> for Mti {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
