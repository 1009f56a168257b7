/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the IronIso ISO 8583 codec.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all IronIso operations.
//!
//! Parse and build operations fail fast with a single error. Validation never
//! fails: it returns the full list of [`Diagnostic`] records so a caller can
//! see every problem at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias using [`IsoError`] as the error type.
pub type Result<T> = std::result::Result<T, IsoError>;

/// Top-level error type for all IronIso operations.
#[derive(Debug, Error)]
pub enum IsoError {
    /// Error during message parsing.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error during message building.
    #[error("build error: {0}")]
    Build(#[from] BuildError),

    /// Error during EMV TLV decoding.
    #[error("tlv error: {0}")]
    Tlv(#[from] TlvError),

    /// I/O error from a surrounding file or stream operation.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur while parsing a raw ISO 8583 message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Message shorter than the 4-character MTI.
    #[error("message too short for MTI")]
    TruncatedMti,

    /// MTI contains non-decimal characters.
    #[error("invalid MTI: {0:?} is not four decimal digits")]
    InvalidMti(String),

    /// Message contains bytes outside the 7-bit ASCII wire alphabet.
    #[error("non-ASCII byte at offset {at}")]
    NotAscii {
        /// Byte offset of the first offending character.
        at: usize,
    },

    /// Bitmap is not valid hex or has the wrong length.
    #[error("invalid bitmap: {reason}")]
    InvalidBitmap {
        /// Description of why the bitmap is invalid.
        reason: String,
    },

    /// Variable-length prefix is malformed or out of bounds.
    #[error("invalid length for field {field}: {reason}")]
    InvalidLength {
        /// The field number with the bad length.
        field: u16,
        /// Description of the length problem.
        reason: String,
    },

    /// Message ends before a field's declared payload.
    #[error("field {field} truncated: need {needed} characters, have {available}")]
    TruncatedField {
        /// The field number that was cut short.
        field: u16,
        /// Characters the field definition requires.
        needed: usize,
        /// Characters remaining in the input.
        available: usize,
    },

    /// A bitmap bit is set for a field number outside the effective schema.
    #[error("no definition for field {field} in the effective schema")]
    UnknownField {
        /// The undefined field number.
        field: u16,
    },

    /// A field value violates its character class.
    #[error("invalid character in field {field}: {reason}")]
    InvalidCharClass {
        /// The field number with the bad character.
        field: u16,
        /// Description of the violation.
        reason: String,
    },

    /// Bytes remain after the last present field.
    #[error("{remaining} trailing characters after the last field (offset {at})")]
    TrailingGarbage {
        /// Offset where the unexpected data starts.
        at: usize,
        /// Number of leftover characters.
        remaining: usize,
    },

    /// Field 55 carries malformed EMV TLV data.
    #[error("invalid EMV data in field 55: {0}")]
    InvalidTlv(#[from] TlvError),

    /// A parse failure tagged with the line it occurred on.
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number within the input.
        line: usize,
        /// The underlying parse failure.
        #[source]
        source: Box<ParseError>,
    },
}

/// Errors that occur while building a raw ISO 8583 message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The draft failed validation; emission refused.
    #[error("message failed validation with {} diagnostic(s)", .diagnostics.len())]
    Invalid {
        /// Every diagnostic the validator reported.
        diagnostics: Vec<Diagnostic>,
    },

    /// A field value exceeds its maximum encodable length.
    #[error("value too long for field {field}: {length} exceeds max {max_length}")]
    ValueTooLong {
        /// The field number of the oversized value.
        field: u16,
        /// Actual length of the value.
        length: usize,
        /// Maximum allowed length.
        max_length: usize,
    },

    /// A fixed binary field value does not match its exact length.
    #[error("field {field} length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// The field number with the wrong length.
        field: u16,
        /// Length the definition requires.
        expected: usize,
        /// Length of the supplied value.
        actual: usize,
    },

    /// No definition exists for a field in the draft.
    #[error("no definition for field {field} in the effective schema")]
    UnknownField {
        /// The undefined field number.
        field: u16,
    },
}

/// Errors that occur while decoding BER-TLV data (field 55).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TlvError {
    /// Data ends in the middle of a tag, length, or value.
    #[error("truncated TLV data at offset {at}")]
    Truncated {
        /// Hex-character offset of the truncation.
        at: usize,
    },

    /// Tag bytes violate the BER tag continuation rules.
    #[error("malformed TLV tag at offset {at}")]
    InvalidTag {
        /// Hex-character offset of the bad tag.
        at: usize,
    },

    /// Length octets are not a supported BER form.
    #[error("unsupported TLV length encoding at offset {at}")]
    InvalidLength {
        /// Hex-character offset of the bad length.
        at: usize,
    },

    /// Input contains a character outside `[0-9A-Fa-f]`.
    #[error("non-hex character in TLV data at offset {at}")]
    InvalidHex {
        /// Offset of the offending character.
        at: usize,
    },

    /// Input has an odd number of hex characters.
    #[error("TLV data has odd hex length {len}")]
    OddLength {
        /// The offending character count.
        len: usize,
    },
}

/// The validation rule a [`Diagnostic`] was raised under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// MTI is not four decimal digits with valid version/class positions.
    MtiShape,
    /// Recorded bitmap disagrees with the fields map.
    BitmapConsistency,
    /// A value contains characters outside its field's class.
    CharClass,
    /// A value violates its field's length bounds.
    Length,
    /// Field 2 fails the Luhn mod-10 checksum.
    PanLuhn,
    /// A network-required field is absent.
    RequiredField,
    /// A value violates a network-specific format rule.
    NetworkFormat,
    /// A field number has no definition in the effective schema.
    UnknownField,
    /// Field 55 carries malformed EMV TLV data.
    EmvFormat,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MtiShape => "mti-shape",
            Self::BitmapConsistency => "bitmap-consistency",
            Self::CharClass => "char-class",
            Self::Length => "length",
            Self::PanLuhn => "pan-luhn",
            Self::RequiredField => "required-field",
            Self::NetworkFormat => "network-format",
            Self::UnknownField => "unknown-field",
            Self::EmvFormat => "emv-format",
        };
        write!(f, "{}", name)
    }
}

/// A single non-fatal validation finding.
///
/// Validation collects diagnostics instead of failing on the first problem;
/// a caller choosing to treat any diagnostic as fatal does so explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The field the finding is against, or `None` for message-level rules.
    pub field: Option<u16>,
    /// The rule that was violated.
    pub rule: Rule,
    /// Human-readable description of the problem.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic against a specific field.
    #[must_use]
    pub fn field(field: u16, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            rule,
            message: message.into(),
        }
    }

    /// Creates a message-level diagnostic not tied to one field.
    #[must_use]
    pub fn message_level(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field: None,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(n) => write!(f, "[{}] field {}: {}", self.rule, n, self.message),
            None => write!(f, "[{}] {}", self.rule, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::TruncatedField {
            field: 2,
            needed: 16,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "field 2 truncated: need 16 characters, have 4"
        );
    }

    #[test]
    fn test_iso_error_from_parse() {
        let parse_err = ParseError::TruncatedMti;
        let iso_err: IsoError = parse_err.into();
        assert!(matches!(iso_err, IsoError::Parse(ParseError::TruncatedMti)));
    }

    #[test]
    fn test_build_error_display() {
        let err = BuildError::ValueTooLong {
            field: 42,
            length: 20,
            max_length: 15,
        };
        assert_eq!(
            err.to_string(),
            "value too long for field 42: 20 exceeds max 15"
        );
    }

    #[test]
    fn test_tlv_error_into_parse_error() {
        let tlv = TlvError::Truncated { at: 8 };
        let parse: ParseError = tlv.into();
        assert!(matches!(parse, ParseError::InvalidTlv(_)));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::field(2, Rule::PanLuhn, "checksum failed");
        assert_eq!(d.to_string(), "[pan-luhn] field 2: checksum failed");

        let m = Diagnostic::message_level(Rule::MtiShape, "MTI class 0 is invalid");
        assert_eq!(m.to_string(), "[mti-shape] MTI class 0 is invalid");
    }
}
