/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for ISO 8583 field metadata.
//!
//! This module defines the structures that describe one field on the wire:
//! - [`FieldKind`]: the data type and wire layout (fixed vs length-prefixed)
//! - [`PadDirection`]: which side short fixed values are padded on
//! - [`FieldDef`]: the complete per-field metadata record

use serde::Serialize;

/// Field data type, covering both character class and wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    /// Decimal digits only (`n`).
    Numeric,
    /// Letters only (`a`).
    Alpha,
    /// Letters and digits (`an`).
    Alphanumeric,
    /// Letters, digits, and special characters (`ans`).
    AlphanumericSpecial,
    /// Hex-encoded binary data (`b`), two wire characters per byte.
    Binary,
    /// Track 2 magnetic stripe data (`z`).
    Track2,
    /// Variable length with a 2-digit decimal prefix (max 99).
    Llvar,
    /// Variable length with a 3-digit decimal prefix (max 999).
    Lllvar,
}

impl FieldKind {
    /// Returns the conventional ISO 8583 type code for this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Numeric => "n",
            Self::Alpha => "a",
            Self::Alphanumeric => "an",
            Self::AlphanumericSpecial => "ans",
            Self::Binary => "b",
            Self::Track2 => "z",
            Self::Llvar => "ll",
            Self::Lllvar => "lll",
        }
    }

    /// Returns true for length-prefixed kinds.
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        matches!(self, Self::Llvar | Self::Lllvar)
    }

    /// Returns true for hex-encoded binary kinds.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary)
    }

    /// Returns the decimal length-prefix width: 2 for LLVAR, 3 for LLLVAR,
    /// 0 for fixed kinds.
    #[must_use]
    pub const fn prefix_width(&self) -> usize {
        match self {
            Self::Llvar => 2,
            Self::Lllvar => 3,
            _ => 0,
        }
    }

    /// Returns true if `c` belongs to this kind's character class.
    ///
    /// Space counts as a member of the alpha and alphanumeric classes because
    /// fixed fields of those kinds are space-padded on the wire.
    #[must_use]
    pub fn accepts(&self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alpha => c.is_ascii_alphabetic() || c == ' ',
            Self::Alphanumeric => c.is_ascii_alphanumeric() || c == ' ',
            Self::Binary => c.is_ascii_hexdigit(),
            Self::Track2 => c.is_ascii_digit() || c == '=',
            // ans payloads and variable-length bodies admit any printable ASCII
            Self::AlphanumericSpecial | Self::Llvar | Self::Lllvar => {
                matches!(c, ' '..='~')
            }
        }
    }
}

/// Which side of a short fixed-length value receives padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum PadDirection {
    /// Pad on the left (numeric convention).
    Left,
    /// Pad on the right (text convention).
    Right,
    /// No padding; the value must match the definition exactly.
    #[default]
    None,
}

/// The schema entry for one field number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDef {
    /// Data type and wire layout.
    pub kind: FieldKind,
    /// Maximum length: characters for textual kinds, bytes for binary.
    pub max_length: usize,
    /// Minimum length for variable-length kinds.
    pub min_length: Option<usize>,
    /// Padding character, when the definition pins one.
    pub padding_char: Option<char>,
    /// Padding side.
    pub padding: PadDirection,
    /// Human-readable field name; not semantic.
    pub description: &'static str,
}

impl FieldDef {
    /// Creates a fixed-length definition without padding.
    #[must_use]
    pub const fn fixed(kind: FieldKind, max_length: usize, description: &'static str) -> Self {
        Self {
            kind,
            max_length,
            min_length: None,
            padding_char: None,
            padding: PadDirection::None,
            description,
        }
    }

    /// Creates a numeric definition, left-padded with `'0'`.
    #[must_use]
    pub const fn numeric(max_length: usize, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Numeric,
            max_length,
            min_length: None,
            padding_char: Some('0'),
            padding: PadDirection::Left,
            description,
        }
    }

    /// Creates an alphanumeric definition, right-padded with spaces.
    #[must_use]
    pub const fn alphanumeric(max_length: usize, description: &'static str) -> Self {
        Self {
            kind: FieldKind::Alphanumeric,
            max_length,
            min_length: None,
            padding_char: Some(' '),
            padding: PadDirection::Right,
            description,
        }
    }

    /// Creates a binary definition; `max_length` is in bytes.
    #[must_use]
    pub const fn binary(max_length: usize, description: &'static str) -> Self {
        Self::fixed(FieldKind::Binary, max_length, description)
    }

    /// Creates an LLVAR definition (2-digit length prefix).
    #[must_use]
    pub const fn llvar(max_length: usize, description: &'static str) -> Self {
        Self::fixed(FieldKind::Llvar, max_length, description)
    }

    /// Creates an LLLVAR definition (3-digit length prefix).
    #[must_use]
    pub const fn lllvar(max_length: usize, description: &'static str) -> Self {
        Self::fixed(FieldKind::Lllvar, max_length, description)
    }

    /// Returns true for length-prefixed definitions.
    #[inline]
    #[must_use]
    pub const fn is_variable(&self) -> bool {
        self.kind.is_variable()
    }

    /// Returns the fixed wire width in characters: `max_length` for textual
    /// kinds, `2 * max_length` for binary. Zero for variable kinds.
    #[must_use]
    pub const fn wire_width(&self) -> usize {
        if self.kind.is_variable() {
            0
        } else if self.kind.is_binary() {
            self.max_length * 2
        } else {
            self.max_length
        }
    }

    /// Returns the effective padding, falling back to the kind's default
    /// when the definition does not pin one.
    ///
    /// Defaults: numeric pads left with `'0'`; alpha, alphanumeric, and ans
    /// pad right with spaces; binary and variable kinds never pad.
    #[must_use]
    pub fn effective_padding(&self) -> (Option<char>, PadDirection) {
        if let Some(c) = self.padding_char {
            return (Some(c), self.padding);
        }
        match self.kind {
            FieldKind::Numeric => (Some('0'), PadDirection::Left),
            FieldKind::Alpha | FieldKind::Alphanumeric | FieldKind::AlphanumericSpecial => {
                (Some(' '), PadDirection::Right)
            }
            _ => (None, PadDirection::None),
        }
    }

    /// Returns the minimum length a value must have: `min_length` for
    /// variable kinds (zero when unset), `max_length` for fixed kinds.
    #[must_use]
    pub const fn effective_min(&self) -> usize {
        if self.kind.is_variable() {
            match self.min_length {
                Some(min) => min,
                None => 0,
            }
        } else {
            self.max_length
        }
    }
}
