/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso
//!
//! A high-performance ISO 8583 financial-message codec for Rust.
//!
//! IronIso parses raw ISO 8583 byte streams into structured messages, builds
//! byte streams from structured messages, and validates structure and content
//! against a schema that varies by protocol version (1987/1993/2003) and by
//! card network (Visa, Mastercard, Amex, Discover, JCB, UnionPay). Chip-card
//! data in field 55 gets a nested BER-TLV codec.
//!
//! ## Quick Start
//!
//! ```rust
//! use ironiso::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let mut fields = BTreeMap::new();
//! fields.insert(2, FieldValue::text("4111111111111111"));
//! fields.insert(3, FieldValue::text("000000"));
//! fields.insert(4, FieldValue::text("000000001000"));
//! fields.insert(11, FieldValue::text("123456"));
//!
//! let draft = IsoMessage::new(Mti::new("0100").unwrap(), fields);
//! let wire = ironiso::build(&draft).unwrap();
//! let parsed = ironiso::parse(&wire, None).unwrap();
//!
//! assert_eq!(parsed.fields, draft.fields);
//! assert_eq!(parsed.network, Some(CardNetwork::Visa));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: message model, field values, MTI, and error types
//! - [`dictionary`]: schema registry, overlays, and network detection
//! - [`emv`]: BER-TLV codec and EMV tag dictionary for field 55
//! - [`codec`]: bitmap codec, field codec, decoder, encoder, validator
//! - [`pool`]: optional reusable message pool
//!
//! The codec is purely computational: no I/O, no background work, and every
//! instance is safe to share across parallel callers.

pub mod core {
    //! Message model, field values, MTI, and error types.
    pub use ironiso_core::*;
}

pub mod dictionary {
    //! Schema registry, overlays, and network detection.
    pub use ironiso_dictionary::*;
}

pub mod emv {
    //! BER-TLV codec and EMV tag dictionary for field 55.
    pub use ironiso_emv::*;
}

pub mod codec {
    //! Bitmap codec, field codec, decoder, encoder, validator.
    pub use ironiso_codec::*;
}

pub mod pool {
    //! Optional reusable message pool.
    pub use ironiso_pool::*;
}

use ironiso_core::{BuildError, CardNetwork, Diagnostic, IsoMessage, ParseError};

/// Parses an already-framed wire string under the 1987 base schema.
///
/// Use a [`codec::Decoder`] directly to parse under another version or to
/// amortise setup across calls.
///
/// # Errors
/// Returns [`ParseError`] at the first condition the parser cannot continue
/// past.
pub fn parse(wire: &str, network: Option<CardNetwork>) -> Result<IsoMessage, ParseError> {
    codec::Decoder::new(ironiso_core::IsoVersion::V1987).decode(wire, network)
}

/// Builds the wire string for a message under its own version.
///
/// # Errors
/// Returns [`BuildError::Invalid`] with the full diagnostic list when the
/// draft fails validation; the builder never emits a known-invalid message.
pub fn build(message: &IsoMessage) -> Result<String, BuildError> {
    codec::Encoder::new(message.version).encode(message)
}

/// Validates a message, returning every diagnostic found.
#[must_use]
pub fn validate(message: &IsoMessage) -> Vec<Diagnostic> {
    codec::Validator::new().validate(message)
}

pub use ironiso_emv::{build_emv, parse_emv};

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironiso_core::{
        BuildError, CardNetwork, Diagnostic, EmvData, FieldValue, IsoError, IsoMessage,
        IsoVersion, MessageClass, MessageFunction, MessageOrigin, Mti, ParseError, Result, Rule,
        TlvError,
    };

    // Dictionary
    pub use ironiso_dictionary::{
        detect_network, FieldDef, FieldKind, PadDirection, SchemaRegistry,
    };

    // Codec
    pub use ironiso_codec::{luhn_valid, Decoder, Encoder, Validator};

    // EMV
    pub use ironiso_emv::{build_emv, parse_emv};

    // Pool
    pub use ironiso_pool::MessagePool;
}
