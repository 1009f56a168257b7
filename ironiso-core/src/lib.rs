/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso Core
//!
//! Core types, traits, and error definitions for the IronIso ISO 8583 codec.
//!
//! This crate provides the fundamental building blocks used across all IronIso crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Message types**: [`IsoMessage`] and the ordered EMV tag map [`EmvData`]
//! - **Field types**: [`FieldValue`] for textual and binary field payloads
//! - **Core types**: [`Mti`], [`IsoVersion`], [`CardNetwork`] and the MTI digit enums
//!
//! ## Wire Contract
//!
//! The ISO 8583 wire handled by this codec is 7-bit ASCII throughout: binary
//! fields and bitmaps travel hex-encoded, two characters per byte. Hex is
//! case-insensitive on input and upper-case on output.

pub mod error;
pub mod field;
pub mod message;
pub mod mti;
pub mod types;

pub use error::{
    BuildError, Diagnostic, IsoError, ParseError, Result, Rule, TlvError,
};
pub use field::FieldValue;
pub use message::{EmvData, IsoMessage};
pub use mti::Mti;
pub use types::{CardNetwork, IsoVersion, MessageClass, MessageFunction, MessageOrigin};
