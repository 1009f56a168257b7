/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso Codec
//!
//! Wire codec for ISO 8583 messages.
//!
//! This crate provides the four moving parts of the codec:
//! - **Bitmap codec**: [`bitmap`] encodes and decodes the 64/128-bit presence
//!   bitmap carried as 16 or 32 hex characters
//! - **Field codec**: [`field`] encodes and decodes one field against its
//!   schema definition (fixed, LLVAR, LLLVAR, padding, character class)
//! - **Decoder**: [`Decoder`] drives MTI, bitmap, and per-field parsing,
//!   detects the network, and attaches EMV data
//! - **Encoder**: [`Encoder`] validates a draft, derives its bitmap, and
//!   emits the wire string; plus response/reversal/network-management
//!   constructors
//! - **Validator**: [`Validator`] collects diagnostics across all rules
//!
//! A message on the wire is `MTI(4) ‖ PrimaryBitmap(16) ‖
//! [SecondaryBitmap(16)] ‖ Field2 ‖ Field3 ‖ …`, all 7-bit ASCII.

pub mod bitmap;
pub mod decoder;
pub mod encoder;
pub mod field;
pub mod validate;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use validate::{luhn_valid, processing_code_valid, Validator};
