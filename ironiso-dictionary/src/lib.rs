/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso Dictionary
//!
//! Schema registry for the IronIso ISO 8583 codec.
//!
//! This crate provides the per-field metadata that drives parsing, building,
//! and validation:
//! - **Schema types**: [`FieldKind`], [`PadDirection`], [`FieldDef`]
//! - **Tables**: the ISO 8583:1987 base table plus version and network overlays
//! - **Registry**: [`SchemaRegistry`] with O(1) composite lookup and caching
//! - **Network detection**: prefix-based [`detect_network`] over PAN digits
//!
//! The effective definition of a field is `base ⊕ version ⊕ network`, later
//! overlays winning per field.

pub mod base;
pub mod network;
pub mod overlays;
pub mod registry;
pub mod schema;

pub use network::{detect_network, pan_length_valid};
pub use overlays::{format_rules, required_fields, FormatRule};
pub use registry::SchemaRegistry;
pub use schema::{FieldDef, FieldKind, PadDirection};
