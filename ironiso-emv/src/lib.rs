/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # IronIso EMV
//!
//! BER-TLV codec for EMV chip-card data carried in ISO 8583 field 55.
//!
//! - **TLV codec**: [`parse_emv`] and [`build_emv`] over hex strings, with
//!   encounter order preserved on parse and caller order on emission
//! - **Tag dictionary**: [`tag_name`] for human-facing output
//! - **Explainers**: [`explain_tvr`] and [`explain_cid`]

pub mod tags;
pub mod tlv;

pub use tags::{explain_cid, explain_tvr, tag_name, EMV_TAGS};
pub use tlv::{build_emv, parse_emv};
