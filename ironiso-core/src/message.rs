/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for ISO 8583.
//!
//! This module provides:
//! - [`IsoMessage`]: the central decoded-message record
//! - [`EmvData`]: the ordered EMV tag map attached when field 55 is present
//!
//! Messages are constructed either by the parser (owning its decoded state)
//! or programmatically by a caller who then hands the record to the builder.
//! The codec retains no message state across calls.

use crate::field::FieldValue;
use crate::mti::Mti;
use crate::types::{CardNetwork, IsoVersion};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered EMV tag map parsed from field 55.
///
/// Keys are 1-3 byte EMV tags rendered as upper-case hex; values are the raw
/// tag payloads, also upper-case hex. Encounter order is preserved on parse
/// and caller order on emission, while lookups stay keyed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmvData(IndexMap<String, String>);

impl EmvData {
    /// Creates an empty tag map.
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Inserts a tag, normalising tag and value to upper-case hex.
    ///
    /// An existing tag keeps its position and gets the new value.
    pub fn insert(&mut self, tag: impl AsRef<str>, value: impl AsRef<str>) {
        self.0
            .insert(tag.as_ref().to_uppercase(), value.as_ref().to_uppercase());
    }

    /// Returns the value for a tag, looked up case-insensitively.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.0.get(&tag.to_uppercase()).map(String::as_str)
    }

    /// Returns true if the tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains_key(&tag.to_uppercase())
    }

    /// Iterates `(tag, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(t, v)| (t.as_str(), v.as_str()))
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no tags are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for EmvData {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (tag, value) in iter {
            data.insert(tag, value);
        }
        data
    }
}

impl<'a> IntoIterator for &'a EmvData {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A structured ISO 8583 message.
///
/// The fields map is keyed by field number in `[2, 128]`; iteration order for
/// emission is ascending field number regardless of insertion order. Field 0
/// is tolerated in the map as a legacy MTI mirror and is never emitted as a
/// data field; fields 1 and 65 are bitmap continuation markers, never data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IsoMessage {
    /// Message Type Indicator.
    pub mti: Mti,
    /// Data fields keyed by field number; ascending iteration comes for free.
    pub fields: BTreeMap<u16, FieldValue>,
    /// Hex-encoded bitmap recovered from the wire or derived on emission.
    pub bitmap: Option<String>,
    /// Card network, supplied by the caller or detected from the PAN.
    pub network: Option<CardNetwork>,
    /// Protocol version the message was parsed or built under.
    pub version: IsoVersion,
    /// Ordered EMV tag map parsed from field 55 when present.
    pub emv: Option<EmvData>,
    /// Original wire string when parsed; empty when constructed by a caller.
    #[serde(default)]
    pub raw: String,
}

impl IsoMessage {
    /// Creates a message from an MTI and a fields map.
    ///
    /// # Arguments
    /// * `mti` - The message type indicator
    /// * `fields` - Data fields keyed by field number
    #[must_use]
    pub fn new(mti: Mti, fields: BTreeMap<u16, FieldValue>) -> Self {
        Self {
            mti,
            fields,
            ..Self::default()
        }
    }

    /// Sets the card network, builder style.
    #[must_use]
    pub fn with_network(mut self, network: CardNetwork) -> Self {
        self.network = Some(network);
        self
    }

    /// Sets the protocol version, builder style.
    #[must_use]
    pub fn with_version(mut self, version: IsoVersion) -> Self {
        self.version = version;
        self
    }

    /// Inserts a field value.
    pub fn set_field(&mut self, field: u16, value: impl Into<FieldValue>) {
        self.fields.insert(field, value.into());
    }

    /// Returns a field value by number.
    #[must_use]
    pub fn field(&self, field: u16) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// Returns a field value as a string slice.
    #[must_use]
    pub fn field_str(&self, field: u16) -> Option<&str> {
        self.fields.get(&field).map(FieldValue::as_str)
    }

    /// Returns true if the field is present.
    #[must_use]
    pub fn has_field(&self, field: u16) -> bool {
        self.fields.contains_key(&field)
    }

    /// Iterates data fields in ascending field-number order.
    ///
    /// The legacy MTI mirror at field 0 is skipped: emission covers 2..=128.
    pub fn data_fields(&self) -> impl Iterator<Item = (u16, &FieldValue)> {
        self.fields
            .iter()
            .filter(|(n, _)| **n != 0)
            .map(|(n, v)| (*n, v))
    }

    /// Returns the ascending field numbers that participate in emission.
    #[must_use]
    pub fn present_field_numbers(&self) -> Vec<u16> {
        self.data_fields().map(|(n, _)| n).collect()
    }

    /// Returns the PAN (field 2) when present.
    #[must_use]
    pub fn pan(&self) -> Option<&str> {
        self.field_str(2)
    }

    /// Returns the number of data fields (excluding the field-0 mirror).
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.data_fields().count()
    }
}

impl fmt::Display for IsoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} fields)", self.mti, self.field_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IsoMessage {
        let mut msg = IsoMessage::new(Mti::new("0100").unwrap(), BTreeMap::new());
        msg.set_field(11, "123456");
        msg.set_field(2, "4111111111111111");
        msg.set_field(4, "000000001000");
        msg
    }

    #[test]
    fn test_data_fields_ascending() {
        let msg = sample();
        let numbers: Vec<u16> = msg.data_fields().map(|(n, _)| n).collect();
        assert_eq!(numbers, vec![2, 4, 11]);
    }

    #[test]
    fn test_field_zero_skipped() {
        let mut msg = sample();
        msg.set_field(0, "0100");
        assert_eq!(msg.present_field_numbers(), vec![2, 4, 11]);
        assert_eq!(msg.field_count(), 3);
    }

    #[test]
    fn test_field_access() {
        let msg = sample();
        assert_eq!(msg.pan(), Some("4111111111111111"));
        assert_eq!(msg.field_str(4), Some("000000001000"));
        assert!(msg.has_field(11));
        assert!(!msg.has_field(3));
    }

    #[test]
    fn test_emv_data_order_preserved() {
        let mut emv = EmvData::new();
        emv.insert("9F26", "1234567890abcdef");
        emv.insert("9f27", "80");
        emv.insert("9F10", "0110A00003220000");

        let tags: Vec<&str> = emv.iter().map(|(t, _)| t).collect();
        assert_eq!(tags, vec!["9F26", "9F27", "9F10"]);
        assert_eq!(emv.get("9f26"), Some("1234567890ABCDEF"));
        assert!(emv.contains("9F27"));
        assert_eq!(emv.len(), 3);
    }
}
