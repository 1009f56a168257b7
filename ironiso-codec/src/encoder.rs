/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! ISO 8583 message encoder.
//!
//! The encoder validates the draft first and refuses to emit a known-invalid
//! message. Emission then encodes every field in ascending order into a
//! scratch buffer, derives the bitmap from the field set, and concatenates
//! MTI, bitmap, and field bodies. Given the same message and schema the
//! output is identical, and `decode(encode(m))` reproduces `m` for every
//! draft the encoder accepts.
//!
//! The encoder also carries the message-construction conveniences: matching
//! responses, reversals, and network-management messages.

use crate::validate::Validator;
use crate::{bitmap, field};
use bytes::BytesMut;
use chrono::Utc;
use ironiso_core::{BuildError, CardNetwork, FieldValue, IsoMessage, IsoVersion, Mti};
use ironiso_dictionary::SchemaRegistry;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Fields echoed from a request into its response.
const RESPONSE_ECHO_FIELDS: &[u16] = &[2, 3, 4, 11, 37, 41, 42];

/// ISO 8583 message encoder.
///
/// Holds immutable schema tables and a validator; safe to share across
/// parallel callers.
#[derive(Debug)]
pub struct Encoder {
    version: IsoVersion,
    registry: Arc<SchemaRegistry>,
    validator: Validator,
}

impl Encoder {
    /// Creates an encoder for the given protocol version using the shared
    /// schema registry.
    #[must_use]
    pub fn new(version: IsoVersion) -> Self {
        let registry = SchemaRegistry::global();
        Self {
            version,
            validator: Validator::with_registry(Arc::clone(&registry)),
            registry,
        }
    }

    /// Creates an encoder with an explicit schema registry.
    #[must_use]
    pub fn with_registry(version: IsoVersion, registry: Arc<SchemaRegistry>) -> Self {
        Self {
            version,
            validator: Validator::with_registry(Arc::clone(&registry)),
            registry,
        }
    }

    /// Returns the protocol version this encoder builds under.
    #[must_use]
    pub const fn version(&self) -> IsoVersion {
        self.version
    }

    /// Encodes a message to its wire string.
    ///
    /// The draft is validated first; any diagnostic refuses emission.
    ///
    /// # Errors
    /// Returns [`BuildError::Invalid`] carrying the full diagnostic list, or
    /// a field-level error if a value cannot be encoded.
    pub fn encode(&self, msg: &IsoMessage) -> Result<String, BuildError> {
        let diagnostics = self.validator.validate(msg);
        if !diagnostics.is_empty() {
            return Err(BuildError::Invalid { diagnostics });
        }

        let mut body = BytesMut::with_capacity(256);
        for (number, value) in msg.data_fields() {
            let def = self
                .registry
                .definition_of(number, msg.version, msg.network)
                .ok_or(BuildError::UnknownField { field: number })?;
            field::encode_field(&mut body, number, value, &def)?;
        }

        let bitmap = bitmap::encode(msg.data_fields().map(|(n, _)| n));
        debug!(mti = %msg.mti, bitmap = %bitmap, body_len = body.len(), "encoded message");

        let mut wire = String::with_capacity(4 + bitmap.len() + body.len());
        wire.push_str(msg.mti.as_str());
        wire.push_str(&bitmap);
        wire.push_str(&String::from_utf8_lossy(&body));
        Ok(wire)
    }

    /// Creates a validated message with its wire form and bitmap attached.
    ///
    /// # Arguments
    /// * `mti` - The message type indicator
    /// * `fields` - Data fields keyed by field number
    ///
    /// # Errors
    /// Returns [`BuildError`] when the draft fails validation.
    pub fn create_message(
        &self,
        mti: Mti,
        fields: BTreeMap<u16, FieldValue>,
    ) -> Result<IsoMessage, BuildError> {
        let mut msg = IsoMessage::new(mti, fields).with_version(self.version);
        let raw = self.encode(&msg)?;
        let derived = bitmap::encode(msg.data_fields().map(|(n, _)| n));
        msg.bitmap = Some(derived);
        msg.raw = raw;
        Ok(msg)
    }

    /// Creates the matching response for a request message.
    ///
    /// The response MTI flips the function digit to 1, and the customary
    /// echo fields (PAN, processing code, amount, STAN, RRN, terminal and
    /// merchant identifiers) are copied from the request in canonical form.
    ///
    /// # Arguments
    /// * `request` - The request being answered
    /// * `response_fields` - Response-specific fields (e.g. 39); echo fields
    ///   from the request override entries here
    ///
    /// # Errors
    /// Returns [`BuildError`] when the resulting draft fails validation.
    pub fn create_response(
        &self,
        request: &IsoMessage,
        response_fields: BTreeMap<u16, FieldValue>,
    ) -> Result<IsoMessage, BuildError> {
        let mut fields = response_fields;
        for &number in RESPONSE_ECHO_FIELDS {
            if let Some(value) = request.field_str(number) {
                fields.insert(number, canonical_copy(number, value));
            }
        }
        self.create_message(request.mti.to_response(), fields)
    }

    /// Creates a reversal for a previously built or parsed message.
    ///
    /// The reversal carries all original fields, a fresh transmission
    /// timestamp in field 7, an approval response code in field 39, and the
    /// original MTI and STAN in field 90.
    ///
    /// # Arguments
    /// * `original` - The message being reversed
    /// * `additional_fields` - Extra fields merged over the copies
    ///
    /// # Errors
    /// Returns [`BuildError`] when the resulting draft fails validation.
    pub fn create_reversal(
        &self,
        original: &IsoMessage,
        additional_fields: BTreeMap<u16, FieldValue>,
    ) -> Result<IsoMessage, BuildError> {
        let mut fields: BTreeMap<u16, FieldValue> = original
            .data_fields()
            .map(|(number, value)| (number, canonical_copy(number, value.as_str())))
            .collect();

        let stan = original.field_str(11).unwrap_or("");
        let mut original_elements = format!("{}{:0>6}", original.mti, stan);
        while original_elements.len() < 42 {
            original_elements.push('0');
        }

        fields.insert(7, FieldValue::text(Utc::now().format("%m%d%H%M%S").to_string()));
        fields.insert(39, FieldValue::text("00"));
        fields.insert(90, FieldValue::text(original_elements));
        fields.extend(additional_fields);

        self.create_message(original.mti.to_reversal(), fields)
    }

    /// Creates an 0800 network-management message.
    ///
    /// # Arguments
    /// * `info_code` - The network management information code (field 70),
    ///   zero-filled to three digits
    /// * `network` - Adds the network's customary security fields
    ///
    /// # Errors
    /// Returns [`BuildError`] when the resulting draft fails validation.
    pub fn create_network_management(
        &self,
        info_code: &str,
        network: Option<CardNetwork>,
    ) -> Result<IsoMessage, BuildError> {
        let mut fields = BTreeMap::new();
        fields.insert(70, FieldValue::text(format!("{:0>3}", info_code)));

        match network {
            Some(CardNetwork::Visa) => {
                fields.insert(53, FieldValue::text("0000000000000000"));
                fields.insert(96, FieldValue::binary_hex("0123456789ABCDEF"));
            }
            Some(CardNetwork::Mastercard) => {
                fields.insert(48, FieldValue::text("MC00"));
                fields.insert(53, FieldValue::text("0000000000000000"));
            }
            _ => {}
        }

        self.create_message(Mti::new("0800").unwrap_or_default(), fields)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(IsoVersion::V1987)
    }
}

/// Copies a field value into canonical padded form.
///
/// The processing code is zero-filled to six digits and the merchant
/// identifier right-padded to fifteen characters, so drafts assembled from
/// trimmed upstream values still validate.
fn canonical_copy(number: u16, value: &str) -> FieldValue {
    match number {
        3 => FieldValue::text(format!("{:0>6}", value)),
        42 => FieldValue::text(format!("{:<15}", value)),
        _ => FieldValue::text(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironiso_core::Rule;

    fn s1_fields() -> BTreeMap<u16, FieldValue> {
        let mut fields = BTreeMap::new();
        fields.insert(2, FieldValue::text("4111111111111111"));
        fields.insert(3, FieldValue::text("000000"));
        fields.insert(4, FieldValue::text("000000001000"));
        fields.insert(11, FieldValue::text("123456"));
        fields.insert(41, FieldValue::text("TERM0001"));
        fields.insert(42, FieldValue::text("MERCHANT123456 "));
        fields
    }

    #[test]
    fn test_encode_minimal_authorization() {
        let msg = IsoMessage::new(Mti::new("0100").unwrap(), s1_fields());
        let wire = Encoder::default().encode(&msg).unwrap();
        assert_eq!(
            wire,
            "01007020000000C00000164111111111111111000000000000001000123456TERM0001MERCHANT123456 "
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let msg = IsoMessage::new(Mti::new("0100").unwrap(), s1_fields());
        let encoder = Encoder::default();
        assert_eq!(encoder.encode(&msg).unwrap(), encoder.encode(&msg).unwrap());
    }

    #[test]
    fn test_encode_refuses_invalid_draft() {
        let mut fields = s1_fields();
        fields.insert(2, FieldValue::text("4111111111111112"));
        let msg = IsoMessage::new(Mti::new("0100").unwrap(), fields);
        let err = Encoder::default().encode(&msg).unwrap_err();
        match err {
            BuildError::Invalid { diagnostics } => {
                assert_eq!(diagnostics.len(), 1);
                assert_eq!(diagnostics[0].field, Some(2));
                assert_eq!(diagnostics[0].rule, Rule::PanLuhn);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_create_message_attaches_raw_and_bitmap() {
        let msg = Encoder::default()
            .create_message(Mti::new("0100").unwrap(), s1_fields())
            .unwrap();
        assert_eq!(msg.bitmap.as_deref(), Some("7020000000C00000"));
        assert!(msg.raw.starts_with("01007020000000C00000"));
        assert_eq!(msg.version, IsoVersion::V1987);
    }

    #[test]
    fn test_create_response_echoes_fields() {
        let encoder = Encoder::default();
        let request = encoder
            .create_message(Mti::new("0100").unwrap(), s1_fields())
            .unwrap();

        let mut extra = BTreeMap::new();
        extra.insert(39, FieldValue::text("00"));
        let response = encoder.create_response(&request, extra).unwrap();

        assert_eq!(response.mti.as_str(), "0110");
        assert_eq!(response.field_str(39), Some("00"));
        assert_eq!(response.field_str(2), Some("4111111111111111"));
        assert_eq!(response.field_str(42), Some("MERCHANT123456 "));
    }

    #[test]
    fn test_create_response_canonicalises_copies() {
        let encoder = Encoder::default();
        let mut request = IsoMessage::new(Mti::new("0100").unwrap(), s1_fields());
        // Simulate upstream values that lost their padding.
        request.set_field(3, "0");
        request.set_field(42, "MERCHANT1");
        request.set_field(2, "4111111111111111");

        let response = encoder.create_response(&request, BTreeMap::new()).unwrap();
        assert_eq!(response.field_str(3), Some("000000"));
        assert_eq!(response.field_str(42), Some("MERCHANT1      "));
    }

    #[test]
    fn test_create_reversal() {
        let encoder = Encoder::default();
        let original = encoder
            .create_message(Mti::new("0100").unwrap(), s1_fields())
            .unwrap();
        let reversal = encoder.create_reversal(&original, BTreeMap::new()).unwrap();

        assert_eq!(reversal.mti.as_str(), "0400");
        assert_eq!(reversal.field_str(39), Some("00"));
        assert_eq!(reversal.field_str(7).map(str::len), Some(10));

        let elements = reversal.field_str(90).unwrap();
        assert_eq!(elements.len(), 42);
        assert!(elements.starts_with("0100123456"));
        assert!(elements.ends_with('0'));
    }

    #[test]
    fn test_create_network_management() {
        let encoder = Encoder::default();
        let msg = encoder.create_network_management("301", None).unwrap();
        assert_eq!(msg.mti.as_str(), "0800");
        assert_eq!(msg.field_str(70), Some("301"));

        let visa = encoder
            .create_network_management("1", Some(CardNetwork::Visa))
            .unwrap();
        assert_eq!(visa.field_str(70), Some("001"));
        assert_eq!(visa.field_str(53), Some("0000000000000000"));
        assert_eq!(visa.field(96).unwrap().as_hex(), Some("0123456789ABCDEF"));

        let mc = encoder
            .create_network_management("301", Some(CardNetwork::Mastercard))
            .unwrap();
        assert_eq!(mc.field_str(48), Some("MC00"));
    }
}
