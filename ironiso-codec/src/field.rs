/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Per-field encoding and decoding.
//!
//! One field on the wire is either fixed-width (`max_length` characters, or
//! twice that for hex-encoded binary) or length-prefixed (2 or 3 decimal
//! digits followed by that many characters). Decoding never strips padding:
//! the stored value is the exact wire substring. Encoding pads short fixed
//! values per the definition and rejects anything over length.

use bytes::{BufMut, BytesMut};
use ironiso_core::{BuildError, FieldValue, ParseError};
use ironiso_dictionary::{FieldDef, PadDirection};

/// Decodes one field at the cursor, advancing it past the consumed wire.
///
/// # Arguments
/// * `input` - The complete wire string
/// * `cursor` - Current position; advanced on success
/// * `field` - The field number, for error context
/// * `def` - The field's effective definition
///
/// # Errors
/// Returns [`ParseError`] on truncation, a malformed length prefix, or a
/// character-class violation.
pub fn decode_field(
    input: &str,
    cursor: &mut usize,
    field: u16,
    def: &FieldDef,
) -> Result<FieldValue, ParseError> {
    if def.is_variable() {
        decode_variable(input, cursor, field, def)
    } else {
        decode_fixed(input, cursor, field, def)
    }
}

fn decode_fixed(
    input: &str,
    cursor: &mut usize,
    field: u16,
    def: &FieldDef,
) -> Result<FieldValue, ParseError> {
    let width = def.wire_width();
    let available = input.len() - *cursor;
    if available < width {
        return Err(ParseError::TruncatedField {
            field,
            needed: width,
            available,
        });
    }

    let slice = &input[*cursor..*cursor + width];
    check_class(slice, field, def)?;
    *cursor += width;

    if def.kind.is_binary() {
        Ok(FieldValue::binary_hex(slice))
    } else {
        Ok(FieldValue::text(slice))
    }
}

fn decode_variable(
    input: &str,
    cursor: &mut usize,
    field: u16,
    def: &FieldDef,
) -> Result<FieldValue, ParseError> {
    let prefix_width = def.kind.prefix_width();
    let available = input.len() - *cursor;
    if available < prefix_width {
        return Err(ParseError::InvalidLength {
            field,
            reason: format!(
                "length prefix needs {} characters, {} remain",
                prefix_width, available
            ),
        });
    }

    let prefix = &input[*cursor..*cursor + prefix_width];
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidLength {
            field,
            reason: format!("non-decimal length prefix {:?}", prefix),
        });
    }
    let length: usize = prefix.parse().map_err(|_| ParseError::InvalidLength {
        field,
        reason: format!("unparseable length prefix {:?}", prefix),
    })?;

    if length > def.max_length {
        return Err(ParseError::InvalidLength {
            field,
            reason: format!("declared length {} exceeds max {}", length, def.max_length),
        });
    }
    *cursor += prefix_width;

    let available = input.len() - *cursor;
    if available < length {
        return Err(ParseError::TruncatedField {
            field,
            needed: length,
            available,
        });
    }

    let slice = &input[*cursor..*cursor + length];
    check_class(slice, field, def)?;
    *cursor += length;

    Ok(FieldValue::text(slice))
}

fn check_class(slice: &str, field: u16, def: &FieldDef) -> Result<(), ParseError> {
    for (i, c) in slice.chars().enumerate() {
        if !def.kind.accepts(c) {
            return Err(ParseError::InvalidCharClass {
                field,
                reason: format!(
                    "{:?} at offset {} is not valid for type {}",
                    c,
                    i,
                    def.kind.code()
                ),
            });
        }
    }
    Ok(())
}

/// Encodes one field into the scratch buffer.
///
/// Fixed values shorter than the definition are padded per its padding rules;
/// binary values must match their exact byte length. Variable values are
/// emitted behind a zero-padded decimal length prefix.
///
/// # Errors
/// Returns [`BuildError`] when the value is over length, a fixed binary value
/// has the wrong size, or an unpadded fixed value is short.
pub fn encode_field(
    out: &mut BytesMut,
    field: u16,
    value: &FieldValue,
    def: &FieldDef,
) -> Result<(), BuildError> {
    let text = value.as_str();

    if def.is_variable() {
        return encode_variable(out, field, text, def);
    }
    if def.kind.is_binary() {
        return encode_binary(out, field, text, def);
    }

    let len = text.len();
    if len > def.max_length {
        return Err(BuildError::ValueTooLong {
            field,
            length: len,
            max_length: def.max_length,
        });
    }

    if len < def.max_length {
        let (pad_char, direction) = def.effective_padding();
        let Some(pad) = pad_char else {
            return Err(BuildError::LengthMismatch {
                field,
                expected: def.max_length,
                actual: len,
            });
        };
        let fill = def.max_length - len;
        match direction {
            PadDirection::Left => {
                put_repeated(out, pad, fill);
                out.put_slice(text.as_bytes());
            }
            PadDirection::Right | PadDirection::None => {
                out.put_slice(text.as_bytes());
                put_repeated(out, pad, fill);
            }
        }
    } else {
        out.put_slice(text.as_bytes());
    }

    Ok(())
}

fn encode_binary(
    out: &mut BytesMut,
    field: u16,
    text: &str,
    def: &FieldDef,
) -> Result<(), BuildError> {
    let expected_chars = def.max_length * 2;
    let actual_bytes = text.len() / 2;
    if text.len() > expected_chars {
        return Err(BuildError::ValueTooLong {
            field,
            length: actual_bytes,
            max_length: def.max_length,
        });
    }
    if text.len() < expected_chars {
        return Err(BuildError::LengthMismatch {
            field,
            expected: def.max_length,
            actual: actual_bytes,
        });
    }
    out.put_slice(text.to_uppercase().as_bytes());
    Ok(())
}

fn encode_variable(
    out: &mut BytesMut,
    field: u16,
    text: &str,
    def: &FieldDef,
) -> Result<(), BuildError> {
    let prefix_width = def.kind.prefix_width();
    let prefix_cap = 10usize.pow(prefix_width as u32) - 1;
    let len = text.len();
    let cap = def.max_length.min(prefix_cap);
    if len > cap {
        return Err(BuildError::ValueTooLong {
            field,
            length: len,
            max_length: cap,
        });
    }

    let mut digits = itoa::Buffer::new();
    let formatted = digits.format(len);
    put_repeated(out, '0', prefix_width - formatted.len());
    out.put_slice(formatted.as_bytes());
    out.put_slice(text.as_bytes());
    Ok(())
}

fn put_repeated(out: &mut BytesMut, c: char, count: usize) {
    for _ in 0..count {
        out.put_u8(c as u8);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironiso_dictionary::FieldKind;

    fn decode_all(input: &str, field: u16, def: &FieldDef) -> Result<FieldValue, ParseError> {
        let mut cursor = 0;
        let value = decode_field(input, &mut cursor, field, def)?;
        assert_eq!(cursor, input.len(), "field did not consume all input");
        Ok(value)
    }

    fn encode_to_string(field: u16, value: &FieldValue, def: &FieldDef) -> String {
        let mut out = BytesMut::new();
        encode_field(&mut out, field, value, def).unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    #[test]
    fn test_decode_fixed_numeric() {
        let def = FieldDef::numeric(6, "stan");
        let value = decode_all("123456", 11, &def).unwrap();
        assert_eq!(value.as_str(), "123456");
    }

    #[test]
    fn test_decode_fixed_keeps_padding() {
        let def = FieldDef::alphanumeric(15, "merchant");
        let value = decode_all("MERCHANT123456 ", 42, &def).unwrap();
        assert_eq!(value.as_str(), "MERCHANT123456 ");
    }

    #[test]
    fn test_decode_fixed_truncated() {
        let def = FieldDef::numeric(6, "stan");
        assert!(matches!(
            decode_all("123", 11, &def),
            Err(ParseError::TruncatedField {
                field: 11,
                needed: 6,
                available: 3,
            })
        ));
    }

    #[test]
    fn test_decode_fixed_bad_class() {
        let def = FieldDef::numeric(6, "stan");
        assert!(matches!(
            decode_all("12a456", 11, &def),
            Err(ParseError::InvalidCharClass { field: 11, .. })
        ));
    }

    #[test]
    fn test_decode_binary_doubles_width() {
        let def = FieldDef::binary(8, "mac");
        let value = decode_all("aabbccddeeff0011", 64, &def).unwrap();
        assert_eq!(value.as_hex(), Some("AABBCCDDEEFF0011"));
    }

    #[test]
    fn test_decode_binary_rejects_non_hex() {
        let def = FieldDef::binary(8, "mac");
        assert!(matches!(
            decode_all("GGBBCCDDEEFF0011", 64, &def),
            Err(ParseError::InvalidCharClass { field: 64, .. })
        ));
    }

    #[test]
    fn test_decode_llvar() {
        let def = FieldDef::llvar(19, "pan");
        let mut cursor = 0;
        let value = decode_field("164111111111111111", &mut cursor, 2, &def).unwrap();
        assert_eq!(value.as_str(), "4111111111111111");
        assert_eq!(cursor, 18);
    }

    #[test]
    fn test_decode_llvar_bad_prefix() {
        let def = FieldDef::llvar(19, "pan");
        let mut cursor = 0;
        assert!(matches!(
            decode_field("1x4111", &mut cursor, 2, &def),
            Err(ParseError::InvalidLength { field: 2, .. })
        ));
    }

    #[test]
    fn test_decode_llvar_over_max() {
        let def = FieldDef::llvar(19, "pan");
        let mut cursor = 0;
        let long = format!("99{}", "4".repeat(99));
        assert!(matches!(
            decode_field(&long, &mut cursor, 2, &def),
            Err(ParseError::InvalidLength { field: 2, .. })
        ));
    }

    #[test]
    fn test_decode_llvar_truncated_payload() {
        let def = FieldDef::llvar(19, "pan");
        let mut cursor = 0;
        assert!(matches!(
            decode_field("1641111", &mut cursor, 2, &def),
            Err(ParseError::TruncatedField { field: 2, .. })
        ));
    }

    #[test]
    fn test_decode_lllvar() {
        let def = FieldDef::lllvar(999, "private");
        let mut cursor = 0;
        let value = decode_field("005HELLO", &mut cursor, 48, &def).unwrap();
        assert_eq!(value.as_str(), "HELLO");
    }

    #[test]
    fn test_encode_fixed_pads_numeric_left() {
        let def = FieldDef::numeric(6, "code");
        let out = encode_to_string(3, &FieldValue::text("1000"), &def);
        assert_eq!(out, "001000");
    }

    #[test]
    fn test_encode_fixed_pads_text_right() {
        let def = FieldDef::alphanumeric(8, "terminal");
        let out = encode_to_string(41, &FieldValue::text("TERM1"), &def);
        assert_eq!(out, "TERM1   ");
    }

    #[test]
    fn test_encode_default_padding_when_unpinned() {
        let def = FieldDef::fixed(FieldKind::AlphanumericSpecial, 6, "memo");
        let out = encode_to_string(43, &FieldValue::text("AB"), &def);
        assert_eq!(out, "AB    ");
    }

    #[test]
    fn test_encode_fixed_too_long() {
        let def = FieldDef::numeric(6, "code");
        let mut out = BytesMut::new();
        let err = encode_field(&mut out, 3, &FieldValue::text("1234567"), &def).unwrap_err();
        assert!(matches!(
            err,
            BuildError::ValueTooLong {
                field: 3,
                length: 7,
                max_length: 6,
            }
        ));
    }

    #[test]
    fn test_encode_binary_exact_only() {
        let def = FieldDef::binary(8, "mac");
        let out = encode_to_string(64, &FieldValue::binary_hex("aabbccddeeff0011"), &def);
        assert_eq!(out, "AABBCCDDEEFF0011");

        let mut buf = BytesMut::new();
        let err =
            encode_field(&mut buf, 64, &FieldValue::binary_hex("AABB"), &def).unwrap_err();
        assert!(matches!(
            err,
            BuildError::LengthMismatch {
                field: 64,
                expected: 8,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_encode_llvar_prefix() {
        let def = FieldDef::llvar(19, "pan");
        let out = encode_to_string(2, &FieldValue::text("4111111111111111"), &def);
        assert_eq!(out, "164111111111111111");

        let out = encode_to_string(2, &FieldValue::text("41111"), &def);
        assert_eq!(out, "0541111");
    }

    #[test]
    fn test_encode_lllvar_prefix() {
        let def = FieldDef::lllvar(999, "private");
        let out = encode_to_string(48, &FieldValue::text("HELLO"), &def);
        assert_eq!(out, "005HELLO");
    }

    #[test]
    fn test_encode_variable_over_prefix_capacity() {
        // The MC overlay allows 4096 bytes in field 56, but a 3-digit prefix
        // cannot declare more than 999.
        let def = FieldDef::lllvar(4096, "original data");
        let mut out = BytesMut::new();
        let err = encode_field(
            &mut out,
            56,
            &FieldValue::text("X".repeat(1000)),
            &def,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::ValueTooLong {
                field: 56,
                length: 1000,
                max_length: 999,
            }
        ));
    }

    #[test]
    fn test_field_round_trip() {
        let defs = [
            (3u16, FieldDef::numeric(6, "code"), "000000"),
            (41, FieldDef::alphanumeric(8, "term"), "TERM0001"),
            (2, FieldDef::llvar(19, "pan"), "4111111111111111"),
            (48, FieldDef::lllvar(999, "priv"), "SOME PRIVATE DATA"),
        ];
        for (field, def, raw) in defs {
            let wire = encode_to_string(field, &FieldValue::text(raw), &def);
            let mut cursor = 0;
            let value = decode_field(&wire, &mut cursor, field, &def).unwrap();
            assert_eq!(value.as_str(), raw, "field {} did not round trip", field);
            assert_eq!(cursor, wire.len());
        }
    }
}
