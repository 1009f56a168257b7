/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Presence bitmap encoding and decoding.
//!
//! The bitmap is 64 bits (primary) or 128 bits (primary plus secondary),
//! transmitted as 16 or 32 ASCII hex characters. Bit numbering is big-endian
//! and 1-based: bit N of the primary bitmap is mask `1 << (64 - N)`; bits
//! 65-128 live in the secondary bitmap with the analogous mapping offset by
//! 64. Bit 1 announces the secondary bitmap; bit 65 would announce a tertiary
//! and is likewise never a data field.

use ironiso_core::ParseError;
use smallvec::SmallVec;

/// Mask for bit 1 of the primary bitmap (secondary-bitmap indicator).
pub const SECONDARY_INDICATOR: u64 = 1 << 63;

fn parse_half(bitmap: &str, range: std::ops::Range<usize>) -> Result<u64, ParseError> {
    let half = &bitmap[range];
    if !half.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ParseError::InvalidBitmap {
            reason: format!("non-hex character in {:?}", half),
        });
    }
    u64::from_str_radix(half, 16).map_err(|_| ParseError::InvalidBitmap {
        reason: format!("unparseable bitmap half {:?}", half),
    })
}

/// Returns the field numbers whose presence bits are set, in ascending order.
///
/// The continuation bits 1 and 65 are excluded: they describe the bitmap
/// itself, not data fields.
///
/// # Arguments
/// * `bitmap` - 16 or 32 hex characters, case-insensitive
///
/// # Errors
/// Returns [`ParseError::InvalidBitmap`] on non-hex input or wrong length.
pub fn present_fields(bitmap: &str) -> Result<SmallVec<[u16; 32]>, ParseError> {
    if bitmap.len() != 16 && bitmap.len() != 32 {
        return Err(ParseError::InvalidBitmap {
            reason: format!("length {} is neither 16 nor 32", bitmap.len()),
        });
    }

    let primary = parse_half(bitmap, 0..16)?;
    let mut fields = SmallVec::new();

    for n in 2..=64u16 {
        if primary & (1 << (64 - n)) != 0 {
            fields.push(n);
        }
    }

    if bitmap.len() == 32 {
        let secondary = parse_half(bitmap, 16..32)?;
        for n in 65..=128u16 {
            if n == 65 {
                continue;
            }
            if secondary & (1 << (128 - n)) != 0 {
                fields.push(n);
            }
        }
    }

    Ok(fields)
}

/// Encodes a presence bitmap from a set of field numbers.
///
/// Bit 1 is set iff any field in 65-128 is present, in which case the result
/// is 32 hex characters; otherwise 16. Output is upper-case. Field numbers
/// outside 2-128 and the continuation markers themselves are ignored: they
/// can never be data fields.
#[must_use]
pub fn encode<I: IntoIterator<Item = u16>>(fields: I) -> String {
    let mut primary = 0u64;
    let mut secondary = 0u64;

    for field in fields {
        match field {
            2..=64 => primary |= 1 << (64 - field),
            66..=128 => secondary |= 1 << (128 - field),
            _ => {}
        }
    }

    if secondary != 0 {
        primary |= SECONDARY_INDICATOR;
        format!("{:016X}{:016X}", primary, secondary)
    } else {
        format!("{:016X}", primary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_primary_only() {
        let bitmap = encode([2u16, 3, 4, 11, 41, 42]);
        assert_eq!(bitmap, "7020000000C00000");
        assert_eq!(bitmap.len(), 16);
    }

    #[test]
    fn test_encode_with_secondary() {
        let bitmap = encode([2u16, 128]);
        assert_eq!(bitmap.len(), 32);
        // Bit 1 (secondary indicator) and bit 2 set.
        assert!(bitmap.starts_with("C000000000000000"));
        // Bit 128 is the lowest bit of the secondary half.
        assert!(bitmap.ends_with("0000000000000001"));
    }

    #[test]
    fn test_encode_ignores_continuation_markers() {
        assert_eq!(encode([1u16, 65, 3]), encode([3u16]));
        assert_eq!(encode([0u16, 200, 3]), encode([3u16]));
    }

    #[test]
    fn test_present_fields_round_trip() {
        let fields: Vec<u16> = vec![2, 3, 4, 11, 41, 42];
        let decoded = present_fields(&encode(fields.iter().copied())).unwrap();
        assert_eq!(decoded.as_slice(), fields.as_slice());
    }

    #[test]
    fn test_present_fields_secondary_round_trip() {
        let fields: Vec<u16> = vec![2, 64, 66, 100, 128];
        let decoded = present_fields(&encode(fields.iter().copied())).unwrap();
        assert_eq!(decoded.as_slice(), fields.as_slice());
    }

    #[test]
    fn test_single_field_round_trip_exhaustive() {
        for n in 2..=128u16 {
            if n == 65 {
                continue;
            }
            let decoded = present_fields(&encode([n])).unwrap();
            assert_eq!(decoded.as_slice(), &[n], "field {} lost in round trip", n);
        }
    }

    #[test]
    fn test_present_fields_case_insensitive() {
        let upper = present_fields("7020000000C00000").unwrap();
        let lower = present_fields("7020000000c00000").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_present_fields_excludes_continuation_bits() {
        // All 128 bits set: 1 and 65 must still be absent.
        let all = "F".repeat(32);
        let fields = present_fields(&all).unwrap();
        assert!(!fields.contains(&1));
        assert!(!fields.contains(&65));
        assert_eq!(fields.len(), 126);
    }

    #[test]
    fn test_present_fields_bad_input() {
        assert!(matches!(
            present_fields("123"),
            Err(ParseError::InvalidBitmap { .. })
        ));
        assert!(matches!(
            present_fields("G020000000C00000"),
            Err(ParseError::InvalidBitmap { .. })
        ));
        // A leading sign is not hex even though from_str_radix would take it.
        assert!(matches!(
            present_fields("+020000000C00000"),
            Err(ParseError::InvalidBitmap { .. })
        ));
    }
}
