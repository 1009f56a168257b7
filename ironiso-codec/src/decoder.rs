/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! ISO 8583 message decoder.
//!
//! The decoder drives the wire protocol in order: MTI, primary bitmap,
//! optional secondary bitmap, then every present field ascending, delegating
//! each to the field codec against its effective definition. Field 55 is
//! handed to the TLV codec; the PAN is run through network detection when the
//! caller supplied no network. The input is never mutated and a failure
//! abandons the partial message.

use crate::{bitmap, field};
use ironiso_core::{CardNetwork, IsoError, IsoMessage, IsoVersion, Mti, ParseError};
use ironiso_dictionary::{detect_network, SchemaRegistry};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, trace};

/// ISO 8583 message decoder.
///
/// A decoder holds immutable schema tables plus a small per-call cursor, so
/// one instance is safe to share across parallel callers.
#[derive(Debug)]
pub struct Decoder {
    version: IsoVersion,
    registry: Arc<SchemaRegistry>,
}

impl Decoder {
    /// Creates a decoder for the given protocol version using the shared
    /// schema registry.
    #[must_use]
    pub fn new(version: IsoVersion) -> Self {
        Self {
            version,
            registry: SchemaRegistry::global(),
        }
    }

    /// Creates a decoder with an explicit schema registry.
    #[must_use]
    pub fn with_registry(version: IsoVersion, registry: Arc<SchemaRegistry>) -> Self {
        Self { version, registry }
    }

    /// Returns the protocol version this decoder parses under.
    #[must_use]
    pub const fn version(&self) -> IsoVersion {
        self.version
    }

    /// Decodes a complete message from an already-framed wire string.
    ///
    /// # Arguments
    /// * `wire` - The message characters, any outer length prefix or TPDU
    ///   header already stripped
    /// * `network` - Caller-supplied network; when `None` and field 2 is
    ///   present, the network is detected from the PAN after parsing
    ///
    /// # Errors
    /// Returns [`ParseError`] at the first condition the decoder cannot
    /// continue past; trailing characters after the last present field are
    /// [`ParseError::TrailingGarbage`].
    pub fn decode(
        &self,
        wire: &str,
        network: Option<CardNetwork>,
    ) -> Result<IsoMessage, ParseError> {
        if let Some(at) = wire.bytes().position(|b| !b.is_ascii()) {
            return Err(ParseError::NotAscii { at });
        }
        if wire.len() < 4 {
            return Err(ParseError::TruncatedMti);
        }

        let mti_str = &wire[..4];
        let mti = Mti::new(mti_str).ok_or_else(|| ParseError::InvalidMti(mti_str.to_string()))?;
        let mut cursor = 4;

        let bitmap_hex = read_bitmap(wire, &mut cursor)?;
        let present = bitmap::present_fields(&bitmap_hex)?;
        debug!(mti = %mti, bitmap = %bitmap_hex, fields = present.len(), "decoding message");

        let mut fields = BTreeMap::new();
        for &number in &present {
            let def = self
                .registry
                .definition_of(number, self.version, network)
                .ok_or(ParseError::UnknownField { field: number })?;
            let value = field::decode_field(wire, &mut cursor, number, &def)?;
            trace!(field = number, len = value.as_str().len(), "decoded field");
            fields.insert(number, value);
        }

        if cursor < wire.len() {
            return Err(ParseError::TrailingGarbage {
                at: cursor,
                remaining: wire.len() - cursor,
            });
        }

        let network = network.or_else(|| {
            fields
                .get(&2)
                .and_then(|pan| detect_network(pan.as_str()))
        });

        let emv = match fields.get(&55) {
            Some(value) => Some(ironiso_emv::parse_emv(value.as_str())?),
            None => None,
        };

        Ok(IsoMessage {
            mti,
            fields,
            bitmap: Some(bitmap_hex),
            network,
            version: self.version,
            emv,
            raw: wire.to_string(),
        })
    }

    /// Decodes one message per non-empty line of a reader.
    ///
    /// # Errors
    /// Returns the first I/O error, or the first parse failure wrapped in
    /// [`ParseError::AtLine`] with its 1-based line number.
    pub fn decode_lines<R: BufRead>(
        &self,
        reader: R,
        network: Option<CardNetwork>,
    ) -> Result<Vec<IsoMessage>, IsoError> {
        let mut messages = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let message = self
                .decode(trimmed, network)
                .map_err(|source| ParseError::AtLine {
                    line: index + 1,
                    source: Box::new(source),
                })?;
            messages.push(message);
        }
        Ok(messages)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(IsoVersion::V1987)
    }
}

/// Reads the primary bitmap and, when its bit 1 is set, the secondary.
///
/// Returns the full bitmap hex, upper-cased.
fn read_bitmap(wire: &str, cursor: &mut usize) -> Result<String, ParseError> {
    let take_half = |cursor: &mut usize, what: &str| -> Result<u64, ParseError> {
        if wire.len() < *cursor + 16 {
            return Err(ParseError::InvalidBitmap {
                reason: format!("message too short for {}", what),
            });
        }
        let half = &wire[*cursor..*cursor + 16];
        if !half.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::InvalidBitmap {
                reason: format!("non-hex character in {}", what),
            });
        }
        *cursor += 16;
        u64::from_str_radix(half, 16).map_err(|_| ParseError::InvalidBitmap {
            reason: format!("unparseable {}", what),
        })
    };

    let start = *cursor;
    let primary = take_half(cursor, "primary bitmap")?;
    if primary & bitmap::SECONDARY_INDICATOR != 0 {
        take_half(cursor, "secondary bitmap")?;
    }
    Ok(wire[start..*cursor].to_uppercase())
}
