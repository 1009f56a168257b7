/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message validation.
//!
//! Validation collects every finding into a [`Diagnostic`] list instead of
//! failing fast, so callers can see all problems at once. The checks cover
//! MTI shape, bitmap consistency, per-field character class and length
//! bounds, the Luhn checksum on the PAN, network required-field sets, and
//! network format rules. The validator never mutates the message.

use crate::bitmap;
use ironiso_core::{Diagnostic, FieldValue, IsoMessage, Rule};
use ironiso_dictionary::{FormatRule, SchemaRegistry};
use std::sync::Arc;
use tracing::debug;

/// MTI second digits that name a valid message class (0 and 7 are invalid).
const VALID_CLASSES: &[char] = &['1', '2', '3', '4', '5', '6', '8', '9'];

/// Message validator.
///
/// Holds only the shared schema registry; safe to share across callers.
#[derive(Debug)]
pub struct Validator {
    registry: Arc<SchemaRegistry>,
}

impl Validator {
    /// Creates a validator over the shared schema registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::global(),
        }
    }

    /// Creates a validator with an explicit schema registry.
    #[must_use]
    pub fn with_registry(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Validates a message, returning every diagnostic found.
    ///
    /// An empty list means the message passed all checks.
    #[must_use]
    pub fn validate(&self, msg: &IsoMessage) -> Vec<Diagnostic> {
        let mut diags = Vec::new();

        self.check_mti(msg, &mut diags);
        self.check_bitmap(msg, &mut diags);
        for (number, value) in msg.data_fields() {
            self.check_field(msg, number, value, &mut diags);
        }
        self.check_pan(msg, &mut diags);
        self.check_required_fields(msg, &mut diags);
        self.check_network_formats(msg, &mut diags);
        self.check_emv(msg, &mut diags);

        if !diags.is_empty() {
            debug!(count = diags.len(), mti = %msg.mti, "validation produced diagnostics");
        }
        diags
    }

    fn check_mti(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        let mti = msg.mti.as_str();
        let mut chars = mti.chars();
        let version = chars.next().unwrap_or('x');
        let class = chars.next().unwrap_or('x');

        if !matches!(version, '0' | '1' | '2') {
            diags.push(Diagnostic::message_level(
                Rule::MtiShape,
                format!("MTI version digit {:?} must be 0, 1, or 2", version),
            ));
        }
        if !VALID_CLASSES.contains(&class) {
            diags.push(Diagnostic::message_level(
                Rule::MtiShape,
                format!("MTI class digit {:?} is not a valid message class", class),
            ));
        }
    }

    fn check_bitmap(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        for marker in [1u16, 65] {
            if msg.has_field(marker) {
                diags.push(Diagnostic::field(
                    marker,
                    Rule::BitmapConsistency,
                    "bitmap continuation marker can never carry data",
                ));
            }
        }

        let Some(recorded) = msg.bitmap.as_deref() else {
            return;
        };
        let present = match bitmap::present_fields(recorded) {
            Ok(present) => present,
            Err(err) => {
                diags.push(Diagnostic::message_level(
                    Rule::BitmapConsistency,
                    format!("recorded bitmap is unparseable: {}", err),
                ));
                return;
            }
        };

        for &bit in &present {
            if !msg.has_field(bit) {
                diags.push(Diagnostic::field(
                    bit,
                    Rule::BitmapConsistency,
                    "bit set in bitmap but field missing from message",
                ));
            }
        }
        for (number, _) in msg.data_fields() {
            if number != 1 && number != 65 && !present.contains(&number) {
                diags.push(Diagnostic::field(
                    number,
                    Rule::BitmapConsistency,
                    "field present in message but bit clear in bitmap",
                ));
            }
        }
    }

    fn check_field(
        &self,
        msg: &IsoMessage,
        number: u16,
        value: &FieldValue,
        diags: &mut Vec<Diagnostic>,
    ) {
        if number == 1 || number == 65 {
            return;
        }
        let Some(def) = self
            .registry
            .definition_of(number, msg.version, msg.network)
        else {
            diags.push(Diagnostic::field(
                number,
                Rule::UnknownField,
                "no definition in the effective schema",
            ));
            return;
        };

        let text = value.as_str();
        if let Some(bad) = text.chars().find(|c| !def.kind.accepts(*c)) {
            diags.push(Diagnostic::field(
                number,
                Rule::CharClass,
                format!("{:?} is not valid for type {}", bad, def.kind.code()),
            ));
        }

        if def.kind.is_binary() {
            if text.len() % 2 != 0 {
                diags.push(Diagnostic::field(
                    number,
                    Rule::CharClass,
                    format!("binary value has odd hex length {}", text.len()),
                ));
            }
            let bytes = text.len() / 2;
            if bytes != def.max_length {
                diags.push(Diagnostic::field(
                    number,
                    Rule::Length,
                    format!("binary length {} bytes, expected {}", bytes, def.max_length),
                ));
            }
        } else if def.is_variable() {
            let min = def.effective_min();
            if text.len() > def.max_length || text.len() < min {
                diags.push(Diagnostic::field(
                    number,
                    Rule::Length,
                    format!(
                        "length {} outside [{}, {}]",
                        text.len(),
                        min,
                        def.max_length
                    ),
                ));
            }
        } else if text.len() != def.max_length {
            diags.push(Diagnostic::field(
                number,
                Rule::Length,
                format!("length {}, expected exactly {}", text.len(), def.max_length),
            ));
        }

        if def.kind == ironiso_dictionary::FieldKind::Track2 && !track2_shaped(text) {
            diags.push(Diagnostic::field(
                number,
                Rule::CharClass,
                "value is not PAN=expiry-shaped track 2 data",
            ));
        }
    }

    fn check_pan(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        let Some(pan) = msg.field_str(2) else {
            return;
        };
        if !pan.bytes().all(|b| b.is_ascii_digit()) {
            diags.push(Diagnostic::field(
                2,
                Rule::PanLuhn,
                "PAN must be decimal digits",
            ));
            return;
        }
        if !luhn_valid(pan) {
            diags.push(Diagnostic::field(
                2,
                Rule::PanLuhn,
                "PAN fails the Luhn mod-10 checksum",
            ));
        }
    }

    fn check_required_fields(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        let Some(network) = msg.network else {
            return;
        };
        for &required in self.registry.required_fields(network) {
            if !msg.has_field(required) {
                diags.push(Diagnostic::field(
                    required,
                    Rule::RequiredField,
                    format!("required by {}", network),
                ));
            }
        }
    }

    fn check_network_formats(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        let Some(network) = msg.network else {
            return;
        };
        for &(number, rule) in self.registry.format_rules(network) {
            let Some(text) = msg.field_str(number) else {
                continue;
            };
            let ok = match rule {
                FormatRule::Hex => is_upper_hex(text),
                FormatRule::EvenHex => is_upper_hex(text) && text.len() % 2 == 0,
                FormatRule::Prefix(prefix) => text.starts_with(prefix),
                FormatRule::Digits(min, max) => {
                    text.len() >= min
                        && text.len() <= max
                        && text.bytes().all(|b| b.is_ascii_digit())
                }
            };
            if !ok {
                let what = match rule {
                    FormatRule::Hex => "upper-case hex".to_string(),
                    FormatRule::EvenHex => "upper-case hex of even length".to_string(),
                    FormatRule::Prefix(prefix) => format!("prefixed with {:?}", prefix),
                    FormatRule::Digits(min, max) => {
                        format!("{} to {} decimal digits", min, max)
                    }
                };
                diags.push(Diagnostic::field(
                    number,
                    Rule::NetworkFormat,
                    format!("{} requires the value to be {}", network, what),
                ));
            }
        }
    }

    fn check_emv(&self, msg: &IsoMessage, diags: &mut Vec<Diagnostic>) {
        let Some(text) = msg.field_str(55) else {
            return;
        };
        if let Err(err) = ironiso_emv::parse_emv(text) {
            diags.push(Diagnostic::field(
                55,
                Rule::EmvFormat,
                format!("EMV data is malformed: {}", err),
            ));
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn is_upper_hex(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

/// Rough track 2 shape: 1-19 PAN digits, a separator, then at least a
/// 4-digit expiry.
fn track2_shaped(text: &str) -> bool {
    let Some((pan, rest)) = text.split_once('=') else {
        return false;
    };
    !pan.is_empty()
        && pan.len() <= 19
        && pan.bytes().all(|b| b.is_ascii_digit())
        && rest.len() >= 4
        && rest.bytes().all(|b| b.is_ascii_digit())
}

/// Checks a digit string against the Luhn mod-10 checksum.
///
/// Traverses right to left, doubling every second digit and subtracting 9
/// when the doubled value exceeds 9; the sum must be a multiple of 10.
#[must_use]
pub fn luhn_valid(digits: &str) -> bool {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let mut sum = 0u32;
    let mut double = false;
    for b in digits.bytes().rev() {
        let mut d = u32::from(b - b'0');
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Checks the shape of a processing code: six decimal digits naming the
/// transaction type and the from/to account types.
#[must_use]
pub fn processing_code_valid(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}
