/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Version and network schema overlays.
//!
//! The effective definition of a field is resolved network overlay first,
//! then version overlay, then the base table. Overlays only list the fields
//! they change. Network entries also carry the required-field sets and the
//! per-network format rules consumed by the validator.

use crate::schema::{FieldDef, FieldKind};
use ironiso_core::{CardNetwork, IsoVersion};

/// Field variations introduced by ISO 8583:1993.
pub const V1993_FIELDS: &[(u16, FieldDef)] = &[
    (43, FieldDef::llvar(99, "Card Acceptor Name/Location (1993)")),
    (52, FieldDef::binary(16, "PIN Data (1993)")),
    (53, FieldDef::lllvar(48, "Security Related Control Information (1993)")),
    (54, FieldDef::lllvar(255, "Additional Amounts (1993)")),
    (55, FieldDef::lllvar(255, "ICC System Related Data (1993)")),
];

/// Field variations introduced by ISO 8583:2003.
pub const V2003_FIELDS: &[(u16, FieldDef)] = &[
    (43, FieldDef::llvar(256, "Card Acceptor Name/Location (2003)")),
    (52, FieldDef::binary(32, "PIN Data (2003)")),
    (53, FieldDef::lllvar(96, "Security Related Control Information (2003)")),
    (54, FieldDef::lllvar(512, "Additional Amounts (2003)")),
    (55, FieldDef::lllvar(999, "ICC System Related Data (2003)")),
    (56, FieldDef::lllvar(999, "Original Data Elements (2003)")),
    (57, FieldDef::lllvar(999, "Authorization Life Cycle Code (2003)")),
    (58, FieldDef::lllvar(999, "Authorizing Agent Institution ID (2003)")),
    (59, FieldDef::lllvar(999, "Transport Data (2003)")),
];

/// Visa field overlay.
pub const VISA_FIELDS: &[(u16, FieldDef)] = &[
    (24, FieldDef::numeric(3, "Function Code (VISA)")),
    (44, FieldDef::llvar(99, "Additional Response Data (VISA)")),
    (46, FieldDef::lllvar(204, "Fee Amounts (VISA)")),
    (47, FieldDef::lllvar(999, "Additional Data - National (VISA)")),
    (48, FieldDef::lllvar(999, "Additional Data - Private (VISA Installments)")),
    (60, FieldDef::lllvar(999, "Advised Echo Data (VISA)")),
    (62, FieldDef::lllvar(999, "Card Issuer Data (VISA)")),
    (63, FieldDef::lllvar(999, "SMS Fields (VISA)")),
    (66, FieldDef::lllvar(204, "Settlement Code (VISA)")),
    (67, FieldDef::numeric(2, "Extended Payment Code (VISA)")),
    (71, FieldDef::numeric(8, "Message Number (VISA)")),
    (72, FieldDef::lllvar(999, "Data Record (VISA)")),
    (73, FieldDef::numeric(6, "Action Date (VISA)")),
    (92, FieldDef::numeric(3, "File Security Code (VISA)")),
    (93, FieldDef::numeric(6, "Transaction Identifier (VISA)")),
    (104, FieldDef::lllvar(999, "Transaction Specific Data (VISA)")),
    (120, FieldDef::lllvar(999, "Record Data (VISA)")),
    (121, FieldDef::lllvar(999, "Issuer Authorization Data (VISA)")),
    (123, FieldDef::lllvar(999, "Verification Data (VISA)")),
    (124, FieldDef::lllvar(999, "Network Control Data (VISA)")),
    (125, FieldDef::lllvar(999, "POS Configuration Data (VISA)")),
];

/// Mastercard field overlay.
pub const MASTERCARD_FIELDS: &[(u16, FieldDef)] = &[
    (24, FieldDef::numeric(3, "Function Code (MC)")),
    (34, FieldDef::llvar(28, "Extended PAN (MC)")),
    (45, FieldDef::llvar(76, "Track 1 Data (MC Format)")),
    (48, FieldDef::lllvar(999, "Additional Data - Private (MC Format)")),
    (51, FieldDef::fixed(FieldKind::Alphanumeric, 3, "PIN Security Type (MC)")),
    (54, FieldDef::lllvar(120, "Additional Amounts (MC Format)")),
    (55, FieldDef::lllvar(510, "ICC System Related Data (MC EMV Tags)")),
    (56, FieldDef::lllvar(4096, "Original Data Elements (MC)")),
    (57, FieldDef::lllvar(999, "Authorization Life Cycle Code (MC)")),
    (58, FieldDef::llvar(11, "Authorizing Agent Institution ID (MC)")),
    (59, FieldDef::lllvar(999, "Transport Data (MC)")),
    (63, FieldDef::lllvar(999, "Network Data (MC)")),
    (71, FieldDef::numeric(8, "Message Number (MC)")),
    (84, FieldDef::lllvar(999, "Data - Private Use (MC)")),
    (91, FieldDef::alphanumeric(1, "File Update Code (MC)")),
    (92, FieldDef::numeric(2, "File Security Code (MC)")),
    (94, FieldDef::alphanumeric(7, "Service Indicator (MC)")),
    (95, FieldDef::binary(28, "Card Issuer Reference Data (MC)")),
    (105, FieldDef::lllvar(999, "MC Reserved")),
    (122, FieldDef::lllvar(999, "Card Issuer Reference Data (MC)")),
    (126, FieldDef::lllvar(999, "Switch Private Data (MC)")),
];

/// American Express field overlay.
pub const AMEX_FIELDS: &[(u16, FieldDef)] = &[
    (23, FieldDef::numeric(3, "Card Sequence Number (AMEX)")),
    (44, FieldDef::llvar(99, "Additional Response Data (AMEX)")),
    (47, FieldDef::lllvar(999, "Additional Data - National (AMEX)")),
    (48, FieldDef::lllvar(999, "Transaction Level Data (AMEX)")),
    (55, FieldDef::lllvar(999, "ICC Data (AMEX Format)")),
    (60, FieldDef::lllvar(999, "Network Data (AMEX)")),
    (61, FieldDef::lllvar(999, "Other Terminal Data (AMEX)")),
    (63, FieldDef::lllvar(999, "Card Level Results (AMEX)")),
    (76, FieldDef::lllvar(999, "Confirmations/Authorizations (AMEX)")),
    (112, FieldDef::lllvar(999, "Additional Data (AMEX)")),
    (124, FieldDef::lllvar(999, "Sundry Data (AMEX)")),
    (125, FieldDef::lllvar(999, "Extended Response Data (AMEX)")),
];

/// Discover field overlay.
pub const DISCOVER_FIELDS: &[(u16, FieldDef)] = &[
    (44, FieldDef::llvar(99, "Additional Response Data (Discover)")),
    (48, FieldDef::lllvar(999, "Additional Data - Private (Discover)")),
    (55, FieldDef::lllvar(999, "ICC Data (Discover Format)")),
    (62, FieldDef::lllvar(999, "Network Specific Data (Discover)")),
    (63, FieldDef::lllvar(999, "Protocol Specific Data (Discover)")),
    (95, FieldDef::binary(28, "Card Issuer Reference Data (Discover)")),
    (111, FieldDef::lllvar(999, "Network Details (Discover)")),
];

/// UnionPay field overlay.
pub const UNIONPAY_FIELDS: &[(u16, FieldDef)] = &[
    (33, FieldDef::llvar(28, "Forwarding Institution ID (UnionPay)")),
    (40, FieldDef::numeric(3, "Service Restriction Code (UnionPay)")),
    (41, FieldDef::alphanumeric(8, "Terminal ID (UnionPay Format)")),
    (42, FieldDef::alphanumeric(15, "Merchant ID (UnionPay Format)")),
    (48, FieldDef::lllvar(999, "Additional Data - Private (UnionPay)")),
    (55, FieldDef::lllvar(999, "ICC Data (UnionPay Format)")),
    (60, FieldDef::lllvar(999, "Reserved National (UnionPay)")),
    (63, FieldDef::lllvar(999, "Additional Data (UnionPay)")),
    (90, FieldDef::numeric(42, "Original Data Elements (UnionPay)")),
    (100, FieldDef::llvar(11, "Receiving Institution ID (UnionPay)")),
    (102, FieldDef::llvar(28, "Account Identifier 1 (UnionPay)")),
    (103, FieldDef::llvar(28, "Account Identifier 2 (UnionPay)")),
    (113, FieldDef::lllvar(999, "UnionPay Reserved")),
];

/// JCB field overlay.
pub const JCB_FIELDS: &[(u16, FieldDef)] = &[
    (42, FieldDef::alphanumeric(15, "Card Acceptor ID Code (JCB)")),
    (48, FieldDef::lllvar(999, "Additional Data - Private (JCB)")),
    (55, FieldDef::lllvar(255, "ICC System Related Data (JCB)")),
    (61, FieldDef::lllvar(999, "Internal Data (JCB)")),
    (62, FieldDef::lllvar(999, "Private Data (JCB)")),
    (63, FieldDef::lllvar(999, "SMS Private Data (JCB)")),
    (114, FieldDef::lllvar(999, "Regional Data (JCB)")),
];

/// Returns the overlay table for a version, empty for the base 1987 revision.
#[must_use]
pub const fn version_overlay(version: IsoVersion) -> &'static [(u16, FieldDef)] {
    match version {
        IsoVersion::V1987 => &[],
        IsoVersion::V1993 => V1993_FIELDS,
        IsoVersion::V2003 => V2003_FIELDS,
    }
}

/// Returns the overlay table for a network.
#[must_use]
pub const fn network_overlay(network: CardNetwork) -> &'static [(u16, FieldDef)] {
    match network {
        CardNetwork::Visa => VISA_FIELDS,
        CardNetwork::Mastercard => MASTERCARD_FIELDS,
        CardNetwork::Amex => AMEX_FIELDS,
        CardNetwork::Discover => DISCOVER_FIELDS,
        CardNetwork::UnionPay => UNIONPAY_FIELDS,
        CardNetwork::Jcb => JCB_FIELDS,
    }
}

/// Returns the fields a network requires in every message.
#[must_use]
pub const fn required_fields(network: CardNetwork) -> &'static [u16] {
    match network {
        CardNetwork::Visa => &[2, 3, 4, 11, 14, 22, 24, 25],
        CardNetwork::Mastercard => &[2, 3, 4, 11, 22, 24, 25],
        CardNetwork::Amex => &[2, 3, 4, 11, 22, 25],
        CardNetwork::Discover => &[2, 3, 4, 11, 22],
        CardNetwork::Jcb => &[2, 3, 4, 11, 22, 25],
        CardNetwork::UnionPay => &[2, 3, 4, 11, 22, 25, 49],
    }
}

/// A network-specific content rule for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// Value must be upper-case hex.
    Hex,
    /// Value must be upper-case hex of even length.
    EvenHex,
    /// Value must start with the given literal.
    Prefix(&'static str),
    /// Value must be decimal digits with length in the inclusive range.
    Digits(usize, usize),
}

/// Returns the format rules a network imposes on individual fields.
#[must_use]
pub const fn format_rules(network: CardNetwork) -> &'static [(u16, FormatRule)] {
    match network {
        CardNetwork::Visa => &[
            (44, FormatRule::EvenHex),
            (46, FormatRule::Digits(1, 12)),
        ],
        CardNetwork::Mastercard => &[
            (48, FormatRule::Prefix("MC")),
            (55, FormatRule::Prefix("9F")),
        ],
        CardNetwork::Amex => &[(44, FormatRule::Hex), (112, FormatRule::Prefix("AX"))],
        CardNetwork::Discover | CardNetwork::Jcb | CardNetwork::UnionPay => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_per_network() {
        assert_eq!(
            required_fields(CardNetwork::Visa),
            &[2, 3, 4, 11, 14, 22, 24, 25]
        );
        assert_eq!(required_fields(CardNetwork::Discover), &[2, 3, 4, 11, 22]);
        assert!(required_fields(CardNetwork::UnionPay).contains(&49));
    }

    #[test]
    fn test_version_overlay_lookup() {
        assert!(version_overlay(IsoVersion::V1987).is_empty());
        let f52 = V1993_FIELDS.iter().find(|(n, _)| *n == 52).unwrap().1;
        assert_eq!(f52.max_length, 16);
        let f52 = V2003_FIELDS.iter().find(|(n, _)| *n == 52).unwrap().1;
        assert_eq!(f52.max_length, 32);
    }

    #[test]
    fn test_network_overlay_lookup() {
        let mc55 = MASTERCARD_FIELDS.iter().find(|(n, _)| *n == 55).unwrap().1;
        assert_eq!(mc55.max_length, 510);
        let jcb55 = JCB_FIELDS.iter().find(|(n, _)| *n == 55).unwrap().1;
        assert_eq!(jcb55.max_length, 255);
    }

    #[test]
    fn test_format_rules() {
        assert_eq!(
            format_rules(CardNetwork::Visa),
            &[(44, FormatRule::EvenHex), (46, FormatRule::Digits(1, 12))]
        );
        assert!(format_rules(CardNetwork::Discover).is_empty());
    }
}
