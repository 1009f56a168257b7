/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Card network detection from the PAN.
//!
//! Detection is prefix-based over the issuer identification ranges, longest
//! matching prefix first, so the Mastercard 2221-2720 block and the Discover
//! 6011 block are tested before any shorter prefix can shadow them.

use ironiso_core::CardNetwork;

/// Detects the card network from a PAN's leading digits.
///
/// # Arguments
/// * `pan` - The primary account number; must be all decimal digits
///
/// # Returns
/// The matching network, or `None` when the PAN is empty, non-numeric, or
/// matches no known issuer range.
#[must_use]
pub fn detect_network(pan: &str) -> Option<CardNetwork> {
    if pan.is_empty() || !pan.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    if pan.len() >= 4 {
        let p4: u32 = pan[..4].parse().ok()?;
        if p4 == 6011 {
            return Some(CardNetwork::Discover);
        }
        if (2221..=2720).contains(&p4) {
            return Some(CardNetwork::Mastercard);
        }
        if (3528..=3589).contains(&p4) {
            return Some(CardNetwork::Jcb);
        }
    }

    if pan.len() >= 3 {
        let p3: u32 = pan[..3].parse().ok()?;
        if (644..=649).contains(&p3) {
            return Some(CardNetwork::Discover);
        }
    }

    if pan.len() >= 2 {
        let p2: u32 = pan[..2].parse().ok()?;
        if (51..=55).contains(&p2) {
            return Some(CardNetwork::Mastercard);
        }
        if p2 == 34 || p2 == 37 {
            return Some(CardNetwork::Amex);
        }
        if p2 == 65 {
            return Some(CardNetwork::Discover);
        }
        if p2 == 62 {
            return Some(CardNetwork::UnionPay);
        }
    }

    if pan.starts_with('4') {
        return Some(CardNetwork::Visa);
    }

    None
}

/// Returns true when `len` is a valid PAN length for the network.
///
/// Visa issues 13, 16, or 19 digits; Mastercard 16; Amex 15; Discover, JCB,
/// and UnionPay 16 through 19.
#[must_use]
pub const fn pan_length_valid(network: CardNetwork, len: usize) -> bool {
    match network {
        CardNetwork::Visa => matches!(len, 13 | 16 | 19),
        CardNetwork::Mastercard => len == 16,
        CardNetwork::Amex => len == 15,
        CardNetwork::Discover | CardNetwork::Jcb | CardNetwork::UnionPay => {
            len >= 16 && len <= 19
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_major_networks() {
        assert_eq!(
            detect_network("4111111111111111"),
            Some(CardNetwork::Visa)
        );
        assert_eq!(
            detect_network("5555555555554444"),
            Some(CardNetwork::Mastercard)
        );
        assert_eq!(detect_network("378282246310005"), Some(CardNetwork::Amex));
        assert_eq!(detect_network("340000000000009"), Some(CardNetwork::Amex));
        assert_eq!(
            detect_network("6011111111111117"),
            Some(CardNetwork::Discover)
        );
        assert_eq!(
            detect_network("3530111333300000"),
            Some(CardNetwork::Jcb)
        );
        assert_eq!(
            detect_network("6200000000000005"),
            Some(CardNetwork::UnionPay)
        );
    }

    #[test]
    fn test_detect_mastercard_2_series() {
        assert_eq!(
            detect_network("2221000000000009"),
            Some(CardNetwork::Mastercard)
        );
        assert_eq!(
            detect_network("2720999999999999"),
            Some(CardNetwork::Mastercard)
        );
        // Just outside the 2-series block.
        assert_eq!(detect_network("2220999999999999"), None);
        assert_eq!(detect_network("2721000000000000"), None);
    }

    #[test]
    fn test_detect_discover_644_649() {
        assert_eq!(
            detect_network("6441111111111111"),
            Some(CardNetwork::Discover)
        );
        assert_eq!(
            detect_network("6491111111111111"),
            Some(CardNetwork::Discover)
        );
        assert_eq!(
            detect_network("6511111111111117"),
            Some(CardNetwork::Discover)
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        // 35 alone is nothing; only 3528-3589 is JCB.
        assert_eq!(detect_network("3500000000000000"), None);
        assert_eq!(detect_network("3527999999999999"), None);
        assert_eq!(
            detect_network("3589999999999999"),
            Some(CardNetwork::Jcb)
        );
    }

    #[test]
    fn test_detect_rejects_garbage() {
        assert_eq!(detect_network(""), None);
        assert_eq!(detect_network("41x1"), None);
        assert_eq!(detect_network("9999999999999999"), None);
    }

    #[test]
    fn test_pan_length_valid() {
        assert!(pan_length_valid(CardNetwork::Visa, 16));
        assert!(pan_length_valid(CardNetwork::Visa, 13));
        assert!(!pan_length_valid(CardNetwork::Visa, 15));
        assert!(pan_length_valid(CardNetwork::Amex, 15));
        assert!(!pan_length_valid(CardNetwork::Mastercard, 15));
        assert!(pan_length_valid(CardNetwork::UnionPay, 19));
    }
}
