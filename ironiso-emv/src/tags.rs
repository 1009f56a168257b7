/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! EMV tag dictionary and human-readable decoders.
//!
//! Tag names back the CLI's table output; [`explain_tvr`] and [`explain_cid`]
//! decode the two EMV values operators ask about most.

/// EMV tag names, keyed by upper-case hex tag.
pub const EMV_TAGS: &[(&str, &str)] = &[
    // Template tags
    ("70", "EMV Proprietary Template"),
    ("71", "Issuer Script Template 1"),
    ("72", "Issuer Script Template 2"),
    ("77", "Response Message Template Format 2"),
    ("80", "Response Message Template Format 1"),
    // Primitive tags
    ("42", "Issuer Identification Number (IIN)"),
    ("4F", "Application Identifier (AID)"),
    ("50", "Application Label"),
    ("57", "Track 2 Equivalent Data"),
    ("5A", "Application PAN"),
    ("5F20", "Cardholder Name"),
    ("5F24", "Application Expiration Date"),
    ("5F25", "Application Effective Date"),
    ("5F28", "Issuer Country Code"),
    ("5F2A", "Transaction Currency Code"),
    ("5F2D", "Language Preference"),
    ("5F34", "PAN Sequence Number"),
    ("82", "Application Interchange Profile (AIP)"),
    ("84", "Dedicated File (DF) Name"),
    ("87", "Application Priority Indicator"),
    ("88", "Short File Identifier (SFI)"),
    ("89", "Authorization Code"),
    ("8A", "Authorization Response Code"),
    ("8C", "Card Risk Management Data Object List 1 (CDOL1)"),
    ("8D", "Card Risk Management Data Object List 2 (CDOL2)"),
    ("8E", "Cardholder Verification Method (CVM) List"),
    ("8F", "Certification Authority Public Key Index"),
    ("90", "Issuer Public Key Certificate"),
    ("91", "Issuer Authentication Data"),
    ("92", "Issuer Public Key Remainder"),
    ("93", "Signed Static Application Data"),
    ("94", "Application File Locator (AFL)"),
    ("95", "Terminal Verification Results (TVR)"),
    ("97", "Transaction Certificate Data Object List (TDOL)"),
    ("98", "Transaction Certificate (TC) Hash Value"),
    ("99", "Transaction PIN Data"),
    ("9A", "Transaction Date"),
    ("9B", "Transaction Status Information (TSI)"),
    ("9C", "Transaction Type"),
    ("9D", "Directory Definition File (DDF) Name"),
    ("9F01", "Acquirer Identifier"),
    ("9F02", "Amount, Authorized (Numeric)"),
    ("9F03", "Amount, Other (Numeric)"),
    ("9F04", "Amount, Other (Binary)"),
    ("9F05", "Application Discretionary Data"),
    ("9F06", "Application Identifier (AID) - Terminal"),
    ("9F07", "Application Usage Control"),
    ("9F08", "Application Version Number - Card"),
    ("9F09", "Application Version Number - Terminal"),
    ("9F0B", "Cardholder Name Extended"),
    ("9F0D", "Issuer Action Code - Default"),
    ("9F0E", "Issuer Action Code - Denial"),
    ("9F0F", "Issuer Action Code - Online"),
    ("9F10", "Issuer Application Data"),
    ("9F11", "Issuer Code Table Index"),
    ("9F12", "Application Preferred Name"),
    ("9F13", "Last Online ATC Register"),
    ("9F14", "Lower Consecutive Offline Limit"),
    ("9F15", "Merchant Category Code"),
    ("9F16", "Merchant Identifier"),
    ("9F17", "PIN Try Counter"),
    ("9F18", "Issuer Script Identifier"),
    ("9F1A", "Terminal Country Code"),
    ("9F1B", "Terminal Floor Limit"),
    ("9F1C", "Terminal Identification"),
    ("9F1D", "Terminal Risk Management Data"),
    ("9F1E", "Interface Device (IFD) Serial Number"),
    ("9F1F", "Track 1 Discretionary Data"),
    ("9F20", "Track 2 Discretionary Data"),
    ("9F21", "Transaction Time"),
    ("9F22", "Certification Authority Public Key Index - Terminal"),
    ("9F23", "Upper Consecutive Offline Limit"),
    ("9F26", "Application Cryptogram"),
    ("9F27", "Cryptogram Information Data"),
    ("9F32", "Issuer Public Key Exponent"),
    ("9F33", "Terminal Capabilities"),
    ("9F34", "Cardholder Verification Method (CVM) Results"),
    ("9F35", "Terminal Type"),
    ("9F36", "Application Transaction Counter (ATC)"),
    ("9F37", "Unpredictable Number"),
    ("9F38", "Processing Options Data Object List (PDOL)"),
    ("9F39", "POS Entry Mode"),
    ("9F3A", "Amount, Reference Currency"),
    ("9F3B", "Application Reference Currency"),
    ("9F3C", "Transaction Reference Currency Code"),
    ("9F3D", "Transaction Reference Currency Exponent"),
    ("9F40", "Additional Terminal Capabilities"),
    ("9F41", "Transaction Sequence Counter"),
    ("9F42", "Application Currency Code"),
    ("9F43", "Application Reference Currency Exponent"),
    ("9F44", "Application Currency Exponent"),
    ("9F45", "Data Authentication Code"),
    ("9F46", "ICC Public Key Certificate"),
    ("9F47", "ICC Public Key Exponent"),
    ("9F48", "ICC Public Key Remainder"),
    ("9F49", "Dynamic Data Authentication Data Object List (DDOL)"),
    ("9F4A", "Static Data Authentication Tag List"),
    ("9F4B", "Signed Dynamic Application Data"),
    ("9F4C", "ICC Dynamic Number"),
    ("9F4D", "Log Entry"),
    ("9F4E", "Merchant Name and Location"),
    ("9F4F", "Log Format"),
    ("9F53", "Transaction Category Code"),
    ("9F5B", "Issuer Script Results"),
    ("9F66", "Terminal Transaction Qualifiers (TTQ)"),
    ("9F6C", "Card Transaction Qualifiers (CTQ)"),
    ("9F6E", "Form Factor Indicator"),
    ("DF01", "Proprietary Data Element"),
];

/// Returns the name of an EMV tag, or `"Unknown"`.
#[must_use]
pub fn tag_name(tag: &str) -> &'static str {
    let tag = tag.to_uppercase();
    EMV_TAGS
        .iter()
        .find(|(t, _)| *t == tag)
        .map_or("Unknown", |(_, name)| name)
}

const TVR_FLAGS: [&[(u8, &str)]; 5] = [
    &[
        (0x80, "Offline data authentication not performed"),
        (0x40, "SDA failed"),
        (0x20, "ICC data missing"),
        (0x10, "Card appears on terminal exception file"),
        (0x08, "DDA failed"),
        (0x04, "CDA failed"),
    ],
    &[
        (0x80, "ICC and terminal have different application versions"),
        (0x40, "Expired application"),
        (0x20, "Application not yet effective"),
        (0x10, "Requested service not allowed for card product"),
        (0x08, "New card"),
    ],
    &[
        (0x80, "Cardholder verification was not successful"),
        (0x40, "Unrecognized CVM"),
        (0x20, "PIN Try Limit exceeded"),
        (0x10, "PIN entry required and PIN pad not present or not working"),
        (0x08, "PIN entry required, PIN pad present, but PIN was not entered"),
        (0x04, "Online PIN entered"),
    ],
    &[
        (0x80, "Transaction exceeds floor limit"),
        (0x40, "Lower consecutive offline limit exceeded"),
        (0x20, "Upper consecutive offline limit exceeded"),
        (0x10, "Transaction selected randomly for online processing"),
        (0x08, "Merchant forced transaction online"),
    ],
    &[
        (0x80, "Default TDOL used"),
        (0x40, "Issuer authentication failed"),
        (0x20, "Script processing failed before final GENERATE AC"),
        (0x10, "Script processing failed after final GENERATE AC"),
    ],
];

/// Decodes Terminal Verification Results (tag 95) into the set flags.
///
/// # Arguments
/// * `tvr_hex` - The 5-byte TVR as hex; shorter input is right-padded with zeros
#[must_use]
pub fn explain_tvr(tvr_hex: &str) -> Vec<&'static str> {
    let mut issues = Vec::new();
    for (i, flags) in TVR_FLAGS.iter().enumerate() {
        let pos = i * 2;
        let byte = if pos + 2 <= tvr_hex.len() {
            u8::from_str_radix(&tvr_hex[pos..pos + 2], 16).unwrap_or(0)
        } else {
            0
        };
        for (mask, description) in flags.iter() {
            if byte & mask != 0 {
                issues.push(*description);
            }
        }
    }
    issues
}

/// Decodes Cryptogram Information Data (tag 9F27) into the cryptogram type.
#[must_use]
pub fn explain_cid(cid_hex: &str) -> &'static str {
    let cid = u8::from_str_radix(cid_hex, 16).unwrap_or(0);
    match (cid >> 6) & 0x03 {
        0 => "AAC (Application Authentication Cryptogram) - Transaction declined",
        1 => "TC (Transaction Certificate) - Transaction approved offline",
        2 => "ARQC (Authorization Request Cryptogram) - Online authorization requested",
        _ => "RFU (Reserved for Future Use)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_lookup() {
        assert_eq!(tag_name("9F26"), "Application Cryptogram");
        assert_eq!(tag_name("9f26"), "Application Cryptogram");
        assert_eq!(tag_name("5A"), "Application PAN");
        assert_eq!(tag_name("FFFF"), "Unknown");
    }

    #[test]
    fn test_explain_tvr_flags() {
        // Byte 1: 0x80, byte 2: 0x40, rest clear.
        let issues = explain_tvr("8040000000");
        assert_eq!(
            issues,
            vec![
                "Offline data authentication not performed",
                "Expired application"
            ]
        );
    }

    #[test]
    fn test_explain_tvr_short_input_padded() {
        let issues = explain_tvr("80");
        assert_eq!(issues, vec!["Offline data authentication not performed"]);
    }

    #[test]
    fn test_explain_tvr_clear() {
        assert!(explain_tvr("0000000000").is_empty());
    }

    #[test]
    fn test_explain_cid() {
        assert!(explain_cid("00").starts_with("AAC"));
        assert!(explain_cid("40").starts_with("TC"));
        assert!(explain_cid("80").starts_with("ARQC"));
        assert!(explain_cid("C0").starts_with("RFU"));
    }
}
