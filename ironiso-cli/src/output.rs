/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Output rendering for the CLI.
//!
//! Three shapes: a human-readable table with field descriptions, JSON for
//! scripting, and the raw wire string.

use ironiso::dictionary::SchemaRegistry;
use ironiso::emv::{explain_cid, explain_tvr, tag_name};
use ironiso::prelude::*;

/// Response code descriptions for the table view of field 39.
const RESPONSE_CODES: &[(&str, &str)] = &[
    ("00", "Approved"),
    ("01", "Refer to card issuer"),
    ("02", "Refer to card issuer, special condition"),
    ("03", "Invalid merchant"),
    ("04", "Pick up card"),
    ("05", "Do not honor"),
    ("06", "Error"),
    ("07", "Pick up card, special condition"),
    ("08", "Honor with identification"),
    ("09", "Request in progress"),
    ("10", "Approved, partial"),
    ("11", "Approved, VIP"),
    ("12", "Invalid transaction"),
    ("13", "Invalid amount"),
    ("14", "Invalid card number"),
    ("15", "No such issuer"),
];

fn response_code_description(code: &str) -> &'static str {
    RESPONSE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or("Unknown response code", |(_, d)| d)
}

/// Renders a message as a human-readable table.
#[must_use]
pub fn render_table(msg: &IsoMessage) -> String {
    let registry = SchemaRegistry::global();
    let mut out = String::new();

    out.push_str(&format!("MTI:     {}\n", msg.mti));
    out.push_str(&format!("Version: {}\n", msg.version));
    if let Some(network) = msg.network {
        out.push_str(&format!("Network: {}\n", network));
    }
    if let Some(bitmap) = &msg.bitmap {
        out.push_str(&format!("Bitmap:  {}\n", bitmap));
    }

    out.push_str("Fields:\n");
    for (number, value) in msg.data_fields() {
        let description = registry
            .describe(number, msg.version, msg.network)
            .unwrap_or("Unknown field");
        out.push_str(&format!(
            "  {:>3}  {:<45} {}\n",
            number, description, value
        ));
        if number == 39 {
            out.push_str(&format!(
                "       {:<45} ({})\n",
                "",
                response_code_description(value.as_str())
            ));
        }
    }

    if let Some(emv) = &msg.emv {
        out.push_str("EMV:\n");
        for (tag, value) in emv.iter() {
            out.push_str(&format!("  {:<6} {:<45} {}\n", tag, tag_name(tag), value));
            match tag {
                "95" => {
                    for issue in explain_tvr(value) {
                        out.push_str(&format!("         - {}\n", issue));
                    }
                }
                "9F27" => {
                    out.push_str(&format!("         - {}\n", explain_cid(value)));
                }
                _ => {}
            }
        }
    }

    out
}

/// Renders a message as pretty JSON.
#[must_use]
pub fn render_json(msg: &IsoMessage) -> String {
    serde_json::to_string_pretty(msg).unwrap_or_else(|_| "{}".to_string())
}

/// Renders the diagnostics of a validation run.
#[must_use]
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "message is valid\n".to_string();
    }
    let mut out = format!("{} problem(s) found:\n", diagnostics.len());
    for diagnostic in diagnostics {
        out.push_str(&format!("  {}\n", diagnostic));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample() -> IsoMessage {
        let mut msg = IsoMessage::new(Mti::new("0110").unwrap(), BTreeMap::new());
        msg.set_field(2, "4111111111111111");
        msg.set_field(39, "00");
        msg.network = Some(CardNetwork::Visa);
        msg
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&sample());
        assert!(table.contains("MTI:     0110"));
        assert!(table.contains("Network: VISA"));
        assert!(table.contains("Primary Account Number (PAN)"));
        assert!(table.contains("(Approved)"));
    }

    #[test]
    fn test_render_table_explains_tvr_and_cid() {
        let mut msg = sample();
        let mut emv = EmvData::new();
        emv.insert("95", "8040000000");
        emv.insert("9F27", "80");
        msg.emv = Some(emv);

        let table = render_table(&msg);
        assert!(table.contains("Terminal Verification Results (TVR)"));
        assert!(table.contains("- Offline data authentication not performed"));
        assert!(table.contains("- Expired application"));
        assert!(table.contains("Cryptogram Information Data"));
        assert!(table.contains("- ARQC"));
    }

    #[test]
    fn test_render_json_round_trips() {
        let json = render_json(&sample());
        let parsed: IsoMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.mti.as_str(), "0110");
        assert_eq!(parsed.field_str(2), Some("4111111111111111"));
    }

    #[test]
    fn test_render_diagnostics_empty() {
        assert_eq!(render_diagnostics(&[]), "message is valid\n");
    }

    #[test]
    fn test_render_diagnostics_list() {
        let diags = vec![Diagnostic::field(2, Rule::PanLuhn, "checksum failed")];
        let out = render_diagnostics(&diags);
        assert!(out.starts_with("1 problem(s) found:"));
        assert!(out.contains("field 2"));
    }
}
