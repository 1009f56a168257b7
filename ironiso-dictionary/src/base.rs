/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Base schema: the ISO 8583:1987 field table.
//!
//! Field 0 is the legacy MTI slot, never emitted as a data field. Fields 1
//! and 65 are bitmap continuation markers; field 65 keeps a definition here
//! for completeness but never carries data.

use crate::schema::{FieldDef, FieldKind};

/// The base field table, ordered by field number.
pub const BASE_FIELDS: &[(u16, FieldDef)] = &[
    (0, FieldDef::fixed(FieldKind::Numeric, 4, "Message Type Indicator (MTI)")),
    (2, FieldDef::llvar(19, "Primary Account Number (PAN)")),
    (3, FieldDef::numeric(6, "Processing Code")),
    (4, FieldDef::numeric(12, "Amount, Transaction")),
    (5, FieldDef::numeric(12, "Amount, Settlement")),
    (6, FieldDef::numeric(12, "Amount, Cardholder Billing")),
    (7, FieldDef::numeric(10, "Transmission Date & Time (MMDDhhmmss)")),
    (8, FieldDef::numeric(8, "Amount, Cardholder Billing Fee")),
    (9, FieldDef::numeric(8, "Conversion Rate, Settlement")),
    (10, FieldDef::numeric(8, "Conversion Rate, Cardholder Billing")),
    (11, FieldDef::numeric(6, "Systems Trace Audit Number (STAN)")),
    (12, FieldDef::numeric(6, "Time, Local Transaction (hhmmss)")),
    (13, FieldDef::numeric(4, "Date, Local Transaction (MMDD)")),
    (14, FieldDef::numeric(4, "Date, Expiration (YYMM)")),
    (15, FieldDef::numeric(4, "Date, Settlement (MMDD)")),
    (16, FieldDef::numeric(4, "Date, Conversion (MMDD)")),
    (17, FieldDef::numeric(4, "Date, Capture (MMDD)")),
    (18, FieldDef::numeric(4, "Merchant Type/Merchant Category Code")),
    (19, FieldDef::numeric(3, "Acquiring Institution Country Code")),
    (22, FieldDef::numeric(3, "Point of Service Entry Mode")),
    (23, FieldDef::numeric(3, "Card Sequence Number")),
    (24, FieldDef::numeric(3, "Function Code")),
    (25, FieldDef::numeric(2, "Point of Service Condition Code")),
    (26, FieldDef::numeric(2, "Point of Service PIN Capture Code")),
    (28, FieldDef::numeric(9, "Amount, Transaction Fee")),
    (32, FieldDef::llvar(11, "Acquiring Institution ID Code")),
    (33, FieldDef::llvar(11, "Forwarding Institution ID Code")),
    (35, FieldDef::llvar(37, "Track 2 Data")),
    (36, FieldDef::lllvar(104, "Track 3 Data")),
    (37, FieldDef::alphanumeric(12, "Retrieval Reference Number")),
    (38, FieldDef::alphanumeric(6, "Authorization ID Response")),
    (39, FieldDef::numeric(2, "Response Code")),
    (41, FieldDef::alphanumeric(8, "Card Acceptor Terminal ID")),
    (42, FieldDef::alphanumeric(15, "Card Acceptor ID Code")),
    (43, FieldDef::alphanumeric(40, "Card Acceptor Name/Location")),
    (44, FieldDef::llvar(25, "Additional Response Data")),
    (45, FieldDef::llvar(76, "Track 1 Data")),
    (48, FieldDef::lllvar(999, "Additional Data - Private")),
    (49, FieldDef::numeric(3, "Currency Code, Transaction")),
    (50, FieldDef::numeric(3, "Currency Code, Settlement")),
    (51, FieldDef::numeric(3, "Currency Code, Cardholder Billing")),
    (52, FieldDef::binary(8, "Personal Identification Number (PIN) Data")),
    (53, FieldDef::numeric(16, "Security Related Control Information")),
    (54, FieldDef::lllvar(120, "Additional Amounts")),
    (55, FieldDef::lllvar(999, "ICC System Related Data")),
    (56, FieldDef::llvar(35, "Reserved ISO")),
    (57, FieldDef::lllvar(999, "Reserved National")),
    (58, FieldDef::lllvar(999, "Reserved National")),
    (59, FieldDef::lllvar(999, "Reserved National")),
    (60, FieldDef::lllvar(999, "Reserved National")),
    (61, FieldDef::lllvar(999, "Reserved Private")),
    (62, FieldDef::lllvar(999, "Reserved Private")),
    (63, FieldDef::lllvar(999, "Reserved Private")),
    (64, FieldDef::binary(8, "Message Authentication Code (MAC)")),
    (65, FieldDef::binary(8, "Extended Bitmap Indicator")),
    (66, FieldDef::numeric(1, "Settlement Code")),
    (67, FieldDef::numeric(2, "Extended Payment Code")),
    (68, FieldDef::numeric(3, "Receiving Institution Country Code")),
    (69, FieldDef::numeric(3, "Settlement Institution Country Code")),
    (70, FieldDef::numeric(3, "Network Management Information Code")),
    (71, FieldDef::numeric(4, "Message Number")),
    (72, FieldDef::numeric(4, "Last Message Number")),
    (73, FieldDef::numeric(6, "Action Date (YYMMDD)")),
    (74, FieldDef::numeric(10, "Credits, Number")),
    (75, FieldDef::numeric(10, "Credits, Reversal Number")),
    (76, FieldDef::numeric(10, "Debits, Number")),
    (77, FieldDef::numeric(10, "Debits, Reversal Number")),
    (78, FieldDef::numeric(10, "Transfer, Number")),
    (79, FieldDef::numeric(10, "Transfer, Reversal Number")),
    (80, FieldDef::numeric(10, "Inquiries, Number")),
    (81, FieldDef::numeric(10, "Authorizations, Number")),
    (82, FieldDef::numeric(12, "Credits, Processing Fee Amount")),
    (83, FieldDef::numeric(12, "Credits, Transaction Fee Amount")),
    (84, FieldDef::numeric(12, "Debits, Processing Fee Amount")),
    (85, FieldDef::numeric(12, "Debits, Transaction Fee Amount")),
    (86, FieldDef::numeric(16, "Credits, Amount")),
    (87, FieldDef::numeric(16, "Credits, Reversal Amount")),
    (88, FieldDef::numeric(16, "Debits, Amount")),
    (89, FieldDef::numeric(16, "Debits, Reversal Amount")),
    (90, FieldDef::numeric(42, "Original Data Elements")),
    (91, FieldDef::alphanumeric(1, "File Update Code")),
    (92, FieldDef::numeric(2, "File Security Code")),
    (93, FieldDef::numeric(5, "Response Indicator")),
    (94, FieldDef::alphanumeric(7, "Service Indicator")),
    (95, FieldDef::alphanumeric(42, "Replacement Amounts")),
    (96, FieldDef::binary(8, "Message Security Code")),
    (97, FieldDef::binary(17, "Amount, Net Settlement")),
    (98, FieldDef::alphanumeric(25, "Payee")),
    (99, FieldDef::llvar(11, "Settlement Institution ID Code")),
    (100, FieldDef::llvar(11, "Receiving Institution ID Code")),
    (101, FieldDef::llvar(17, "File Name")),
    (102, FieldDef::llvar(28, "Account Identification 1")),
    (103, FieldDef::llvar(28, "Account Identification 2")),
    (104, FieldDef::lllvar(100, "Transaction Description")),
    (105, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (106, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (107, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (108, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (109, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (110, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (111, FieldDef::lllvar(999, "Reserved for ISO Use")),
    (112, FieldDef::lllvar(999, "Reserved for National Use")),
    (113, FieldDef::lllvar(999, "Reserved for National Use")),
    (114, FieldDef::lllvar(999, "Reserved for National Use")),
    (115, FieldDef::lllvar(999, "Reserved for National Use")),
    (116, FieldDef::lllvar(999, "Reserved for National Use")),
    (117, FieldDef::lllvar(999, "Reserved for National Use")),
    (118, FieldDef::lllvar(999, "Reserved for National Use")),
    (119, FieldDef::lllvar(999, "Reserved for National Use")),
    (120, FieldDef::lllvar(999, "Reserved for Private Use")),
    (121, FieldDef::lllvar(999, "Reserved for Private Use")),
    (122, FieldDef::lllvar(999, "Reserved for Private Use")),
    (123, FieldDef::lllvar(999, "Reserved for Private Use")),
    (124, FieldDef::lllvar(999, "Reserved for Private Use")),
    (125, FieldDef::lllvar(999, "Reserved for Private Use")),
    (126, FieldDef::lllvar(999, "Reserved for Private Use")),
    (127, FieldDef::lllvar(999, "Reserved for Private Use")),
    (128, FieldDef::binary(8, "Message Authentication Code")),
];
