/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core enumerations for ISO 8583 operations.
//!
//! This module provides the closed sets the codec dispatches on:
//! - [`IsoVersion`]: protocol revision (1987, 1993, 2003)
//! - [`CardNetwork`]: card-brand scheme overlaying the base schema
//! - [`MessageClass`], [`MessageFunction`], [`MessageOrigin`]: MTI digit meanings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ISO 8583 protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IsoVersion {
    /// ISO 8583:1987, the original revision and the base schema.
    #[default]
    V1987,
    /// ISO 8583:1993, the first revision.
    V1993,
    /// ISO 8583:2003, the second revision.
    V2003,
}

impl IsoVersion {
    /// Returns the year string for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1987 => "1987",
            Self::V1993 => "1993",
            Self::V2003 => "2003",
        }
    }

    /// Returns the MTI first digit announcing this version on the wire.
    #[must_use]
    pub const fn mti_digit(&self) -> char {
        match self {
            Self::V1987 => '0',
            Self::V1993 => '1',
            Self::V2003 => '2',
        }
    }

    /// Resolves a version from an MTI first digit.
    #[must_use]
    pub const fn from_mti_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::V1987),
            '1' => Some(Self::V1993),
            '2' => Some(Self::V2003),
            _ => None,
        }
    }
}

impl fmt::Display for IsoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IsoVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1987" => Ok(Self::V1987),
            "1993" => Ok(Self::V1993),
            "2003" => Ok(Self::V2003),
            other => Err(format!("unknown ISO 8583 version: {}", other)),
        }
    }
}

/// Card network identifier.
///
/// Networks overlay additional field definitions and required-field sets on
/// top of the base schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardNetwork {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    Amex,
    /// Discover.
    Discover,
    /// JCB.
    Jcb,
    /// UnionPay.
    UnionPay,
}

impl CardNetwork {
    /// All networks, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Visa,
        Self::Mastercard,
        Self::Amex,
        Self::Discover,
        Self::Jcb,
        Self::UnionPay,
    ];

    /// Returns the canonical upper-case name of this network.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "VISA",
            Self::Mastercard => "MASTERCARD",
            Self::Amex => "AMEX",
            Self::Discover => "DISCOVER",
            Self::Jcb => "JCB",
            Self::UnionPay => "UNIONPAY",
        }
    }
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "VISA" => Ok(Self::Visa),
            "MASTERCARD" | "MC" => Ok(Self::Mastercard),
            "AMEX" => Ok(Self::Amex),
            "DISCOVER" => Ok(Self::Discover),
            "JCB" => Ok(Self::Jcb),
            "UNIONPAY" => Ok(Self::UnionPay),
            other => Err(format!("unknown card network: {}", other)),
        }
    }
}

/// Message class, the second MTI digit.
///
/// Classes `0` and `7` are invalid on this wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageClass {
    /// Authorization (1).
    Authorization,
    /// Financial (2).
    Financial,
    /// File actions (3).
    FileActions,
    /// Reversal / chargeback (4).
    Reversal,
    /// Reconciliation (5).
    Reconciliation,
    /// Administrative (6).
    Administrative,
    /// Network management (8).
    NetworkManagement,
    /// Reserved by ISO (9).
    Reserved,
}

impl MessageClass {
    /// Resolves a class from an MTI second digit.
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Authorization),
            '2' => Some(Self::Financial),
            '3' => Some(Self::FileActions),
            '4' => Some(Self::Reversal),
            '5' => Some(Self::Reconciliation),
            '6' => Some(Self::Administrative),
            '8' => Some(Self::NetworkManagement),
            '9' => Some(Self::Reserved),
            _ => None,
        }
    }

    /// Returns the MTI digit for this class.
    #[must_use]
    pub const fn as_digit(&self) -> char {
        match self {
            Self::Authorization => '1',
            Self::Financial => '2',
            Self::FileActions => '3',
            Self::Reversal => '4',
            Self::Reconciliation => '5',
            Self::Administrative => '6',
            Self::NetworkManagement => '8',
            Self::Reserved => '9',
        }
    }
}

/// Message function, the third MTI digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageFunction {
    /// Request (0).
    Request,
    /// Request response (1).
    Response,
    /// Advice (2).
    Advice,
    /// Advice response (3).
    AdviceResponse,
    /// Notification (4).
    Notification,
    /// Network management request (8).
    NetworkRequest,
    /// Network management response (9).
    NetworkResponse,
}

impl MessageFunction {
    /// Resolves a function from an MTI third digit.
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Request),
            '1' => Some(Self::Response),
            '2' => Some(Self::Advice),
            '3' => Some(Self::AdviceResponse),
            '4' => Some(Self::Notification),
            '8' => Some(Self::NetworkRequest),
            '9' => Some(Self::NetworkResponse),
            _ => None,
        }
    }

    /// Returns the MTI digit for this function.
    #[must_use]
    pub const fn as_digit(&self) -> char {
        match self {
            Self::Request => '0',
            Self::Response => '1',
            Self::Advice => '2',
            Self::AdviceResponse => '3',
            Self::Notification => '4',
            Self::NetworkRequest => '8',
            Self::NetworkResponse => '9',
        }
    }
}

/// Message origin, the fourth MTI digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageOrigin {
    /// Acquirer (0).
    Acquirer,
    /// Acquirer repeat (1).
    AcquirerRepeat,
    /// Issuer (2).
    Issuer,
    /// Issuer repeat (3).
    IssuerRepeat,
    /// Other (4).
    Other,
    /// Other repeat (5).
    OtherRepeat,
}

impl MessageOrigin {
    /// Resolves an origin from an MTI fourth digit.
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Acquirer),
            '1' => Some(Self::AcquirerRepeat),
            '2' => Some(Self::Issuer),
            '3' => Some(Self::IssuerRepeat),
            '4' => Some(Self::Other),
            '5' => Some(Self::OtherRepeat),
            _ => None,
        }
    }

    /// Returns the MTI digit for this origin.
    #[must_use]
    pub const fn as_digit(&self) -> char {
        match self {
            Self::Acquirer => '0',
            Self::AcquirerRepeat => '1',
            Self::Issuer => '2',
            Self::IssuerRepeat => '3',
            Self::Other => '4',
            Self::OtherRepeat => '5',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_round_trip() {
        for v in [IsoVersion::V1987, IsoVersion::V1993, IsoVersion::V2003] {
            assert_eq!(v.as_str().parse::<IsoVersion>().unwrap(), v);
            assert_eq!(IsoVersion::from_mti_digit(v.mti_digit()), Some(v));
        }
        assert!(IsoVersion::from_mti_digit('3').is_none());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("visa".parse::<CardNetwork>().unwrap(), CardNetwork::Visa);
        assert_eq!(
            "MC".parse::<CardNetwork>().unwrap(),
            CardNetwork::Mastercard
        );
        assert!("maestro".parse::<CardNetwork>().is_err());
    }

    #[test]
    fn test_message_class_digits() {
        assert_eq!(
            MessageClass::from_digit('1'),
            Some(MessageClass::Authorization)
        );
        assert_eq!(
            MessageClass::from_digit('8'),
            Some(MessageClass::NetworkManagement)
        );
        // 0 and 7 are not valid classes on this wire.
        assert_eq!(MessageClass::from_digit('0'), None);
        assert_eq!(MessageClass::from_digit('7'), None);
    }

    #[test]
    fn test_message_function_digits() {
        assert_eq!(
            MessageFunction::from_digit('0'),
            Some(MessageFunction::Request)
        );
        assert_eq!(MessageFunction::Response.as_digit(), '1');
        assert_eq!(MessageFunction::from_digit('5'), None);
    }

    #[test]
    fn test_message_origin_digits() {
        assert_eq!(
            MessageOrigin::from_digit('0'),
            Some(MessageOrigin::Acquirer)
        );
        assert_eq!(MessageOrigin::from_digit('6'), None);
    }
}
