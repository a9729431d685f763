//! Type-safe Farcaster user identifier.
//!
//! [`Fid`] is a newtype wrapper around the numeric user id so that fids
//! cannot be confused with scores, ranks or query ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when text cannot be parsed as a [`Fid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid fid: {0:?}")]
pub struct FidParseError(pub String);

/// Numeric Farcaster user id.
///
/// Warehouse rows and the identity directory are inconsistent about the
/// wire type: some carry the id as a JSON number, others as a decimal
/// string. Deserialization accepts both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Fid(u64);

impl Fid {
    /// Creates a `Fid` from its numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Fid {
    type Err = FidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FidParseError(s.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|_| FidParseError(s.to_string()))
    }
}

impl From<u64> for Fid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for Fid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_text() {
        let Ok(fid) = "443855".parse::<Fid>() else {
            panic!("valid fid");
        };
        assert_eq!(fid.get(), 443_855);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(" 42 ".parse::<Fid>().ok(), Some(Fid::new(42)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert!("".parse::<Fid>().is_err());
        assert!("abc".parse::<Fid>().is_err());
        assert!("-5".parse::<Fid>().is_err());
        assert!("+5".parse::<Fid>().is_err());
        assert!("99999999999999999999999".parse::<Fid>().is_err());
    }

    #[test]
    fn deserializes_number_and_string() {
        let from_number: Option<Fid> = serde_json::from_str("7").ok();
        let from_string: Option<Fid> = serde_json::from_str("\"7\"").ok();
        assert_eq!(from_number, Some(Fid::new(7)));
        assert_eq!(from_string, Some(Fid::new(7)));
    }

    #[test]
    fn deserialize_rejects_garbage_string() {
        let parsed: Result<Fid, _> = serde_json::from_str("\"seven\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&Fid::new(12)).ok();
        assert_eq!(json.as_deref(), Some("12"));
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(format!("{}", Fid::new(3)), "3");
    }
}
