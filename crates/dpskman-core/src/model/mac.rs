// ── MacAddress ──────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FilterError;

/// MAC address, normalized to lowercase colon-separated format (aa:bb:cc:dd:ee:ff).
///
/// Parsing is strict: exactly six hex octets separated consistently by `:`
/// or `-`. Bare hex and mixed separators are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MacAddress(String);

impl MacAddress {
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidMac(raw.to_owned());

        let separator = match raw.as_bytes().get(2) {
            Some(b':') => ':',
            Some(b'-') => '-',
            _ => return Err(invalid()),
        };

        let octets: Vec<&str> = raw.split(separator).collect();
        if octets.len() != 6 {
            return Err(invalid());
        }
        if !octets
            .iter()
            .all(|o| o.len() == 2 && o.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        Ok(Self(octets.join(":").to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MacAddress {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
