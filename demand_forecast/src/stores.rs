//! Store identifiers and the states they belong to
//!
//! Store ids look like `CA_1`: a two-letter state code, an underscore and
//! the store number within that state. The number keeps its written form,
//! so `CA_01` and `CA_1` are different stores.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State codes with a known display name
pub const KNOWN_STATES: [(&str, &str); 3] =
    [("CA", "California"), ("TX", "Texas"), ("WI", "Wisconsin")];

/// Full state name for a two-letter code, `"Unknown"` otherwise
pub fn state_name(code: &str) -> &'static str {
    KNOWN_STATES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or("Unknown")
}

/// State code for a full state name
pub fn state_code(name: &str) -> Option<&'static str> {
    KNOWN_STATES
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// A parsed store identifier such as `TX_2`
///
/// Equality, ordering and `Display` follow the identifier text, which is
/// what model file names and dataset rows carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StoreId {
    raw: String,
    state: String,
    number: u32,
}

impl StoreId {
    /// Parse a store identifier of the form `XX_<digits>`
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || {
            ForecastError::InvalidParameter(format!(
                "Store id '{}' does not match <STATE>_<number>",
                raw
            ))
        };

        let (state, number) = raw.split_once('_').ok_or_else(invalid)?;
        if state.len() != 2 || !state.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid());
        }
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let number = number.parse().map_err(|_| invalid())?;

        Ok(Self {
            raw: raw.to_string(),
            state: state.to_string(),
            number,
        })
    }

    /// Identifier exactly as written, e.g. `CA_01`
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Two-letter state code
    pub fn state_code(&self) -> &str {
        &self.state
    }

    /// Full state name
    pub fn state_name(&self) -> &'static str {
        state_name(&self.state)
    }

    /// Store number within the state
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Human readable label, e.g. `Store 3`
    pub fn label(&self) -> String {
        format!("Store {}", self.number)
    }

    /// Whether the store is located in the given state
    pub fn in_state(&self, code: &str) -> bool {
        self.state == code
    }
}

impl FromStr for StoreId {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StoreId {
    type Error = ForecastError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<StoreId> for String {
    fn from(store: StoreId) -> Self {
        store.raw
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_id() {
        let store = StoreId::parse("CA_3").unwrap();
        assert_eq!(store.state_code(), "CA");
        assert_eq!(store.number(), 3);
        assert_eq!(store.state_name(), "California");
        assert_eq!(store.label(), "Store 3");
        assert_eq!(store.to_string(), "CA_3");
        assert!(store.in_state("CA"));
        assert!(!store.in_state("TX"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["CA3", "ca_1", "CAL_1", "CA_", "CA_x", ""] {
            assert!(StoreId::parse(raw).is_err(), "{} should not parse", raw);
        }
    }

    #[test]
    fn test_zero_padded_number_keeps_its_text() {
        let padded = StoreId::parse("CA_01").unwrap();
        assert_eq!(padded.to_string(), "CA_01");
        assert_eq!(padded.as_str(), "CA_01");
        assert_eq!(padded.number(), 1);
        assert_eq!(padded.label(), "Store 1");
        assert_ne!(padded, StoreId::parse("CA_1").unwrap());

        let json = serde_json::to_string(&padded).unwrap();
        assert_eq!(json, "\"CA_01\"");
        let back: StoreId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, padded);
        assert!(serde_json::from_str::<StoreId>("\"ca_01\"").is_err());
    }

    #[test]
    fn test_state_lookup() {
        assert_eq!(state_name("TX"), "Texas");
        assert_eq!(state_name("NY"), "Unknown");
        assert_eq!(state_code("Wisconsin"), Some("WI"));
        assert_eq!(state_code("Oregon"), None);
    }
}
