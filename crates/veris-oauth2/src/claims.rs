//! The parsed, validated payload of a stateless token's encoding.

use crate::constants;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire sentinel for a token that never expires.
const NEVER_EXPIRES: i64 = -1;

/// An owned, already-parsed, already-validated claim set.
///
/// Produced by the JWT layer after signature verification; never mutated by
/// the token types that consume it. The only way to change a claim is to mint
/// a new claim set upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimSet {
    claims: Map<String, Value>,
    expiry: Option<DateTime<Utc>>,
}

impl ClaimSet {
    /// Create a claim set with no claims and no expiry.
    pub fn new() -> Self {
        Self {
            claims: Map::new(),
            expiry: None,
        }
    }

    /// Create a claim set from parsed claims and the encoding's expiration
    /// timestamp in epoch milliseconds, where the wire sentinel `-1` means
    /// the token never expires.
    pub fn from_parts(claims: Map<String, Value>, expiry_millis: i64) -> Self {
        let expiry = if expiry_millis == NEVER_EXPIRES {
            None
        } else {
            Utc.timestamp_millis_opt(expiry_millis).single()
        };
        Self { claims, expiry }
    }

    /// Add a named claim.
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.claims.insert(name.into(), value.into());
        self
    }

    /// Set the expiration instant.
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// When the encoding expires; `None` means it never expires.
    pub fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    /// Look up a string claim by name.
    ///
    /// A claim present with another JSON type reads as absent; that indicates
    /// a minting defect upstream, so it is logged rather than silently
    /// coerced.
    pub fn claim_string(&self, name: &str) -> Option<&str> {
        match self.claims.get(name) {
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => {
                tracing::warn!(claim = name, value = %other, "claim present but not a string");
                None
            }
        }
    }

    /// Look up an integer claim by name.
    pub fn claim_i64(&self, name: &str) -> Option<i64> {
        match self.claims.get(name) {
            None => None,
            Some(value) => match value.as_i64() {
                Some(i) => Some(i),
                None => {
                    tracing::warn!(claim = name, value = %value, "claim present but not an integer");
                    None
                }
            },
        }
    }

    /// The subject claim.
    pub fn subject(&self) -> Option<&str> {
        self.claim_string(constants::SUBJECT)
    }

    /// The named claims as a flat response map.
    pub fn to_map(&self) -> Map<String, Value> {
        self.claims.clone()
    }
}

impl Default for ClaimSet {
    fn default() -> Self {
        Self::new()
    }
}
