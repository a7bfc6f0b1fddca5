//! Stateless tokens: projections over a self-contained signed claim set.

use crate::claims::ClaimSet;
use crate::constants;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use veris_tokens::{Clock, IdentityToken, SystemClock};

/// A stateless token: logically immutable, with every observable attribute
/// derived from its claim set.
///
/// The token's id is the full encoded claim-set string — the token is its own
/// encoding, there is no separate identifier storage and no server-side
/// record. Immutable post-construction, so trivially shareable across
/// concurrent readers.
#[derive(Debug, Clone)]
pub struct StatelessToken {
    claims: ClaimSet,
    encoded: String,
    clock: Arc<dyn Clock>,
}

impl StatelessToken {
    /// Wrap a validated claim set and its encoded wire form.
    ///
    /// Validation happens in the JWT layer; this type never re-parses or
    /// re-verifies signatures.
    pub fn new(claims: ClaimSet, encoded: impl Into<String>) -> Self {
        Self {
            claims,
            encoded: encoded.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The backing claim set.
    pub fn claim_set(&self) -> &ClaimSet {
        &self.claims
    }

    /// The subject the token was issued for.
    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    /// The authentication context class reference claim.
    pub fn acr(&self) -> Option<&str> {
        self.claims.claim_string(constants::ACR)
    }

    /// The redirect URI bound to the grant.
    pub fn redirect_uri(&self) -> Option<&str> {
        self.claims.claim_string(constants::REDIRECT_URI)
    }

    /// The authentication modules that satisfied the grant.
    pub fn auth_modules(&self) -> Option<&str> {
        self.claims.claim_string(constants::AUTH_MODULES)
    }

    /// When the token expires; `None` means it never expires.
    pub fn expiry_time(&self) -> Option<DateTime<Utc>> {
        self.claims.expiration_time()
    }

    /// Stateless tokens carry no server-side audit correlation handle.
    pub fn audit_tracking_id(&self) -> Option<String> {
        None
    }
}

impl IdentityToken for StatelessToken {
    fn token_id(&self) -> String {
        self.encoded.clone()
    }

    fn is_never_expires(&self) -> bool {
        self.expiry_time().is_none()
    }

    fn is_expired(&self) -> bool {
        match self.expiry_time() {
            None => false,
            Some(expiry) => self.clock.now() > expiry,
        }
    }

    fn to_map(&self) -> HashMap<String, Value> {
        self.claims.to_map().into_iter().collect()
    }
}

impl fmt::Display for StatelessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// A stateless OAuth2 refresh token.
///
/// Adds the protocol role on top of [`StatelessToken`]: a fixed token name
/// and serialization into the token-endpoint response map.
#[derive(Debug, Clone)]
pub struct StatelessRefreshToken {
    inner: StatelessToken,
}

impl StatelessRefreshToken {
    /// Wrap a validated claim set and its encoded wire form.
    pub fn new(claims: ClaimSet, encoded: impl Into<String>) -> Self {
        Self {
            inner: StatelessToken::new(claims, encoded),
        }
    }

    /// Replace the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.inner = self.inner.with_clock(clock);
        self
    }

    /// The fixed protocol role of this token.
    pub fn token_name(&self) -> &'static str {
        constants::REFRESH_TOKEN
    }

    /// The underlying stateless token.
    pub fn token(&self) -> &StatelessToken {
        &self.inner
    }

    /// When the token expires; `None` means it never expires.
    pub fn expiry_time(&self) -> Option<DateTime<Utc>> {
        self.inner.expiry_time()
    }

    /// Remaining lifetime in whole seconds, truncated.
    ///
    /// `None` for a never-expiring token. The never-expires check happens
    /// before any arithmetic; a lifetime is never computed from the absent
    /// expiry.
    pub fn expires_in_secs(&self) -> Option<i64> {
        match self.inner.expiry_time() {
            None => None,
            Some(expiry) => Some((expiry - self.inner.clock.now()).num_milliseconds() / 1000),
        }
    }

    /// Stateless tokens carry no server-side audit correlation handle.
    pub fn audit_tracking_id(&self) -> Option<String> {
        None
    }
}

impl From<StatelessToken> for StatelessRefreshToken {
    fn from(inner: StatelessToken) -> Self {
        Self { inner }
    }
}

impl IdentityToken for StatelessRefreshToken {
    fn token_id(&self) -> String {
        self.inner.token_id()
    }

    fn is_never_expires(&self) -> bool {
        self.inner.is_never_expires()
    }

    fn is_expired(&self) -> bool {
        self.inner.is_expired()
    }

    /// The token-endpoint response map: the encoded token, the bearer marker
    /// and the remaining lifetime. The lifetime entry is omitted entirely for
    /// a never-expiring token.
    fn to_map(&self) -> HashMap<String, Value> {
        let mut map = HashMap::new();
        map.insert(
            constants::REFRESH_TOKEN.to_string(),
            Value::String(self.inner.encoded.clone()),
        );
        map.insert(
            constants::TOKEN_TYPE.to_string(),
            Value::String(constants::BEARER.to_string()),
        );
        if let Some(secs) = self.expires_in_secs() {
            map.insert(constants::EXPIRES_IN.to_string(), Value::from(secs));
        }
        map
    }
}

impl fmt::Display for StatelessRefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use veris_tokens::FixedClock;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_token_id_is_the_encoding() {
        let token = StatelessToken::new(ClaimSet::new(), "eyJ.encoded.jwt");
        assert_eq!(token.token_id(), "eyJ.encoded.jwt");
        assert_eq!(token.to_string(), "eyJ.encoded.jwt");
    }

    #[test]
    fn test_claim_projections() {
        let claims = ClaimSet::new()
            .with_claim("sub", "demo")
            .with_claim("acr", "2")
            .with_claim("redirect_uri", "https://client.example/cb")
            .with_claim("auth_modules", "DataStore");
        let token = StatelessToken::new(claims, "jwt");

        assert_eq!(token.subject(), Some("demo"));
        assert_eq!(token.acr(), Some("2"));
        assert_eq!(token.redirect_uri(), Some("https://client.example/cb"));
        assert_eq!(token.auth_modules(), Some("DataStore"));
        assert_eq!(token.audit_tracking_id(), None);
    }

    #[test]
    fn test_expiry_straddles_the_instant() {
        let now = fixed_now();
        let claims = ClaimSet::new().with_expiry(now + Duration::minutes(10));

        let live = StatelessToken::new(claims.clone(), "jwt")
            .with_clock(Arc::new(FixedClock(now)));
        assert!(!live.is_expired());
        assert!(!live.is_never_expires());

        let stale = StatelessToken::new(claims, "jwt")
            .with_clock(Arc::new(FixedClock(now + Duration::minutes(11))));
        assert!(stale.is_expired());
    }

    #[test]
    fn test_never_expiring_token_is_never_expired() {
        let token = StatelessToken::new(ClaimSet::new(), "jwt")
            .with_clock(Arc::new(FixedClock(fixed_now())));
        assert!(token.is_never_expires());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_refresh_token_name_is_fixed() {
        let token = StatelessRefreshToken::new(ClaimSet::new(), "jwt");
        assert_eq!(token.token_name(), "refresh_token");
    }

    #[test]
    fn test_expires_in_truncates_to_whole_seconds() {
        let now = fixed_now();
        let claims =
            ClaimSet::new().with_expiry(now + Duration::seconds(90) + Duration::milliseconds(700));
        let token = StatelessRefreshToken::new(claims, "jwt")
            .with_clock(Arc::new(FixedClock(now)));

        assert_eq!(token.expires_in_secs(), Some(90));
    }

    #[test]
    fn test_to_map_for_expiring_token() {
        let now = fixed_now();
        let claims = ClaimSet::new().with_expiry(now + Duration::seconds(3600));
        let token = StatelessRefreshToken::new(claims, "eyJ.encoded.jwt")
            .with_clock(Arc::new(FixedClock(now)));

        let map = token.to_map();
        assert_eq!(map["refresh_token"], Value::String("eyJ.encoded.jwt".into()));
        assert_eq!(map["token_type"], Value::String("Bearer".into()));
        assert_eq!(map["expires_in"], Value::from(3600));
    }

    #[test]
    fn test_to_map_omits_lifetime_when_never_expiring() {
        let token = StatelessRefreshToken::new(ClaimSet::new(), "jwt")
            .with_clock(Arc::new(FixedClock(fixed_now())));

        let map = token.to_map();
        assert_eq!(map["token_type"], Value::String("Bearer".into()));
        assert!(!map.contains_key("expires_in"));
    }
}
