//! The stateful token: a server-side persisted token over the attribute store.

use crate::attribute::{AttributeStore, AttributeValue};
use crate::clock::{Clock, system_clock};
use crate::contract::IdentityToken;
use crate::error::TokenError;
use crate::field::Field;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The closed set of token-type discriminators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// An authenticated user session.
    Session,
    /// An OAuth2 token (access, refresh, authorization code).
    OAuth,
    /// A SAML2 federation token.
    Saml2,
    /// A REST API token.
    Rest,
    /// A security token service token.
    Sts,
    /// Anything without a more specific discriminator.
    Generic,
}

impl TokenType {
    /// The fixed wire form of this discriminator.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenType::Session => "session",
            TokenType::OAuth => "oauth",
            TokenType::Saml2 => "saml2",
            TokenType::Rest => "rest",
            TokenType::Sts => "sts",
            TokenType::Generic => "generic",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stateful token: id, type and a typed attribute store, persisted
/// server-side by the owning token service.
///
/// The id and type are written into the store at construction time, so a
/// fresh token already reports two field names. Both are read-only from then
/// on; every later write through the public path is rejected.
///
/// Not safe for concurrent mutation. The owning layer serializes writes per
/// instance, typically by holding one in-memory copy per request and
/// persisting atomically.
#[derive(Debug, Clone)]
pub struct Token {
    store: AttributeStore,
    clock: Arc<dyn Clock>,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl Token {
    /// Create a token with the given id and type.
    pub fn new(id: impl Into<String>, token_type: TokenType) -> Self {
        let mut store = AttributeStore::new();
        store.insert_initial(Field::TokenId, AttributeValue::String(id.into()));
        store.insert_initial(Field::TokenKind, AttributeValue::TokenType(token_type));
        tracing::debug!(token_type = %token_type, "created stateful token");
        Self {
            store,
            clock: system_clock(),
        }
    }

    /// Create a token with a freshly generated v4 UUID id.
    pub fn with_generated_id(token_type: TokenType) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), token_type)
    }

    /// Replace the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Administrative copy with a replacement id.
    ///
    /// The only path that changes a token's id: the result is an independent
    /// deep copy carrying the new id and every other attribute unchanged.
    pub fn with_new_id(&self, id: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.store
            .insert_initial(Field::TokenId, AttributeValue::String(id.into()));
        copy
    }

    /// The token's identifier.
    pub fn id(&self) -> &str {
        match self.store.get(Field::TokenId) {
            Some(AttributeValue::String(s)) => s,
            // Unreachable by construction; the id field is always populated.
            _ => "",
        }
    }

    /// The token-type discriminator.
    pub fn token_type(&self) -> TokenType {
        match self.store.get(Field::TokenKind) {
            Some(AttributeValue::TokenType(t)) => *t,
            // Unreachable by construction.
            _ => TokenType::Generic,
        }
    }

    /// Whether `field` may only be written at construction time.
    ///
    /// Static so callers can pre-check before attempting a write, before any
    /// token exists.
    pub fn is_field_read_only(field: Field) -> bool {
        field.is_read_only()
    }

    /// Store a single value under `field`.
    ///
    /// See [`AttributeStore::set`] for the failure modes.
    pub fn set_attribute(
        &mut self,
        field: Field,
        value: impl Into<AttributeValue>,
    ) -> Result<(), TokenError> {
        self.store.set(field, value)
    }

    /// Add a value to a multi-valued `field`, with set semantics.
    pub fn add_multi_attribute(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), TokenError> {
        self.store.add_multi(field, value)
    }

    /// Remove `field` from the token entirely.
    pub fn clear_attribute(&mut self, field: Field) -> Result<(), TokenError> {
        self.store.clear(field)
    }

    /// The fields currently present on this token.
    pub fn field_names(&self) -> Vec<Field> {
        self.store.field_names()
    }

    /// Read access to the backing attribute store.
    pub fn attributes(&self) -> &AttributeStore {
        &self.store
    }

    /// When the token expires; `None` means it never expires.
    pub fn expiry_time(&self) -> Option<DateTime<Utc>> {
        self.store.get_datetime(Field::ExpiryDate).ok().flatten()
    }
}

impl IdentityToken for Token {
    fn token_id(&self) -> String {
        self.id().to_string()
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
        self.store.to_wire_map()
    }
}
