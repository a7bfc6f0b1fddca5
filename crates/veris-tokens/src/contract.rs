//! The common contract both token backings satisfy.

use serde_json::Value;
use std::collections::HashMap;

/// The capability set shared by stateful and stateless tokens.
///
/// Callers that do not care which backing strategy is in play — revocation
/// checks, protocol-response builders — depend on this trait, never on a
/// concrete token kind, so the two strategies stay substitutable.
pub trait IdentityToken {
    /// The token's unique identifier.
    ///
    /// For a stateful token this is the stored id; for a stateless token it
    /// is the full encoded claim set, since the token is its own encoding.
    fn token_id(&self) -> String;

    /// Whether the token never expires.
    fn is_never_expires(&self) -> bool;

    /// Whether the current time is strictly past the token's expiry instant.
    ///
    /// Always false for a never-expiring token.
    fn is_expired(&self) -> bool;

    /// Serialize the token into a flat response map for protocol output.
    fn to_map(&self) -> HashMap<String, Value>;
}
