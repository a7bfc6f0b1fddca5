//! The field registry: static metadata for every token attribute slot.
//!
//! A [`Field`] identifies one attribute slot a token may populate. The set of
//! slots is closed and known at compile time, so registry lookups are pure
//! functions with no error path. Most tokens only populate a handful of slots;
//! the generic string/integer/date slots exist so the persistence schema stays
//! fixed while token formats evolve.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared value kind of a field, checked at every store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// A single UTF-8 string.
    String,
    /// A single signed 64-bit integer.
    Integer,
    /// A single UTC instant.
    DateTime,
    /// An opaque binary blob.
    Binary,
    /// An unordered set of strings with duplicate suppression.
    StringSet,
    /// The closed token-type discriminator.
    TokenType,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::DateTime => "date-time",
            ValueKind::Binary => "binary",
            ValueKind::StringSet => "string-set",
            ValueKind::TokenType => "token-type",
        };
        f.write_str(name)
    }
}

/// An attribute slot in the token schema.
///
/// Identity-bearing slots ([`Field::TokenId`], [`Field::TokenKind`]) are
/// read-only: they are populated at construction time and rejected by every
/// later write path, which protects them from generic code operating over the
/// store abstractly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// The token's unique identifier.
    TokenId,
    /// The token-type discriminator.
    TokenKind,
    /// The identity the token was issued for.
    UserId,
    /// When the token expires; absent means it never expires.
    ExpiryDate,
    /// Generic string slot.
    StringOne,
    /// Generic string slot.
    StringTwo,
    /// Generic string slot.
    StringThree,
    /// Generic integer slot.
    IntegerOne,
    /// Generic integer slot.
    IntegerTwo,
    /// Generic date slot.
    DateOne,
    /// Opaque binary payload.
    Blob,
    /// Generic multi-valued string slot.
    MultiStringOne,
    /// Generic multi-valued string slot.
    MultiStringTwo,
}

impl Field {
    /// The declared value kind for this slot.
    pub const fn kind(self) -> ValueKind {
        match self {
            Field::TokenId => ValueKind::String,
            Field::TokenKind => ValueKind::TokenType,
            Field::UserId => ValueKind::String,
            Field::ExpiryDate => ValueKind::DateTime,
            Field::StringOne | Field::StringTwo | Field::StringThree => ValueKind::String,
            Field::IntegerOne | Field::IntegerTwo => ValueKind::Integer,
            Field::DateOne => ValueKind::DateTime,
            Field::Blob => ValueKind::Binary,
            Field::MultiStringOne | Field::MultiStringTwo => ValueKind::StringSet,
        }
    }

    /// Whether this slot may only be written at construction time.
    pub const fn is_read_only(self) -> bool {
        matches!(self, Field::TokenId | Field::TokenKind)
    }

    /// The fixed name used for this slot in flat persistence maps.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::TokenId => "token_id",
            Field::TokenKind => "token_kind",
            Field::UserId => "user_id",
            Field::ExpiryDate => "expiry_date",
            Field::StringOne => "string_one",
            Field::StringTwo => "string_two",
            Field::StringThree => "string_three",
            Field::IntegerOne => "integer_one",
            Field::IntegerTwo => "integer_two",
            Field::DateOne => "date_one",
            Field::Blob => "blob",
            Field::MultiStringOne => "multi_string_one",
            Field::MultiStringTwo => "multi_string_two",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_fields_are_read_only() {
        assert!(Field::TokenId.is_read_only());
        assert!(Field::TokenKind.is_read_only());
        assert!(!Field::StringOne.is_read_only());
        assert!(!Field::ExpiryDate.is_read_only());
    }

    #[test]
    fn test_declared_kinds() {
        assert_eq!(Field::TokenId.kind(), ValueKind::String);
        assert_eq!(Field::ExpiryDate.kind(), ValueKind::DateTime);
        assert_eq!(Field::IntegerOne.kind(), ValueKind::Integer);
        assert_eq!(Field::Blob.kind(), ValueKind::Binary);
        assert_eq!(Field::MultiStringOne.kind(), ValueKind::StringSet);
    }

    #[test]
    fn test_wire_names_are_distinct() {
        let fields = [
            Field::TokenId,
            Field::TokenKind,
            Field::UserId,
            Field::ExpiryDate,
            Field::StringOne,
            Field::StringTwo,
            Field::StringThree,
            Field::IntegerOne,
            Field::IntegerTwo,
            Field::DateOne,
            Field::Blob,
            Field::MultiStringOne,
            Field::MultiStringTwo,
        ];
        let names: std::collections::HashSet<_> =
            fields.iter().map(|f| f.wire_name()).collect();
        assert_eq!(names.len(), fields.len());
    }
}
