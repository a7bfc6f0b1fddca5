//! Error types for token attribute operations.

use crate::field::{Field, ValueKind};
use thiserror::Error;

/// Errors that can occur when reading or writing token attributes.
///
/// All operations at this layer are local, synchronous and deterministic, so
/// every variant reflects a caller mistake rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Attempted to write a field the registry marks read-only.
    #[error("field {field} is read-only and cannot be modified after construction")]
    ReadOnlyField { field: Field },

    /// Attempted to store a value whose kind does not match the field's declared kind.
    #[error("field {field} stores {expected} values, got {actual}")]
    InvalidValueKind {
        field: Field,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Requested an attribute as a kind other than the one stored.
    #[error("field {field} holds a {actual} value, requested {requested}")]
    TypeMismatch {
        field: Field,
        requested: ValueKind,
        actual: ValueKind,
    },
}
