//! The typed attribute store backing stateful tokens.
//!
//! A sparse, statically-typed, dynamically-populated record: values are kept in
//! a map from [`Field`] to a tagged [`AttributeValue`], and every read and
//! write checks the tag against the field's declared kind at the boundary.
//! Unset fields are absent from the map, never present-with-null, so absence
//! is observable through [`AttributeStore::field_names`].

use crate::error::TokenError;
use crate::field::{Field, ValueKind};
use crate::token::TokenType;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// A single attribute value, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A UTF-8 string.
    String(String),
    /// A signed 64-bit integer.
    Integer(i64),
    /// A UTC instant.
    DateTime(DateTime<Utc>),
    /// An opaque binary blob.
    Binary(Vec<u8>),
    /// An unordered set of strings.
    StringSet(HashSet<String>),
    /// The token-type discriminator.
    TokenType(TokenType),
}

impl AttributeValue {
    /// The kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::String(_) => ValueKind::String,
            AttributeValue::Integer(_) => ValueKind::Integer,
            AttributeValue::DateTime(_) => ValueKind::DateTime,
            AttributeValue::Binary(_) => ValueKind::Binary,
            AttributeValue::StringSet(_) => ValueKind::StringSet,
            AttributeValue::TokenType(_) => ValueKind::TokenType,
        }
    }

    /// Render this value for a flat wire map.
    ///
    /// Instants become RFC 3339 strings, blobs become base64 and string sets
    /// become sorted arrays so the output is stable across runs.
    fn to_wire_value(&self) -> Value {
        match self {
            AttributeValue::String(s) => Value::String(s.clone()),
            AttributeValue::Integer(i) => Value::from(*i),
            AttributeValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            AttributeValue::Binary(bytes) => Value::String(BASE64.encode(bytes)),
            AttributeValue::StringSet(set) => {
                let mut values: Vec<&String> = set.iter().collect();
                values.sort();
                Value::from_iter(values.into_iter().cloned())
            }
            AttributeValue::TokenType(t) => Value::String(t.as_str().to_string()),
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::DateTime(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Binary(value)
    }
}

impl From<HashSet<String>> for AttributeValue {
    fn from(value: HashSet<String>) -> Self {
        AttributeValue::StringSet(value)
    }
}

impl From<TokenType> for AttributeValue {
    fn from(value: TokenType) -> Self {
        AttributeValue::TokenType(value)
    }
}

/// A kind-checked mapping from [`Field`] to [`AttributeValue`].
///
/// `Clone` performs a deep copy: multi-valued sets and blobs are cloned, not
/// shared, so mutating a copy never affects the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeStore {
    attributes: HashMap<Field, AttributeValue>,
}

impl AttributeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a single value under `field`, overwriting any prior value.
    ///
    /// Fails with [`TokenError::ReadOnlyField`] for read-only fields and
    /// [`TokenError::InvalidValueKind`] when the value's tag does not match
    /// the field's declared kind.
    pub fn set(
        &mut self,
        field: Field,
        value: impl Into<AttributeValue>,
    ) -> Result<(), TokenError> {
        if field.is_read_only() {
            return Err(TokenError::ReadOnlyField { field });
        }
        let value = value.into();
        if value.kind() != field.kind() {
            return Err(TokenError::InvalidValueKind {
                field,
                expected: field.kind(),
                actual: value.kind(),
            });
        }
        self.attributes.insert(field, value);
        Ok(())
    }

    /// Construction-time write that bypasses the read-only check.
    ///
    /// Only reachable from token constructors within this crate; the kind
    /// contract still holds.
    pub(crate) fn insert_initial(&mut self, field: Field, value: AttributeValue) {
        debug_assert_eq!(value.kind(), field.kind());
        self.attributes.insert(field, value);
    }

    /// Add a value to the set stored under a multi-valued `field`.
    ///
    /// The first call auto-initializes the set; repeated calls accumulate with
    /// set semantics, so duplicates collapse.
    pub fn add_multi(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<(), TokenError> {
        if field.is_read_only() {
            return Err(TokenError::ReadOnlyField { field });
        }
        if field.kind() != ValueKind::StringSet {
            return Err(TokenError::InvalidValueKind {
                field,
                expected: field.kind(),
                actual: ValueKind::StringSet,
            });
        }
        let entry = self
            .attributes
            .entry(field)
            .or_insert_with(|| AttributeValue::StringSet(HashSet::new()));
        if let AttributeValue::StringSet(set) = entry {
            set.insert(value.into());
        }
        Ok(())
    }

    /// Remove `field` from the mapping entirely.
    ///
    /// Clearing a never-set field is a no-op. Read-only fields cannot be
    /// cleared; they are part of the token's identity.
    pub fn clear(&mut self, field: Field) -> Result<(), TokenError> {
        if field.is_read_only() {
            return Err(TokenError::ReadOnlyField { field });
        }
        self.attributes.remove(&field);
        Ok(())
    }

    /// The raw tagged value stored under `field`, if any.
    pub fn get(&self, field: Field) -> Option<&AttributeValue> {
        self.attributes.get(&field)
    }

    /// Whether `field` is currently present.
    pub fn contains(&self, field: Field) -> bool {
        self.attributes.contains_key(&field)
    }

    /// The string stored under `field`.
    ///
    /// `Ok(None)` when the field was never set; [`TokenError::TypeMismatch`]
    /// when it holds another kind.
    pub fn get_string(&self, field: Field) -> Result<Option<&str>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(field, ValueKind::String, other)),
        }
    }

    /// The integer stored under `field`.
    pub fn get_integer(&self, field: Field) -> Result<Option<i64>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::Integer(i)) => Ok(Some(*i)),
            Some(other) => Err(self.mismatch(field, ValueKind::Integer, other)),
        }
    }

    /// The instant stored under `field`.
    pub fn get_datetime(&self, field: Field) -> Result<Option<DateTime<Utc>>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::DateTime(dt)) => Ok(Some(*dt)),
            Some(other) => Err(self.mismatch(field, ValueKind::DateTime, other)),
        }
    }

    /// The binary blob stored under `field`.
    pub fn get_binary(&self, field: Field) -> Result<Option<&[u8]>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::Binary(bytes)) => Ok(Some(bytes)),
            Some(other) => Err(self.mismatch(field, ValueKind::Binary, other)),
        }
    }

    /// The string set accumulated under a multi-valued `field`.
    pub fn get_string_set(&self, field: Field) -> Result<Option<&HashSet<String>>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::StringSet(set)) => Ok(Some(set)),
            Some(other) => Err(self.mismatch(field, ValueKind::StringSet, other)),
        }
    }

    /// The token-type discriminator stored under `field`.
    pub fn get_token_type(&self, field: Field) -> Result<Option<TokenType>, TokenError> {
        match self.attributes.get(&field) {
            None => Ok(None),
            Some(AttributeValue::TokenType(t)) => Ok(Some(*t)),
            Some(other) => Err(self.mismatch(field, ValueKind::TokenType, other)),
        }
    }

    /// The fields currently present: every set call not undone by a clear.
    pub fn field_names(&self) -> Vec<Field> {
        self.attributes.keys().copied().collect()
    }

    /// The number of fields currently present.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the store holds no fields.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Project the store into a flat wire-name → value map for the
    /// persistence boundary. This crate never issues I/O itself.
    pub fn to_wire_map(&self) -> HashMap<String, Value> {
        self.attributes
            .iter()
            .map(|(field, value)| (field.wire_name().to_string(), value.to_wire_value()))
            .collect()
    }

    fn mismatch(&self, field: Field, requested: ValueKind, actual: &AttributeValue) -> TokenError {
        TokenError::TypeMismatch {
            field,
            requested,
            actual: actual.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_string_round_trip() {
        let mut store = AttributeStore::new();
        store.set(Field::StringOne, "badger").unwrap();
        assert_eq!(store.get_string(Field::StringOne).unwrap(), Some("badger"));
    }

    #[test]
    fn test_integer_round_trip() {
        let mut store = AttributeStore::new();
        store.set(Field::IntegerOne, 12345i64).unwrap();
        assert_eq!(store.get_integer(Field::IntegerOne).unwrap(), Some(12345));
    }

    #[test]
    fn test_datetime_round_trip() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let mut store = AttributeStore::new();
        store.set(Field::DateOne, instant).unwrap();
        assert_eq!(store.get_datetime(Field::DateOne).unwrap(), Some(instant));
    }

    #[test]
    fn test_binary_round_trip() {
        let data = b"badger".to_vec();
        let mut store = AttributeStore::new();
        store.set(Field::Blob, data.clone()).unwrap();
        assert_eq!(store.get_binary(Field::Blob).unwrap(), Some(data.as_slice()));
    }

    #[test]
    fn test_write_rejects_wrong_kind() {
        let mut store = AttributeStore::new();
        let err = store.set(Field::IntegerOne, "not an integer").unwrap_err();
        assert_eq!(
            err,
            TokenError::InvalidValueKind {
                field: Field::IntegerOne,
                expected: ValueKind::Integer,
                actual: ValueKind::String,
            }
        );
        assert!(!store.contains(Field::IntegerOne));
    }

    #[test]
    fn test_read_fails_loudly_on_wrong_kind() {
        let mut store = AttributeStore::new();
        store.set(Field::StringOne, "badger").unwrap();
        let err = store.get_integer(Field::StringOne).unwrap_err();
        assert_eq!(
            err,
            TokenError::TypeMismatch {
                field: Field::StringOne,
                requested: ValueKind::Integer,
                actual: ValueKind::String,
            }
        );
    }

    #[test]
    fn test_absent_field_reads_as_none() {
        let store = AttributeStore::new();
        assert_eq!(store.get_string(Field::StringOne).unwrap(), None);
        assert_eq!(store.get_string_set(Field::MultiStringOne).unwrap(), None);
    }

    #[test]
    fn test_read_only_field_rejects_writes() {
        let mut store = AttributeStore::new();
        let err = store.set(Field::TokenId, "tampered").unwrap_err();
        assert_eq!(
            err,
            TokenError::ReadOnlyField {
                field: Field::TokenId
            }
        );
    }

    #[test]
    fn test_multi_add_accumulates_with_set_semantics() {
        let mut store = AttributeStore::new();
        store.add_multi(Field::MultiStringOne, "one").unwrap();
        store.add_multi(Field::MultiStringOne, "two").unwrap();
        store.add_multi(Field::MultiStringOne, "three").unwrap();
        store.add_multi(Field::MultiStringOne, "two").unwrap();

        let values = store.get_string_set(Field::MultiStringOne).unwrap().unwrap();
        let expected: HashSet<String> = ["one", "two", "three"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(values, &expected);
    }

    #[test]
    fn test_multi_add_rejects_single_valued_field() {
        let mut store = AttributeStore::new();
        assert!(store.add_multi(Field::StringOne, "one").is_err());
    }

    #[test]
    fn test_clear_removes_presence() {
        let mut store = AttributeStore::new();
        store.set(Field::StringOne, "badger").unwrap();
        assert_eq!(store.len(), 1);

        store.clear(Field::StringOne).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get_string(Field::StringOne).unwrap(), None);

        // Clearing a never-set field is a no-op.
        store.clear(Field::StringTwo).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clone_is_deep() {
        let mut store = AttributeStore::new();
        store.add_multi(Field::MultiStringOne, "one").unwrap();

        let mut copy = store.clone();
        copy.add_multi(Field::MultiStringOne, "two").unwrap();

        assert_eq!(
            store.get_string_set(Field::MultiStringOne).unwrap().unwrap().len(),
            1
        );
        assert_eq!(
            copy.get_string_set(Field::MultiStringOne).unwrap().unwrap().len(),
            2
        );
    }

    #[test]
    fn test_wire_map_projection() {
        let mut store = AttributeStore::new();
        store.set(Field::StringOne, "badger").unwrap();
        store.set(Field::IntegerOne, 7i64).unwrap();
        store.set(Field::Blob, b"bytes".to_vec()).unwrap();
        store.add_multi(Field::MultiStringOne, "b").unwrap();
        store.add_multi(Field::MultiStringOne, "a").unwrap();

        let map = store.to_wire_map();
        assert_eq!(map["string_one"], Value::String("badger".into()));
        assert_eq!(map["integer_one"], Value::from(7));
        assert_eq!(map["blob"], Value::String(BASE64.encode(b"bytes")));
        // String sets are sorted into stable arrays.
        assert_eq!(map["multi_string_one"], serde_json::json!(["a", "b"]));
    }
}
