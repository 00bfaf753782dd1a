/// Domain types for the record store
use serde::{Deserialize, Serialize};
use crate::error::StoreError;
use serde_json::{Map, Value};
use std::fmt;

/// Field names a write payload may carry
pub const PERMITTED_FIELDS: [&str; 5] = ["id", "firstName", "lastName", "role", "createdAt"];

/// Numeric user record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn get(self) -> i64 {
        self.0
    }

    /// Coerce textual input (usually a URL path segment) into an id
    ///
    /// Surrounding whitespace is ignored and the rest must be a finite number
    /// without a fractional part, so `"1"`, `" 1 "` and `"1.0"` all name id 1.
    /// Unsigned `0x`, `0o` and `0b` literals are read in their radix
    /// (`"0x1"` is id 1). Anything else names no record at all.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(id) = Self::parse_radix_literal(trimmed) {
            return id;
        }

        let number: f64 = trimmed.parse().ok()?;
        if !number.is_finite() || number.fract() != 0.0 {
            return None;
        }
        if number < i64::MIN as f64 || number >= i64::MAX as f64 {
            return None;
        }

        Some(Self(number as i64))
    }

    /// `Some(result)` when `text` carries a radix prefix, `None` otherwise
    fn parse_radix_literal(text: &str) -> Option<Option<Self>> {
        let prefix = text.get(..2)?.to_ascii_lowercase();
        let radix = match prefix.as_str() {
            "0x" => 16,
            "0o" => 8,
            "0b" => 2,
            _ => return None,
        };

        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Some(None);
        }

        Some(i64::from_str_radix(digits, radix).ok().map(Self))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id argument accepted by lookups, typed or still raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdQuery {
    /// Already numeric
    Id(RecordId),
    /// Raw caller input, coerced with [`RecordId::parse_loose`]
    Raw(String),
}

impl IdQuery {
    /// Canonical numeric form, if the query names a possible record
    pub fn resolve(&self) -> Option<RecordId> {
        match self {
            IdQuery::Id(id) => Some(*id),
            IdQuery::Raw(raw) => RecordId::parse_loose(raw),
        }
    }
}

impl fmt::Display for IdQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdQuery::Id(id) => write!(f, "{}", id),
            IdQuery::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<RecordId> for IdQuery {
    fn from(id: RecordId) -> Self {
        IdQuery::Id(id)
    }
}

impl From<i64> for IdQuery {
    fn from(id: i64) -> Self {
        IdQuery::Id(RecordId(id))
    }
}

impl From<&str> for IdQuery {
    fn from(raw: &str) -> Self {
        IdQuery::Raw(raw.to_string())
    }
}

impl From<String> for IdQuery {
    fn from(raw: String) -> Self {
        IdQuery::Raw(raw)
    }
}

impl From<&String> for IdQuery {
    fn from(raw: &String) -> Self {
        IdQuery::Raw(raw.clone())
    }
}

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Store-assigned identifier, never reused until the next reset
    pub id: RecordId,

    /// Given name, absent when the creating payload omitted it
    pub first_name: Option<String>,

    /// Family name, absent when the creating payload omitted it
    pub last_name: Option<String>,

    /// Free-form role such as `admin`
    pub role: Option<String>,

    /// Creation timestamp (RFC 3339), fixed at construction
    pub created_at: String,
}

impl UserRecord {
    /// Build a record with the given identity
    pub fn new(
        id: RecordId,
        first_name: Option<String>,
        last_name: Option<String>,
        role: Option<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            role,
            created_at: created_at.into(),
        }
    }
}

/// Write candidate for add/update, kept as the raw JSON object
///
/// Keeping the object untyped lets unknown keys reach shape validation and
/// keeps an explicit `null` distinct from a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserPayload(Map<String, Value>);

impl UserPayload {
    /// Empty payload
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Convert a JSON value; fails unless it is an object
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Field names present on the payload
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Raw value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the payload carries no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a text column
    ///
    /// Returns `Ok(None)` when the key is missing and `Ok(Some(None))` for an
    /// explicit `null`. Any other non-text value is an invalid shape.
    pub(crate) fn text(&self, key: &str) -> crate::Result<Option<Option<String>>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(Value::Null) => Ok(Some(None)),
            Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
            Some(_) => Err(StoreError::invalid_value(key)),
        }
    }
}

impl From<Map<String, Value>> for UserPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Result of a successful add
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertedUser {
    /// The record as stored
    pub inserted_user: UserRecord,
    /// Always `true`
    pub success: bool,
}

/// Result of a successful update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedUser {
    /// The record after the merge
    pub updated_row: UserRecord,
    /// Always `true`
    pub success: bool,
}

/// Result of a successful remove
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedUser {
    /// Id of the record that was dropped
    pub removed_row_id: RecordId,
    /// Always `true`
    pub success: bool,
}
