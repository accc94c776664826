//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ContentType`] - Closed set of content types a record can belong to
//! - [`FieldKey`] - Validated metadata field identifier
//! - [`ValueType`] - Declared value type of a metadata field
//! - [`FieldValue`] - A single metadata value as the host stores it
//! - [`MetadataRecord`] - In-session values for one content record
//! - [`LockToken`] - Identifier for the host's publish lock
//!
//! # Validation
//!
//! Identifiers enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use metagate::core::types::{ContentType, FieldKey, LockToken};
//!
//! let ty: ContentType = "advocacy".parse().unwrap();
//! assert_eq!(ty, ContentType::Advocacy);
//! assert_eq!(ContentType::from_slug("news"), ContentType::Other("news".into()));
//!
//! assert!(FieldKey::new("external_url").is_ok());
//! assert!(FieldKey::new("External URL").is_err());
//! assert!(LockToken::new("custom-meta-validation").is_ok());
//! ```

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid field key: {0}")]
    InvalidFieldKey(String),

    #[error("invalid lock token: {0}")]
    InvalidLockToken(String),
}

/// The category of a content record.
///
/// The set is closed: adding a content type is a code change. Host slugs
/// this crate does not know are carried as [`ContentType::Other`] so that
/// validation stays total over whatever the host reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentType {
    /// Regular blog post.
    Post,
    /// Static page. Known to the host, never registered here.
    Page,
    /// Advocacy campaign page.
    Advocacy,
    /// Chapter landing page or popup.
    Chapters,
    /// Event listing.
    Events,
    /// Any other host post type.
    Other(String),
}

impl ContentType {
    /// Content types with declared metadata fields, in registration order.
    pub const KNOWN: [ContentType; 4] = [
        ContentType::Post,
        ContentType::Advocacy,
        ContentType::Chapters,
        ContentType::Events,
    ];

    /// Map a host post-type slug to a content type.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "post" => ContentType::Post,
            "page" => ContentType::Page,
            "advocacy" => ContentType::Advocacy,
            "chapters" => ContentType::Chapters,
            "events" => ContentType::Events,
            other => ContentType::Other(other.to_string()),
        }
    }

    /// The host slug for this content type.
    pub fn slug(&self) -> &str {
        match self {
            ContentType::Post => "post",
            ContentType::Page => "page",
            ContentType::Advocacy => "advocacy",
            ContentType::Chapters => "chapters",
            ContentType::Events => "events",
            ContentType::Other(slug) => slug,
        }
    }
}

impl FromStr for ContentType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_slug(s))
    }
}

impl From<String> for ContentType {
    fn from(s: String) -> Self {
        Self::from_slug(&s)
    }
}

impl From<ContentType> for String {
    fn from(ty: ContentType) -> Self {
        ty.slug().to_string()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Check that `s` is a lowercase identifier built from `extra` separators.
fn check_identifier(s: &str, extra: &[char]) -> Result<(), String> {
    let Some(first) = s.chars().next() else {
        return Err("cannot be empty".into());
    };
    if !(first.is_ascii_lowercase() || first == '_') {
        return Err(format!("'{s}' must start with a lowercase letter or '_'"));
    }
    if let Some(bad) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || extra.contains(c)))
    {
        return Err(format!("'{s}' cannot contain '{bad}'"));
    }
    Ok(())
}

/// A validated metadata field key.
///
/// Keys are lowercase ASCII identifiers: letters, digits and `_`, starting
/// with a letter or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldKey(String);

impl FieldKey {
    /// Create a new validated field key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidFieldKey` if the key is not an identifier.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        check_identifier(&key, &['_']).map_err(TypeError::InvalidFieldKey)?;
        Ok(Self(key))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FieldKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.0
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier passed to the host when acquiring or releasing the publish lock.
///
/// The same token must be used for both calls so the host can pair them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LockToken(String);

impl LockToken {
    /// The token used when none is configured.
    pub const DEFAULT: &'static str = "custom-meta-validation";

    /// Create a new validated lock token.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLockToken` unless the token is a slug
    /// (lowercase letters, digits, `-` and `_`).
    pub fn new(token: impl Into<String>) -> Result<Self, TypeError> {
        let token = token.into();
        check_identifier(&token, &['_', '-']).map_err(TypeError::InvalidLockToken)?;
        Ok(Self(token))
    }

    /// Get the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LockToken {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for LockToken {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LockToken> for String {
    fn from(token: LockToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for LockToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared value type of a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Boolean,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

/// A single metadata value.
///
/// The host stores JSON scalars, so a value may not match its field's
/// declared type. Validation reads values loosely through
/// [`FieldValue::is_truthy`] and [`FieldValue::as_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Loose truthiness: null, `false`, zero and `""` are falsy.
    ///
    /// ```
    /// use metagate::core::types::FieldValue;
    ///
    /// assert!(!FieldValue::Null.is_truthy());
    /// assert!(!FieldValue::Text(String::new()).is_truthy());
    /// assert!(FieldValue::Text(" ".into()).is_truthy());
    /// assert!(FieldValue::Bool(true).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// The string content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Current metadata values for one content record.
///
/// Keys the record does not contain read as empty/false. The record is a
/// plain JSON object on the wire.
///
/// # Example
///
/// ```
/// use metagate::core::types::MetadataRecord;
///
/// let record: MetadataRecord =
///     serde_json::from_str(r#"{"description": "x", "external_link": true}"#).unwrap();
/// assert_eq!(record.text("description"), Some("x"));
/// assert!(record.is_truthy("external_link"));
/// assert!(!record.is_truthy("external_url"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord(BTreeMap<String, FieldValue>);

impl MetadataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a value, returning the previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Get the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Get a text value. Non-text values read as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Loose truthiness of a key; absent keys are false.
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).is_some_and(FieldValue::is_truthy)
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over present keys and values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod content_type {
        use super::*;

        #[test]
        fn known_slugs_round_trip() {
            for ty in ContentType::KNOWN {
                assert_eq!(ContentType::from_slug(ty.slug()), ty);
            }
            assert_eq!(ContentType::from_slug("page"), ContentType::Page);
        }

        #[test]
        fn unknown_slug_is_other() {
            let ty = ContentType::from_slug("product");
            assert_eq!(ty, ContentType::Other("product".to_string()));
            assert_eq!(ty.to_string(), "product");
        }

        #[test]
        fn serializes_as_slug() {
            let json = serde_json::to_string(&ContentType::Events).unwrap();
            assert_eq!(json, "\"events\"");
            let parsed: ContentType = serde_json::from_str("\"chapters\"").unwrap();
            assert_eq!(parsed, ContentType::Chapters);
        }
    }

    mod field_key {
        use super::*;

        #[test]
        fn valid_keys() {
            assert!(FieldKey::new("excerpt").is_ok());
            assert!(FieldKey::new("event_date").is_ok());
            assert!(FieldKey::new("_private").is_ok());
            assert!(FieldKey::new("field2").is_ok());
        }

        #[test]
        fn invalid_keys() {
            assert!(FieldKey::new("").is_err());
            assert!(FieldKey::new("2field").is_err());
            assert!(FieldKey::new("Excerpt").is_err());
            assert!(FieldKey::new("event-date").is_err());
            assert!(FieldKey::new("has space").is_err());
        }

        #[test]
        fn deserialize_rejects_invalid() {
            let result: Result<FieldKey, _> = serde_json::from_str("\"Bad Key\"");
            assert!(result.is_err());
        }
    }

    mod lock_token {
        use super::*;

        #[test]
        fn default_token() {
            assert_eq!(LockToken::default().as_str(), "custom-meta-validation");
            assert!(LockToken::new(LockToken::DEFAULT).is_ok());
        }

        #[test]
        fn rejects_non_slugs() {
            assert!(LockToken::new("").is_err());
            assert!(LockToken::new("Has Caps").is_err());
            assert!(LockToken::new("-leading").is_err());
        }
    }

    mod field_value {
        use super::*;

        #[test]
        fn truthiness() {
            assert!(!FieldValue::Null.is_truthy());
            assert!(!FieldValue::Bool(false).is_truthy());
            assert!(FieldValue::Bool(true).is_truthy());
            assert!(!FieldValue::Number(0.into()).is_truthy());
            assert!(FieldValue::Number(1.into()).is_truthy());
            assert!(!FieldValue::Text(String::new()).is_truthy());
            assert!(FieldValue::Text("0".into()).is_truthy());
        }

        #[test]
        fn untagged_json() {
            let values: Vec<FieldValue> =
                serde_json::from_str(r#"[null, true, 3, "x"]"#).unwrap();
            assert_eq!(
                values,
                vec![
                    FieldValue::Null,
                    FieldValue::Bool(true),
                    FieldValue::Number(3.into()),
                    FieldValue::Text("x".into()),
                ]
            );
        }
    }

    mod metadata_record {
        use super::*;

        #[test]
        fn absent_keys_read_empty() {
            let record = MetadataRecord::new();
            assert_eq!(record.text("excerpt"), None);
            assert!(!record.is_truthy("external_link"));
            assert!(record.is_empty());
        }

        #[test]
        fn non_text_reads_as_absent_text() {
            let record = MetadataRecord::new().with("excerpt", true);
            assert_eq!(record.text("excerpt"), None);
            assert!(record.is_truthy("excerpt"));
        }

        #[test]
        fn set_returns_previous() {
            let mut record = MetadataRecord::new().with("excerpt", "a");
            let prev = record.set("excerpt", "b");
            assert_eq!(prev, Some(FieldValue::Text("a".into())));
            assert_eq!(record.text("excerpt"), Some("b"));
            assert_eq!(record.len(), 1);
        }

        #[test]
        fn from_iterator() {
            let record: MetadataRecord = [("a", "x"), ("b", "y")].into_iter().collect();
            let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
            assert_eq!(keys, vec!["a", "b"]);
        }
    }
}
