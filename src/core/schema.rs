//! core::schema
//!
//! Schema registry: which metadata fields each content type declares.
//!
//! # Design
//!
//! The registry is built once at process start and read-only afterwards.
//! Field order is significant: it is the order the settings panel lists
//! inputs in.
//!
//! # Fallback
//!
//! [`SchemaRegistry::get_fields`] fails with [`SchemaError::UnknownType`] for
//! types that were never registered. Callers that only need the field list
//! use [`SchemaRegistry::fields_or_empty`], which treats an unknown type as
//! one with no declared fields.
//!
//! # Example
//!
//! ```
//! use metagate::core::schema::{SchemaError, SchemaRegistry};
//! use metagate::core::types::ContentType;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let keys: Vec<_> = registry
//!     .get_fields(&ContentType::Advocacy)
//!     .unwrap()
//!     .iter()
//!     .map(|f| f.key.as_str())
//!     .collect();
//! assert_eq!(keys, ["description", "external_link", "external_url"]);
//!
//! assert!(matches!(
//!     registry.get_fields(&ContentType::Page),
//!     Err(SchemaError::UnknownType(_))
//! ));
//! assert!(registry.fields_or_empty(&ContentType::Page).is_empty());
//! ```

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;

use crate::core::types::{ContentType, FieldKey, TypeError, ValueType};

/// Errors from building or querying the registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("content type '{0}' has no registered fields")]
    UnknownType(ContentType),

    #[error("content type '{content_type}' declares field '{key}' more than once")]
    DuplicateField {
        content_type: ContentType,
        key: FieldKey,
    },

    #[error("content type '{0}' is already registered")]
    AlreadyRegistered(ContentType),

    #[error("field '{field}' is shown when '{depends_on}', which is not a boolean field of '{content_type}'")]
    InvalidVisibility {
        content_type: ContentType,
        field: FieldKey,
        depends_on: FieldKey,
    },

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Input widget a field is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Multi-line text.
    Textarea,
    /// Single-line text.
    Text,
    /// On/off switch.
    Toggle,
    /// Date and time picker.
    DateTime,
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Control::Textarea => write!(f, "textarea"),
            Control::Text => write!(f, "text"),
            Control::Toggle => write!(f, "toggle"),
            Control::DateTime => write!(f, "datetime"),
        }
    }
}

/// A declared metadata field.
///
/// `label`, `control` and `visible_when` only describe how the field is
/// presented; validation rules live in [`crate::engine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field key, unique within its content type.
    pub key: FieldKey,
    /// Declared value type.
    pub value_type: ValueType,
    /// Input label.
    pub label: String,
    /// Input widget.
    pub control: Control,
    /// Boolean field that must be truthy for this input to be shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<FieldKey>,
}

impl FieldSpec {
    /// A string field edited with `control`.
    pub fn string(key: &str, label: &str, control: Control) -> Result<Self, TypeError> {
        Ok(Self {
            key: FieldKey::new(key)?,
            value_type: ValueType::String,
            label: label.to_string(),
            control,
            visible_when: None,
        })
    }

    /// A boolean field edited with a toggle.
    pub fn boolean(key: &str, label: &str) -> Result<Self, TypeError> {
        Ok(Self {
            key: FieldKey::new(key)?,
            value_type: ValueType::Boolean,
            label: label.to_string(),
            control: Control::Toggle,
            visible_when: None,
        })
    }

    /// Only show this input while `toggle` is truthy.
    pub fn shown_when(mut self, toggle: &str) -> Result<Self, TypeError> {
        self.visible_when = Some(FieldKey::new(toggle)?);
        Ok(self)
    }
}

/// Content types mapped to their ordered field specifications.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    types: HashMap<ContentType, Vec<FieldSpec>>,
    order: Vec<ContentType>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry of built-in content types.
    ///
    /// # Errors
    ///
    /// Any error here is a configuration defect in the built-in table and
    /// should abort start-up.
    pub fn builtin() -> Result<Self, SchemaError> {
        let mut registry = Self::new();

        registry.register_type(
            ContentType::Post,
            vec![FieldSpec::string(
                "excerpt",
                "Excerpt (required)",
                Control::Textarea,
            )?],
        )?;

        registry.register_type(
            ContentType::Advocacy,
            vec![
                FieldSpec::string("description", "Description (required)", Control::Textarea)?,
                FieldSpec::boolean("external_link", "Does this page link to an external page?")?,
                FieldSpec::string("external_url", "External Link URL (required)", Control::Text)?
                    .shown_when("external_link")?,
            ],
        )?;

        registry.register_type(
            ContentType::Chapters,
            vec![FieldSpec::boolean("is_popup", "Page or popup?")?],
        )?;

        registry.register_type(
            ContentType::Events,
            vec![
                FieldSpec::string("description", "Event Description", Control::Textarea)?,
                FieldSpec::string("event_date", "Event Date (required)", Control::DateTime)?,
                FieldSpec::boolean("external_link", "Does this event link to an external page?")?,
                FieldSpec::string("external_url", "Event URL (required)", Control::Text)?
                    .shown_when("external_link")?,
            ],
        )?;

        Ok(registry)
    }

    /// Register the ordered field list for a content type.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::AlreadyRegistered`] if the type already has fields
    /// - [`SchemaError::DuplicateField`] if two fields share a key
    /// - [`SchemaError::InvalidVisibility`] if `visible_when` does not name
    ///   a boolean field of the same type
    pub fn register_type(
        &mut self,
        content_type: ContentType,
        fields: Vec<FieldSpec>,
    ) -> Result<(), SchemaError> {
        if self.types.contains_key(&content_type) {
            return Err(SchemaError::AlreadyRegistered(content_type));
        }

        let mut seen = HashSet::new();
        for field in &fields {
            if !seen.insert(&field.key) {
                return Err(SchemaError::DuplicateField {
                    content_type,
                    key: field.key.clone(),
                });
            }
        }

        for field in &fields {
            if let Some(depends_on) = &field.visible_when {
                let is_boolean = fields
                    .iter()
                    .any(|f| &f.key == depends_on && f.value_type == ValueType::Boolean);
                if !is_boolean {
                    return Err(SchemaError::InvalidVisibility {
                        content_type,
                        field: field.key.clone(),
                        depends_on: depends_on.clone(),
                    });
                }
            }
        }

        self.order.push(content_type.clone());
        self.types.insert(content_type, fields);
        Ok(())
    }

    /// Get the declared fields of a content type.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownType`] if the type was never registered.
    pub fn get_fields(&self, content_type: &ContentType) -> Result<&[FieldSpec], SchemaError> {
        self.types
            .get(content_type)
            .map(Vec::as_slice)
            .ok_or_else(|| SchemaError::UnknownType(content_type.clone()))
    }

    /// Get the declared fields, treating an unknown type as having none.
    pub fn fields_or_empty(&self, content_type: &ContentType) -> &[FieldSpec] {
        match self.get_fields(content_type) {
            Ok(fields) => fields,
            Err(_) => {
                tracing::trace!(%content_type, "no declared fields");
                &[]
            }
        }
    }

    /// Look up a single declared field.
    pub fn field(&self, content_type: &ContentType, key: &str) -> Option<&FieldSpec> {
        self.fields_or_empty(content_type)
            .iter()
            .find(|f| f.key.as_str() == key)
    }

    /// Whether the content type has been registered.
    pub fn is_registered(&self, content_type: &ContentType) -> bool {
        self.types.contains_key(content_type)
    }

    /// Registered content types in registration order.
    pub fn content_types(&self) -> impl Iterator<Item = &ContentType> {
        self.order.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(fields: &[FieldSpec]) -> Vec<&str> {
        fields.iter().map(|f| f.key.as_str()).collect()
    }

    #[test]
    fn builtin_field_tables() {
        let registry = SchemaRegistry::builtin().unwrap();

        assert_eq!(
            keys(registry.get_fields(&ContentType::Post).unwrap()),
            ["excerpt"]
        );
        assert_eq!(
            keys(registry.get_fields(&ContentType::Chapters).unwrap()),
            ["is_popup"]
        );
        assert_eq!(
            keys(registry.get_fields(&ContentType::Events).unwrap()),
            ["description", "event_date", "external_link", "external_url"]
        );
    }

    #[test]
    fn builtin_registration_order() {
        let registry = SchemaRegistry::builtin().unwrap();
        let types: Vec<_> = registry.content_types().cloned().collect();
        assert_eq!(types, ContentType::KNOWN.to_vec());
    }

    #[test]
    fn external_url_depends_on_toggle() {
        let registry = SchemaRegistry::builtin().unwrap();
        let url = registry
            .field(&ContentType::Advocacy, "external_url")
            .unwrap();
        assert_eq!(
            url.visible_when.as_ref().map(FieldKey::as_str),
            Some("external_link")
        );
        assert_eq!(url.control, Control::Text);
    }

    #[test]
    fn unknown_type_fails_lookup() {
        let registry = SchemaRegistry::builtin().unwrap();
        let other = ContentType::Other("product".into());
        assert_eq!(
            registry.get_fields(&other),
            Err(SchemaError::UnknownType(other.clone()))
        );
        assert!(registry.fields_or_empty(&other).is_empty());
        assert!(!registry.is_registered(&other));
    }

    #[test]
    fn duplicate_key_rejected() {
        let mut registry = SchemaRegistry::new();
        let result = registry.register_type(
            ContentType::Post,
            vec![
                FieldSpec::string("excerpt", "a", Control::Text).unwrap(),
                FieldSpec::boolean("excerpt", "b").unwrap(),
            ],
        );
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
        assert!(!registry.is_registered(&ContentType::Post));
    }

    #[test]
    fn same_key_across_types_allowed() {
        let mut registry = SchemaRegistry::new();
        let desc = || FieldSpec::string("description", "d", Control::Textarea).unwrap();
        registry
            .register_type(ContentType::Advocacy, vec![desc()])
            .unwrap();
        registry
            .register_type(ContentType::Events, vec![desc()])
            .unwrap();
    }

    #[test]
    fn reregistration_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register_type(ContentType::Post, vec![]).unwrap();
        assert_eq!(
            registry.register_type(ContentType::Post, vec![]),
            Err(SchemaError::AlreadyRegistered(ContentType::Post))
        );
    }

    #[test]
    fn visibility_must_reference_boolean_field() {
        let mut registry = SchemaRegistry::new();
        let result = registry.register_type(
            ContentType::Advocacy,
            vec![FieldSpec::string("external_url", "u", Control::Text)
                .unwrap()
                .shown_when("external_link")
                .unwrap()],
        );
        assert!(matches!(
            result,
            Err(SchemaError::InvalidVisibility { .. })
        ));
    }
}
