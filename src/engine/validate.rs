//! engine::validate
//!
//! Per-type validation of metadata records.
//!
//! # Dispatch
//!
//! [`validator_for`] is an exhaustive match over [`ContentType`]: adding a
//! content type without deciding its rules is a compile error. Types with no
//! rules (pages, chapters, unknown host types) always validate.
//!
//! # Invariants
//!
//! - `validate` is pure and deterministic
//! - `reasons` is empty exactly when `is_valid` is true
//! - Reasons appear in the validator's check order, one per failed check

use serde::Serialize;

use super::rules::Check;
use crate::core::schema::SchemaRegistry;
use crate::core::types::{ContentType, MetadataRecord};

/// Outcome of validating a record against its content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether every applicable check passed.
    pub is_valid: bool,
    /// One explanation per failed check, in check order.
    pub reasons: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reasons: Vec::new(),
        }
    }

    /// Build a result from failed checks.
    fn from_failures(failed: impl IntoIterator<Item = Check>) -> Self {
        let reasons: Vec<String> = failed
            .into_iter()
            .map(|c| c.reason().to_string())
            .collect();
        Self {
            is_valid: reasons.is_empty(),
            reasons,
        }
    }
}

/// The ordered checks a content type must pass.
pub type Validator = &'static [Check];

const POST: Validator = &[Check::ExcerptPresent];
const ADVOCACY: Validator = &[Check::DescriptionPresent, Check::ExternalUrlValid];
const EVENTS: Validator = &[Check::EventDatePresent, Check::ExternalUrlValid];
const NO_RULES: Validator = &[];

/// Select the validator for a content type.
pub fn validator_for(content_type: &ContentType) -> Validator {
    match content_type {
        ContentType::Post => POST,
        ContentType::Advocacy => ADVOCACY,
        ContentType::Events => EVENTS,
        // `is_popup` is declared but carries no rule.
        ContentType::Chapters => NO_RULES,
        ContentType::Page | ContentType::Other(_) => NO_RULES,
    }
}

/// Validate a metadata record for a content type.
///
/// Total over all inputs: unknown content types are always valid.
///
/// # Example
///
/// ```
/// use metagate::core::types::{ContentType, MetadataRecord};
/// use metagate::engine::validate;
///
/// let record = MetadataRecord::new().with("excerpt", "  ");
/// let result = validate(&ContentType::Post, &record);
/// assert!(!result.is_valid);
/// assert_eq!(result.reasons, ["excerpt is required"]);
///
/// let record = MetadataRecord::new().with("excerpt", "Hello");
/// assert!(validate(&ContentType::Post, &record).is_valid);
/// ```
pub fn validate(content_type: &ContentType, metadata: &MetadataRecord) -> ValidationResult {
    let result = ValidationResult::from_failures(
        validator_for(content_type)
            .iter()
            .copied()
            .filter(|check| !check.passes(metadata)),
    );
    tracing::debug!(
        %content_type,
        failures = result.reasons.len(),
        "validated metadata"
    );
    result
}

/// Validate through the registry.
///
/// A type the registry does not know validates without consulting the rule
/// table. A registered type always gets its rules, even with no fields.
pub fn validate_with(
    registry: &SchemaRegistry,
    content_type: &ContentType,
    metadata: &MetadataRecord,
) -> ValidationResult {
    if !registry.is_registered(content_type) {
        tracing::trace!(%content_type, "not registered, nothing to validate");
        return ValidationResult::valid();
    }
    validate(content_type, metadata)
}
