//! ui::warnings
//!
//! Warning presenter: validation results to pre-publish messages.

use crate::core::types::ContentType;
use crate::engine::ValidationResult;

/// Shown for every invalid record.
pub const GENERIC_WARNING: &str = "Important: Meta information required before publishing.";

/// Extra guidance for events.
pub const EVENTS_HINT: &str =
    "You must select an event date and add a valid external URL (starting with 'https://').";

/// Extra guidance for advocacy pages.
pub const ADVOCACY_HINT: &str =
    "You must add a description and optionally a valid external URL (starting with 'https://').";

/// Messages to show before publishing. Empty when the result is valid.
///
/// ```
/// use metagate::core::types::{ContentType, MetadataRecord};
/// use metagate::engine::validate;
/// use metagate::ui::warnings::{present, GENERIC_WARNING};
///
/// let result = validate(&ContentType::Post, &MetadataRecord::new());
/// assert_eq!(present(&result, &ContentType::Post), [GENERIC_WARNING]);
/// ```
pub fn present(result: &ValidationResult, content_type: &ContentType) -> Vec<String> {
    if result.is_valid {
        return Vec::new();
    }

    let hint = match content_type {
        ContentType::Events => Some(EVENTS_HINT),
        ContentType::Advocacy => Some(ADVOCACY_HINT),
        _ => None,
    };

    std::iter::once(GENERIC_WARNING)
        .chain(hint)
        .map(str::to_string)
        .collect()
}
