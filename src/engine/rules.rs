//! engine::rules
//!
//! Individual metadata checks.
//!
//! Each [`Check`] is one line in a validation report: a validator runs a
//! fixed, ordered list of checks and every failing check contributes one
//! reason. Checks read the record loosely (see
//! [`crate::core::types::FieldValue`]) and never fail for malformed values;
//! a value of the wrong type simply does not satisfy the check.

use crate::core::types::MetadataRecord;

/// The only URL scheme accepted for external links.
pub const HTTPS_PREFIX: &str = "https://";

/// A single validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// `excerpt` is non-empty after trimming.
    ExcerptPresent,
    /// `description` is non-empty after trimming.
    DescriptionPresent,
    /// `event_date` is truthy.
    EventDatePresent,
    /// When `external_link` is truthy, `external_url` is an https URL.
    ExternalUrlValid,
}

impl Check {
    /// Run the check against a record.
    pub fn passes(self, record: &MetadataRecord) -> bool {
        match self {
            Check::ExcerptPresent => has_text(record, "excerpt"),
            Check::DescriptionPresent => has_text(record, "description"),
            Check::EventDatePresent => record.is_truthy("event_date"),
            Check::ExternalUrlValid => {
                !record.is_truthy("external_link")
                    || record.text("external_url").is_some_and(is_https_url)
            }
        }
    }

    /// Human-readable reason reported when the check fails.
    pub fn reason(self) -> &'static str {
        match self {
            Check::ExcerptPresent => "excerpt is required",
            Check::DescriptionPresent => "description is required",
            Check::EventDatePresent => "event date is required",
            Check::ExternalUrlValid => "external URL must start with 'https://'",
        }
    }
}

/// Whether `key` holds text that is non-empty after trimming.
pub fn has_text(record: &MetadataRecord, key: &str) -> bool {
    record.text(key).is_some_and(|s| !s.trim().is_empty())
}

/// Shallow URL check: `https://` followed by at least one character on
/// the same line.
///
/// Surrounding whitespace is ignored. This is a prefix heuristic, not URI
/// parsing.
///
/// ```
/// use metagate::engine::rules::is_https_url;
///
/// assert!(is_https_url("https://a.com"));
/// assert!(is_https_url("  https://x  "));
/// assert!(!is_https_url("http://a.com"));
/// assert!(!is_https_url("https://"));
/// assert!(!is_https_url("https://\nexample.org"));
/// ```
pub fn is_https_url(url: &str) -> bool {
    url.trim()
        .strip_prefix(HTTPS_PREFIX)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !is_line_break(c))
}

/// Line terminators; the host address must start on the same line.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
