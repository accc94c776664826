//! engine
//!
//! Metadata validation engine.
//!
//! # Architecture
//!
//! Validation is a pure function of (content type, metadata record). There
//! is no hidden state: calling [`validate`] twice with the same inputs yields
//! the same [`ValidationResult`].
//!
//! - [`rules`] - Individual checks and their failure reasons
//! - [`validate`](mod@validate) - Per-type dispatch producing a result
//!
//! Consumers: [`crate::guard`] turns results into publish-lock transitions,
//! and [`crate::ui::warnings`] turns them into user-facing messages.

pub mod rules;
pub mod validate;

pub use rules::Check;
pub use validate::{validate, validate_with, validator_for, ValidationResult, Validator};
