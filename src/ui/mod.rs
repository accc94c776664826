//! ui
//!
//! What the editor shows the user.
//!
//! # Modules
//!
//! - [`warnings`] - Validation results to pre-publish messages
//! - [`panel`] - Settings and pre-publish panel data
//! - [`output`] - Terminal output for the CLI
//!
//! # Design
//!
//! Nothing here decides validity. Panels and the presenter consume
//! [`crate::engine::ValidationResult`] and only shape it for display.

pub mod output;
pub mod panel;
pub mod warnings;
