//! core
//!
//! Core domain types, schemas, and configuration for metagate.
//!
//! # Modules
//!
//! - [`types`] - Strong types: ContentType, FieldKey, MetadataRecord, etc.
//! - [`schema`] - Registry of declared fields per content type
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - The field registry is built once and never mutated afterwards
//! - Content types form a closed set; unknown host types are carried, not
//!   rejected

pub mod config;
pub mod schema;
pub mod types;
