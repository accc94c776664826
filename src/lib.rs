//! metagate - Publish gating on type-specific content metadata
//!
//! Content records belong to one of a fixed set of content types, each of
//! which declares the metadata fields it carries. A record may not be
//! published until its metadata passes the rules for its type. metagate
//! validates the metadata and keeps the host editor's publish lock in step
//! with the result.
//!
//! # Architecture
//!
//! Leaf-first:
//!
//! - [`core`] - Domain types, the field registry, and configuration
//! - [`engine`] - Pure validation of a record against its content type
//! - [`ui`] - Warning presenter and panel data
//! - [`guard`] - Publish-lock state machine, metadata store, host traits
//! - [`session`] - Wires the pieces together for one record being edited
//! - [`cli`] - Command-line front-end (`mg`)
//!
//! # Correctness Invariants
//!
//! 1. Validation is a pure function of (content type, metadata record)
//! 2. Unknown content types never block publishing
//! 3. The host lock is only called when the lock state flips
//! 4. Host capability failures are returned, never swallowed

pub mod cli;
pub mod core;
pub mod engine;
pub mod guard;
pub mod session;
pub mod ui;
