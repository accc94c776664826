//! guard::host
//!
//! Capabilities the host editing platform provides.
//!
//! # Design
//!
//! The host is injected, never reached through globals. Each capability is
//! a small trait so tests can substitute [`super::mock::MockPublishLock`]
//! and friends for a live editor.
//!
//! Lock acquire/release are expected to be idempotent on the host side.
//! A failure from either is an integration fault: it is returned to the
//! caller unchanged and nothing here retries or degrades.

use thiserror::Error;

use crate::core::types::{ContentType, LockToken, MetadataRecord};

/// Errors reported by host capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The capability is not provided by this host.
    #[error("host capability unavailable: {0}")]
    Unavailable(String),

    /// The host refused the request.
    #[error("host rejected {operation}: {message}")]
    Rejected {
        /// Operation that was refused.
        operation: String,
        /// Host-provided explanation.
        message: String,
    },
}

/// The host's publish-blocking mechanism.
pub trait PublishLock {
    /// Block publishing under `token`.
    fn acquire(&mut self, token: &LockToken) -> Result<(), HostError>;

    /// Lift the block held under `token`.
    fn release(&mut self, token: &LockToken) -> Result<(), HostError>;
}

impl<L: PublishLock + ?Sized> PublishLock for Box<L> {
    fn acquire(&mut self, token: &LockToken) -> Result<(), HostError> {
        (**self).acquire(token)
    }

    fn release(&mut self, token: &LockToken) -> Result<(), HostError> {
        (**self).release(token)
    }
}

/// The host's "may edit this record" check.
pub trait EditPermission {
    /// Whether the current user may write metadata on this record.
    fn can_edit(&self) -> bool;
}

impl EditPermission for bool {
    fn can_edit(&self) -> bool {
        *self
    }
}

/// Subscriber notified after every metadata mutation.
pub trait MetadataObserver {
    /// Called synchronously with the record as it is after the mutation.
    fn metadata_changed(
        &mut self,
        content_type: &ContentType,
        record: &MetadataRecord,
    ) -> Result<(), HostError>;
}
