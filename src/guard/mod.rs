//! guard
//!
//! Publish guard: keeps the host's publish lock in step with validation.
//!
//! # State Machine
//!
//! ```text
//!              invalid / acquire
//!   Unlocked ───────────────────▶ Locked
//!       ▲                           │
//!       └───────────────────────────┘
//!              valid / release
//! ```
//!
//! The initial state is `Locked` when the record is invalid on attach (the
//! lock is acquired once), `Unlocked` otherwise (no host call). After that,
//! every metadata change recomputes validity and the host is called only
//! when the state actually flips. There is no terminal state: the guard
//! lives as long as the editing session.
//!
//! # Invariants
//!
//! - The host is called at most once per notification
//! - A failed host call leaves the state unchanged and is returned to the
//!   caller
//! - Acquire and release always use the same token
//!
//! # Modules
//!
//! - [`host`] - Host capability traits and errors
//! - [`store`] - Metadata store that notifies observers on mutation
//! - [`mock`] - Recording publish lock for tests

pub mod host;
pub mod mock;
pub mod store;

pub use host::{EditPermission, HostError, MetadataObserver, PublishLock};
pub use store::MetadataStore;

use serde::Serialize;

use crate::core::types::{ContentType, LockToken, MetadataRecord};
use crate::engine::{validate, ValidationResult};

/// Publish lock state as seen by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LockState {
    Unlocked,
    Locked,
}

impl std::fmt::Display for LockState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockState::Unlocked => write!(f, "unlocked"),
            LockState::Locked => write!(f, "locked"),
        }
    }
}

/// What a notification did to the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    /// Validity matched the current state; the host was not called.
    None,
    /// The lock was acquired.
    Locked,
    /// The lock was released.
    Unlocked,
}

/// Observes metadata changes and drives the host publish lock.
///
/// # Example
///
/// ```
/// use metagate::core::types::{ContentType, LockToken, MetadataRecord};
/// use metagate::guard::mock::MockPublishLock;
/// use metagate::guard::{LockState, PublishGuard, Transition};
///
/// let mock = MockPublishLock::new();
/// let mut guard = PublishGuard::attach(
///     ContentType::Post,
///     &MetadataRecord::new(),
///     mock.clone(),
///     LockToken::default(),
/// )
/// .unwrap();
/// assert_eq!(guard.state(), LockState::Locked);
///
/// let record = MetadataRecord::new().with("excerpt", "Hello");
/// let transition = guard.on_metadata_changed(&ContentType::Post, &record).unwrap();
/// assert_eq!(transition, Transition::Unlocked);
/// assert_eq!(mock.release_count(), 1);
/// ```
#[derive(Debug)]
pub struct PublishGuard<L> {
    lock: L,
    token: LockToken,
    state: LockState,
    last_result: ValidationResult,
}

impl<L: PublishLock> PublishGuard<L> {
    /// Attach a guard to a record opened for editing.
    ///
    /// # Errors
    ///
    /// Returns the host error if the initial record is invalid and the lock
    /// cannot be acquired.
    pub fn attach(
        content_type: ContentType,
        initial: &MetadataRecord,
        mut lock: L,
        token: LockToken,
    ) -> Result<Self, HostError> {
        let result = validate(&content_type, initial);
        let state = if result.is_valid {
            LockState::Unlocked
        } else {
            lock.acquire(&token)?;
            tracing::info!(%content_type, %token, "publish locked on attach");
            LockState::Locked
        };

        Ok(Self {
            lock,
            token,
            state,
            last_result: result,
        })
    }

    /// Recompute validity after a mutation and flip the lock if needed.
    ///
    /// # Errors
    ///
    /// Returns the host error from acquire/release. The state is not
    /// changed when the host call fails.
    pub fn on_metadata_changed(
        &mut self,
        content_type: &ContentType,
        record: &MetadataRecord,
    ) -> Result<Transition, HostError> {
        let result = validate(content_type, record);
        let is_valid = result.is_valid;
        // The result describes the record even if the host call below fails.
        self.last_result = result;

        let transition = match (self.state, is_valid) {
            (LockState::Unlocked, false) => {
                self.lock.acquire(&self.token)?;
                self.state = LockState::Locked;
                Transition::Locked
            }
            (LockState::Locked, true) => {
                self.lock.release(&self.token)?;
                self.state = LockState::Unlocked;
                Transition::Unlocked
            }
            _ => Transition::None,
        };

        if transition != Transition::None {
            tracing::info!(
                %content_type,
                token = %self.token,
                state = %self.state,
                "publish lock transition"
            );
        }

        Ok(transition)
    }

    /// Current lock state.
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Whether publishing is currently blocked.
    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    /// The result of the most recent validation.
    pub fn last_result(&self) -> &ValidationResult {
        &self.last_result
    }
}

impl<L: PublishLock> MetadataObserver for PublishGuard<L> {
    fn metadata_changed(
        &mut self,
        content_type: &ContentType,
        record: &MetadataRecord,
    ) -> Result<(), HostError> {
        self.on_metadata_changed(content_type, record).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{FailOn, MockOperation, MockPublishLock};
    use super::*;

    fn attach(record: &MetadataRecord, mock: &MockPublishLock) -> PublishGuard<MockPublishLock> {
        PublishGuard::attach(
            ContentType::Post,
            record,
            mock.clone(),
            LockToken::default(),
        )
        .unwrap()
    }

    #[test]
    fn valid_attach_makes_no_host_call() {
        let mock = MockPublishLock::new();
        let guard = attach(&MetadataRecord::new().with("excerpt", "x"), &mock);
        assert_eq!(guard.state(), LockState::Unlocked);
        assert!(mock.operations().is_empty());
    }

    #[test]
    fn invalid_attach_acquires_once() {
        let mock = MockPublishLock::new();
        let guard = attach(&MetadataRecord::new(), &mock);
        assert!(guard.is_locked());
        assert_eq!(
            mock.operations(),
            vec![MockOperation::Acquire(LockToken::default())]
        );
        assert_eq!(guard.last_result().reasons, ["excerpt is required"]);
    }

    #[test]
    fn becoming_invalid_acquires() {
        let mock = MockPublishLock::new();
        let mut guard = attach(&MetadataRecord::new().with("excerpt", "x"), &mock);

        let t = guard
            .on_metadata_changed(&ContentType::Post, &MetadataRecord::new().with("excerpt", ""))
            .unwrap();
        assert_eq!(t, Transition::Locked);
        assert_eq!(mock.acquire_count(), 1);

        let t = guard
            .on_metadata_changed(&ContentType::Post, &MetadataRecord::new().with("excerpt", " "))
            .unwrap();
        assert_eq!(t, Transition::None);
        assert_eq!(mock.acquire_count(), 1);
    }

    #[test]
    fn failed_release_keeps_locked() {
        let mock = MockPublishLock::new();
        let mut guard = attach(&MetadataRecord::new(), &mock);
        mock.set_fail_on(FailOn::Release(HostError::Unavailable(
            "unlockPostSaving".into(),
        )));

        let err = guard
            .on_metadata_changed(&ContentType::Post, &MetadataRecord::new().with("excerpt", "x"))
            .unwrap_err();
        assert!(matches!(err, HostError::Unavailable(_)));
        assert_eq!(guard.state(), LockState::Locked);
        assert!(guard.last_result().is_valid);

        mock.clear_fail_on();
        let t = guard
            .on_metadata_changed(&ContentType::Post, &MetadataRecord::new().with("excerpt", "x"))
            .unwrap();
        assert_eq!(t, Transition::Unlocked);
    }

    #[test]
    fn failed_attach_propagates() {
        let mock = MockPublishLock::new().fail_on(FailOn::Acquire(HostError::Rejected {
            operation: "lock".into(),
            message: "denied".into(),
        }));
        let result = PublishGuard::attach(
            ContentType::Post,
            &MetadataRecord::new(),
            mock,
            LockToken::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn content_type_switch_is_revalidated() {
        let mock = MockPublishLock::new();
        let mut guard = attach(&MetadataRecord::new(), &mock);

        // Same empty record, but chapters has no rules.
        let t = guard
            .on_metadata_changed(&ContentType::Chapters, &MetadataRecord::new())
            .unwrap();
        assert_eq!(t, Transition::Unlocked);
    }
}
