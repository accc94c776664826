//! guard::mock
//!
//! Mock publish lock for deterministic testing.
//!
//! # Design
//!
//! The mock records every acquire/release call and tracks which tokens are
//! currently held, mirroring an idempotent host. It can be configured to
//! fail a specific operation to exercise error propagation.
//!
//! Clones share state, so a test can hand one clone to a
//! [`super::PublishGuard`] and inspect the other.
//!
//! # Example
//!
//! ```
//! use metagate::core::types::LockToken;
//! use metagate::guard::host::PublishLock;
//! use metagate::guard::mock::{MockOperation, MockPublishLock};
//!
//! let mock = MockPublishLock::new();
//! let mut handle = mock.clone();
//! let token = LockToken::default();
//!
//! handle.acquire(&token).unwrap();
//! assert!(mock.is_held(&token));
//! assert_eq!(mock.operations(), vec![MockOperation::Acquire(token)]);
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::host::{HostError, PublishLock};
use crate::core::types::LockToken;

/// Mock publish lock for testing.
#[derive(Debug, Clone, Default)]
pub struct MockPublishLock {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockLockInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockLockInner {
    /// Tokens currently held.
    held: HashSet<LockToken>,
    /// Operation to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail acquire with the given error.
    Acquire(HostError),
    /// Fail release with the given error.
    Release(HostError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Acquire(LockToken),
    Release(LockToken),
}

impl MockPublishLock {
    /// Create a mock with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail on a specific operation.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.state().fail_on = Some(fail_on);
        self
    }

    /// Fail a specific operation from now on, through any clone.
    pub fn set_fail_on(&self, fail_on: FailOn) {
        self.state().fail_on = Some(fail_on);
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        self.state().fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.state().operations.clone()
    }

    /// Clear recorded operations.
    pub fn clear_operations(&self) {
        self.state().operations.clear();
    }

    /// Whether `token` is currently held.
    pub fn is_held(&self, token: &LockToken) -> bool {
        self.state().held.contains(token)
    }

    /// Number of release calls recorded.
    pub fn release_count(&self) -> usize {
        self.state()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Release(_)))
            .count()
    }

    /// Number of acquire calls recorded.
    pub fn acquire_count(&self) -> usize {
        self.state()
            .operations
            .iter()
            .filter(|op| matches!(op, MockOperation::Acquire(_)))
            .count()
    }

    fn state(&self) -> MutexGuard<'_, MockLockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PublishLock for MockPublishLock {
    fn acquire(&mut self, token: &LockToken) -> Result<(), HostError> {
        let mut inner = self.state();
        inner.operations.push(MockOperation::Acquire(token.clone()));
        if let Some(FailOn::Acquire(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        inner.held.insert(token.clone());
        Ok(())
    }

    fn release(&mut self, token: &LockToken) -> Result<(), HostError> {
        let mut inner = self.state();
        inner.operations.push(MockOperation::Release(token.clone()));
        if let Some(FailOn::Release(e)) = &inner.fail_on {
            return Err(e.clone());
        }
        inner.held.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_idempotent() {
        let mock = MockPublishLock::new();
        let mut handle = mock.clone();
        let token = LockToken::default();

        handle.release(&token).unwrap();
        handle.acquire(&token).unwrap();
        handle.acquire(&token).unwrap();
        assert!(mock.is_held(&token));

        handle.release(&token).unwrap();
        assert!(!mock.is_held(&token));
        assert_eq!(mock.acquire_count(), 2);
        assert_eq!(mock.release_count(), 2);
    }

    #[test]
    fn fail_on_acquire_records_and_fails() {
        let err = HostError::Unavailable("lockPostSaving".into());
        let mock = MockPublishLock::new().fail_on(FailOn::Acquire(err.clone()));
        let mut handle = mock.clone();
        let token = LockToken::default();

        assert_eq!(handle.acquire(&token), Err(err));
        assert!(!mock.is_held(&token));
        assert_eq!(mock.acquire_count(), 1);

        mock.clear_fail_on();
        handle.acquire(&token).unwrap();
        assert!(mock.is_held(&token));
    }

    #[test]
    fn clear_operations() {
        let mock = MockPublishLock::new();
        let mut handle = mock.clone();
        handle.acquire(&LockToken::default()).unwrap();
        mock.clear_operations();
        assert!(mock.operations().is_empty());
    }
}
