//! session
//!
//! Editing session: the explicit initialization routine that wires the
//! registry, store, publish guard and pre-publish panel together.
//!
//! # Lifecycle
//!
//! 1. The host opens a record for editing and calls [`EditingSession::open`]
//!    with the record's content type, its current metadata and the host
//!    capabilities.
//! 2. Every field edit goes through [`EditingSession::set_field`], which
//!    checks the edit permission and the field declaration, writes the
//!    value and notifies the guard and the panel in that order.
//! 3. The session is dropped when editing ends. Dropping does not touch
//!    the host lock.
//!
//! # Example
//!
//! ```
//! use metagate::core::schema::SchemaRegistry;
//! use metagate::core::types::{ContentType, LockToken, MetadataRecord};
//! use metagate::guard::mock::MockPublishLock;
//! use metagate::guard::LockState;
//! use metagate::session::EditingSession;
//!
//! let registry = SchemaRegistry::builtin().unwrap();
//! let mock = MockPublishLock::new();
//! let mut session = EditingSession::open(
//!     &registry,
//!     ContentType::Post,
//!     MetadataRecord::new(),
//!     mock.clone(),
//!     true,
//!     LockToken::default(),
//! )
//! .unwrap();
//! assert_eq!(session.lock_state(), LockState::Locked);
//! assert!(!session.warnings().is_empty());
//!
//! session.set_field("excerpt", "Hello").unwrap();
//! assert_eq!(session.lock_state(), LockState::Unlocked);
//! assert!(session.warnings().is_empty());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::core::schema::SchemaRegistry;
use crate::core::types::{ContentType, FieldValue, LockToken, MetadataRecord};
use crate::engine::ValidationResult;
use crate::guard::host::{EditPermission, HostError, PublishLock};
use crate::guard::{LockState, MetadataStore, PublishGuard};
use crate::ui::panel::{PanelField, PrePublishPanel, SettingsPanel};

/// Errors from session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The user may not edit this record.
    #[error("not permitted to edit metadata on this {0}")]
    Forbidden(ContentType),

    /// The field is not declared for the record's content type.
    #[error("'{key}' is not a declared field of '{content_type}'")]
    UndeclaredField {
        content_type: ContentType,
        key: String,
    },

    /// A host capability failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

/// One record being edited.
pub struct EditingSession<'r, L: PublishLock + 'static> {
    registry: &'r SchemaRegistry,
    store: MetadataStore,
    guard: Rc<RefCell<PublishGuard<L>>>,
    panel: Rc<RefCell<PrePublishPanel>>,
    permission: Box<dyn EditPermission>,
}

impl<'r, L: PublishLock + 'static> EditingSession<'r, L> {
    /// Open a session for a record.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Host`] if the initial record is invalid and
    /// the host lock cannot be acquired.
    pub fn open(
        registry: &'r SchemaRegistry,
        content_type: ContentType,
        initial: MetadataRecord,
        lock: L,
        permission: impl EditPermission + 'static,
        token: LockToken,
    ) -> Result<Self, SessionError> {
        let guard = PublishGuard::attach(content_type.clone(), &initial, lock, token)?;
        let guard = Rc::new(RefCell::new(guard));
        let panel = Rc::new(RefCell::new(PrePublishPanel::new(&content_type, &initial)));

        let mut store = MetadataStore::new(content_type, initial);
        store.subscribe(guard.clone());
        store.subscribe(panel.clone());

        tracing::debug!(
            content_type = %store.content_type(),
            locked = guard.borrow().is_locked(),
            "editing session opened"
        );

        Ok(Self {
            registry,
            store,
            guard,
            panel,
            permission: Box::new(permission),
        })
    }

    /// Write one declared field.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Forbidden`] without edit permission
    /// - [`SessionError::UndeclaredField`] if the content type does not
    ///   declare `key`
    /// - [`SessionError::Host`] if an observer's host call fails; the value
    ///   is still written
    pub fn set_field(
        &mut self,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), SessionError> {
        let content_type = self.store.content_type();
        if !self.permission.can_edit() {
            return Err(SessionError::Forbidden(content_type.clone()));
        }
        if self.registry.field(content_type, key).is_none() {
            return Err(SessionError::UndeclaredField {
                content_type: content_type.clone(),
                key: key.to_string(),
            });
        }

        self.store.set_field(key, value)?;
        Ok(())
    }

    /// The content type of the record.
    pub fn content_type(&self) -> &ContentType {
        self.store.content_type()
    }

    /// The current record.
    pub fn record(&self) -> &MetadataRecord {
        self.store.record()
    }

    /// Current publish lock state.
    pub fn lock_state(&self) -> LockState {
        self.guard.borrow().state()
    }

    /// The most recent validation result.
    pub fn validation(&self) -> ValidationResult {
        self.guard.borrow().last_result().clone()
    }

    /// Pre-publish panel messages; empty when nothing should be shown.
    pub fn warnings(&self) -> Vec<String> {
        self.panel.borrow().messages().to_vec()
    }

    /// Settings panel inputs for the current record.
    pub fn settings(&self) -> Vec<PanelField> {
        SettingsPanel::render(self.registry, self.store.content_type(), self.store.record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::mock::MockPublishLock;

    fn open<'r>(
        registry: &'r SchemaRegistry,
        content_type: ContentType,
        record: MetadataRecord,
        mock: &MockPublishLock,
        can_edit: bool,
    ) -> EditingSession<'r, MockPublishLock> {
        EditingSession::open(
            registry,
            content_type,
            record,
            mock.clone(),
            can_edit,
            LockToken::default(),
        )
        .unwrap()
    }

    #[test]
    fn forbidden_without_permission() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let mut session = open(&registry, ContentType::Post, MetadataRecord::new(), &mock, false);

        assert_eq!(
            session.set_field("excerpt", "x"),
            Err(SessionError::Forbidden(ContentType::Post))
        );
        assert!(session.record().is_empty());
        assert_eq!(session.lock_state(), LockState::Locked);
    }

    #[test]
    fn undeclared_field_rejected() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let mut session = open(&registry, ContentType::Post, MetadataRecord::new(), &mock, true);

        assert!(matches!(
            session.set_field("event_date", "2024-01-01"),
            Err(SessionError::UndeclaredField { .. })
        ));
    }

    #[test]
    fn unregistered_type_accepts_no_writes() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let mut session = open(&registry, ContentType::Page, MetadataRecord::new(), &mock, true);

        assert_eq!(session.lock_state(), LockState::Unlocked);
        assert!(session.settings().is_empty());
        assert!(session.set_field("excerpt", "x").is_err());
        assert!(mock.operations().is_empty());
    }

    #[test]
    fn advocacy_link_flow() {
        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let initial = MetadataRecord::new().with("description", "Clean air");
        let mut session = open(&registry, ContentType::Advocacy, initial, &mock, true);
        assert_eq!(session.lock_state(), LockState::Unlocked);

        session.set_field("external_link", true).unwrap();
        assert_eq!(session.lock_state(), LockState::Locked);
        assert!(session
            .settings()
            .iter()
            .any(|f| f.key.as_str() == "external_url" && f.visible));

        session.set_field("external_url", "https://example.org").unwrap();
        assert_eq!(session.lock_state(), LockState::Unlocked);
        assert_eq!(mock.acquire_count(), 1);
        assert_eq!(mock.release_count(), 1);
    }

    #[test]
    fn host_failure_surfaces_from_set_field() {
        use crate::guard::mock::FailOn;

        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let mut session = open(
            &registry,
            ContentType::Post,
            MetadataRecord::new().with("excerpt", "x"),
            &mock,
            true,
        );
        mock.set_fail_on(FailOn::Acquire(HostError::Unavailable("lock".into())));

        let err = session.set_field("excerpt", "").unwrap_err();
        assert!(matches!(err, SessionError::Host(HostError::Unavailable(_))));
        assert_eq!(session.lock_state(), LockState::Unlocked);
        assert_eq!(session.record().text("excerpt"), Some(""));
    }

    #[test]
    fn failed_lock_still_refreshes_warnings() {
        use crate::guard::mock::FailOn;

        let registry = SchemaRegistry::builtin().unwrap();
        let mock = MockPublishLock::new();
        let mut session = open(
            &registry,
            ContentType::Post,
            MetadataRecord::new().with("excerpt", "x"),
            &mock,
            true,
        );
        assert!(session.warnings().is_empty());
        mock.set_fail_on(FailOn::Acquire(HostError::Unavailable("lock".into())));

        assert!(session.set_field("excerpt", "").is_err());
        assert!(!session.validation().is_valid);
        assert_eq!(session.validation().reasons, ["excerpt is required"]);
        assert!(!session.warnings().is_empty());
        assert_eq!(session.lock_state(), LockState::Unlocked);
    }
}
