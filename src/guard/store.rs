//! guard::store
//!
//! In-session metadata store with synchronous change notification.
//!
//! # Design
//!
//! The store holds the record being edited and a fixed list of observers.
//! Each mutation updates the record and then notifies every observer in
//! subscription order, on the calling thread, before returning. Every
//! observer sees every mutation; if any of them fail, the first error is
//! returned after delivery completes. The mutation itself is kept, since
//! the host has already applied it.

use std::cell::RefCell;
use std::rc::Rc;

use super::host::{HostError, MetadataObserver};
use crate::core::types::{ContentType, FieldValue, MetadataRecord};

/// Shared handle to an observer.
pub type SharedObserver = Rc<RefCell<dyn MetadataObserver>>;

/// Holds the current record and notifies subscribers on every mutation.
pub struct MetadataStore {
    content_type: ContentType,
    record: MetadataRecord,
    observers: Vec<SharedObserver>,
}

impl MetadataStore {
    /// Create a store for a record opened for editing.
    pub fn new(content_type: ContentType, record: MetadataRecord) -> Self {
        Self {
            content_type,
            record,
            observers: Vec::new(),
        }
    }

    /// Add an observer. Observers are notified in the order they subscribed.
    pub fn subscribe(&mut self, observer: SharedObserver) {
        self.observers.push(observer);
    }

    /// Write one field and notify observers.
    ///
    /// # Errors
    ///
    /// Returns the first observer error.
    pub fn set_field(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), HostError> {
        let key = key.into();
        let value = value.into();
        tracing::debug!(content_type = %self.content_type, %key, %value, "metadata field set");
        self.record.set(key, value);
        self.notify()
    }

    /// Notify every observer of the current record.
    ///
    /// # Errors
    ///
    /// Returns the first observer error, once all observers have run.
    pub fn notify(&self) -> Result<(), HostError> {
        let mut first_error = None;
        for observer in &self.observers {
            if let Err(e) = observer
                .borrow_mut()
                .metadata_changed(&self.content_type, &self.record)
            {
                tracing::warn!(content_type = %self.content_type, error = %e, "observer failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// The content type of the record being edited.
    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// The current record.
    pub fn record(&self) -> &MetadataRecord {
        &self.record
    }
}

impl std::fmt::Debug for MetadataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataStore")
            .field("content_type", &self.content_type)
            .field("record", &self.record)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer that records what it saw.
    #[derive(Default)]
    struct Recorder {
        label: &'static str,
        log: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl MetadataObserver for Recorder {
        fn metadata_changed(
            &mut self,
            content_type: &ContentType,
            record: &MetadataRecord,
        ) -> Result<(), HostError> {
            self.log
                .borrow_mut()
                .push(format!("{}:{}:{}", self.label, content_type, record.len()));
            if self.fail {
                return Err(HostError::Unavailable(self.label.to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn notifies_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = MetadataStore::new(ContentType::Post, MetadataRecord::new());
        store.subscribe(Rc::new(RefCell::new(Recorder {
            label: "a",
            log: log.clone(),
            fail: false,
        })));
        store.subscribe(Rc::new(RefCell::new(Recorder {
            label: "b",
            log: log.clone(),
            fail: false,
        })));

        store.set_field("excerpt", "x").unwrap();
        assert_eq!(*log.borrow(), vec!["a:post:1", "b:post:1"]);
        assert_eq!(store.record().text("excerpt"), Some("x"));
    }

    #[test]
    fn failing_observer_does_not_starve_later_ones() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = MetadataStore::new(ContentType::Events, MetadataRecord::new());
        store.subscribe(Rc::new(RefCell::new(Recorder {
            label: "a",
            log: log.clone(),
            fail: true,
        })));
        store.subscribe(Rc::new(RefCell::new(Recorder {
            label: "b",
            log: log.clone(),
            fail: true,
        })));
        store.subscribe(Rc::new(RefCell::new(Recorder {
            label: "c",
            log: log.clone(),
            fail: false,
        })));

        let err = store.set_field("event_date", "2024-01-01").unwrap_err();
        assert_eq!(err, HostError::Unavailable("a".into()));
        assert_eq!(*log.borrow(), vec!["a:events:1", "b:events:1", "c:events:1"]);
        assert!(store.record().is_truthy("event_date"));
    }

    #[test]
    fn no_observers_is_fine() {
        let mut store = MetadataStore::new(ContentType::Chapters, MetadataRecord::new());
        store.set_field("is_popup", true).unwrap();
        assert!(store.record().is_truthy("is_popup"));
    }
}
