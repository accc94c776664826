//! ui::panel
//!
//! Data behind the editor's two panels.
//!
//! # Panels
//!
//! - [`SettingsPanel`] - ordered inputs for the record's declared fields,
//!   with current values and whether each input is shown
//! - [`PrePublishPanel`] - the presenter's messages, kept current by
//!   observing the metadata store
//!
//! Rendering is the host's job; these types only carry what crosses the
//! boundary.

use serde::Serialize;

use super::warnings::present;
use crate::core::schema::{Control, SchemaRegistry};
use crate::core::types::{ContentType, FieldKey, FieldValue, MetadataRecord, ValueType};
use crate::engine::validate;
use crate::guard::host::{HostError, MetadataObserver};

/// One input in the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelField {
    pub key: FieldKey,
    pub label: String,
    pub control: Control,
    pub value_type: ValueType,
    /// Current value, or the type's empty value when absent.
    pub value: FieldValue,
    /// Whether the input is shown.
    pub visible: bool,
}

/// Settings panel for a record.
pub struct SettingsPanel;

impl SettingsPanel {
    /// Build the ordered inputs for a record.
    ///
    /// Unregistered types have no inputs.
    ///
    /// ```
    /// use metagate::core::schema::SchemaRegistry;
    /// use metagate::core::types::{ContentType, MetadataRecord};
    /// use metagate::ui::panel::SettingsPanel;
    ///
    /// let registry = SchemaRegistry::builtin().unwrap();
    /// let fields = SettingsPanel::render(&registry, &ContentType::Advocacy, &MetadataRecord::new());
    /// let visible: Vec<_> = fields.iter().filter(|f| f.visible).map(|f| f.key.as_str()).collect();
    /// assert_eq!(visible, ["description", "external_link"]);
    /// ```
    pub fn render(
        registry: &SchemaRegistry,
        content_type: &ContentType,
        record: &MetadataRecord,
    ) -> Vec<PanelField> {
        registry
            .fields_or_empty(content_type)
            .iter()
            .map(|spec| PanelField {
                key: spec.key.clone(),
                label: spec.label.clone(),
                control: spec.control,
                value_type: spec.value_type,
                value: record
                    .get(spec.key.as_str())
                    .cloned()
                    .unwrap_or_else(|| empty_value(spec.value_type)),
                visible: spec
                    .visible_when
                    .as_ref()
                    .map_or(true, |toggle| record.is_truthy(toggle.as_str())),
            })
            .collect()
    }
}

fn empty_value(value_type: ValueType) -> FieldValue {
    match value_type {
        ValueType::String => FieldValue::Text(String::new()),
        ValueType::Boolean => FieldValue::Bool(false),
    }
}

/// Pre-publish panel contents, refreshed on every metadata change.
#[derive(Debug, Clone, Default)]
pub struct PrePublishPanel {
    messages: Vec<String>,
}

impl PrePublishPanel {
    /// Panel primed with the messages for the initial record.
    pub fn new(content_type: &ContentType, record: &MetadataRecord) -> Self {
        let mut panel = Self::default();
        panel.refresh(content_type, record);
        panel
    }

    /// Recompute the messages.
    pub fn refresh(&mut self, content_type: &ContentType, record: &MetadataRecord) {
        self.messages = present(&validate(content_type, record), content_type);
    }

    /// Messages to display; empty means the panel shows nothing.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl MetadataObserver for PrePublishPanel {
    fn metadata_changed(
        &mut self,
        content_type: &ContentType,
        record: &MetadataRecord,
    ) -> Result<(), HostError> {
        self.refresh(content_type, record);
        Ok(())
    }
}
