// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording widget host.

use sound_settings_core::{FieldId, WidgetPort, WidgetValue};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Last known state of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    /// Last value pushed by the screen.
    pub value: Option<WidgetValue>,
    /// Last summary pushed by the screen.
    pub summary: Option<String>,
    /// Enabled flag; controls start enabled.
    pub enabled: bool,
    /// Whether the screen registered as listener.
    pub listening: bool,
    /// How many times a value was pushed.
    pub value_updates: usize,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            value: None,
            summary: None,
            enabled: true,
            listening: false,
            value_updates: 0,
        }
    }
}

/// [`WidgetPort`] that records what the screen did to each control.
#[derive(Clone, Default)]
pub struct RecordingWidgets {
    inner: Arc<Mutex<BTreeMap<FieldId, WidgetState>>>,
}

impl RecordingWidgets {
    /// Create a host with no controls touched yet.
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut BTreeMap<FieldId, WidgetState>) -> R) -> R {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut inner)
    }

    /// Snapshot of `field`'s state.
    pub fn state(&self, field: FieldId) -> WidgetState {
        self.with(|m| m.get(&field).cloned().unwrap_or_default())
    }

    /// Last value pushed to `field`.
    pub fn value(&self, field: FieldId) -> Option<WidgetValue> {
        self.state(field).value
    }

    /// Last summary pushed to `field`.
    pub fn summary(&self, field: FieldId) -> Option<String> {
        self.state(field).summary
    }

    /// Enabled flag of `field`.
    pub fn is_enabled(&self, field: FieldId) -> bool {
        self.state(field).enabled
    }

    /// Whether the screen listens to `field`.
    pub fn is_listening(&self, field: FieldId) -> bool {
        self.state(field).listening
    }

    /// Simulate the user flipping a control before the screen sees it.
    pub fn user_sets(&self, field: FieldId, value: WidgetValue) {
        self.with(|m| m.entry(field).or_default().value = Some(value));
    }
}

impl WidgetPort for RecordingWidgets {
    fn set_value(&self, field: FieldId, value: &WidgetValue) {
        self.with(|m| {
            let state = m.entry(field).or_default();
            state.value = Some(value.clone());
            state.value_updates += 1;
        });
    }

    fn set_summary(&self, field: FieldId, summary: &str) {
        self.with(|m| m.entry(field).or_default().summary = Some(summary.to_string()));
    }

    fn set_enabled(&self, field: FieldId, enabled: bool) {
        self.with(|m| m.entry(field).or_default().enabled = enabled);
    }

    fn listen(&self, field: FieldId) {
        self.with(|m| m.entry(field).or_default().listening = true);
    }
}
