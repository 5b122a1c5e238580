// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Screen controller: seeds widgets on open, routes every widget change through
//! its binding, keeps stroke dependents in sync, and drives the confirmation gate.

use crate::binding::{
    sound_screen_bindings, CommitError, Committed, FieldBinding, FieldId, ValidationError,
};
use crate::gate::{ConfirmationGate, DialogResponse, GateError, GateKind, GateOutcome};
use crate::store::{PropertyStore, SettingsStore, StoreError};
use crate::stroke::StrokeEnablement;
use crate::widget::{DialogPort, WidgetPort, WidgetValue};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Declarative resource listing the controls this screen binds.
pub const SCREEN_RESOURCE: &str = "slim_sound_settings";

/// Observability category reported by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricsCategory {
    /// Generic application settings.
    Application,
}

/// Category this screen reports under.
pub const METRICS_CATEGORY: MetricsCategory = MetricsCategory::Application;

/// Lifecycle of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed, widgets not yet seeded.
    #[default]
    Uninitialized,
    /// Seeding widgets from the store.
    Initializing,
    /// Accepting widget changes.
    Ready,
    /// Torn down.
    Disposed,
}

/// Error surfaced to the host screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// `initialize` called twice or after disposal.
    #[error("screen cannot initialize while {0:?}")]
    AlreadyInitialized(Phase),
    /// Change or dialog response outside `Ready`.
    #[error("screen is not ready ({0:?})")]
    NotReady(Phase),
    /// Input arrived while the confirmation modal is up.
    #[error("confirmation pending for {0:?}")]
    ConfirmationPending(GateKind),
    /// Field has no binding on this screen.
    #[error("field {0} is not bound on this screen")]
    Unbound(FieldId),
    /// Raw value rejected; nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Confirmation flow misuse.
    #[error(transparent)]
    Gate(#[from] GateError),
}

impl From<CommitError> for ScreenError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::Validation(e) => Self::Validation(e),
            CommitError::Store(e) => Self::Store(e),
        }
    }
}

/// What happened to a widget change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// Persisted.
    Committed(Committed),
    /// A gated toggle was switched off; the dialog is showing.
    AwaitingConfirmation(GateKind),
}

/// Orchestrates the sound screen over its ports.
pub struct ScreenController {
    settings: Box<dyn SettingsStore>,
    properties: Box<dyn PropertyStore>,
    widgets: Box<dyn WidgetPort>,
    dialogs: Box<dyn DialogPort>,
    bindings: Vec<FieldBinding>,
    gate: ConfirmationGate,
    phase: Phase,
}

impl ScreenController {
    /// Create a controller over the sound screen's bindings.
    pub fn new(
        settings: Box<dyn SettingsStore>,
        properties: Box<dyn PropertyStore>,
        widgets: Box<dyn WidgetPort>,
        dialogs: Box<dyn DialogPort>,
    ) -> Self {
        Self {
            settings,
            properties,
            widgets,
            dialogs,
            bindings: sound_screen_bindings(),
            gate: ConfirmationGate::new(),
            phase: Phase::Uninitialized,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Bindings in declaration order.
    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Gate kind awaiting a dialog response, if any.
    pub fn pending(&self) -> Option<GateKind> {
        self.gate.pending()
    }

    /// Read every field, seed its widget and start listening.
    ///
    /// On a store failure the screen returns to `Uninitialized` so the host may retry.
    pub fn initialize(&mut self) -> Result<(), ScreenError> {
        if self.phase != Phase::Uninitialized {
            return Err(ScreenError::AlreadyInitialized(self.phase));
        }
        self.phase = Phase::Initializing;
        match self.seed_widgets() {
            Ok(()) => {
                self.phase = Phase::Ready;
                info!(resource = SCREEN_RESOURCE, fields = self.bindings.len(), "screen ready");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "screen initialization failed");
                self.phase = Phase::Uninitialized;
                Err(err)
            }
        }
    }

    /// Reads every field before touching a widget, so a failed read seeds nothing.
    fn seed_widgets(&self) -> Result<(), ScreenError> {
        let values = self
            .bindings
            .iter()
            .map(|b| b.read_stored(self.settings.as_ref(), self.properties.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let mut with_dependents = Vec::new();
        for (binding, stored) in self.bindings.iter().zip(values) {
            self.widgets.set_value(binding.id, &binding.display(stored));
            if let Some(summary) = binding.summary(stored) {
                self.widgets.set_summary(binding.id, &summary);
            }
            self.widgets.listen(binding.id);
            if !binding.dependents.is_empty() {
                with_dependents.push((binding, stored));
            }
        }
        for (binding, stored) in with_dependents {
            self.apply_dependents(binding, stored);
        }
        Ok(())
    }

    fn apply_dependents(&self, binding: &FieldBinding, stored: i32) {
        let rule = StrokeEnablement::for_stored(stored);
        for &dep in &binding.dependents {
            self.widgets.set_enabled(dep, rule.allows(dep));
        }
        debug!(field = %binding.id, stored, ?rule, "dependents updated");
    }

    fn index_of(&self, field: FieldId) -> Result<usize, ScreenError> {
        self.bindings
            .iter()
            .position(|b| b.id == field)
            .ok_or(ScreenError::Unbound(field))
    }

    /// Single entry point for widget value changes.
    pub fn on_change(
        &mut self,
        field: FieldId,
        raw: WidgetValue,
    ) -> Result<ChangeOutcome, ScreenError> {
        if self.phase != Phase::Ready {
            return Err(ScreenError::NotReady(self.phase));
        }
        if let Some(kind) = self.gate.pending() {
            warn!(%field, ?kind, "change ignored while confirmation pending");
            return Err(ScreenError::ConfirmationPending(kind));
        }
        let binding = &self.bindings[self.index_of(field)?];
        let raw = normalize(field, raw);

        if let Some(kind) = GateKind::for_field(field) {
            let stored = binding
                .validate(&raw)
                .inspect_err(|err| warn!(%field, error = %err, "rejected change"))?;
            if stored == 0 {
                let current =
                    binding.read_stored(self.settings.as_ref(), self.properties.as_ref())?;
                if current != 0 {
                    let request = self.gate.request(kind)?;
                    info!(%field, ?kind, "confirmation requested");
                    self.dialogs.show(&request);
                    return Ok(ChangeOutcome::AwaitingConfirmation(kind));
                }
                debug!(%field, "already disabled; committing without confirmation");
            }
        }

        let committed = binding
            .commit(&raw, self.settings.as_ref(), self.properties.as_ref())
            .inspect_err(|err| warn!(%field, error = %err, "rejected change"))?;
        self.widgets.set_value(field, &committed.display);
        if let Some(summary) = &committed.summary {
            self.widgets.set_summary(field, summary);
        }
        if !binding.dependents.is_empty() {
            self.apply_dependents(binding, committed.stored);
        }
        Ok(ChangeOutcome::Committed(committed))
    }

    /// Apply the user's answer to the pending confirmation dialog.
    pub fn on_dialog_response(
        &mut self,
        response: DialogResponse,
    ) -> Result<GateOutcome, ScreenError> {
        if self.phase != Phase::Ready {
            return Err(ScreenError::NotReady(self.phase));
        }
        let outcome = self.gate.resolve(response)?;
        self.apply_outcome(outcome)?;
        Ok(outcome)
    }

    fn apply_outcome(&self, outcome: GateOutcome) -> Result<(), ScreenError> {
        match outcome {
            GateOutcome::CommitDisabled(kind) => {
                let field = kind.field();
                let binding = &self.bindings[self.index_of(field)?];
                match binding.commit(
                    &WidgetValue::Bool(false),
                    self.settings.as_ref(),
                    self.properties.as_ref(),
                ) {
                    Ok(committed) => {
                        info!(%field, "disable confirmed");
                        self.widgets.set_value(field, &committed.display);
                        Ok(())
                    }
                    Err(err) => {
                        warn!(%field, error = %err, "confirmed disable failed; restoring");
                        self.widgets.set_value(field, &WidgetValue::Bool(true));
                        Err(err.into())
                    }
                }
            }
            GateOutcome::RestoreEnabled(kind) => {
                info!(field = %kind.field(), "disable cancelled");
                self.widgets.set_value(kind.field(), &WidgetValue::Bool(true));
                Ok(())
            }
        }
    }

    /// Tear the screen down. A pending confirmation is dismissed first.
    pub fn dispose(&mut self) -> Result<(), ScreenError> {
        if self.phase == Phase::Disposed {
            return Ok(());
        }
        if self.gate.pending().is_some() {
            self.dialogs.dismiss();
            let outcome = self.gate.resolve(DialogResponse::Dismiss)?;
            self.apply_outcome(outcome)?;
        }
        self.phase = Phase::Disposed;
        debug!(resource = SCREEN_RESOURCE, "screen disposed");
        Ok(())
    }
}

/// A zero or absent dash width always persists as exactly `0`.
fn normalize(field: FieldId, raw: WidgetValue) -> WidgetValue {
    if field != FieldId::DashWidth {
        return raw;
    }
    let blank = match &raw {
        WidgetValue::Unset | WidgetValue::Int(0) | WidgetValue::Bool(false) => true,
        WidgetValue::Text(s) => s.trim().is_empty(),
        WidgetValue::Int(_) | WidgetValue::Bool(true) => false,
    };
    if blank {
        WidgetValue::Int(0)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn blank_dash_width_becomes_zero() {
        for raw in [
            WidgetValue::Unset,
            WidgetValue::Int(0),
            WidgetValue::Bool(false),
            WidgetValue::text("  "),
        ] {
            assert_eq!(normalize(FieldId::DashWidth, raw), WidgetValue::Int(0));
        }
        assert_eq!(normalize(FieldId::DashWidth, WidgetValue::Int(6)), WidgetValue::Int(6));
    }

    #[test]
    fn other_fields_are_untouched() {
        assert_eq!(normalize(FieldId::DashGap, WidgetValue::Unset), WidgetValue::Unset);
    }
}
