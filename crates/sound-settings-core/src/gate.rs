// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Confirm-before-disable flow for the two risky toggles.
//!
//! The gate is a pure state machine: `request` yields the dialog to present and
//! `resolve` yields what the screen must do. It never touches a store itself.

use crate::binding::FieldId;
use thiserror::Error;

/// Toggle whose disabling needs confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// Turning off the safe headset volume warning.
    SafeHeadsetVolume,
    /// Turning off the camera shutter sound.
    CameraSound,
}

impl GateKind {
    /// Gate guarding `field`, if any.
    pub const fn for_field(field: FieldId) -> Option<Self> {
        match field {
            FieldId::SafeHeadsetVolume => Some(Self::SafeHeadsetVolume),
            FieldId::CameraSound => Some(Self::CameraSound),
            _ => None,
        }
    }

    /// Field this gate guards.
    pub const fn field(self) -> FieldId {
        match self {
            Self::SafeHeadsetVolume => FieldId::SafeHeadsetVolume,
            Self::CameraSound => FieldId::CameraSound,
        }
    }

    const fn message(self) -> &'static str {
        match self {
            Self::SafeHeadsetVolume => {
                "Listening at high volume for long periods may damage your hearing. \
                 Disable the safe headset volume warning anyway?"
            }
            Self::CameraSound => {
                "Muting the camera shutter may be unlawful where you are. \
                 You are responsible for how the camera is used. Disable the shutter sound?"
            }
        }
    }
}

/// Everything a host needs to render the confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// Gate that asked.
    pub kind: GateKind,
    /// Dialog title.
    pub title: &'static str,
    /// Body text.
    pub message: &'static str,
    /// Positive button label.
    pub accept_label: &'static str,
    /// Negative button label.
    pub cancel_label: &'static str,
}

impl DialogRequest {
    fn for_kind(kind: GateKind) -> Self {
        Self {
            kind,
            title: "Attention",
            message: kind.message(),
            accept_label: "OK",
            cancel_label: "Cancel",
        }
    }
}

/// User's answer to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResponse {
    /// Positive button.
    Accept,
    /// Negative button.
    Cancel,
    /// Back gesture or tap outside; same outcome as [`DialogResponse::Cancel`].
    Dismiss,
}

/// What the screen must do once the dialog resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Persist the disabled value.
    CommitDisabled(GateKind),
    /// Leave the store alone and flip the widget back on.
    RestoreEnabled(GateKind),
}

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// No dialog showing.
    #[default]
    Idle,
    /// A dialog is showing for this kind.
    AwaitingResponse(GateKind),
}

/// Misuse of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    /// A second dialog was requested while one is showing.
    #[error("confirmation already pending for {0:?}")]
    AlreadyPending(GateKind),
    /// A response arrived with no dialog showing.
    #[error("no confirmation pending")]
    NotPending,
}

/// Two-outcome confirmation state machine.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    state: GateState,
}

impl ConfirmationGate {
    /// Create an idle gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Kind awaiting a response, if any.
    pub fn pending(&self) -> Option<GateKind> {
        match self.state {
            GateState::Idle => None,
            GateState::AwaitingResponse(kind) => Some(kind),
        }
    }

    /// Start a confirmation; returns the dialog to show.
    pub fn request(&mut self, kind: GateKind) -> Result<DialogRequest, GateError> {
        if let GateState::AwaitingResponse(current) = self.state {
            return Err(GateError::AlreadyPending(current));
        }
        self.state = GateState::AwaitingResponse(kind);
        Ok(DialogRequest::for_kind(kind))
    }

    /// Resolve the pending confirmation; the gate is idle afterwards.
    pub fn resolve(&mut self, response: DialogResponse) -> Result<GateOutcome, GateError> {
        let GateState::AwaitingResponse(kind) = self.state else {
            return Err(GateError::NotPending);
        };
        self.state = GateState::Idle;
        Ok(match response {
            DialogResponse::Accept => GateOutcome::CommitDisabled(kind),
            DialogResponse::Cancel | DialogResponse::Dismiss => GateOutcome::RestoreEnabled(kind),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn accept_commits_and_returns_to_idle() {
        let mut gate = ConfirmationGate::new();
        let dialog = gate.request(GateKind::SafeHeadsetVolume).unwrap();
        assert_eq!(dialog.kind, GateKind::SafeHeadsetVolume);
        assert_eq!(dialog.title, "Attention");
        assert_eq!(gate.pending(), Some(GateKind::SafeHeadsetVolume));

        let outcome = gate.resolve(DialogResponse::Accept).unwrap();
        assert_eq!(outcome, GateOutcome::CommitDisabled(GateKind::SafeHeadsetVolume));
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn cancel_and_dismiss_share_an_outcome() {
        for response in [DialogResponse::Cancel, DialogResponse::Dismiss] {
            let mut gate = ConfirmationGate::new();
            gate.request(GateKind::CameraSound).unwrap();
            assert_eq!(
                gate.resolve(response).unwrap(),
                GateOutcome::RestoreEnabled(GateKind::CameraSound)
            );
            assert_eq!(gate.pending(), None);
        }
    }

    #[test]
    fn second_request_is_refused_and_keeps_first() {
        let mut gate = ConfirmationGate::new();
        gate.request(GateKind::CameraSound).unwrap();
        assert_eq!(
            gate.request(GateKind::SafeHeadsetVolume),
            Err(GateError::AlreadyPending(GateKind::CameraSound))
        );
        assert_eq!(gate.pending(), Some(GateKind::CameraSound));
    }

    #[test]
    fn resolving_idle_gate_fails() {
        let mut gate = ConfirmationGate::new();
        assert_eq!(gate.resolve(DialogResponse::Accept), Err(GateError::NotPending));
    }

    #[test]
    fn only_the_two_switches_are_gated() {
        let gated: Vec<_> = FieldId::ALL
            .into_iter()
            .filter_map(GateKind::for_field)
            .map(GateKind::field)
            .collect();
        assert_eq!(gated, vec![FieldId::SafeHeadsetVolume, FieldId::CameraSound]);
    }
}
