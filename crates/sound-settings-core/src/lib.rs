// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sound and volume-dialog settings screen, independent of any widget toolkit.
//!
//! The screen is a declarative table of [`binding::FieldBinding`]s mapping UI
//! controls onto persisted scalar settings. [`screen::ScreenController`] seeds
//! the widgets on open, validates and persists every change, keeps the stroke
//! dependents enabled or disabled, and routes the two risky toggles through a
//! [`gate::ConfirmationGate`]. Persistence, widgets and dialogs are reached
//! through the narrow ports in [`store`] and [`widget`].

pub mod binding;
pub mod color;
pub mod entry;
pub mod gate;
pub mod prefs;
pub mod screen;
pub mod store;
pub mod stroke;
pub mod widget;

pub use binding::{Committed, FieldBinding, FieldId, ValidationError};
pub use color::Argb;
pub use gate::{ConfirmationGate, DialogRequest, DialogResponse, GateKind, GateOutcome};
pub use prefs::SoundPrefs;
pub use screen::{ChangeOutcome, Phase, ScreenController, ScreenError};
pub use store::{PropertyStore, SettingsStore, StoreError, UserScope};
pub use stroke::{StrokeEnablement, StrokeMode};
pub use widget::{Control, DialogPort, WidgetPort, WidgetValue};
