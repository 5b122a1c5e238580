// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ports the screen uses to drive host widgets and modal dialogs without
//! depending on a specific toolkit.

use crate::binding::FieldId;
use crate::gate::DialogRequest;
use std::fmt;

/// Kind of host control a field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Two-state switch.
    Switch,
    /// Single-choice list; values are the choices' string forms.
    List,
    /// Integer slider.
    Slider,
    /// Color picker.
    ColorPicker,
}

/// Value in a widget's native representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetValue {
    /// Switch state.
    Bool(bool),
    /// Slider position, or an integer straight from a picker.
    Int(i32),
    /// List value or color text.
    Text(String),
    /// The widget produced no value.
    Unset,
}

impl WidgetValue {
    /// Convenience for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

impl fmt::Display for WidgetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("on"),
            Self::Bool(false) => f.write_str("off"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Unset => f.write_str("-"),
        }
    }
}

/// Widget-facing port. Implementations map a [`FieldId`] to their own control.
pub trait WidgetPort {
    /// Show `value` in the control.
    fn set_value(&self, field: FieldId, value: &WidgetValue);
    /// Replace the control's summary line.
    fn set_summary(&self, field: FieldId, summary: &str);
    /// Enable or grey out the control.
    fn set_enabled(&self, field: FieldId, enabled: bool);
    /// Start forwarding the control's changes to the screen.
    fn listen(&self, field: FieldId);
}

/// Dialog-facing port; at most one dialog is shown at a time.
pub trait DialogPort {
    /// Present a modal confirmation dialog.
    fn show(&self, request: &DialogRequest);
    /// Close the dialog currently shown, if any.
    fn dismiss(&self);
}
