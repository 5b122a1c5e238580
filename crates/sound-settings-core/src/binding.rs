// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Field bindings: the declarative table tying each screen control to the
//! setting it edits, plus load/validate/commit for a single field.

use crate::color::{Argb, ParseColorError};
use crate::entry::{self, Scope, SettingEntry, SettingKind};
use crate::store::{
    bool_property_value, parse_bool_property, PropertyStore, SettingsStore, StoreError, UserScope,
};
use crate::stroke::StrokeMode;
use crate::widget::{Control, WidgetValue};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Identity of a control on the sound screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    /// Safe headset volume switch (gated).
    SafeHeadsetVolume,
    /// "Less notification sounds" threshold list.
    NotificationThreshold,
    /// Camera shutter sound switch (gated).
    CameraSound,
    /// Volume dialog transparency slider.
    DialogAlpha,
    /// Stroke mode list.
    StrokeMode,
    /// Stroke color picker.
    StrokeColor,
    /// Stroke thickness slider.
    StrokeThickness,
    /// Corner radius slider.
    CornerRadius,
    /// Dash width slider.
    DashWidth,
    /// Dash gap slider.
    DashGap,
}

impl FieldId {
    /// Every field, in declaration order.
    pub const ALL: [FieldId; 10] = [
        FieldId::SafeHeadsetVolume,
        FieldId::NotificationThreshold,
        FieldId::CameraSound,
        FieldId::DialogAlpha,
        FieldId::StrokeMode,
        FieldId::StrokeColor,
        FieldId::StrokeThickness,
        FieldId::CornerRadius,
        FieldId::DashWidth,
        FieldId::DashGap,
    ];

    /// Control key as declared in the screen resource.
    pub const fn key(self) -> &'static str {
        match self {
            Self::SafeHeadsetVolume => "safe_headset_volume",
            Self::NotificationThreshold => "less_notification_sounds",
            Self::CameraSound => "camera_sounds",
            Self::DialogAlpha => "transparent_volume_dialog",
            Self::StrokeMode => "volume_dialog_stroke",
            Self::StrokeColor => "volume_dialog_stroke_color",
            Self::StrokeThickness => "volume_dialog_stroke_thickness",
            Self::CornerRadius => "volume_dialog_corner_radius",
            Self::DashWidth => "volume_dialog_dash_width",
            Self::DashGap => "volume_dialog_dash_gap",
        }
    }

    /// Setting persisted by this control.
    pub const fn entry(self) -> SettingEntry {
        match self {
            Self::SafeHeadsetVolume => entry::SAFE_HEADSET_VOLUME,
            Self::NotificationThreshold => entry::NOTIFICATION_THRESHOLD,
            Self::CameraSound => entry::CAMERA_SOUND,
            Self::DialogAlpha => entry::DIALOG_ALPHA,
            Self::StrokeMode => entry::STROKE_MODE,
            Self::StrokeColor => entry::STROKE_COLOR,
            Self::StrokeThickness => entry::STROKE_THICKNESS,
            Self::CornerRadius => entry::CORNER_RADIUS,
            Self::DashWidth => entry::DASH_WIDTH,
            Self::DashGap => entry::DASH_GAP,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Control key did not name a field on this screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A raw widget value that cannot be stored for its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Text that does not parse as an integer.
    #[error("{field}: '{input}' is not an integer")]
    NotAnInteger {
        /// Field being changed.
        field: FieldId,
        /// Offending input.
        input: String,
    },
    /// Integer or choice index outside the declared bounds.
    #[error("{field}: {value} is outside {min}..={max}")]
    OutOfRange {
        /// Field being changed.
        field: FieldId,
        /// Offending value.
        value: i32,
        /// Lowest accepted value.
        min: i32,
        /// Highest accepted value.
        max: i32,
    },
    /// Text that is not a color encoding.
    #[error("{field}: {source}")]
    MalformedColor {
        /// Field being changed.
        field: FieldId,
        /// Parse failure.
        source: ParseColorError,
    },
    /// Text that is not a boolean spelling.
    #[error("{field}: '{input}' is not a boolean")]
    NotABoolean {
        /// Field being changed.
        field: FieldId,
        /// Offending input.
        input: String,
    },
    /// Value of a shape the field cannot hold (e.g. a switch state for a slider).
    #[error("{field}: cannot store {value:?}")]
    WrongType {
        /// Field being changed.
        field: FieldId,
        /// Offending value.
        value: WidgetValue,
    },
    /// The widget produced no value.
    #[error("{field}: no value")]
    Missing {
        /// Field being changed.
        field: FieldId,
    },
}

/// Failure of [`FieldBinding::commit`].
#[derive(Debug, Error)]
pub enum CommitError {
    /// Rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The write itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful commit, ready for the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// Field that was written.
    pub field: FieldId,
    /// Value as persisted.
    pub stored: i32,
    /// Value in the widget's native representation.
    pub display: WidgetValue,
    /// New summary text, for controls that show one.
    pub summary: Option<String>,
}

/// Binds one control to its setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    /// Control identity; also the handle passed to the widget port.
    pub id: FieldId,
    /// Persisted setting.
    pub entry: SettingEntry,
    /// Host control kind.
    pub control: Control,
    /// Choice labels, indexed by stored value (lists only).
    pub choices: &'static [&'static str],
    /// Fields whose enabled state follows this field's value.
    pub dependents: Vec<FieldId>,
}

static STROKE_CHOICES: [&str; 3] = [
    StrokeMode::None.label(),
    StrokeMode::Solid.label(),
    StrokeMode::Dashed.label(),
];

/// The sound screen's bindings, in declaration order.
pub fn sound_screen_bindings() -> Vec<FieldBinding> {
    vec![
        FieldBinding::new(FieldId::SafeHeadsetVolume, Control::Switch),
        FieldBinding::new(FieldId::NotificationThreshold, Control::List),
        FieldBinding::new(FieldId::CameraSound, Control::Switch),
        FieldBinding::new(FieldId::DialogAlpha, Control::Slider),
        FieldBinding::new(FieldId::StrokeMode, Control::List)
            .with_choices(&STROKE_CHOICES)
            .with_dependents(&[
                FieldId::StrokeColor,
                FieldId::StrokeThickness,
                FieldId::DashWidth,
                FieldId::DashGap,
            ]),
        FieldBinding::new(FieldId::StrokeColor, Control::ColorPicker),
        FieldBinding::new(FieldId::StrokeThickness, Control::Slider),
        FieldBinding::new(FieldId::CornerRadius, Control::Slider),
        FieldBinding::new(FieldId::DashWidth, Control::Slider),
        FieldBinding::new(FieldId::DashGap, Control::Slider),
    ]
}

impl FieldBinding {
    /// Bind `id` to a control of kind `control`.
    pub fn new(id: FieldId, control: Control) -> Self {
        Self {
            id,
            entry: id.entry(),
            control,
            choices: &[],
            dependents: Vec::new(),
        }
    }

    /// Attach choice labels.
    pub fn with_choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    /// Attach dependent fields.
    pub fn with_dependents(mut self, dependents: &[FieldId]) -> Self {
        self.dependents = dependents.to_vec();
        self
    }

    /// Current stored value, or the declared default when absent.
    pub fn read_stored(
        &self,
        settings: &dyn SettingsStore,
        properties: &dyn PropertyStore,
    ) -> Result<i32, StoreError> {
        let entry = &self.entry;
        match entry.scope {
            Scope::Global => settings.get_int(entry.key, entry.default),
            Scope::CurrentUser => {
                settings.get_int_for_user(entry.key, entry.default, UserScope::Current)
            }
            Scope::Property => properties
                .get_bool_property(entry.key, entry.default != 0)
                .map(i32::from),
        }
    }

    /// Current value in the widget's representation.
    pub fn load(
        &self,
        settings: &dyn SettingsStore,
        properties: &dyn PropertyStore,
    ) -> Result<WidgetValue, StoreError> {
        let stored = self.read_stored(settings, properties)?;
        debug!(field = %self.id, stored, "loaded");
        Ok(self.display(stored))
    }

    /// Widget representation of a stored value.
    pub fn display(&self, stored: i32) -> WidgetValue {
        match self.control {
            Control::Switch => WidgetValue::Bool(stored != 0),
            Control::List => WidgetValue::Text(stored.to_string()),
            Control::Slider => WidgetValue::Int(stored),
            Control::ColorPicker => WidgetValue::Text(Argb::from_stored(stored).to_hex()),
        }
    }

    /// Summary text for a stored value, if the control shows one.
    pub fn summary(&self, stored: i32) -> Option<String> {
        match self.entry.kind {
            SettingKind::EnumeratedIndex => usize::try_from(stored)
                .ok()
                .and_then(|i| self.choices.get(i))
                .map(|label| (*label).to_string()),
            SettingKind::PackedColor => Some(Argb::from_stored(stored).to_hex()),
            SettingKind::Boolean | SettingKind::Integer => None,
        }
    }

    /// Check `raw` against the entry's kind and bounds; returns the stored form.
    pub fn validate(&self, raw: &WidgetValue) -> Result<i32, ValidationError> {
        let field = self.id;
        let wrong_type = || ValidationError::WrongType {
            field,
            value: raw.clone(),
        };
        let value = match (self.entry.kind, raw) {
            (_, WidgetValue::Unset) => return Err(ValidationError::Missing { field }),
            (SettingKind::Boolean, WidgetValue::Bool(b)) => i32::from(*b),
            (SettingKind::Boolean, WidgetValue::Int(n)) => i32::from(*n != 0),
            (SettingKind::Boolean, WidgetValue::Text(s)) => parse_bool_property(s)
                .map(i32::from)
                .ok_or_else(|| ValidationError::NotABoolean {
                    field,
                    input: s.clone(),
                })?,
            (
                SettingKind::Integer | SettingKind::EnumeratedIndex | SettingKind::PackedColor,
                WidgetValue::Int(n),
            ) => *n,
            (SettingKind::Integer | SettingKind::EnumeratedIndex, WidgetValue::Text(s)) => {
                s.trim()
                    .parse()
                    .map_err(|_| ValidationError::NotAnInteger {
                        field,
                        input: s.clone(),
                    })?
            }
            (SettingKind::PackedColor, WidgetValue::Text(s)) => s
                .parse::<Argb>()
                .map(Argb::to_stored)
                .map_err(|source| ValidationError::MalformedColor { field, source })?,
            (_, WidgetValue::Bool(_)) => return Err(wrong_type()),
        };
        match self.entry.range {
            Some((min, max)) if !self.entry.accepts(value) => Err(ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            }),
            _ => Ok(value),
        }
    }

    /// Persist an already-validated stored value.
    pub fn write_stored(
        &self,
        stored: i32,
        settings: &dyn SettingsStore,
        properties: &dyn PropertyStore,
    ) -> Result<(), StoreError> {
        let entry = &self.entry;
        match entry.scope {
            Scope::Global => settings.put_int(entry.key, stored),
            Scope::CurrentUser => settings.put_int_for_user(entry.key, stored, UserScope::Current),
            Scope::Property => {
                properties.set_property(entry.key, bool_property_value(stored != 0))
            }
        }
    }

    /// Validate, persist and describe `raw`. Nothing is written if validation fails.
    pub fn commit(
        &self,
        raw: &WidgetValue,
        settings: &dyn SettingsStore,
        properties: &dyn PropertyStore,
    ) -> Result<Committed, CommitError> {
        let stored = self.validate(raw)?;
        self.write_stored(stored, settings, properties)?;
        debug!(field = %self.id, key = self.entry.key, stored, "committed");
        Ok(Committed {
            field: self.id,
            stored,
            display: self.display(stored),
            summary: self.summary(stored),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn binding(id: FieldId) -> FieldBinding {
        sound_screen_bindings()
            .into_iter()
            .find(|b| b.id == id)
            .unwrap()
    }

    #[test]
    fn table_follows_declaration_order() {
        let ids: Vec<_> = sound_screen_bindings().iter().map(|b| b.id).collect();
        assert_eq!(ids, FieldId::ALL.to_vec());
    }

    #[test]
    fn only_stroke_mode_has_dependents() {
        for b in sound_screen_bindings() {
            if b.id == FieldId::StrokeMode {
                assert_eq!(b.dependents.len(), 4);
            } else {
                assert!(b.dependents.is_empty(), "{}", b.id);
            }
        }
    }

    #[test]
    fn field_keys_parse_back() {
        for id in FieldId::ALL {
            assert_eq!(id.key().parse::<FieldId>().unwrap(), id);
        }
        assert!("volume".parse::<FieldId>().is_err());
    }

    #[test]
    fn threshold_text_parses_as_integer() {
        let b = binding(FieldId::NotificationThreshold);
        assert_eq!(b.validate(&WidgetValue::text("2")).unwrap(), 2);
        assert!(matches!(
            b.validate(&WidgetValue::text("two")),
            Err(ValidationError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn stroke_index_is_bounded() {
        let b = binding(FieldId::StrokeMode);
        assert_eq!(b.validate(&WidgetValue::text("2")).unwrap(), 2);
        assert!(matches!(
            b.validate(&WidgetValue::text("3")),
            Err(ValidationError::OutOfRange { value: 3, min: 0, max: 2, .. })
        ));
    }

    #[test]
    fn alpha_rejects_values_past_a_byte() {
        let b = binding(FieldId::DialogAlpha);
        assert!(b.validate(&WidgetValue::Int(255)).is_ok());
        assert!(b.validate(&WidgetValue::Int(256)).is_err());
    }

    #[test]
    fn sliders_refuse_switch_states() {
        let b = binding(FieldId::CornerRadius);
        assert!(matches!(
            b.validate(&WidgetValue::Bool(true)),
            Err(ValidationError::WrongType { .. })
        ));
        assert!(matches!(
            b.validate(&WidgetValue::Unset),
            Err(ValidationError::Missing { .. })
        ));
    }

    #[test]
    fn color_accepts_picker_integers_and_hex() {
        let b = binding(FieldId::StrokeColor);
        let teal = entry::DEFAULT_STROKE_COLOR.to_stored();
        assert_eq!(b.validate(&WidgetValue::Int(teal)).unwrap(), teal);
        assert_eq!(b.validate(&WidgetValue::text("#FF80CBC4")).unwrap(), teal);
        assert!(matches!(
            b.validate(&WidgetValue::text("#zz")),
            Err(ValidationError::MalformedColor { .. })
        ));
    }

    #[test]
    fn switches_accept_property_spellings() {
        let b = binding(FieldId::SafeHeadsetVolume);
        assert_eq!(b.validate(&WidgetValue::text("off")).unwrap(), 0);
        assert_eq!(b.validate(&WidgetValue::Bool(true)).unwrap(), 1);
        assert!(b.validate(&WidgetValue::text("maybe")).is_err());
    }

    #[test]
    fn display_and_summary_per_control() {
        let stroke = binding(FieldId::StrokeMode);
        assert_eq!(stroke.display(1), WidgetValue::text("1"));
        assert_eq!(stroke.summary(1).as_deref(), Some("Solid"));
        assert_eq!(stroke.summary(9), None);

        let color = binding(FieldId::StrokeColor);
        let teal = entry::DEFAULT_STROKE_COLOR.to_stored();
        assert_eq!(color.display(teal), WidgetValue::text("#ff80cbc4"));
        assert_eq!(color.summary(teal).as_deref(), Some("#ff80cbc4"));

        let radius = binding(FieldId::CornerRadius);
        assert_eq!(radius.display(10), WidgetValue::Int(10));
        assert_eq!(radius.summary(10), None);
    }
}
