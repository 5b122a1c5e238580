// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declared settings: storage key, kind, default and scope of every value the
//! sound screen persists.

use crate::color::Argb;

/// Shape of a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// Boolean stored as `0`/`1` (or a boolean property).
    Boolean,
    /// Plain integer.
    Integer,
    /// Index into a fixed list of choices.
    EnumeratedIndex,
    /// Packed 32-bit ARGB color.
    PackedColor,
}

/// Where a setting lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Global settings table.
    Global,
    /// Settings table of the current user.
    CurrentUser,
    /// Process-wide property store.
    Property,
}

/// Immutable declaration of one persisted setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingEntry {
    /// Storage key (or property name).
    pub key: &'static str,
    /// Value shape.
    pub kind: SettingKind,
    /// Default in stored form.
    pub default: i32,
    /// Table the value is read from and written to.
    pub scope: Scope,
    /// Inclusive bounds accepted on commit, if any.
    pub range: Option<(i32, i32)>,
}

impl SettingEntry {
    /// Whether `value` satisfies the declared range.
    pub fn accepts(&self, value: i32) -> bool {
        self.range
            .is_none_or(|(min, max)| (min..=max).contains(&value))
    }
}

/// Default stroke color (`#ff80cbc4`).
pub const DEFAULT_STROKE_COLOR: Argb = Argb::from_bytes([0xFF, 0x80, 0xCB, 0xC4]);

const NON_NEGATIVE: Option<(i32, i32)> = Some((0, i32::MAX));

/// Warn before raising headset volume past the safe level.
pub const SAFE_HEADSET_VOLUME: SettingEntry = SettingEntry {
    key: "safe_headset_volume",
    kind: SettingKind::Boolean,
    default: 1,
    scope: Scope::Global,
    range: None,
};

/// Minimum interval (ms) between sounds from the same notifying app.
pub const NOTIFICATION_THRESHOLD: SettingEntry = SettingEntry {
    key: "mute_annoying_notifications_threshold",
    kind: SettingKind::Integer,
    default: 0,
    scope: Scope::Global,
    range: NON_NEGATIVE,
};

/// Camera shutter sound.
pub const CAMERA_SOUND: SettingEntry = SettingEntry {
    key: "persist.sys.camera-sound",
    kind: SettingKind::Boolean,
    default: 1,
    scope: Scope::Property,
    range: None,
};

/// Volume dialog opacity.
pub const DIALOG_ALPHA: SettingEntry = SettingEntry {
    key: "transparent_volume_dialog",
    kind: SettingKind::Integer,
    default: 255,
    scope: Scope::Global,
    range: Some((0, 255)),
};

/// Volume dialog stroke mode (see [`crate::stroke::StrokeMode`]).
pub const STROKE_MODE: SettingEntry = SettingEntry {
    key: "volume_dialog_stroke",
    kind: SettingKind::EnumeratedIndex,
    default: 0,
    scope: Scope::CurrentUser,
    range: Some((0, 2)),
};

/// Volume dialog stroke color.
pub const STROKE_COLOR: SettingEntry = SettingEntry {
    key: "volume_dialog_stroke_color",
    kind: SettingKind::PackedColor,
    default: DEFAULT_STROKE_COLOR.to_stored(),
    scope: Scope::Global,
    range: None,
};

/// Volume dialog stroke thickness.
pub const STROKE_THICKNESS: SettingEntry = SettingEntry {
    key: "volume_dialog_stroke_thickness",
    kind: SettingKind::Integer,
    default: 4,
    scope: Scope::Global,
    range: NON_NEGATIVE,
};

/// Volume dialog corner radius.
pub const CORNER_RADIUS: SettingEntry = SettingEntry {
    key: "volume_dialog_corner_radius",
    kind: SettingKind::Integer,
    default: 10,
    scope: Scope::Global,
    range: NON_NEGATIVE,
};

/// Dash length of a dashed stroke; `0` draws a solid line.
pub const DASH_WIDTH: SettingEntry = SettingEntry {
    key: "volume_dialog_dash_width",
    kind: SettingKind::Integer,
    default: 0,
    scope: Scope::Global,
    range: NON_NEGATIVE,
};

/// Gap between dashes of a dashed stroke.
pub const DASH_GAP: SettingEntry = SettingEntry {
    key: "volume_dialog_dash_gap",
    kind: SettingKind::Integer,
    default: 10,
    scope: Scope::Global,
    range: NON_NEGATIVE,
};
