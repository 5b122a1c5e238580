// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Snapshot of every sound setting, for export and diagnostics.

use crate::binding::FieldId;
use crate::color::Argb;
use crate::entry;
use crate::store::{PropertyStore, SettingsStore, StoreError};
use crate::stroke::StrokeMode;
use serde::{Deserialize, Serialize};

/// Saved sound and volume-dialog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundPrefs {
    /// Safe headset volume warning.
    pub safe_headset_volume: bool,
    /// Notification sound threshold in milliseconds.
    pub notification_threshold: i32,
    /// Camera shutter sound.
    pub camera_sound: bool,
    /// Volume dialog style.
    pub dialog: VolumeDialogStyle,
}

/// Visual style of the volume dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeDialogStyle {
    /// Opacity, 0..=255.
    pub alpha: i32,
    /// Outline mode.
    pub stroke: StrokeMode,
    /// Outline color as `#aarrggbb`.
    pub stroke_color: String,
    /// Outline thickness.
    pub stroke_thickness: i32,
    /// Corner radius.
    pub corner_radius: i32,
    /// Dash length; 0 for a continuous line.
    pub dash_width: i32,
    /// Gap between dashes.
    pub dash_gap: i32,
}

impl Default for SoundPrefs {
    fn default() -> Self {
        Self {
            safe_headset_volume: entry::SAFE_HEADSET_VOLUME.default != 0,
            notification_threshold: entry::NOTIFICATION_THRESHOLD.default,
            camera_sound: entry::CAMERA_SOUND.default != 0,
            dialog: VolumeDialogStyle {
                alpha: entry::DIALOG_ALPHA.default,
                stroke: StrokeMode::from_stored(entry::STROKE_MODE.default),
                stroke_color: entry::DEFAULT_STROKE_COLOR.to_hex(),
                stroke_thickness: entry::STROKE_THICKNESS.default,
                corner_radius: entry::CORNER_RADIUS.default,
                dash_width: entry::DASH_WIDTH.default,
                dash_gap: entry::DASH_GAP.default,
            },
        }
    }
}

impl SoundPrefs {
    /// Read every setting through the stores, substituting declared defaults.
    pub fn read(
        settings: &dyn SettingsStore,
        properties: &dyn PropertyStore,
    ) -> Result<Self, StoreError> {
        let bindings = crate::binding::sound_screen_bindings();
        let get = |field: FieldId| -> Result<i32, StoreError> {
            match bindings.iter().find(|b| b.id == field) {
                Some(b) => b.read_stored(settings, properties),
                None => Ok(field.entry().default),
            }
        };
        Ok(Self {
            safe_headset_volume: get(FieldId::SafeHeadsetVolume)? != 0,
            notification_threshold: get(FieldId::NotificationThreshold)?,
            camera_sound: get(FieldId::CameraSound)? != 0,
            dialog: VolumeDialogStyle {
                alpha: get(FieldId::DialogAlpha)?,
                stroke: StrokeMode::from_stored(get(FieldId::StrokeMode)?),
                stroke_color: Argb::from_stored(get(FieldId::StrokeColor)?).to_hex(),
                stroke_thickness: get(FieldId::StrokeThickness)?,
                corner_radius: get(FieldId::CornerRadius)?,
                dash_width: get(FieldId::DashWidth)?,
                dash_gap: get(FieldId::DashGap)?,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn defaults_match_declared_entries() {
        let prefs = SoundPrefs::default();
        assert!(prefs.safe_headset_volume);
        assert!(prefs.camera_sound);
        assert_eq!(prefs.notification_threshold, 0);
        assert_eq!(prefs.dialog.alpha, 255);
        assert_eq!(prefs.dialog.stroke, StrokeMode::None);
        assert_eq!(prefs.dialog.stroke_color, "#ff80cbc4");
        assert_eq!(prefs.dialog.stroke_thickness, 4);
        assert_eq!(prefs.dialog.corner_radius, 10);
        assert_eq!(prefs.dialog.dash_width, 0);
        assert_eq!(prefs.dialog.dash_gap, 10);
    }

    #[test]
    fn serializes_stroke_by_name() {
        let json = serde_json::to_value(SoundPrefs::default()).unwrap();
        assert_eq!(json["dialog"]["stroke"], "none");
        assert_eq!(json["dialog"]["stroke_color"], "#ff80cbc4");
    }
}
