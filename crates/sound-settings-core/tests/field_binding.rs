// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! FieldBinding load/commit against in-memory stores.
#![allow(clippy::unwrap_used)]

use sound_settings_core::binding::{sound_screen_bindings, CommitError};
use sound_settings_core::{FieldBinding, FieldId, SoundPrefs, StrokeMode, WidgetValue};
use sound_settings_dry_tests::{InMemoryPropertyStore, InMemorySettingsStore, Write};

fn binding(id: FieldId) -> FieldBinding {
    sound_screen_bindings()
        .into_iter()
        .find(|b| b.id == id)
        .unwrap()
}

#[test]
fn load_after_commit_returns_committed_value() {
    let settings = InMemorySettingsStore::new();
    let props = InMemoryPropertyStore::new();
    let cases = [
        (FieldId::NotificationThreshold, WidgetValue::text("5000")),
        (FieldId::DialogAlpha, WidgetValue::Int(90)),
        (FieldId::StrokeMode, WidgetValue::text("1")),
        (FieldId::StrokeColor, WidgetValue::text("#12345678")),
        (FieldId::DashGap, WidgetValue::Int(0)),
        (FieldId::SafeHeadsetVolume, WidgetValue::Bool(false)),
        (FieldId::CameraSound, WidgetValue::Bool(false)),
    ];
    for (field, raw) in cases {
        let b = binding(field);
        let committed = b.commit(&raw, &settings, &props).unwrap();
        let loaded = b.load(&settings, &props).unwrap();
        assert_eq!(loaded, committed.display, "{field}");
        assert_eq!(b.validate(&loaded).unwrap(), committed.stored, "{field}");
    }
}

#[test]
fn stroke_mode_writes_to_the_user_table() {
    let settings = InMemorySettingsStore::new();
    let props = InMemoryPropertyStore::new();
    binding(FieldId::StrokeMode)
        .commit(&WidgetValue::text("2"), &settings, &props)
        .unwrap();
    assert_eq!(
        settings.writes(),
        vec![Write {
            key: "volume_dialog_stroke".into(),
            user: Some(0),
            value: 2,
        }]
    );
    assert_eq!(settings.value("volume_dialog_stroke"), None);
}

#[test]
fn camera_sound_uses_the_property_store() {
    let settings = InMemorySettingsStore::new();
    let props = InMemoryPropertyStore::with_properties(&[("persist.sys.camera-sound", "false")]);
    let b = binding(FieldId::CameraSound);
    assert_eq!(b.load(&settings, &props).unwrap(), WidgetValue::Bool(false));
    b.commit(&WidgetValue::Bool(true), &settings, &props)
        .unwrap();
    assert_eq!(props.property("persist.sys.camera-sound").as_deref(), Some("1"));
    assert_eq!(settings.write_count(), 0);
    assert_eq!(settings.read_count(), 0);
}

#[test]
fn validation_failure_never_writes() {
    let settings = InMemorySettingsStore::new();
    let props = InMemoryPropertyStore::new();
    let err = binding(FieldId::DashGap)
        .commit(&WidgetValue::text("-4"), &settings, &props)
        .unwrap_err();
    assert!(matches!(err, CommitError::Validation(_)));
    assert_eq!(settings.write_count(), 0);
}

#[test]
fn prefs_snapshot_reads_through_the_stores() {
    let settings = InMemorySettingsStore::with_values(&[
        ("volume_dialog_corner_radius", 2),
        ("volume_dialog_stroke_color", -1),
    ]);
    settings.seed_user_value("volume_dialog_stroke", 0, 1);
    let props = InMemoryPropertyStore::with_properties(&[("persist.sys.camera-sound", "0")]);

    let prefs = SoundPrefs::read(&settings, &props).unwrap();
    assert!(!prefs.camera_sound);
    assert!(prefs.safe_headset_volume);
    assert_eq!(prefs.dialog.corner_radius, 2);
    assert_eq!(prefs.dialog.stroke, StrokeMode::Solid);
    assert_eq!(prefs.dialog.stroke_color, "#ffffffff");
    assert_eq!(prefs.dialog.dash_gap, 10);
}
