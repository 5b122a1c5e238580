// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Volume dialog stroke modes and the enablement rule for stroke dependents.

use crate::binding::FieldId;
use serde::{Deserialize, Serialize};

/// Outline drawn around the volume dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrokeMode {
    /// No outline.
    #[default]
    None,
    /// Solid outline in the accent color.
    Solid,
    /// Outline in a custom color, optionally dashed.
    Dashed,
}

impl StrokeMode {
    /// All modes, in index order.
    pub const ALL: [StrokeMode; 3] = [StrokeMode::None, StrokeMode::Solid, StrokeMode::Dashed];

    /// Strict lookup used when validating a committed choice.
    pub const fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Self::None),
            1 => Some(Self::Solid),
            2 => Some(Self::Dashed),
            _ => None,
        }
    }

    /// Lenient lookup for values already in the store; unknown values behave as dashed.
    pub const fn from_stored(stored: i32) -> Self {
        match Self::from_index(stored) {
            Some(mode) => mode,
            None => Self::Dashed,
        }
    }

    /// Stored index.
    pub const fn index(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Solid => 1,
            Self::Dashed => 2,
        }
    }

    /// Choice text shown as the list summary.
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "Disabled",
            Self::Solid => "Solid",
            Self::Dashed => "Dashed",
        }
    }

    /// Which stroke dependents are editable under this mode.
    pub const fn enablement(self) -> StrokeEnablement {
        match self {
            Self::None => StrokeEnablement {
                color: false,
                thickness: false,
                dash_width: false,
                dash_gap: false,
            },
            Self::Solid => StrokeEnablement {
                color: false,
                thickness: true,
                dash_width: true,
                dash_gap: true,
            },
            Self::Dashed => StrokeEnablement {
                color: true,
                thickness: true,
                dash_width: true,
                dash_gap: true,
            },
        }
    }
}

/// Enabled flags for the four controls that depend on the stroke mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeEnablement {
    /// Stroke color picker.
    pub color: bool,
    /// Stroke thickness slider.
    pub thickness: bool,
    /// Dash width slider.
    pub dash_width: bool,
    /// Dash gap slider.
    pub dash_gap: bool,
}

impl StrokeEnablement {
    /// Rule applied to a raw stored value.
    pub const fn for_stored(stored: i32) -> Self {
        StrokeMode::from_stored(stored).enablement()
    }

    /// Enabled flag for `field`; fields outside the stroke group are always enabled.
    pub const fn allows(self, field: FieldId) -> bool {
        match field {
            FieldId::StrokeColor => self.color,
            FieldId::StrokeThickness => self.thickness,
            FieldId::DashWidth => self.dash_width,
            FieldId::DashGap => self.dash_gap,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn table_matches_modes() {
        let none = StrokeEnablement::for_stored(0);
        assert!(!none.color && !none.thickness && !none.dash_width && !none.dash_gap);

        let solid = StrokeEnablement::for_stored(1);
        assert!(!solid.color);
        assert!(solid.thickness && solid.dash_width && solid.dash_gap);

        let dashed = StrokeEnablement::for_stored(2);
        assert!(dashed.color && dashed.thickness && dashed.dash_width && dashed.dash_gap);
    }

    #[test]
    fn unknown_stored_values_enable_everything() {
        assert_eq!(StrokeEnablement::for_stored(7), StrokeMode::Dashed.enablement());
        assert_eq!(StrokeEnablement::for_stored(-3), StrokeMode::Dashed.enablement());
    }

    #[test]
    fn unrelated_fields_stay_enabled() {
        let none = StrokeMode::None.enablement();
        assert!(!none.allows(FieldId::DashGap));
        assert!(none.allows(FieldId::CornerRadius));
        assert!(none.allows(FieldId::DialogAlpha));
    }

    #[test]
    fn strict_index_rejects_out_of_range() {
        assert_eq!(StrokeMode::from_index(3), None);
        assert_eq!(StrokeMode::from_index(-1), None);
        for mode in StrokeMode::ALL {
            assert_eq!(StrokeMode::from_index(mode.index()), Some(mode));
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&StrokeMode::Dashed).unwrap();
        assert_eq!(json, "\"dashed\"");
    }
}
