// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Storage ports for scalar settings and process-wide properties.

use thiserror::Error;

/// User identity a scoped read/write is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UserScope {
    /// Whoever the store considers the current user.
    #[default]
    Current,
    /// An explicit user id.
    Id(u32),
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence collaborator cannot be reached.
    #[error("settings store unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write.
    #[error("settings store rejected write to '{key}'")]
    Rejected {
        /// Key whose write was refused.
        key: String,
    },
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Typed key-value settings store, optionally scoped by user.
pub trait SettingsStore {
    /// Read an integer, falling back to `default` when the key is absent.
    fn get_int(&self, key: &str, default: i32) -> Result<i32, StoreError>;
    /// Read an integer for `user`, falling back to `default` when absent.
    fn get_int_for_user(&self, key: &str, default: i32, user: UserScope)
        -> Result<i32, StoreError>;
    /// Persist an integer.
    fn put_int(&self, key: &str, value: i32) -> Result<(), StoreError>;
    /// Persist an integer for `user`.
    fn put_int_for_user(&self, key: &str, value: i32, user: UserScope) -> Result<(), StoreError>;
}

/// Process-wide string property store.
pub trait PropertyStore {
    /// Read a boolean property; see [`parse_bool_property`] for accepted spellings.
    fn get_bool_property(&self, name: &str, default: bool) -> Result<bool, StoreError>;
    /// Set a property to a raw string value.
    fn set_property(&self, name: &str, value: &str) -> Result<(), StoreError>;
}

/// Decode a property string as a boolean.
///
/// Returns `None` for spellings that are neither true (`1 y yes true on`) nor
/// false (`0 n no false off`); callers substitute their default.
pub fn parse_bool_property(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "y" | "yes" | "true" | "on" => Some(true),
        "0" | "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Property string for a boolean value.
pub const fn bool_property_value(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn property_spellings() {
        for raw in ["1", "y", "YES", "true", " on "] {
            assert_eq!(parse_bool_property(raw), Some(true), "{raw}");
        }
        for raw in ["0", "N", "no", "False", "off"] {
            assert_eq!(parse_bool_property(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_bool_property(""), None);
        assert_eq!(parse_bool_property("2"), None);
    }

    #[test]
    fn bool_values_round_trip_through_property_text() {
        assert_eq!(parse_bool_property(bool_property_value(true)), Some(true));
        assert_eq!(parse_bool_property(bool_property_value(false)), Some(false));
    }
}
