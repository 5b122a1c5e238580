// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory store fakes for testing without filesystem I/O.

use sound_settings_core::store::{
    parse_bool_property, PropertyStore, SettingsStore, StoreError, UserScope,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One recorded integer write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    /// Key written.
    pub key: String,
    /// User table written to; `None` for the global table.
    pub user: Option<u32>,
    /// Value written.
    pub value: i32,
}

/// In-memory implementation of [`SettingsStore`] for testing.
///
/// Tracks every successful write and counts reads, and can be told to fail.
///
/// # Example
///
/// ```
/// use sound_settings_dry_tests::InMemorySettingsStore;
/// use sound_settings_core::SettingsStore;
///
/// let store = InMemorySettingsStore::with_values(&[("volume_dialog_dash_gap", 6)]);
/// assert_eq!(store.get_int("volume_dialog_dash_gap", 10).unwrap(), 6);
/// store.put_int("volume_dialog_dash_gap", 8).unwrap();
/// assert_eq!(store.value("volume_dialog_dash_gap"), Some(8));
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemorySettingsStore {
    inner: Arc<Mutex<SettingsInner>>,
}

#[derive(Default)]
struct SettingsInner {
    global: HashMap<String, i32>,
    users: HashMap<(u32, String), i32>,
    current_user: u32,
    writes: Vec<Write>,
    read_count: usize,
    fail_on_read: bool,
    fail_reads_of: Option<String>,
    fail_on_write: bool,
}

impl SettingsInner {
    fn check_read(&mut self, key: &str) -> Result<(), StoreError> {
        self.read_count += 1;
        if self.fail_on_read || self.fail_reads_of.as_deref() == Some(key) {
            return Err(StoreError::Unavailable("simulated read failure".into()));
        }
        Ok(())
    }

    fn resolve(&self, user: UserScope) -> u32 {
        match user {
            UserScope::Current => self.current_user,
            UserScope::Id(id) => id,
        }
    }
}

impl InMemorySettingsStore {
    /// Create an empty store whose current user is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with global values pre-populated (not counted as writes).
    pub fn with_values(values: &[(&str, i32)]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for (key, value) in values {
                inner.global.insert((*key).to_string(), *value);
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SettingsInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Pre-populate a per-user value (not counted as a write).
    pub fn seed_user_value(&self, key: &str, user: u32, value: i32) {
        self.lock().users.insert((user, key.to_string()), value);
    }

    /// Change which user `UserScope::Current` resolves to.
    pub fn set_current_user(&self, user: u32) {
        self.lock().current_user = user;
    }

    /// Global value for `key`, if present.
    pub fn value(&self, key: &str) -> Option<i32> {
        self.lock().global.get(key).copied()
    }

    /// Per-user value for `key`, if present.
    pub fn user_value(&self, key: &str, user: u32) -> Option<i32> {
        self.lock().users.get(&(user, key.to_string())).copied()
    }

    /// Successful writes, oldest first.
    pub fn writes(&self) -> Vec<Write> {
        self.lock().writes.clone()
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.lock().writes.len()
    }

    /// Number of read attempts, including failed ones.
    pub fn read_count(&self) -> usize {
        self.lock().read_count
    }

    /// Configure reads to fail with `StoreError::Unavailable`.
    pub fn set_fail_on_read(&self, fail: bool) {
        self.lock().fail_on_read = fail;
    }

    /// Fail reads of `key` only; `None` clears it.
    pub fn set_fail_reads_of(&self, key: Option<&str>) {
        self.lock().fail_reads_of = key.map(str::to_string);
    }

    /// Configure writes to fail with `StoreError::Unavailable`.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.lock().fail_on_write = fail;
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get_int(&self, key: &str, default: i32) -> Result<i32, StoreError> {
        let mut inner = self.lock();
        inner.check_read(key)?;
        Ok(inner.global.get(key).copied().unwrap_or(default))
    }

    fn get_int_for_user(
        &self,
        key: &str,
        default: i32,
        user: UserScope,
    ) -> Result<i32, StoreError> {
        let mut inner = self.lock();
        inner.check_read(key)?;
        let id = inner.resolve(user);
        Ok(inner
            .users
            .get(&(id, key.to_string()))
            .copied()
            .unwrap_or(default))
    }

    fn put_int(&self, key: &str, value: i32) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_on_write {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }
        inner.global.insert(key.to_string(), value);
        inner.writes.push(Write {
            key: key.to_string(),
            user: None,
            value,
        });
        Ok(())
    }

    fn put_int_for_user(&self, key: &str, value: i32, user: UserScope) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_on_write {
            return Err(StoreError::Unavailable("simulated write failure".into()));
        }
        let id = inner.resolve(user);
        inner.users.insert((id, key.to_string()), value);
        inner.writes.push(Write {
            key: key.to_string(),
            user: Some(id),
            value,
        });
        Ok(())
    }
}

/// In-memory implementation of [`PropertyStore`] for testing.
#[derive(Clone, Default)]
pub struct InMemoryPropertyStore {
    inner: Arc<Mutex<PropertyInner>>,
}

#[derive(Default)]
struct PropertyInner {
    props: HashMap<String, String>,
    sets: Vec<(String, String)>,
    fail_on_set: bool,
}

impl InMemoryPropertyStore {
    /// Create an empty property store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with properties pre-populated (not counted as sets).
    pub fn with_properties(props: &[(&str, &str)]) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for (name, value) in props {
                inner.props.insert((*name).to_string(), (*value).to_string());
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PropertyInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Raw value of `name`, if set.
    pub fn property(&self, name: &str) -> Option<String> {
        self.lock().props.get(name).cloned()
    }

    /// Successful sets, oldest first.
    pub fn sets(&self) -> Vec<(String, String)> {
        self.lock().sets.clone()
    }

    /// Number of successful sets.
    pub fn set_count(&self) -> usize {
        self.lock().sets.len()
    }

    /// Configure sets to fail with `StoreError::Unavailable`.
    pub fn set_fail_on_set(&self, fail: bool) {
        self.lock().fail_on_set = fail;
    }
}

impl PropertyStore for InMemoryPropertyStore {
    fn get_bool_property(&self, name: &str, default: bool) -> Result<bool, StoreError> {
        Ok(self
            .lock()
            .props
            .get(name)
            .and_then(|raw| parse_bool_property(raw))
            .unwrap_or(default))
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.fail_on_set {
            return Err(StoreError::Unavailable("simulated property failure".into()));
        }
        inner.props.insert(name.to_string(), value.to_string());
        inner.sets.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_default() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.get_int("absent", 42).unwrap(), 42);
        assert_eq!(store.read_count(), 1);
    }

    #[test]
    fn current_user_resolves_to_configured_id() {
        let store = InMemorySettingsStore::new();
        store.set_current_user(10);
        store.put_int_for_user("k", 2, UserScope::Current).unwrap();
        assert_eq!(store.user_value("k", 10), Some(2));
        assert_eq!(store.user_value("k", 0), None);
        assert_eq!(store.get_int_for_user("k", 0, UserScope::Id(10)).unwrap(), 2);
        assert_eq!(store.writes()[0].user, Some(10));
    }

    #[test]
    fn failed_write_leaves_value_and_log_untouched() {
        let store = InMemorySettingsStore::with_values(&[("k", 1)]);
        store.set_fail_on_write(true);
        assert!(matches!(store.put_int("k", 0), Err(StoreError::Unavailable(_))));
        assert_eq!(store.value("k"), Some(1));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn failed_read_still_counts() {
        let store = InMemorySettingsStore::new();
        store.set_fail_on_read(true);
        assert!(store.get_int("k", 0).is_err());
        assert_eq!(store.read_count(), 1);
    }

    #[test]
    fn keyed_read_failure_spares_other_keys() {
        let store = InMemorySettingsStore::with_values(&[("a", 1), ("b", 2)]);
        store.set_fail_reads_of(Some("b"));
        assert_eq!(store.get_int("a", 0).unwrap(), 1);
        assert!(store.get_int("b", 0).is_err());
        assert!(store.get_int_for_user("b", 0, UserScope::Current).is_err());
        store.set_fail_reads_of(None);
        assert_eq!(store.get_int("b", 0).unwrap(), 2);
        assert_eq!(store.read_count(), 4);
    }

    #[test]
    fn clones_share_state() {
        let a = InMemorySettingsStore::new();
        let b = a.clone();
        a.put_int("k", 3).unwrap();
        assert_eq!(b.value("k"), Some(3));
    }

    #[test]
    fn properties_decode_booleans() {
        let props = InMemoryPropertyStore::with_properties(&[("p", "off"), ("q", "garbage")]);
        assert!(!props.get_bool_property("p", true).unwrap());
        assert!(props.get_bool_property("q", true).unwrap());
        assert!(props.get_bool_property("absent", true).unwrap());
        props.set_property("p", "1").unwrap();
        assert!(props.get_bool_property("p", false).unwrap());
        assert_eq!(props.set_count(), 1);
    }
}
