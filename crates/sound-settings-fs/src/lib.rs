// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `SettingsStore` and `PropertyStore` (uses platform config dir).
//!
//! Layout under the base directory:
//! - `system.json`: global integer table
//! - `users/<id>.json`: per-user integer tables
//! - `properties.json`: string properties

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use sound_settings_core::store::{
    parse_bool_property, PropertyStore, SettingsStore, StoreError, UserScope,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Store settings tables as JSON files.
#[derive(Debug, Clone)]
pub struct FsSettingsStore {
    base: PathBuf,
    current_user: u32,
}

impl FsSettingsStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/SoundSettings`).
    pub fn new() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("dev", "slimroms", "SoundSettings")
            .ok_or_else(|| StoreError::Unavailable("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn at(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self {
            base,
            current_user: 0,
        })
    }

    /// Resolve `UserScope::Current` to `user`.
    pub fn with_current_user(mut self, user: u32) -> Self {
        self.current_user = user;
        self
    }

    /// Root directory of the tables.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn global_path(&self) -> PathBuf {
        self.base.join("system.json")
    }

    fn user_path(&self, user: UserScope) -> PathBuf {
        let id = match user {
            UserScope::Current => self.current_user,
            UserScope::Id(id) => id,
        };
        self.base.join("users").join(format!("{id}.json"))
    }

    fn properties_path(&self) -> PathBuf {
        self.base.join("properties.json")
    }
}

fn load_table<T>(path: &Path) -> Result<BTreeMap<String, T>, StoreError>
where
    T: DeserializeOwned,
{
    match fs::read(path) {
        Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
        Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(err) => Err(StoreError::Io(err)),
    }
}

fn save_table<T>(path: &Path, table: &BTreeMap<String, T>) -> Result<(), StoreError>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_vec_pretty(table)?;
    fs::write(path, data)?;
    Ok(())
}

fn read_int(path: &Path, key: &str, default: i32) -> Result<i32, StoreError> {
    let table = load_table::<i32>(path)?;
    Ok(table.get(key).copied().unwrap_or(default))
}

fn write_int(path: &Path, key: &str, value: i32) -> Result<(), StoreError> {
    let mut table = load_table::<i32>(path)?;
    table.insert(key.to_string(), value);
    save_table(path, &table)?;
    debug!(path = %path.display(), key, value, "wrote setting");
    Ok(())
}

impl SettingsStore for FsSettingsStore {
    fn get_int(&self, key: &str, default: i32) -> Result<i32, StoreError> {
        read_int(&self.global_path(), key, default)
    }

    fn get_int_for_user(
        &self,
        key: &str,
        default: i32,
        user: UserScope,
    ) -> Result<i32, StoreError> {
        read_int(&self.user_path(user), key, default)
    }

    fn put_int(&self, key: &str, value: i32) -> Result<(), StoreError> {
        write_int(&self.global_path(), key, value)
    }

    fn put_int_for_user(&self, key: &str, value: i32, user: UserScope) -> Result<(), StoreError> {
        write_int(&self.user_path(user), key, value)
    }
}

impl PropertyStore for FsSettingsStore {
    fn get_bool_property(&self, name: &str, default: bool) -> Result<bool, StoreError> {
        let table = load_table::<String>(&self.properties_path())?;
        Ok(table
            .get(name)
            .and_then(|raw| parse_bool_property(raw))
            .unwrap_or(default))
    }

    fn set_property(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let path = self.properties_path();
        let mut table = load_table::<String>(&path)?;
        table.insert(name.to_string(), value.to_string());
        save_table(&path, &table)?;
        debug!(name, value, "set property");
        Ok(())
    }
}
