//! On-device key-value persistence for settings and the cached timetable.
//!
//! The resolver never reads from here; the app loads what it needs and passes
//! plain values in.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::Shape;
use crate::error::TimetableError;

/// String key-value storage with an explicit lifecycle.
///
/// Implementations are opened (init) by their constructors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimetableError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TimetableError>;
    fn remove(&mut self, key: &str) -> Result<(), TimetableError>;
    fn clear(&mut self) -> Result<(), TimetableError>;
}

/// Volatile store, for tests and for platforms without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimetableError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimetableError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TimetableError> {
        self.values.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TimetableError> {
        self.values.clear();
        Ok(())
    }
}

/// A JSON object on disk. Every write rewrites the whole file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty one if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TimetableError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                TimetableError::store(format!("corrupt store '{}': {e}", path.display()))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(TimetableError::store(format!(
                    "cannot read store '{}': {e}",
                    path.display()
                )))
            }
        };
        let store = Self { path, values };
        store.flush()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), TimetableError> {
        let json = serde_json::to_string_pretty(&self.values)
            .map_err(|e| TimetableError::store(format!("cannot encode store: {e}")))?;
        fs::write(&self.path, json).map_err(|e| {
            log::warn!("failed to write store {}: {e}", self.path.display());
            TimetableError::store(format!("cannot write store '{}': {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimetableError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimetableError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), TimetableError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), TimetableError> {
        self.values.clear();
        self.flush()
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(TimetableError::store(format!("unknown theme '{other}'"))),
        }
    }
}

const THEME_KEY: &str = "settings.theme";
const REMINDERS_KEY: &str = "settings.reminders_enabled";
const LEAD_KEY: &str = "settings.reminder_lead_minutes";

/// User preferences persisted on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    pub reminders_enabled: bool,
    /// How long before a class its reminder fires.
    pub reminder_lead_minutes: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            reminders_enabled: true,
            reminder_lead_minutes: 15,
        }
    }
}

impl Settings {
    /// Load settings, using the default for any key that is absent or
    /// unreadable.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, TimetableError> {
        let defaults = Self::default();
        Ok(Self {
            theme: read_or(store, THEME_KEY, defaults.theme)?,
            reminders_enabled: read_or(store, REMINDERS_KEY, defaults.reminders_enabled)?,
            reminder_lead_minutes: read_or(store, LEAD_KEY, defaults.reminder_lead_minutes)?,
        })
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), TimetableError> {
        store.set(THEME_KEY, self.theme.as_str())?;
        store.set(REMINDERS_KEY, &self.reminders_enabled.to_string())?;
        store.set(LEAD_KEY, &self.reminder_lead_minutes.to_string())
    }

    /// Remove all persisted settings, e.g. on sign-out.
    pub fn reset<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), TimetableError> {
        for key in [THEME_KEY, REMINDERS_KEY, LEAD_KEY] {
            store.remove(key)?;
        }
        Ok(())
    }
}

fn read_or<S, T>(store: &S, key: &str, default: T) -> Result<T, TimetableError>
where
    S: KeyValueStore + ?Sized,
    T: FromStr,
{
    let Some(raw) = store.get(key)? else {
        return Ok(default);
    };
    match raw.parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            log::warn!("ignoring unreadable setting {key}={raw:?}");
            Ok(default)
        }
    }
}

/// The last fetched class list for each view, for offline startup.
pub struct TimetableCache<'a, S: KeyValueStore + ?Sized> {
    store: &'a mut S,
}

impl<'a, S: KeyValueStore + ?Sized> TimetableCache<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    fn key(shape: Shape) -> String {
        format!("timetable.{}", shape.as_str())
    }

    pub fn save(&mut self, shape: Shape, payload: &Value) -> Result<(), TimetableError> {
        self.store.set(&Self::key(shape), &payload.to_string())
    }

    /// The cached payload, or `None` if nothing usable is cached.
    pub fn load(&self, shape: Shape) -> Result<Option<Value>, TimetableError> {
        let key = Self::key(shape);
        let Some(raw) = self.store.get(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("discarding unreadable cache entry {key}: {e}");
                Ok(None)
            }
        }
    }

    pub fn evict(&mut self, shape: Shape) -> Result<(), TimetableError> {
        self.store.remove(&Self::key(shape))
    }
}
