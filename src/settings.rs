use std::cell::RefCell;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories_next::ProjectDirs;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub const EXIFTOOL_KEY: &str = "exiftool";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CONFIG_DIR_ENV: &str = "TIMESTAMPER_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine a configuration directory")]
    NoConfigDir,

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not a JSON object: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent key-value settings. Writes are assumed to succeed; stores that
/// can fail log instead of returning an error.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);
    fn remove(&mut self, key: &str);

    fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) => Some(text),
            _ => None,
        }
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Option<Value> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.borrow_mut().set(key, value);
    }

    fn remove(&mut self, key: &str) {
        self.borrow_mut().remove(key);
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Option<Value> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemorySettings {
    values: BTreeMap<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Settings kept in one JSON object file, written through on every change.
///
/// Not `Clone`: two copies would each write their own map over the file.
/// Share one through `Rc<RefCell<_>>` instead.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileSettings {
    /// Opens the file at `path`; a missing file starts out empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "settings file does not exist yet");
            return Ok(Self {
                path,
                values: Map::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|source| SettingsError::Io {
            path: path.clone(),
            source,
        })?;
        let values = if contents.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(err) = self.try_persist() {
            warn!(path = %self.path.display(), "failed to write settings: {err}");
        }
    }

    fn try_persist(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, encoded)
    }
}

impl SettingsStore for JsonFileSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.values.remove(key).is_some() {
            self.persist();
        }
    }
}

/// The directory holding `settings.json`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppHome(pub PathBuf);

impl AppHome {
    /// `$TIMESTAMPER_CONFIG_DIR` when set, otherwise the platform config dir.
    pub fn resolve() -> Result<AppHome, SettingsError> {
        if let Ok(override_dir) = env::var(CONFIG_DIR_ENV) {
            return Ok(AppHome(PathBuf::from(override_dir)));
        }
        ProjectDirs::from("", "", "Timestamper")
            .map(|dirs| AppHome(dirs.config_dir().to_path_buf()))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.file_path(SETTINGS_FILE_NAME)
    }

    pub fn open_settings(&self) -> Result<JsonFileSettings, SettingsError> {
        JsonFileSettings::open(self.settings_path())
    }
}

impl Deref for AppHome {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.0.as_path()
    }
}
