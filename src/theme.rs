//! Light/dark theme preference and where it is kept.
//!
//! The preference lives under the key `"theme"` in a small key-value store.
//! `"light"` selects the light theme; any other value, or no value, is dark.

use std::collections::BTreeMap;
use std::path::PathBuf;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    #[default]
    Dark,
}

impl ThemePreference {
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Self::Light => egui::Visuals::light(),
            Self::Dark => egui::Visuals::dark(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage file {} is not a JSON object: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value persistence.
pub trait ThemeStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten on every `set`. A missing file is an
/// empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&data).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl ThemeStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                log::warn!("Ignoring unreadable preferences: {}", e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        // A corrupt file is replaced rather than blocking every future write.
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_vec_pretty(&entries).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

/// Theme switch bound to a store. Reads once on construction, writes once
/// per toggle.
pub struct ThemeSwitch {
    store: Box<dyn ThemeStore>,
    current: ThemePreference,
}

impl ThemeSwitch {
    pub fn new(store: Box<dyn ThemeStore>) -> Self {
        let current = ThemePreference::from_stored(store.get(THEME_KEY).as_deref());
        log::debug!("Theme preference loaded: {}", current.as_str());
        Self { store, current }
    }

    pub fn current(&self) -> ThemePreference {
        self.current
    }

    /// Flip the theme and persist it. A failed write is logged; the
    /// in-memory theme still flips.
    pub fn toggle(&mut self) -> ThemePreference {
        self.current = self.current.toggled();
        if let Err(e) = self.store.set(THEME_KEY, self.current.as_str()) {
            log::error!("Could not save theme preference: {}", e);
        }
        log::info!("Theme switched to {}", self.current.as_str());
        self.current
    }

    pub fn stored(&self) -> Option<String> {
        self.store.get(THEME_KEY)
    }
}
