//! Small key-value persistence for user preferences.
//!
//! Values are strings; callers store JSON in them. [`Preferences`] is the only consumer in
//! the engine: it loads the favorite ids and the geolocation flag at startup and writes
//! them back whenever they change.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use ahash::AHashMap;
use once_cell::sync::Lazy;
use tracing::{debug, instrument, warn};

pub use error::StoreError;
use error::Result;

use crate::filter::Favorites;

pub const FAVORITES_KEY: &str = "urbain.favorites";
pub const GEO_ENABLED_KEY: &str = "urbain.geo_enabled";

const STORE_FILE_NAME: &str = "store.json";
pub const DATA_DIR_DEFAULT: &str = "./urbain_data";

/// Directory used by [`FileStore::open_default`].
///
/// `URBAIN_DATA_DIR` wins; otherwise the platform data directory when the `system-dirs`
/// feature is enabled, else [`DATA_DIR_DEFAULT`].
pub static DATA_DIR: Lazy<PathBuf> = Lazy::new(|| {
    std::env::var("URBAIN_DATA_DIR")
        .map(PathBuf::from)
        .ok()
        .or_else(platform_data_dir)
        .unwrap_or_else(|| PathBuf::from(DATA_DIR_DEFAULT))
});

#[cfg(feature = "system-dirs")]
fn platform_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "urbain", "urbain-connect")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(not(feature = "system-dirs"))]
fn platform_data_dir() -> Option<PathBuf> {
    None
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Volatile store, mostly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store file at `path`.
    #[instrument(name = "Open file store", level = "debug")]
    pub fn open(path: impl AsRef<Path> + std::fmt::Debug) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            BTreeMap::new()
        };
        debug!(entries = entries.len(), "Loaded store");
        Ok(Self { path, entries })
    }

    /// Open `store.json` inside [`DATA_DIR`].
    pub fn open_default() -> Result<Self> {
        Self::open(DATA_DIR.join(STORE_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    pub favorites: Favorites,
    pub geo_enabled: bool,
}

impl Preferences {
    /// Read preferences; unreadable values fall back to defaults with a warning.
    #[instrument(name = "Load preferences", skip_all, level = "debug")]
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        let favorites = match store.get(FAVORITES_KEY)? {
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Ignoring unreadable favorites");
                    Favorites::new()
                }),
            None => Favorites::new(),
        };
        let geo_enabled = match store.get(GEO_ENABLED_KEY)? {
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable geolocation flag");
                false
            }),
            None => false,
        };
        Ok(Self {
            favorites,
            geo_enabled,
        })
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        save_favorites(store, &self.favorites)?;
        save_geo_enabled(store, self.geo_enabled)
    }
}

pub fn save_favorites(store: &mut impl KeyValueStore, favorites: &Favorites) -> Result<()> {
    let ids: Vec<&str> = favorites.iter().collect();
    store.set(FAVORITES_KEY, serde_json::to_string(&ids)?)
}

pub fn save_geo_enabled(store: &mut impl KeyValueStore, enabled: bool) -> Result<()> {
    store.set(GEO_ENABLED_KEY, serde_json::to_string(&enabled)?)
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum StoreError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        #[error("Serialization error: {0}")]
        Serde(#[from] serde_json::Error),
    }

    pub type Result<T> = std::result::Result<T, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_default_when_store_is_empty() {
        let store = MemoryStore::new();
        let prefs = Preferences::load(&store).unwrap();
        assert!(prefs.favorites.is_empty());
        assert!(!prefs.geo_enabled);
    }

    #[test]
    fn test_preferences_round_trip_in_memory() {
        let mut store = MemoryStore::new();
        let prefs = Preferences {
            favorites: ["7", "1"].into_iter().collect(),
            geo_enabled: true,
        };
        prefs.save(&mut store).unwrap();

        assert_eq!(
            store.get(FAVORITES_KEY).unwrap().as_deref(),
            Some(r#"["7","1"]"#)
        );
        assert_eq!(store.get(GEO_ENABLED_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(Preferences::load(&store).unwrap(), prefs);
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(FAVORITES_KEY, "{not json".to_string()).unwrap();
        store.set(GEO_ENABLED_KEY, "\"yes\"".to_string()).unwrap();

        let prefs = Preferences::load(&store).unwrap();
        assert!(prefs.favorites.is_empty());
        assert!(!prefs.geo_enabled);
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        save_favorites(&mut store, &["12"].into_iter().collect()).unwrap();
        save_geo_enabled(&mut store, true).unwrap();
        assert!(path.exists());

        let reopened = FileStore::open(&path).unwrap();
        let prefs = Preferences::load(&reopened).unwrap();
        assert!(prefs.favorites.contains("12"));
        assert!(prefs.geo_enabled);
    }

    #[test]
    fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path).unwrap();
        store.set("k", "v".to_string()).unwrap();
        store.remove("k").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), None);
    }
}
