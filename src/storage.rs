//! Durable key/value storage for locally persisted state.
//!
//! Mirrors the browser `localStorage` surface (`getItem`, `setItem`,
//! `removeItem`) so the config store can stay agnostic of where its data
//! actually lives.

use log::*;
#[cfg(test)]
use mockall::automock;
use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::{NavSyncError, Result};

/// Extension used for files written by [`FileStorage`].
pub const STORAGE_FILE_EXTENSION: &str = "json";

/// Environment variable overriding the default storage directory.
pub const STORAGE_DIR_ENV: &str = "NAVSYNC_HOME";

/// Directory name used under `$HOME` when no override is given.
pub const DEFAULT_STORAGE_DIR_NAME: &str = ".navsync";

/// Abstraction over a string key/value store.
#[cfg_attr(test, automock)]
pub trait LocalStorage: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a key that does not exist is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Resolve the storage directory from an explicit path, the
    /// `NAVSYNC_HOME` environment variable, or `$HOME/.navsync`.
    pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = explicit {
            return Ok(dir);
        }

        if let Ok(dir) = std::env::var(STORAGE_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        let home = std::env::var("HOME").map_err(|_| {
            NavSyncError::storage(format!(
                "unable to determine storage directory: set {STORAGE_DIR_ENV} or --storage-dir"
            ))
        })?;

        Ok(Path::new(&home).join(DEFAULT_STORAGE_DIR_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || key.contains(['/', '\\'])
            || key.starts_with('.')
        {
            return Err(NavSyncError::storage(format!(
                "invalid storage key: {key:?}"
            )));
        }

        Ok(self
            .root
            .join(format!("{key}.{STORAGE_FILE_EXTENSION}")))
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no stored item at {}", path.display());
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, value)?;
        debug!("stored item at {}", path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process storage that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.items
            .lock()
            .map_err(|_| NavSyncError::storage("memory storage lock poisoned"))
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
