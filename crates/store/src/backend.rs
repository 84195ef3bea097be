use crate::StoreError;
use serde_json::Value;
use setlatro_core::GameSnapshot;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

pub type Saves = BTreeMap<String, GameSnapshot>;

/// Where snapshots live between processes.
pub trait SaveBackend: Send + Sync {
    fn load(&self) -> Result<Saves, StoreError>;
    fn save(&self, saves: &Saves) -> Result<(), StoreError>;
}

/// One JSON object keyed by session id. Writes go to a sibling temp file
/// and are renamed over the target.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveBackend for JsonFileBackend {
    fn load(&self) -> Result<Saves, StoreError> {
        if !self.path.exists() {
            return Ok(Saves::new());
        }
        let body = fs::read_to_string(&self.path)?;
        if body.trim().is_empty() {
            return Ok(Saves::new());
        }
        let raw: BTreeMap<String, Value> = serde_json::from_str(&body)?;
        let mut saves = Saves::new();
        for (id, value) in raw {
            match serde_json::from_value::<GameSnapshot>(value) {
                Ok(snapshot) => {
                    saves.insert(id, snapshot);
                }
                Err(err) => warn!(%id, %err, "skipping unreadable save"),
            }
        }
        Ok(saves)
    }

    fn save(&self, saves: &Saves) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let body = serde_json::to_string_pretty(saves)?;
        let temp = self.temp_path();
        fs::write(&temp, body)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// Keeps saves in process. Used by tests and by deployments that do not
/// want durability.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    saves: Mutex<Saves>,
    writes: AtomicUsize,
}

impl MemoryBackend {
    pub fn with_saves(saves: Saves) -> Self {
        Self {
            saves: Mutex::new(saves),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn saved(&self) -> Saves {
        self.saves
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SaveBackend for MemoryBackend {
    fn load(&self) -> Result<Saves, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, saves: &Saves) -> Result<(), StoreError> {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) = saves.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
