//! Storage port for the lead store.
//!
//! The store logic never touches the filesystem directly; it talks to a
//! [`StorageBackend`]. The JSON file backend is the real one, the memory
//! backend exists for tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::models::Lead;
use crate::store::backup::BackupSnapshot;

/// Fixed file names inside the data directory. The primary store is one
/// JSON array, fully rewritten on every mutation; there is no partial
/// update and no schema versioning beyond the file name.
pub const LEADS_FILE: &str = "leads.json";
pub const BACKUPS_FILE: &str = "backups.json";

pub trait StorageBackend: Send + Sync {
    fn load_leads(&self) -> Result<Vec<Lead>>;
    fn save_leads(&self, leads: &[Lead]) -> Result<()>;
    fn load_backups(&self) -> Result<Vec<BackupSnapshot>>;
    fn save_backups(&self, snapshots: &[BackupSnapshot]) -> Result<()>;
}

/// Backend storing both stores as pretty-printed JSON files in a data
/// directory. A missing file reads as an empty collection.
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn leads_path(&self) -> PathBuf {
        self.dir.join(LEADS_FILE)
    }

    pub fn backups_path(&self) -> PathBuf {
        self.dir.join(BACKUPS_FILE)
    }

    fn read_json<T: serde::de::DeserializeOwned + Default>(&self, path: &Path) -> Result<T> {
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {}", self.dir.display()))?;
        let content = serde_json::to_string_pretty(value).context("Failed to serialize store")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl StorageBackend for JsonFileBackend {
    fn load_leads(&self) -> Result<Vec<Lead>> {
        self.read_json(&self.leads_path())
    }

    fn save_leads(&self, leads: &[Lead]) -> Result<()> {
        self.write_json(&self.leads_path(), &leads)
    }

    fn load_backups(&self) -> Result<Vec<BackupSnapshot>> {
        self.read_json(&self.backups_path())
    }

    fn save_backups(&self, snapshots: &[BackupSnapshot]) -> Result<()> {
        self.write_json(&self.backups_path(), &snapshots)
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryBackend {
    leads: Mutex<Vec<Lead>>,
    backups: Mutex<Vec<BackupSnapshot>>,
}

impl StorageBackend for MemoryBackend {
    fn load_leads(&self) -> Result<Vec<Lead>> {
        Ok(self.leads.lock().expect("backend lock poisoned").clone())
    }

    fn save_leads(&self, leads: &[Lead]) -> Result<()> {
        *self.leads.lock().expect("backend lock poisoned") = leads.to_vec();
        Ok(())
    }

    fn load_backups(&self) -> Result<Vec<BackupSnapshot>> {
        Ok(self.backups.lock().expect("backend lock poisoned").clone())
    }

    fn save_backups(&self, snapshots: &[BackupSnapshot]) -> Result<()> {
        *self.backups.lock().expect("backend lock poisoned") = snapshots.to_vec();
        Ok(())
    }
}
