//! # Snapshot Storage
//!
//! Key/value slots holding JSON snapshots. The store writes one slot
//! (`case-store`) after every mutation and reads it once on open.
//!
//! - [`MemoryStorage`]: in-process map. Clones share the same map.
//! - [`FileStorage`]: one `<key>.json` file per slot, replaced atomically.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{EconomyError, EconomyResult};

/// A backend able to hold snapshot payloads by key.
pub trait SnapshotStorage: Send + Sync {
    /// Reads the payload stored under `key`. `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Storage` if the backend fails.
    fn read(&self, key: &str) -> EconomyResult<Option<String>>;

    /// Replaces the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Storage` if the backend fails.
    fn write(&self, key: &str, payload: &str) -> EconomyResult<()>;
}

/// In-process snapshot slots.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one slot.
    #[must_use]
    pub fn with_slot(key: &str, payload: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slots.write().insert(key.to_string(), payload.into());
        storage
    }

    /// Copy of the payload under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.slots.read().get(key).cloned()
    }

    /// Drops the slot under `key`, returning its payload.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.slots.write().remove(key)
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> EconomyResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, payload: &str) -> EconomyResult<()> {
        self.slots.write().insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// Snapshot slots as files in one directory.
///
/// Writes go to `<key>.json.tmp`, are flushed and synced, then renamed over
/// `<key>.json`. A crash mid-write leaves the previous snapshot intact.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (and creates if needed) the snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns `EconomyError::Storage` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> EconomyResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            EconomyError::Storage(format!("failed to create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }

    /// Snapshot directory.
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> EconomyResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EconomyError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn write(&self, key: &str, payload: &str) -> EconomyResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        let file: File = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|e| EconomyError::Storage(format!("failed to open {}: {e}", tmp.display())))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(payload.as_bytes())
            .map_err(|e| EconomyError::Storage(format!("snapshot write failed: {e}")))?;
        writer
            .flush()
            .map_err(|e| EconomyError::Storage(format!("snapshot flush failed: {e}")))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| EconomyError::Storage(format!("snapshot sync failed: {e}")))?;
        drop(writer);

        fs::rename(&tmp, &path).map_err(|e| {
            EconomyError::Storage(format!("failed to replace {}: {e}", path.display()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("casebox_storage_{tag}_{nanos}"))
    }

    #[test]
    fn test_memory_clones_share_slots() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("case-store", "{}").unwrap();
        assert_eq!(other.read("case-store").unwrap().as_deref(), Some("{}"));

        assert_eq!(other.remove("case-store").as_deref(), Some("{}"));
        assert!(storage.read("case-store").unwrap().is_none());
    }

    #[test]
    fn test_file_write_then_read() {
        let dir = temp_dir("rw");
        let storage = FileStorage::new(&dir).unwrap();

        assert!(storage.read("case-store").unwrap().is_none());
        storage.write("case-store", r#"{"balance":1}"#).unwrap();
        storage.write("case-store", r#"{"balance":2}"#).unwrap();
        assert_eq!(
            storage.read("case-store").unwrap().as_deref(),
            Some(r#"{"balance":2}"#)
        );
        assert!(!storage.path_for("case-store").with_extension("json.tmp").exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_path_for_sanitizes_key() {
        let storage = FileStorage {
            dir: PathBuf::from("/snapshots"),
        };
        assert_eq!(
            storage.path_for("../evil key"),
            PathBuf::from("/snapshots/___evil_key.json")
        );
        assert_eq!(storage.dir(), Path::new("/snapshots"));
    }
}
