//! Single-slot key/value backends the record store persists through

use crate::error::Result;
use fs4::fs_std::FileExt;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Durable string slots addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Exclusive hold on one slot, released when dropped
    type Lock: Send;

    /// Read the value stored under `key`, `None` if the slot was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Block until no other handle on the same storage holds `key`.
    ///
    /// Covers handles in other processes, so a read-modify-write cycle run
    /// under the returned lock cannot interleave with another one.
    fn lock(&self, key: &str) -> Result<Self::Lock>;
}

/// Advisory lock on a slot's `<key>.lock` file
#[derive(Debug)]
pub struct FileLock {
    // The OS drops the lock when the descriptor closes
    _file: File,
}

/// One `<key>.json` file per slot inside a directory
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: PathBuf) -> Self {
        FileKeyValueStore { dir }
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Path of the lock file guarding `key`
    pub fn lock_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.lock", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    type Lock = FileLock;

    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a temp file in the same directory, then rename into place.
    ///
    /// On Windows, `rename` does not overwrite existing files, so we remove the destination first.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let path = self.path_for(key);
        let tmp_path = self
            .dir
            .join(format!(".{}.json.{}.tmp", key, Uuid::new_v4().simple()));

        fs::write(&tmp_path, value)?;

        if cfg!(windows) && path.exists() {
            fs::remove_file(&path)?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn lock(&self, key: &str) -> Result<FileLock> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.lock_path_for(key))?;
        FileExt::lock_exclusive(&file)?;
        Ok(FileLock { _file: file })
    }
}

/// Shared in-memory slots. Clones share the same map, so a second handle
/// behaves like another process looking at the same storage.
///
/// Locking is a no-op: callers sharing one map must share one
/// `DirectoryService` to be serialized.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    type Lock = ();

    fn get(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn lock(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
