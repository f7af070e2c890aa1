//! Record store: the three user collections persisted as one JSON document
//!
//! The whole document lives under a single key of a [`KeyValueStore`] and is
//! rewritten wholesale on every save:
//!
//! ```json
//! { "students": [...], "teachers": [...], "admins": [...] }
//! ```
//!
//! An absent or corrupt payload is replaced by an empty document, which is
//! persisted before being returned. A slot that cannot be read is never
//! overwritten.

use crate::domain::{Admin, Role, Student, Teacher};
use crate::error::Result;
use crate::infrastructure::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

/// Everything the application persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub admins: Vec<Admin>,
}

impl StoreDocument {
    /// True if any admin, teacher or student already uses `email`
    pub fn email_taken(&self, email: &str) -> bool {
        self.admins.iter().any(|a| a.email == email)
            || self.teachers.iter().any(|t| t.email == email)
            || self.students.iter().any(|s| s.email == email)
    }

    /// Drop entries whose role does not match the collection they sit in.
    /// Returns how many were dropped.
    fn drop_misplaced(&mut self) -> usize {
        fn keep(id: &str, actual: Role, expected: Role) -> bool {
            if actual == expected {
                return true;
            }
            warn!(id = %id, role = %actual, collection = %expected, "Skipping entry with the wrong role");
            false
        }

        let before = self.admins.len() + self.teachers.len() + self.students.len();
        self.admins.retain(|a| keep(&a.id, a.role, Role::Admin));
        self.teachers.retain(|t| keep(&t.id, t.role, Role::Teacher));
        self.students.retain(|s| keep(&s.id, s.role, Role::Student));
        before - (self.admins.len() + self.teachers.len() + self.students.len())
    }
}

/// Outcome of inspecting the persisted slot
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nothing has been written under the key yet
    Absent,
    /// Something is stored but it is not a usable document
    Corrupt(String),
    /// The backend failed to read the slot; its contents are unknown
    Unreadable(String),
    Valid(StoreDocument),
}

/// Loads and saves the [`StoreDocument`] under one well-known key
#[derive(Debug, Clone)]
pub struct RecordStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        RecordStore {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Exclusive hold on the slot for one read-modify-write cycle
    pub fn lock(&self) -> Result<S::Lock> {
        self.backend.lock(&self.key)
    }

    fn classify(&self) -> Result<LoadState> {
        let raw = match self.backend.get(&self.key)? {
            Some(raw) => raw,
            None => return Ok(LoadState::Absent),
        };

        let mut document: StoreDocument = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => return Ok(LoadState::Corrupt(e.to_string())),
        };

        let dropped = document.drop_misplaced();
        if dropped > 0 {
            warn!(key = %self.key, dropped, "Ignored entries stored in the wrong collection");
        }
        Ok(LoadState::Valid(document))
    }

    /// Classify the persisted payload without modifying it
    pub fn inspect(&self) -> LoadState {
        self.classify().unwrap_or_else(|e| LoadState::Unreadable(e.to_string()))
    }

    /// Return the persisted document for reading.
    ///
    /// An absent or corrupt slot is reset to an empty document. An unreadable
    /// slot yields an empty document for this call only.
    pub fn load(&self) -> StoreDocument {
        match self.inspect() {
            LoadState::Valid(document) => document,
            LoadState::Unreadable(reason) => {
                error!(key = %self.key, reason = %reason, "Record store is unreadable, serving an empty view");
                StoreDocument::default()
            }
            state => {
                let empty = StoreDocument::default();
                if let Err(e) = self.reset(state) {
                    error!(key = %self.key, error = %e, "Failed to persist empty record store");
                }
                empty
            }
        }
    }

    /// Return the persisted document as the base of a mutation.
    ///
    /// Like [`RecordStore::load`], except that read and reset failures are
    /// returned, so a mutation never starts from a document it could not read.
    pub fn load_for_update(&self) -> Result<StoreDocument> {
        let state = self.classify()?;
        if let LoadState::Valid(document) = state {
            return Ok(document);
        }
        self.reset(state)?;
        Ok(StoreDocument::default())
    }

    fn reset(&self, state: LoadState) -> Result<()> {
        match state {
            LoadState::Corrupt(reason) => {
                warn!(key = %self.key, reason = %reason, "Record store is corrupt, resetting to empty store");
            }
            _ => {
                debug!(key = %self.key, "No record store found, initializing empty store");
            }
        }
        self.save(&StoreDocument::default())
    }

    /// Serialize and persist the whole document, replacing any prior value
    pub fn save(&self, document: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string(document)?;
        self.backend.set(&self.key, &json)?;
        debug!(
            key = %self.key,
            students = document.students.len(),
            teachers = document.teachers.len(),
            admins = document.admins.len(),
            "Saved record store"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewStudent;
    use crate::infrastructure::{FileKeyValueStore, MemoryKeyValueStore};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    const KEY: &str = "academia-system-db";

    /// Memory backend whose reads can be switched to fail
    #[derive(Clone, Default)]
    struct FlakyBackend {
        inner: MemoryKeyValueStore,
        fail_reads: Arc<AtomicBool>,
    }

    impl KeyValueStore for FlakyBackend {
        type Lock = ();

        fn get(&self, key: &str) -> Result<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                let err = std::io::Error::new(std::io::ErrorKind::Interrupted, "read interrupted");
                return Err(err.into());
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value)
        }

        fn lock(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    fn sample_document() -> StoreDocument {
        let mut student = NewStudent {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            student_id: "S100".to_string(),
            class_name: "10A".to_string(),
        }
        .into_student();
        crate::domain::records::upsert_mark(&mut student.marks, "Jan", "Math", 85.0);

        StoreDocument {
            students: vec![student],
            teachers: vec![],
            admins: vec![Admin::new("Root", "root@x.com")],
        }
    }

    #[test]
    fn test_inspect_absent() {
        let store = RecordStore::new(MemoryKeyValueStore::new(), KEY);
        assert_eq!(store.inspect(), LoadState::Absent);
    }

    #[test]
    fn test_load_initializes_and_persists_empty_store() {
        let backend = MemoryKeyValueStore::new();
        let store = RecordStore::new(backend.clone(), KEY);

        let document = store.load();
        assert_eq!(document, StoreDocument::default());

        let raw = backend.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"students": [], "teachers": [], "admins": []})
        );
    }

    #[test]
    fn test_missing_collection_is_corrupt() {
        let backend = MemoryKeyValueStore::new();
        backend
            .set(KEY, r#"{"students": [], "teachers": []}"#)
            .unwrap();
        let store = RecordStore::new(backend.clone(), KEY);

        assert!(matches!(store.inspect(), LoadState::Corrupt(_)));
        assert_eq!(store.load(), StoreDocument::default());
        assert!(matches!(store.inspect(), LoadState::Valid(_)));
    }

    #[test]
    fn test_unparseable_payload_resets() {
        let backend = MemoryKeyValueStore::new();
        backend.set(KEY, "{not json").unwrap();
        let store = RecordStore::new(backend, KEY);

        assert!(matches!(store.inspect(), LoadState::Corrupt(_)));
        assert_eq!(store.load(), StoreDocument::default());
    }

    #[test]
    fn test_entry_in_wrong_collection_is_skipped() {
        let mut document = sample_document();
        let mut misplaced = document.students[0].clone();
        misplaced.id = "s-misplaced".to_string();
        misplaced.role = Role::Teacher;
        document.students.push(misplaced);

        let backend = MemoryKeyValueStore::new();
        backend
            .set(KEY, &serde_json::to_string(&document).unwrap())
            .unwrap();
        let store = RecordStore::new(backend, KEY);

        match store.inspect() {
            LoadState::Valid(loaded) => {
                assert_eq!(loaded.students.len(), 1);
                assert_eq!(loaded.students[0].name, "Alice");
                assert_eq!(loaded.admins.len(), 1);
            }
            other => panic!("Expected Valid, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_slot_is_never_overwritten() {
        let backend = FlakyBackend::default();
        let store = RecordStore::new(backend.clone(), KEY);
        store.save(&sample_document()).unwrap();

        backend.fail_reads.store(true, Ordering::SeqCst);
        assert!(matches!(store.inspect(), LoadState::Unreadable(_)));
        assert_eq!(store.load(), StoreDocument::default());
        assert!(store.load_for_update().is_err());

        backend.fail_reads.store(false, Ordering::SeqCst);
        assert_eq!(store.load(), sample_document());
    }

    #[test]
    fn test_save_then_load_round_trip_across_instances() {
        let temp = TempDir::new().unwrap();
        let document = sample_document();

        let store = RecordStore::new(FileKeyValueStore::new(temp.path().to_path_buf()), KEY);
        store.save(&document).unwrap();

        // A fresh store over the same directory models a new process
        let fresh = RecordStore::new(FileKeyValueStore::new(temp.path().to_path_buf()), KEY);
        assert_eq!(fresh.load(), document);
    }

    #[test]
    fn test_save_uses_original_field_names() {
        let backend = MemoryKeyValueStore::new();
        let store = RecordStore::new(backend.clone(), KEY);
        store.save(&sample_document()).unwrap();

        let raw = backend.get(KEY).unwrap().unwrap();
        assert!(raw.contains("\"studentId\":\"S100\""));
        assert!(raw.contains("\"class\":\"10A\""));
        assert!(raw.contains("\"role\":\"ADMIN\""));
    }

    #[test]
    fn test_email_taken_spans_collections() {
        let document = sample_document();
        assert!(document.email_taken("alice@x.com"));
        assert!(document.email_taken("root@x.com"));
        assert!(!document.email_taken("ALICE@x.com"));
    }
}
