//! Persistent blob store adapter.
//!
//! The domain store never touches the filesystem directly; it talks to a
//! [`BlobStore`] holding named slots of serialized JSON. `FileStore` keeps
//! one JSON file per slot under a data directory, written atomically via a
//! temp file and rename. `MemoryStore` backs tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// The named slots the dashboard persists. Each holds a full serialized
/// snapshot of its collection; writes replace the whole slot.
pub const SLOT_PROJECTS: &str = "projects";
pub const SLOT_TASKS: &str = "tasks";
pub const SLOT_TEAM_MEMBERS: &str = "teamMembers";
pub const SLOT_WORKFLOWS: &str = "workflows";
pub const SLOT_ACTIVITIES: &str = "activities";
pub const SLOT_SESSION: &str = "session";

/// Key-value persistence for serialized snapshots.
///
/// Implementations only store and return bytes of JSON text; they never hold
/// live references into the in-memory collections.
pub trait BlobStore {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    fn get(&self, slot: &str) -> io::Result<Option<String>>;

    /// Replace a slot with a new snapshot.
    fn set(&self, slot: &str, data: &str) -> io::Result<()>;

    /// Drop a slot entirely. Removing an absent slot is not an error.
    fn remove(&self, slot: &str) -> io::Result<()>;
}

/// File-per-slot store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileStore { dir: dir.to_path_buf() })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, slot: &str) -> io::Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }
        let mut buf = String::new();
        File::open(&path)?.read_to_string(&mut buf)?;
        Ok(Some(buf))
    }

    fn set(&self, slot: &str, data: &str) -> io::Result<()> {
        // Atomic-ish write via temp + rename.
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> io::Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, slot: &str) -> io::Result<Option<String>> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn set(&self, slot: &str, data: &str) -> io::Result<()> {
        self.slots.borrow_mut().insert(slot.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> io::Result<()> {
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("workflow-hub-test-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn file_store_round_trips_a_slot() {
        let dir = scratch_dir("roundtrip");
        let store = FileStore::open(&dir).unwrap();
        assert_eq!(store.get(SLOT_TASKS).unwrap(), None);

        store.set(SLOT_TASKS, r#"[{"id":1}]"#).unwrap();
        assert_eq!(store.get(SLOT_TASKS).unwrap().as_deref(), Some(r#"[{"id":1}]"#));

        store.set(SLOT_TASKS, "[]").unwrap();
        assert_eq!(store.get(SLOT_TASKS).unwrap().as_deref(), Some("[]"));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn file_store_remove_is_idempotent() {
        let dir = scratch_dir("remove");
        let store = FileStore::open(&dir).unwrap();
        store.set(SLOT_SESSION, "{}").unwrap();
        store.remove(SLOT_SESSION).unwrap();
        store.remove(SLOT_SESSION).unwrap();
        assert_eq!(store.get(SLOT_SESSION).unwrap(), None);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn memory_store_round_trips_a_slot() {
        let store = MemoryStore::new();
        assert_eq!(store.get(SLOT_PROJECTS).unwrap(), None);
        store.set(SLOT_PROJECTS, "[1,2,3]").unwrap();
        assert_eq!(store.get(SLOT_PROJECTS).unwrap().as_deref(), Some("[1,2,3]"));
        store.remove(SLOT_PROJECTS).unwrap();
        assert_eq!(store.get(SLOT_PROJECTS).unwrap(), None);
    }
}
