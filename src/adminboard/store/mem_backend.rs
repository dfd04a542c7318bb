use super::backend::SnapshotBackend;
use crate::error::{AdminError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

/// In-memory snapshot backend for testing.
///
/// Clones share the same entries, so a store can be dropped and reopened over
/// a clone to observe what was persisted. Uses `Rc<RefCell>` since stores are
/// single-threaded.
#[derive(Clone, Default)]
pub struct MemBackend {
    entries: Rc<RefCell<HashMap<String, String>>>,
    simulate_write_error: Rc<RefCell<bool>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Seed a raw snapshot, e.g. one written by an older version.
    pub fn put_raw(&self, key: &str, snapshot: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), snapshot.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SnapshotBackend for MemBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(AdminError::Io(std::io::Error::other("simulated write error")));
        }
        self.put_raw(key, snapshot);
        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        PathBuf::from("memory").join(format!("{}.json", key))
    }
}
