use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw snapshot I/O.
///
/// A backend is a flat key-value space: one entry per store name, holding the
/// serialized collection. It knows nothing about entities; [`super::EntityStore`]
/// owns the "what" (collections, ids, migration) and the backend the "how".
pub trait SnapshotBackend {
    /// Read the raw snapshot stored under `key`.
    /// Returns Ok(None) if nothing was ever written for that key.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the snapshot stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, key: &str, snapshot: &str) -> Result<()>;

    /// Where the entry lives. For FsBackend a real path, for MemBackend a virtual one.
    fn location(&self, key: &str) -> PathBuf;
}
