use super::backend::SnapshotBackend;
use crate::error::{AdminError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File-based snapshots: `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(AdminError::Io)?;
        }
        Ok(())
    }
}

impl SnapshotBackend for FsBackend {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.location(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(AdminError::Io)?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, snapshot: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.location(key);
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, snapshot).map_err(AdminError::Io)?;
        fs::rename(&tmp, target).map_err(AdminError::Io)?;

        Ok(())
    }

    fn location(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}
