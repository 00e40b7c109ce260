use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

/// Raw registry response read back from disk.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub body: String,
    pub saved_at: Option<DateTime<Utc>>,
}

/// One JSON snapshot file per designee category under a cache directory.
pub struct SnapshotStore {
    cache_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir).map_err(|e| Error::storage(&cache_dir, e))?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn snapshot_path(&self, category: u32) -> PathBuf {
        self.cache_dir.join(format!("designees-{}.json", category))
    }

    /// Read the snapshot for `category`. A missing file is `Ok(None)`.
    pub fn load(&self, category: u32) -> Result<Option<Snapshot>> {
        let path = self.snapshot_path(category);
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(category, path = %path.display(), "No snapshot on disk");
                return Ok(None);
            }
            Err(e) => return Err(Error::storage(path, e)),
        };

        let saved_at = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        Ok(Some(Snapshot { body, saved_at }))
    }

    /// Write `body` to a temporary file next to the snapshot. Nothing is
    /// replaced until [`StagedSnapshot::commit`]; dropping the staged file
    /// removes it.
    pub fn stage(&self, category: u32, body: &str) -> Result<StagedSnapshot> {
        let target = self.snapshot_path(category);
        let mut temp = tempfile::Builder::new()
            .prefix(&format!("designees-{}.", category))
            .suffix(".tmp")
            .tempfile_in(&self.cache_dir)
            .map_err(|e| Error::storage(&self.cache_dir, e))?;

        temp.write_all(body.as_bytes())
            .and_then(|_| temp.as_file().sync_all())
            .map_err(|e| Error::storage(temp.path(), e))?;

        Ok(StagedSnapshot {
            temp,
            target,
            dir: self.cache_dir.clone(),
        })
    }

    /// Atomically replace the snapshot for `category` with `body`.
    pub fn save(&self, category: u32, body: &str) -> Result<PathBuf> {
        self.stage(category, body)?.commit()
    }
}

/// A fully written snapshot waiting to be renamed into place.
pub struct StagedSnapshot {
    temp: NamedTempFile,
    target: PathBuf,
    dir: PathBuf,
}

impl StagedSnapshot {
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Rename the staged file over the snapshot, then flush the directory
    /// entry so the rename survives a power loss.
    pub fn commit(self) -> Result<PathBuf> {
        let Self { temp, target, dir } = self;
        temp.persist(&target)
            .map_err(|e| Error::storage(&target, e.error))?;
        sync_dir(&dir)?;
        Ok(target)
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    fs::File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| Error::storage(dir, e))
}

// Directories cannot be opened for fsync on Windows
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}
