//! Client-side fallback cache.
//!
//! When the server is unreachable the client keeps its own bounded,
//! most-recent-first record buffer in a JSON file under the local data
//! directory. No TTL applies here: the buffer is recent history, the
//! server remains the source of truth for freshness, and no merge is
//! attempted once the server is reachable again.
//!
//! Writes are atomic (temp file + rename) with file locking to prevent
//! concurrent access issues.

use crate::types::BmiRecord;
use crate::{Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Maximum records retained client-side
pub const CACHE_CAPACITY: usize = 10;

/// Bounded on-disk record buffer, most-recent-first
pub struct FallbackCache {
    path: PathBuf,
}

impl FallbackCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached records
    ///
    /// Returns an empty buffer if the file doesn't exist. If the file is
    /// unreadable or corrupted, logs a warning and returns an empty
    /// buffer rather than failing the caller.
    pub fn load(&self) -> Result<Vec<BmiRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open cache file {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                return Ok(Vec::new());
            }
        };

        // Shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock cache file {:?}: {}. Treating as empty.",
                self.path,
                e
            );
            return Ok(Vec::new());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        if let Err(e) = read_result {
            tracing::warn!(
                "Failed to read cache file {:?}: {}. Treating as empty.",
                self.path,
                e
            );
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<BmiRecord>>(&contents) {
            Ok(records) => {
                tracing::debug!("Loaded {} cached records from {:?}", records.len(), self.path);
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse cache file {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                Ok(Vec::new())
            }
        }
    }

    /// Prepend a record, trimming to [`CACHE_CAPACITY`], and persist
    pub fn push(&self, record: BmiRecord) -> Result<Vec<BmiRecord>> {
        let mut records = self.load()?;
        records.insert(0, record);
        records.truncate(CACHE_CAPACITY);
        self.save(&records)?;
        Ok(records)
    }

    /// Atomically replace the cache contents
    ///
    /// Writes to a locked temp file in the same directory, syncs, then
    /// renames over the original.
    pub fn save(&self, records: &[BmiRecord]) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            Error::Other(format!("cache path {:?} has no parent directory", self.path))
        })?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(records)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} cached records to {:?}", records.len(), self.path);
        Ok(())
    }
}
