use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    record::{self, NewWithdrawal, WithdrawalRecord},
    StoreError,
};

/// Record collection kept as a pretty-printed JSON array in a single file.
///
/// Every operation is a full read-modify-write cycle with nothing held in memory
/// between calls. Nothing guards the cycle, so two overlapping writers can lose
/// an update: the later write replaces the file with its own stale snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the whole collection in file order.
    ///
    /// A missing, unreadable or malformed file is the empty collection. The
    /// failure is logged and never returned, so a corrupt file reads exactly like
    /// a fresh one and is replaced on the next successful write.
    pub async fn list(&self) -> Vec<WithdrawalRecord> {
        self.load().await.unwrap_or_default()
    }

    pub async fn append(&self, new: NewWithdrawal) -> Result<WithdrawalRecord, StoreError> {
        let mut records = self.list().await;

        let record = WithdrawalRecord::stamp(new, record::now());
        records.push(record.clone());

        self.persist(&records).await?;
        log::debug!("Appended record {} ({} in total)", record.timestamp, records.len());
        Ok(record)
    }

    /// Removes every record stamped with `timestamp` and returns how many went.
    pub async fn delete_by_timestamp(&self, timestamp: &str) -> Result<usize, StoreError> {
        let Some(mut records) = self.load().await else {
            log::debug!("Nothing to delete, {} does not exist", self.path.display());
            return Ok(0);
        };

        let before = records.len();
        records.retain(|r| r.timestamp != timestamp);
        let removed = before - records.len();

        self.persist(&records).await?;
        log::debug!("Deleted {removed} record(s) stamped {timestamp}");
        Ok(removed)
    }

    /// `None` only when the file does not exist; any other failure decodes to empty.
    pub(crate) async fn load(&self) -> Option<Vec<WithdrawalRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Unable to read {}, treating as empty: {e}", self.path.display());
                return Some(Vec::new());
            },
        };

        if content.trim().is_empty() {
            return Some(Vec::new());
        }

        match serde_json::from_str(&content) {
            Ok(records) => Some(records),
            Err(e) => {
                log::warn!("Unable to decode {}, treating as empty: {e}", self.path.display());
                Some(Vec::new())
            },
        }
    }

    // overwrites in place, an interrupted write leaves a truncated file behind
    pub(crate) async fn persist(&self, records: &[WithdrawalRecord]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, content).await.map_err(|e| {
            log::error!("Unable to write {}: {e}", self.path.display());
            StoreError::StorageWrite(e)
        })
    }
}
