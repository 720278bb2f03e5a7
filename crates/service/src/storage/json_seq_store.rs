use std::path::{Path, PathBuf};

use models::Record;
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Insertion-ordered sequence of records backed by a JSON array file.
///
/// The file is read once by [`JsonSeqStore::load`] and only written again by
/// [`JsonSeqStore::flush`]; every other operation works on memory alone.
/// Each operation holds the lock for its whole scan-and-mutate, so two
/// mutations of the same sequence never interleave.
pub struct JsonSeqStore<T> {
    inner: RwLock<Vec<T>>,
    file_path: PathBuf,
}

impl<T: Record> JsonSeqStore<T> {
    /// Read the sequence from `path`. A missing, unreadable or malformed file
    /// yields an empty sequence. Inside a valid array, a record that does not
    /// fit `T` is skipped on its own and the rest are kept.
    pub async fn load<P: Into<PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        let records: Vec<T> = match fs::read(&file_path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<Value>>(&bytes) {
                Ok(items) => decode_each(&file_path, items),
                Err(e) => {
                    warn!(file = %file_path.display(), error = %e, "cannot parse data file; starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(file = %file_path.display(), error = %e, "cannot read data file; starting empty");
                Vec::new()
            }
        };
        debug!(file = %file_path.display(), count = records.len(), "loaded {}", T::LABEL);
        Self::from_records(file_path, records)
    }

    pub fn from_records<P: Into<PathBuf>>(path: P, records: Vec<T>) -> Self {
        Self { inner: RwLock::new(records), file_path: path.into() }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Overwrite the backing file with the current sequence, pretty-printed.
    pub async fn flush(&self) -> Result<(), ServiceError> {
        let records = self.inner.read().await;
        let data = serde_json::to_vec_pretty(&*records).map_err(|e| ServiceError::Storage(e.to_string()))?;
        drop(records);
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("{}: {e}", self.file_path.display())))?;
        Ok(())
    }

    /// Snapshot of the whole sequence in insertion order.
    pub async fn list(&self) -> Vec<T> {
        self.inner.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// First record whose primary key equals `key`.
    pub async fn get(&self, key: &str) -> Result<T, ServiceError> {
        let records = self.inner.read().await;
        records
            .iter()
            .find(|r| r.key_matches(key))
            .cloned()
            .ok_or_else(|| ServiceError::not_found(T::LABEL))
    }

    /// Run `f` against the current sequence under the read lock.
    pub async fn read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        let records = self.inner.read().await;
        f(records.as_slice())
    }

    /// Build a record from the current sequence and append it, all under one
    /// write lock so the key chosen by `build` is still free when pushed.
    pub async fn insert_with<F>(&self, build: F) -> T
    where
        F: FnOnce(&[T]) -> T,
    {
        let mut records = self.inner.write().await;
        let record = build(records.as_slice());
        records.push(record.clone());
        record
    }

    /// Merge `patch` into the first record matching `key`.
    pub async fn update(&self, key: &str, patch: T::Patch) -> Result<T, ServiceError> {
        let mut records = self.inner.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.key_matches(key))
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        record.apply(patch);
        Ok(record.clone())
    }

    /// Physically remove the first record matching `key`.
    pub async fn remove(&self, key: &str) -> Result<T, ServiceError> {
        let mut records = self.inner.write().await;
        let index = records
            .iter()
            .position(|r| r.key_matches(key))
            .ok_or_else(|| ServiceError::not_found(T::LABEL))?;
        Ok(records.remove(index))
    }
}

fn decode_each<T: Record>(file_path: &Path, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(file = %file_path.display(), index, error = %e, "skipping unreadable {} record", T::LABEL);
                None
            }
        })
        .collect()
}
