//! Keyed record table with change notification and JSON file persistence.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use fs2::FileExt;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use super::error::StoreError;

/// A row stored in a [`Table`].
pub trait Record: Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Key: Ord + Clone + Display + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

/// Rows ordered by key, published as a shared snapshot after every write.
pub type Rows<T> = Arc<Vec<T>>;

/// In-memory table, optionally mirrored to a JSON file.
///
/// Writes are applied to a copy, persisted, then published; a failed write
/// leaves both the file and the published rows untouched.
pub struct Table<T: Record> {
    name: &'static str,
    rows: Mutex<BTreeMap<T::Key, T>>,
    snapshot: watch::Sender<Rows<T>>,
    file: Option<PathBuf>,
}

impl<T: Record> Table<T> {
    pub fn in_memory(name: &'static str) -> Self {
        Self::with_rows(name, BTreeMap::new(), None)
    }

    /// Opens (or creates on first write) the table stored at `path`.
    pub fn open(name: &'static str, path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let mut rows = BTreeMap::new();

        if path.exists() {
            let bytes = fs::read(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            if !bytes.is_empty() {
                let stored: Vec<T> =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
                        path: path.clone(),
                        source,
                    })?;
                for row in stored {
                    rows.insert(row.key(), row);
                }
            }
        }

        tracing::debug!(table = name, path = %path.display(), rows = rows.len(), "Table opened");
        Ok(Self::with_rows(name, rows, Some(path)))
    }

    fn with_rows(name: &'static str, rows: BTreeMap<T::Key, T>, file: Option<PathBuf>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(rows.values().cloned().collect()));
        Self {
            name,
            rows: Mutex::new(rows),
            snapshot,
            file,
        }
    }

    /// Receiver over the published rows.
    pub fn watch(&self) -> watch::Receiver<Rows<T>> {
        self.snapshot.subscribe()
    }

    pub fn rows(&self) -> Rows<T> {
        self.snapshot.borrow().clone()
    }

    /// Inserts a new row. Fails if the key is taken.
    pub fn insert(&self, row: T) -> Result<(), StoreError> {
        self.write(|rows| {
            let key = row.key();
            if rows.contains_key(&key) {
                return Err(StoreError::Duplicate {
                    key: key.to_string(),
                });
            }
            rows.insert(key, row);
            Ok(true)
        })
    }

    /// Replaces an existing row. Fails if the key is unknown.
    pub fn update(&self, row: T) -> Result<(), StoreError> {
        self.write(|rows| {
            let key = row.key();
            match rows.get_mut(&key) {
                Some(slot) if *slot == row => Ok(false),
                Some(slot) => {
                    *slot = row;
                    Ok(true)
                }
                None => Err(StoreError::NotFound {
                    key: key.to_string(),
                }),
            }
        })
    }

    /// Removes a row. Deleting an absent key succeeds and changes nothing.
    pub fn delete(&self, key: &T::Key) -> Result<(), StoreError> {
        self.write(|rows| Ok(rows.remove(key).is_some()))
    }

    fn write(
        &self,
        apply: impl FnOnce(&mut BTreeMap<T::Key, T>) -> Result<bool, StoreError>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock();
        let mut next = rows.clone();
        if !apply(&mut next)? {
            return Ok(());
        }

        if let Some(path) = &self.file {
            persist(self.name, path, &next)?;
        }

        let published: Vec<T> = next.values().cloned().collect();
        *rows = next;
        self.snapshot.send_replace(Arc::new(published));
        tracing::trace!(table = self.name, rows = rows.len(), "Table written");
        Ok(())
    }
}

fn persist<K, T: Serialize>(
    table: &'static str,
    path: &Path,
    rows: &BTreeMap<K, T>,
) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let encoded = serde_json::to_vec_pretty(&rows.values().collect::<Vec<_>>())
        .map_err(|source| StoreError::Encode { table, source })?;

    // Lock a sidecar file so two processes sharing a data dir do not
    // interleave their rename.
    let lock_path = path.with_extension("lock");
    let lock = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(io_err)?;
    FileExt::lock_exclusive(&lock).map_err(io_err)?;

    let tmp_path = path.with_extension("json.tmp");
    let mut tmp = File::create(&tmp_path).map_err(io_err)?;
    tmp.write_all(&encoded).map_err(io_err)?;
    tmp.sync_all().map_err(io_err)?;
    drop(tmp);
    fs::rename(&tmp_path, path).map_err(io_err)?;

    Ok(())
}
