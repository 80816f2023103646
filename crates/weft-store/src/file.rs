use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::fs;
use std::hash::Hash;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::envelope::ValueEnvelope;
use crate::error::{StoreError, StoreResult};
use crate::traits::Storage;

/// Configuration for a file-backed store.
#[derive(Clone, Debug)]
pub struct FileStorageConfig {
    /// Pretty-print the snapshot document (larger, diffable).
    pub pretty: bool,
    /// Persist the snapshot after every write. When `false` the caller is
    /// responsible for calling [`FileStorage::persist`].
    pub persist_on_write: bool,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            persist_on_write: true,
        }
    }
}

/// File-backed snapshot store.
///
/// The whole store is one JSON document: a flat map from encoded key to a
/// [`ValueEnvelope`]. Reads and writes go to an in-memory map; `persist`
/// rewrites the snapshot. Opening a path that already holds a snapshot
/// loads it, so ids and values survive across processes.
pub struct FileStorage<K, V> {
    path: PathBuf,
    config: FileStorageConfig,
    cells: RefCell<HashMap<K, V>>,
}

impl<K, V> FileStorage<K, V>
where
    K: Serialize + DeserializeOwned + Eq + Hash + Debug,
    V: Serialize + DeserializeOwned + Clone,
{
    /// Open (or create) the snapshot at `path`.
    pub fn open(path: impl Into<PathBuf>, config: FileStorageConfig) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let cells = if path.exists() {
            Self::load(&path)?
        } else {
            HashMap::new()
        };
        debug!(path = %path.display(), entries = cells.len(), "opened file store");
        Ok(Self {
            path,
            config,
            cells: RefCell::new(cells),
        })
    }

    fn load(path: &Path) -> StoreResult<HashMap<K, V>> {
        let text = fs::read_to_string(path)?;
        let document: BTreeMap<String, ValueEnvelope> = serde_json::from_str(&text)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut cells = HashMap::with_capacity(document.len());
        for (encoded, envelope) in document {
            let key: K = serde_json::from_str(&encoded)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            let value: V = envelope.decode(&encoded)?;
            cells.insert(key, value);
        }
        Ok(cells)
    }

    /// Rewrite the snapshot document from the in-memory map.
    pub fn persist(&self) -> StoreResult<()> {
        let cells = self.cells.borrow();
        let mut document = BTreeMap::new();
        for (key, value) in cells.iter() {
            let encoded = serde_json::to_string(key)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            document.insert(encoded, ValueEnvelope::encode(value)?);
        }
        let text = if self.config.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), entries = document.len(), "persisted snapshot");
        Ok(())
    }

    /// The snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }
}

impl<K, V> Storage<K, V> for FileStorage<K, V>
where
    K: Serialize + DeserializeOwned + Eq + Hash + Debug,
    V: Serialize + DeserializeOwned + Clone,
{
    fn read(&self, key: &K) -> StoreResult<V> {
        self.cells
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::missing(key))
    }

    fn write(&self, key: K, value: V) -> StoreResult<()> {
        self.cells.borrow_mut().insert(key, value);
        if self.config.persist_on_write {
            self.persist()?;
        }
        Ok(())
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        Ok(self.cells.borrow().contains_key(key))
    }
}

impl<K, V> Debug for FileStorage<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStorage")
            .field("path", &self.path)
            .field("entries", &self.cells.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use weft_types::ValueId;

    use crate::scalar::ScalarValue;

    fn snapshot_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("store.json")
    }

    #[test]
    fn starts_empty_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store: FileStorage<u32, String> =
            FileStorage::open(snapshot_path(&dir), FileStorageConfig::default()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn write_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store: FileStorage<u32, String> =
            FileStorage::open(snapshot_path(&dir), FileStorageConfig::default()).unwrap();
        store.write(1, "alpha".into()).unwrap();
        assert_eq!(store.read(&1).unwrap(), "alpha");
    }

    #[test]
    fn reload_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        {
            let store: FileStorage<u32, i64> =
                FileStorage::open(&path, FileStorageConfig::default()).unwrap();
            store.write(7, -3).unwrap();
            store.write(8, 900).unwrap();
        }
        let reloaded: FileStorage<u32, i64> =
            FileStorage::open(&path, FileStorageConfig::default()).unwrap();
        assert_eq!(reloaded.read(&7).unwrap(), -3);
        assert_eq!(reloaded.read(&8).unwrap(), 900);
    }

    #[test]
    fn reload_preserves_scalar_values() {
        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        struct Score {
            points: i64,
            holder: String,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        let a = ValueId::from_ordinal(1);
        let b = ValueId::from_ordinal(2);
        let c = ValueId::from_ordinal(3);
        {
            let store: FileStorage<ValueId, ScalarValue> =
                FileStorage::open(&path, FileStorageConfig::default()).unwrap();
            store.write(a, ScalarValue::Int(41)).unwrap();
            store.write(b, ScalarValue::Text("hello".into())).unwrap();
            let record = ScalarValue::record(&Score {
                points: 10,
                holder: "ada".into(),
            })
            .unwrap();
            store.write(c, record).unwrap();
        }
        let reloaded: FileStorage<ValueId, ScalarValue> =
            FileStorage::open(&path, FileStorageConfig::default()).unwrap();
        assert_eq!(reloaded.read(&a).unwrap(), ScalarValue::Int(41));
        assert_eq!(reloaded.read(&b).unwrap(), ScalarValue::Text("hello".into()));
        let score: Score = reloaded.read(&c).unwrap().decode_record().unwrap();
        assert_eq!(score.points, 10);
        assert_eq!(score.holder, "ada");
    }

    #[test]
    fn manual_persist_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        let config = FileStorageConfig {
            persist_on_write: false,
            ..Default::default()
        };
        {
            let store: FileStorage<u32, u32> = FileStorage::open(&path, config.clone()).unwrap();
            store.write(1, 1).unwrap();
            // Not persisted yet.
            assert!(!path.exists());
            store.persist().unwrap();
        }
        let reloaded: FileStorage<u32, u32> = FileStorage::open(&path, config).unwrap();
        assert_eq!(reloaded.read(&1).unwrap(), 1);
    }

    #[test]
    fn load_rejects_foreign_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        {
            let store: FileStorage<u32, String> =
                FileStorage::open(&path, FileStorageConfig::default()).unwrap();
            store.write(1, "text".into()).unwrap();
        }
        // The snapshot declares String values; an i64 store must refuse it.
        let result: StoreResult<FileStorage<u32, i64>> =
            FileStorage::open(&path, FileStorageConfig::default());
        assert!(matches!(
            result,
            Err(StoreError::DeclaredTypeMismatch { .. })
        ));
    }

    #[test]
    fn load_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = snapshot_path(&dir);
        fs::write(&path, "{ not json").unwrap();
        let result: StoreResult<FileStorage<u32, u32>> =
            FileStorage::open(&path, FileStorageConfig::default());
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
