use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{StoreError, StoreResult};
use crate::traits::Storage;

/// In-memory, `HashMap`-based store.
///
/// The default backend for records and scalars when nothing needs to
/// survive the process. Values are cloned on read and write.
pub struct MemoryStorage<K, V> {
    cells: RefCell<HashMap<K, V>>,
}

impl<K, V> MemoryStorage<K, V> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            cells: RefCell::new(HashMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.borrow().is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.cells.borrow_mut().clear();
    }
}

impl<K: Ord + Clone, V> MemoryStorage<K, V> {
    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<K> = self.cells.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<K, V> Default for MemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Storage<K, V> for MemoryStorage<K, V>
where
    K: Eq + Hash + Debug,
    V: Clone,
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
        Ok(())
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        Ok(self.cells.borrow().contains_key(key))
    }
}

impl<K, V> Debug for MemoryStorage<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("entries", &self.cells.borrow().len())
            .finish()
    }
}
