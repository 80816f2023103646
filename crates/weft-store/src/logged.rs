use std::fmt::Debug;

use tracing::{debug, trace};

use crate::error::StoreResult;
use crate::traits::{SharedStorage, Storage};

/// Logging decorator: delegates to the inner store and emits tracing events
/// for each operation, labeled with the store's name.
pub struct LoggedStorage<K, V> {
    inner: SharedStorage<K, V>,
    label: String,
}

impl<K, V> LoggedStorage<K, V> {
    pub fn new(inner: SharedStorage<K, V>, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }
}

impl<K: Debug, V> Storage<K, V> for LoggedStorage<K, V> {
    fn read(&self, key: &K) -> StoreResult<V> {
        trace!(store = %self.label, key = ?key, "read");
        self.inner.read(key)
    }

    fn write(&self, key: K, value: V) -> StoreResult<()> {
        debug!(store = %self.label, key = ?key, "write");
        self.inner.write(key, value)
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        trace!(store = %self.label, key = ?key, "contains");
        self.inner.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn operations_delegate() {
        let inner = Rc::new(MemoryStorage::<u32, u32>::new());
        let logged = LoggedStorage::new(inner.clone(), "test-store");
        logged.write(1, 10).unwrap();
        assert_eq!(logged.read(&1).unwrap(), 10);
        assert!(logged.contains(&1).unwrap());
        assert_eq!(inner.read(&1).unwrap(), 10);
    }
}
