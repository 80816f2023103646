use crate::error::StoreResult;
use crate::traits::{SharedStorage, Storage};

/// Lazy-default decorator.
///
/// Reading a key the inner store does not hold materializes a default value
/// via the factory, writes it through, and returns it. The default is
/// persisted, not just returned: a second read sees the same stored value.
pub struct LazyStorage<K, V> {
    inner: SharedStorage<K, V>,
    make: Box<dyn Fn() -> V>,
}

impl<K, V> LazyStorage<K, V> {
    pub fn new(inner: SharedStorage<K, V>, make: impl Fn() -> V + 'static) -> Self {
        Self {
            inner,
            make: Box::new(make),
        }
    }
}

impl<K, V> Storage<K, V> for LazyStorage<K, V>
where
    K: Clone,
{
    fn read(&self, key: &K) -> StoreResult<V> {
        if !self.inner.contains(key)? {
            self.inner.write(key.clone(), (self.make)())?;
        }
        self.inner.read(key)
    }

    fn write(&self, key: K, value: V) -> StoreResult<()> {
        self.inner.write(key, value)
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        // Reports the inner store: laziness changes reads, not existence.
        self.inner.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::memory::MemoryStorage;

    #[test]
    fn read_materializes_default() {
        let inner = Rc::new(MemoryStorage::<u32, String>::new());
        let lazy = LazyStorage::new(inner.clone(), || "default".to_string());
        assert_eq!(lazy.read(&1).unwrap(), "default");
        // Written through, not just returned.
        assert_eq!(inner.read(&1).unwrap(), "default");
    }

    #[test]
    fn read_prefers_existing_value() {
        let inner = Rc::new(MemoryStorage::<u32, String>::new());
        inner.write(1, "stored".into()).unwrap();
        let lazy = LazyStorage::new(inner, || "default".to_string());
        assert_eq!(lazy.read(&1).unwrap(), "stored");
    }

    #[test]
    fn contains_reports_inner_store() {
        let inner = Rc::new(MemoryStorage::<u32, u32>::new());
        let lazy = LazyStorage::new(inner, || 0);
        assert!(!lazy.contains(&1).unwrap());
        lazy.read(&1).unwrap();
        assert!(lazy.contains(&1).unwrap());
    }

    #[test]
    fn write_passes_through() {
        let inner = Rc::new(MemoryStorage::<u32, u32>::new());
        let lazy = LazyStorage::new(inner.clone(), || 0);
        lazy.write(2, 20).unwrap();
        assert_eq!(inner.read(&2).unwrap(), 20);
    }
}
