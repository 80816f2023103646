use std::marker::PhantomData;

use crate::error::StoreResult;
use crate::scalar::{ScalarRepr, ScalarValue};
use crate::traits::{SharedStorage, Storage};

/// Strongly-typed view over a scalar store.
///
/// The inner store holds tagged [`ScalarValue`]s; this decorator converts at
/// the boundary so callers work with `T` directly. Reading a slot whose
/// stored kind does not match `T` is a `KindMismatch` error.
pub struct TypedStorage<K, T> {
    inner: SharedStorage<K, ScalarValue>,
    _marker: PhantomData<T>,
}

impl<K, T> TypedStorage<K, T> {
    pub fn new(inner: SharedStorage<K, ScalarValue>) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<K, T: ScalarRepr> Storage<K, T> for TypedStorage<K, T> {
    fn read(&self, key: &K) -> StoreResult<T> {
        T::from_scalar(self.inner.read(key)?)
    }

    fn write(&self, key: K, value: T) -> StoreResult<()> {
        self.inner.write(key, value.into_scalar())
    }

    fn contains(&self, key: &K) -> StoreResult<bool> {
        self.inner.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStorage;

    #[test]
    fn typed_roundtrip() {
        let raw = Rc::new(MemoryStorage::<u32, ScalarValue>::new());
        let typed: TypedStorage<u32, i64> = TypedStorage::new(raw.clone());
        typed.write(1, 99).unwrap();
        assert_eq!(typed.read(&1).unwrap(), 99);
        // The raw store sees the tagged form.
        assert_eq!(raw.read(&1).unwrap(), ScalarValue::Int(99));
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let raw = Rc::new(MemoryStorage::<u32, ScalarValue>::new());
        raw.write(1, ScalarValue::Text("nope".into())).unwrap();
        let typed: TypedStorage<u32, i64> = TypedStorage::new(raw);
        assert!(matches!(
            typed.read(&1),
            Err(StoreError::KindMismatch { .. })
        ));
    }

    #[test]
    fn contains_delegates() {
        let raw = Rc::new(MemoryStorage::<u32, ScalarValue>::new());
        let typed: TypedStorage<u32, String> = TypedStorage::new(raw);
        assert!(!typed.contains(&1).unwrap());
        typed.write(1, "x".into()).unwrap();
        assert!(typed.contains(&1).unwrap());
    }
}
