use std::fmt;
use std::marker::PhantomData;

use weft_store::{ScalarRepr, SharedScalarStore, Storage};
use weft_types::ValueId;

use crate::error::BindResult;

/// Get/set proxy over one stored scalar.
///
/// A cell is bound to its [`ValueId`] and a physical store at resolution
/// time. Cells are cheap: they are built fresh for every resolution and
/// never enter the session cache. Reading a cell whose value was never
/// written surfaces the store's missing-key error.
pub struct ValueCell<T> {
    id: ValueId,
    store: SharedScalarStore,
    _marker: PhantomData<T>,
}

impl<T: ScalarRepr> ValueCell<T> {
    /// Bind a cell to a value id and a store.
    pub fn new(id: ValueId, store: SharedScalarStore) -> Self {
        Self {
            id,
            store,
            _marker: PhantomData,
        }
    }

    /// The id of the backing value slot.
    pub fn value_id(&self) -> ValueId {
        self.id
    }

    /// Read the current value.
    pub fn get(&self) -> BindResult<T> {
        Ok(T::from_scalar(self.store.read(&self.id)?)?)
    }

    /// Write a new value.
    pub fn set(&self, value: T) -> BindResult<()> {
        Ok(self.store.write(self.id, value.into_scalar())?)
    }

    /// Returns `true` once a value has been written.
    pub fn is_set(&self) -> BindResult<bool> {
        Ok(self.store.contains(&self.id)?)
    }

    /// Read the current value, or write and return `fallback` if the slot
    /// is still empty.
    pub fn get_or_init(&self, fallback: T) -> BindResult<T>
    where
        T: Clone,
    {
        if self.is_set()? {
            self.get()
        } else {
            self.set(fallback.clone())?;
            Ok(fallback)
        }
    }
}

impl<T> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use weft_store::{MemoryStorage, ScalarValue, StoreError};
    use crate::error::BindError;

    fn store() -> SharedScalarStore {
        Rc::new(MemoryStorage::new())
    }

    #[test]
    fn set_then_get() {
        let cell: ValueCell<i64> = ValueCell::new(ValueId::from_ordinal(1), store());
        cell.set(42).unwrap();
        assert_eq!(cell.get().unwrap(), 42);
    }

    #[test]
    fn get_before_set_is_missing() {
        let cell: ValueCell<i64> = ValueCell::new(ValueId::from_ordinal(1), store());
        assert!(matches!(
            cell.get(),
            Err(BindError::Store(StoreError::Missing { .. }))
        ));
    }

    #[test]
    fn is_set_tracks_writes() {
        let cell: ValueCell<String> = ValueCell::new(ValueId::from_ordinal(1), store());
        assert!(!cell.is_set().unwrap());
        cell.set("on".into()).unwrap();
        assert!(cell.is_set().unwrap());
    }

    #[test]
    fn get_or_init_writes_fallback_once() {
        let backing = store();
        let cell: ValueCell<i64> = ValueCell::new(ValueId::from_ordinal(1), backing.clone());
        assert_eq!(cell.get_or_init(10).unwrap(), 10);
        cell.set(11).unwrap();
        assert_eq!(cell.get_or_init(10).unwrap(), 11);
    }

    #[test]
    fn cells_share_the_backing_slot() {
        let backing = store();
        let id = ValueId::from_ordinal(7);
        let a: ValueCell<i64> = ValueCell::new(id, backing.clone());
        let b: ValueCell<i64> = ValueCell::new(id, backing.clone());
        a.set(1).unwrap();
        assert_eq!(b.get().unwrap(), 1);
        assert_eq!(backing.read(&id).unwrap(), ScalarValue::Int(1));
    }

    #[test]
    fn wrong_kind_surfaces_store_error() {
        let backing = store();
        let id = ValueId::from_ordinal(1);
        backing.write(id, ScalarValue::Text("oops".into())).unwrap();
        let cell: ValueCell<i64> = ValueCell::new(id, backing);
        assert!(matches!(
            cell.get(),
            Err(BindError::Store(StoreError::KindMismatch { .. }))
        ));
    }
}
