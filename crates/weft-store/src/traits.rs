use std::rc::Rc;

use crate::error::StoreResult;

/// Generic key→value store.
///
/// All implementations must satisfy these invariants:
/// - `read` of an absent key is an error; `contains` is the non-failing
///   existence check.
/// - `write` is an upsert and never fails for "already present".
/// - The store never interprets values beyond what its own type parameters
///   require; layering (laziness, typing, logging) is done by decorators
///   wrapping this same trait.
/// - All I/O errors are propagated, never silently ignored.
pub trait Storage<K, V> {
    /// Read the value stored under `key`.
    ///
    /// Returns `StoreError::Missing` if the key has no value.
    fn read(&self, key: &K) -> StoreResult<V>;

    /// Write (create or replace) the value under `key`.
    fn write(&self, key: K, value: V) -> StoreResult<()>;

    /// Check whether `key` has a stored value.
    fn contains(&self, key: &K) -> StoreResult<bool>;
}

/// Shared handle to a store.
///
/// The engine is single-threaded; stores are shared by reference counting
/// and use interior mutability behind `&self` methods.
pub type SharedStorage<K, V> = Rc<dyn Storage<K, V>>;
