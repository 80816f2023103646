use std::cell::RefCell;
use std::collections::HashMap;

use weft_types::{instance_ptr, ContractId, Instance};

use crate::error::{BindError, BindResult};

#[derive(Default)]
struct CacheInner {
    /// Per-session arena of cached implementations. Removal leaves a hole
    /// so slot indices stay stable.
    arena: Vec<Option<(ContractId, Instance)>>,
    by_id: HashMap<ContractId, usize>,
    by_ptr: HashMap<usize, usize>,
}

/// Session-scoped runtime cache: a bidirectional ContractId ↔ instance map.
///
/// The cache is what makes resolution identity-preserving: re-resolving a
/// contract id within one build session hands back the identical `Rc`. It
/// is also the cycle terminator -- a resolution cycle that passes back
/// through an already-cached contract stops here instead of recursing.
///
/// The map is injective in both directions; registering either side twice
/// is a programming error, not a recoverable condition. Nothing in here is
/// persisted: a new session starts empty.
#[derive(Default)]
pub struct SessionCache {
    inner: RefCell<CacheInner>,
}

impl SessionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under a contract id.
    ///
    /// Fails with [`BindError::DuplicateCacheEntry`] if either the id or
    /// the instance is already registered.
    pub fn add(&self, id: ContractId, instance: Instance) -> BindResult<()> {
        let mut inner = self.inner.borrow_mut();
        let ptr = instance_ptr(&instance);
        if inner.by_id.contains_key(&id) || inner.by_ptr.contains_key(&ptr) {
            return Err(BindError::DuplicateCacheEntry { contract: id });
        }
        let slot = inner.arena.len();
        inner.arena.push(Some((id, instance)));
        inner.by_id.insert(id, slot);
        inner.by_ptr.insert(ptr, slot);
        Ok(())
    }

    /// Non-failing lookup by contract id.
    pub fn get_by_id(&self, id: &ContractId) -> Option<Instance> {
        let inner = self.inner.borrow();
        let slot = *inner.by_id.get(id)?;
        inner.arena[slot].as_ref().map(|(_, instance)| instance.clone())
    }

    /// Non-failing reverse lookup: the contract id an instance was cached
    /// under.
    pub fn id_of(&self, instance: &Instance) -> Option<ContractId> {
        let inner = self.inner.borrow();
        let slot = *inner.by_ptr.get(&instance_ptr(instance))?;
        inner.arena[slot].as_ref().map(|(id, _)| *id)
    }

    /// Returns `true` if the id is registered.
    pub fn contains_id(&self, id: &ContractId) -> bool {
        self.inner.borrow().by_id.contains_key(id)
    }

    /// Remove an entry by contract id, returning the evicted instance.
    pub fn remove_by_id(&self, id: &ContractId) -> Option<Instance> {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.by_id.remove(id)?;
        let (_, instance) = inner.arena[slot].take()?;
        inner.by_ptr.remove(&instance_ptr(&instance));
        Some(instance)
    }

    /// Remove an entry by instance, returning the contract id it was
    /// cached under.
    pub fn remove_by_instance(&self, instance: &Instance) -> Option<ContractId> {
        let mut inner = self.inner.borrow_mut();
        let slot = inner.by_ptr.remove(&instance_ptr(instance))?;
        let (id, _) = inner.arena[slot].take()?;
        inner.by_id.remove(&id);
        Some(id)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.borrow().by_id.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().by_id.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.arena.clear();
        inner.by_id.clear();
        inner.by_ptr.clear();
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("entries", &self.len())
            .finish()
    }
}
