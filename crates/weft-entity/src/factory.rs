use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;
use weft_bind::SessionCache;
use weft_resolve::{ContractDescriptor, ResolverChain, Scope};
use weft_types::{IdGenerator, ObjectId};

use crate::entity::Entity;
use crate::error::EntityResult;

/// One build session: the scope of instance identity.
///
/// Every resolution inside a session shares one [`SessionCache`], so a
/// contract id resolves to the identical instance for as long as the
/// session lives. Nothing about a session is persisted: a fresh session
/// re-resolves everything (against the same stable ids).
#[derive(Default)]
pub struct BuildSession {
    cache: Rc<SessionCache>,
}

impl BuildSession {
    /// Start a fresh session with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's cache.
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub(crate) fn cache_handle(&self) -> Rc<SessionCache> {
        self.cache.clone()
    }
}

/// Builds entities by resolving every requested contract through the chain.
pub struct EntityFactory {
    chain: ResolverChain,
    object_ids: Rc<dyn IdGenerator<ObjectId>>,
}

impl EntityFactory {
    pub fn new(chain: ResolverChain, object_ids: Rc<dyn IdGenerator<ObjectId>>) -> Self {
        Self { chain, object_ids }
    }

    /// The resolver chain this factory builds with.
    pub fn chain(&self) -> &ResolverChain {
        &self.chain
    }

    /// Build an entity in a fresh session.
    ///
    /// Allocates an object id when none is supplied. Every requested
    /// contract is resolved independently; the first failure fails the
    /// whole call and no entity is returned. Ids allocated before the
    /// failure are not rolled back.
    pub fn create(
        &self,
        requests: &[ContractDescriptor],
        id: Option<ObjectId>,
    ) -> EntityResult<Entity> {
        self.create_in(&BuildSession::new(), requests, id)
    }

    /// Build an entity inside an explicit session.
    ///
    /// Use this to re-resolve contracts on a still-open object: the shared
    /// cache keeps instance identity across the calls. `create` and
    /// `create_in` are otherwise the same operation.
    pub fn create_in(
        &self,
        session: &BuildSession,
        requests: &[ContractDescriptor],
        id: Option<ObjectId>,
    ) -> EntityResult<Entity> {
        let object = id.unwrap_or_else(|| self.object_ids.generate());
        let mut contracts = HashMap::with_capacity(requests.len());
        for request in requests {
            let scope = Scope::root(object, session.cache_handle());
            let instance = self.chain.resolve(request, &scope)?;
            contracts.insert(
                request.contract().type_id(),
                (*request.contract(), instance),
            );
        }
        debug!(object = %object, contracts = contracts.len(), "assembled entity");
        Ok(Entity::new(object, contracts))
    }
}

impl std::fmt::Debug for EntityFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityFactory")
            .field("chain", &self.chain)
            .finish()
    }
}
