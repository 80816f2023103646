use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use weft_types::{ContractKey, Instance, ObjectId};

use crate::error::{EntityError, EntityResult};

/// A composed entity: an object id plus its resolved contract map.
///
/// Entities are immutable once returned by the factory. The map holds
/// exactly the contracts that were requested -- nothing is resolved lazily
/// after assembly.
pub struct Entity {
    id: ObjectId,
    contracts: HashMap<TypeId, (ContractKey, Instance)>,
}

impl Entity {
    pub(crate) fn new(id: ObjectId, contracts: HashMap<TypeId, (ContractKey, Instance)>) -> Self {
        Self { id, contracts }
    }

    /// The entity's object id.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The implementation of contract type `T`.
    ///
    /// Fails with `NotRequested` if `T` was not in the requested contract
    /// set, and with `Implementation` if the contract is served by a
    /// different concrete type (use [`Self::get_with`] then).
    pub fn get<T: 'static>(&self) -> EntityResult<Rc<T>> {
        self.get_with(&ContractKey::of::<T>())
    }

    /// The implementation of a contract, downcast to `C`.
    ///
    /// This is the accessor for contracts whose exposed concrete type
    /// differs from the contract key -- typically a trait-object contract
    /// served through an implementation redirect.
    pub fn get_with<C: 'static>(&self, contract: &ContractKey) -> EntityResult<Rc<C>> {
        let (_, instance) =
            self.contracts
                .get(&contract.type_id())
                .ok_or_else(|| EntityError::NotRequested {
                    contract: contract.name().to_string(),
                })?;
        instance
            .clone()
            .downcast::<C>()
            .map_err(|_| EntityError::Implementation {
                contract: contract.name().to_string(),
            })
    }

    /// The raw instance bound to a contract, if requested.
    pub fn instance(&self, contract: &ContractKey) -> Option<&Instance> {
        self.contracts
            .get(&contract.type_id())
            .map(|(_, instance)| instance)
    }

    /// Returns `true` if contract type `T` was requested.
    pub fn has<T: 'static + ?Sized>(&self) -> bool {
        self.contracts.contains_key(&TypeId::of::<T>())
    }

    /// The requested contract keys, in no particular order.
    pub fn contracts(&self) -> Vec<ContractKey> {
        self.contracts.values().map(|(key, _)| *key).collect()
    }

    /// Number of contracts the entity exposes.
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self
            .contracts
            .values()
            .map(|(key, _)| key.name())
            .collect();
        names.sort_unstable();
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("contracts", &names)
            .finish()
    }
}
