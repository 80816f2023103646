use std::rc::Rc;

use weft_bind::{ContractBindings, ContractRecord, ObjectBindings, ObjectRecord};
use weft_resolve::{
    Blueprint, BlueprintRegistry, ConstructResolver, ContainerResolver, ContractSource,
    DescriptorResolver, MemoryContainer, ResolverChain, ValueResolver,
};
use weft_store::{MemoryStorage, ScalarRepr, SharedScalarStore, SharedStorage};
use weft_types::{ContractId, ContractKey, IdGenerator, ObjectId, RandomIdGenerator, ValueId};

use crate::factory::EntityFactory;

type CellRegistration = Box<dyn FnOnce(&mut ValueResolver)>;

/// Assembles a ready-to-use [`EntityFactory`] with the default chain:
/// construct → container → descriptor → value.
///
/// Every collaborator can be swapped -- record stores, the scalar value
/// store(s), id generators, the container -- and anything not supplied
/// defaults to an in-memory backend with random ids. Custom chains remain
/// a matter of pushing resolvers by hand; the composer only covers the
/// standard wiring.
#[derive(Default)]
pub struct Composer {
    object_records: Option<SharedStorage<ObjectId, ObjectRecord>>,
    contract_records: Option<SharedStorage<ContractId, ContractRecord>>,
    value_store: Option<SharedScalarStore>,
    keyed_value_stores: Vec<(String, SharedScalarStore)>,
    object_ids: Option<Rc<dyn IdGenerator<ObjectId>>>,
    contract_ids: Option<Rc<dyn IdGenerator<ContractId>>>,
    value_ids: Option<Rc<dyn IdGenerator<ValueId>>>,
    blueprints: BlueprintRegistry,
    container: Option<Rc<MemoryContainer>>,
    cells: Vec<CellRegistration>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing store for per-object binding records.
    pub fn object_records(mut self, store: SharedStorage<ObjectId, ObjectRecord>) -> Self {
        self.object_records = Some(store);
        self
    }

    /// Backing store for per-contract binding records.
    pub fn contract_records(mut self, store: SharedStorage<ContractId, ContractRecord>) -> Self {
        self.contract_records = Some(store);
        self
    }

    /// The default scalar value store.
    pub fn value_store(mut self, store: SharedScalarStore) -> Self {
        self.value_store = Some(store);
        self
    }

    /// An additional scalar store, selected by storage-location markers
    /// naming `location`.
    pub fn value_store_at(
        mut self,
        location: impl Into<String>,
        store: SharedScalarStore,
    ) -> Self {
        self.keyed_value_stores.push((location.into(), store));
        self
    }

    /// Generator for object ids.
    pub fn object_ids(mut self, ids: Rc<dyn IdGenerator<ObjectId>>) -> Self {
        self.object_ids = Some(ids);
        self
    }

    /// Generator for contract ids.
    pub fn contract_ids(mut self, ids: Rc<dyn IdGenerator<ContractId>>) -> Self {
        self.contract_ids = Some(ids);
        self
    }

    /// Generator for value ids.
    pub fn value_ids(mut self, ids: Rc<dyn IdGenerator<ValueId>>) -> Self {
        self.value_ids = Some(ids);
        self
    }

    /// Declare a construction blueprint.
    pub fn blueprint(mut self, blueprint: Blueprint) -> Self {
        self.blueprints.register(blueprint);
        self
    }

    /// Make `ValueCell<T>` a resolvable contract type.
    pub fn cell<T: ScalarRepr>(mut self) -> Self {
        self.cells
            .push(Box::new(|resolver: &mut ValueResolver| {
                resolver.register_cell::<T>();
            }));
        self
    }

    /// Use an existing container instead of a fresh empty one. The caller
    /// keeps its handle for registering instances and factories.
    pub fn container(mut self, container: Rc<MemoryContainer>) -> Self {
        self.container = Some(container);
        self
    }

    /// Wire everything together into a factory.
    pub fn compose(self) -> EntityFactory {
        let container = self
            .container
            .unwrap_or_else(|| Rc::new(MemoryContainer::new()));
        let object_records = self
            .object_records
            .unwrap_or_else(|| Rc::new(MemoryStorage::new()));
        let contract_records = self
            .contract_records
            .unwrap_or_else(|| Rc::new(MemoryStorage::new()));
        let value_store = self
            .value_store
            .unwrap_or_else(|| Rc::new(MemoryStorage::new()));
        let object_ids = self
            .object_ids
            .unwrap_or_else(|| Rc::new(RandomIdGenerator::new()));
        let contract_ids = self
            .contract_ids
            .unwrap_or_else(|| Rc::new(RandomIdGenerator::new()));
        let value_ids = self
            .value_ids
            .unwrap_or_else(|| Rc::new(RandomIdGenerator::new()));

        // A store the caller already registered in their container wins
        // over the composed default.
        let store_key = ContractKey::of::<SharedScalarStore>();
        if container.lookup(&store_key, None).is_none() {
            container.register_scalar_store(None, value_store);
        }
        for (location, store) in self.keyed_value_stores {
            container.register_scalar_store(Some(&location), store);
        }

        let mut value_resolver =
            ValueResolver::new(ContractBindings::new(contract_records, value_ids));
        for register in self.cells {
            register(&mut value_resolver);
        }

        let mut chain = ResolverChain::new();
        chain.push(Box::new(ConstructResolver::new(
            ObjectBindings::new(object_records.clone(), contract_ids.clone()),
            Rc::new(self.blueprints),
        )));
        chain.push(Box::new(ContainerResolver::new(
            container.clone() as Rc<dyn ContractSource>
        )));
        chain.push(Box::new(DescriptorResolver::new(ObjectBindings::new(
            object_records,
            contract_ids,
        ))));
        chain.push(Box::new(value_resolver));

        EntityFactory::new(chain, object_ids)
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("blueprints", &self.blueprints.len())
            .field("cells", &self.cells.len())
            .finish()
    }
}
