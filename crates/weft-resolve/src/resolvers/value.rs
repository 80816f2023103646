use std::any::TypeId;
use std::collections::HashMap;
use std::rc::Rc;

use weft_bind::{ContractBindings, ValueCell};
use weft_store::{ScalarRepr, SharedScalarStore};
use weft_types::{ContractKey, Instance, ValueId};

use crate::chain::ResolverChain;
use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{Outcome, Resolver};

type CellMaker = Rc<dyn Fn(ValueId, SharedScalarStore) -> Instance>;

/// Value-from-storage node: builds value cells over persisted scalars.
///
/// Applies only to contract types registered as cells. The physical store
/// is itself resolved through the chain as an ordinary dependency: a
/// storage-location marker on the call site becomes the lookup key, no
/// marker means the default (unkeyed) store registration. The value id
/// comes from the contract's binding record, allocated on first use and
/// stable afterwards.
///
/// Cells never enter the session cache -- they are cheap and deliberately
/// not deduplicated.
pub struct ValueResolver {
    contracts: ContractBindings,
    cells: HashMap<TypeId, CellMaker>,
}

impl ValueResolver {
    pub fn new(contracts: ContractBindings) -> Self {
        Self {
            contracts,
            cells: HashMap::new(),
        }
    }

    /// Register `ValueCell<T>` as a resolvable contract type.
    pub fn register_cell<T: ScalarRepr>(&mut self) {
        let key = ContractKey::of::<ValueCell<T>>();
        self.cells.insert(
            key.type_id(),
            Rc::new(|id, store| Rc::new(ValueCell::<T>::new(id, store)) as Instance),
        );
    }

    /// Builder form of [`Self::register_cell`].
    pub fn with_cell<T: ScalarRepr>(mut self) -> Self {
        self.register_cell::<T>();
        self
    }

    /// Number of registered cell types.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Resolver for ValueResolver {
    fn name(&self) -> &str {
        "value"
    }

    fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
        chain: &ResolverChain,
    ) -> ResolveResult<Outcome> {
        let Some(maker) = self.cells.get(&request.contract().type_id()) else {
            return Ok(Outcome::declined(format!(
                "{} is not a value-cell contract",
                request.contract()
            )));
        };
        let (Some(contract_id), Some(slot)) = (scope.contract(), scope.slot()) else {
            return Ok(Outcome::declined(
                "no contract binding and slot in scope for a value cell",
            ));
        };

        // The physical store is an ordinary dependency of this resolution.
        let store_request = ContractDescriptor::new::<SharedScalarStore>();
        let store_scope = scope.for_lookup(scope.site().location.clone());
        let store_instance = match chain.resolve(&store_request, &store_scope) {
            Ok(instance) => instance,
            Err(ResolveError::NotResolvable { .. }) => {
                return Ok(Outcome::declined(match &scope.site().location {
                    Some(location) => format!("no value store registered at {location}"),
                    None => "no default value store registered".to_string(),
                }));
            }
            Err(other) => return Err(other),
        };
        let store = store_instance
            .downcast::<SharedScalarStore>()
            .map_err(|_| ResolveError::ParameterType {
                expected: "shared scalar store handle".to_string(),
            })?;

        let value_id = self.contracts.value_id(contract_id, slot)?;
        Ok(Outcome::Resolved(maker(value_id, (*store).clone())))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use weft_bind::SessionCache;
    use weft_store::MemoryStorage;
    use weft_types::{ContractId, ObjectId, SequentialIdGenerator, SlotId};

    use super::*;
    use crate::container::MemoryContainer;
    use crate::context::SiteMetadata;
    use crate::resolvers::ContainerResolver;

    fn contract_bindings() -> ContractBindings {
        ContractBindings::new(
            Rc::new(MemoryStorage::new()),
            Rc::new(SequentialIdGenerator::new()),
        )
    }

    fn chain_with(container: Rc<MemoryContainer>, resolver: ValueResolver) -> ResolverChain {
        let mut chain = ResolverChain::new();
        chain.push(Box::new(ContainerResolver::new(container)));
        chain.push(Box::new(resolver));
        chain
    }

    fn slotted_scope() -> Scope {
        Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new())).for_slot(
            ContractId::from_ordinal(1),
            SlotId::new(0),
            SiteMetadata::none(),
        )
    }

    #[test]
    fn resolves_a_cell_over_the_default_store() {
        let container = Rc::new(MemoryContainer::new());
        let store: SharedScalarStore = Rc::new(MemoryStorage::new());
        container.register_scalar_store(None, store.clone());
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(container, resolver);

        let resolved = chain
            .resolve(&ContractDescriptor::new::<ValueCell<i64>>(), &slotted_scope())
            .unwrap();
        let cell = resolved.downcast::<ValueCell<i64>>().unwrap();
        cell.set(5).unwrap();
        assert_eq!(cell.get().unwrap(), 5);
        // The cell writes into the registered store.
        use weft_store::Storage;
        assert!(store.contains(&cell.value_id()).unwrap());
    }

    #[test]
    fn value_id_is_stable_per_slot() {
        let container = Rc::new(MemoryContainer::new());
        container.register_scalar_store(None, Rc::new(MemoryStorage::new()));
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(container, resolver);
        let scope = slotted_scope();

        let request = ContractDescriptor::new::<ValueCell<i64>>();
        let a = chain.resolve(&request, &scope).unwrap();
        let b = chain.resolve(&request, &scope).unwrap();
        let a = a.downcast::<ValueCell<i64>>().unwrap();
        let b = b.downcast::<ValueCell<i64>>().unwrap();
        // Distinct cells, same backing slot.
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(a.value_id(), b.value_id());
    }

    #[test]
    fn location_marker_selects_a_keyed_store() {
        let container = Rc::new(MemoryContainer::new());
        let default_store: SharedScalarStore = Rc::new(MemoryStorage::new());
        let archive_store: SharedScalarStore = Rc::new(MemoryStorage::new());
        container.register_scalar_store(None, default_store.clone());
        container.register_scalar_store(Some("archive"), archive_store.clone());
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(container, resolver);

        let scope = Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new()))
            .for_slot(
                ContractId::from_ordinal(1),
                SlotId::new(0),
                SiteMetadata::at_location("archive"),
            );
        let resolved = chain
            .resolve(&ContractDescriptor::new::<ValueCell<i64>>(), &scope)
            .unwrap();
        let cell = resolved.downcast::<ValueCell<i64>>().unwrap();
        cell.set(9).unwrap();

        use weft_store::Storage;
        assert!(archive_store.contains(&cell.value_id()).unwrap());
        assert!(!default_store.contains(&cell.value_id()).unwrap());
    }

    #[test]
    fn declines_non_cell_contracts() {
        let container = Rc::new(MemoryContainer::new());
        container.register_scalar_store(None, Rc::new(MemoryStorage::new()));
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(container, resolver);

        let err = chain
            .resolve(&ContractDescriptor::new::<String>(), &slotted_scope())
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotResolvable { .. }));
    }

    #[test]
    fn declines_outside_a_slot() {
        let container = Rc::new(MemoryContainer::new());
        container.register_scalar_store(None, Rc::new(MemoryStorage::new()));
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(container, resolver);

        let root = Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new()));
        let err = chain
            .resolve(&ContractDescriptor::new::<ValueCell<i64>>(), &root)
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotResolvable { .. }));
    }

    #[test]
    fn declines_without_a_store_registration() {
        let resolver = ValueResolver::new(contract_bindings()).with_cell::<i64>();
        let chain = chain_with(Rc::new(MemoryContainer::new()), resolver);

        let err = chain
            .resolve(&ContractDescriptor::new::<ValueCell<i64>>(), &slotted_scope())
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotResolvable { .. }));
    }
}
