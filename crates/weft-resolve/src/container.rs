use std::any::TypeId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use weft_store::SharedScalarStore;
use weft_types::{ContractKey, Instance};

/// One container registration: a ready instance or a factory invoked per
/// resolution.
#[derive(Clone)]
pub enum Registration {
    Instance(Instance),
    Factory(Rc<dyn Fn() -> Instance>),
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => write!(f, "Registration::Instance"),
            Self::Factory(_) => write!(f, "Registration::Factory"),
        }
    }
}

/// The lookup contract of the ambient registry.
///
/// The registry itself lives outside the engine; resolution consumes only
/// this read side. Registrations of the same contract type are
/// disambiguated by an optional key -- unkeyed lookups match only unkeyed
/// registrations and vice versa.
pub trait ContractSource {
    fn lookup(&self, contract: &ContractKey, key: Option<&str>) -> Option<Registration>;
}

/// In-memory `ContractSource` backend for embedding and tests.
#[derive(Default)]
pub struct MemoryContainer {
    entries: RefCell<HashMap<(TypeId, Option<String>), Registration>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a ready instance under contract type `T`.
    pub fn register_instance<T: 'static>(&self, value: Rc<T>) {
        self.insert(ContractKey::of::<T>(), None, Registration::Instance(value as Instance));
    }

    /// Register a ready instance under contract type `T` and a key.
    pub fn register_keyed_instance<T: 'static>(&self, key: impl Into<String>, value: Rc<T>) {
        self.insert(
            ContractKey::of::<T>(),
            Some(key.into()),
            Registration::Instance(value as Instance),
        );
    }

    /// Register a factory producing fresh instances of `T` per lookup.
    pub fn register_factory<T: 'static>(&self, make: impl Fn() -> Rc<T> + 'static) {
        self.insert(
            ContractKey::of::<T>(),
            None,
            Registration::Factory(Rc::new(move || make() as Instance)),
        );
    }

    /// Register a keyed factory.
    pub fn register_keyed_factory<T: 'static>(
        &self,
        key: impl Into<String>,
        make: impl Fn() -> Rc<T> + 'static,
    ) {
        self.insert(
            ContractKey::of::<T>(),
            Some(key.into()),
            Registration::Factory(Rc::new(move || make() as Instance)),
        );
    }

    /// Register a registration under an explicit contract key.
    pub fn register_for(&self, contract: ContractKey, key: Option<String>, entry: Registration) {
        self.insert(contract, key, entry);
    }

    /// Register a physical scalar store.
    ///
    /// Stores are looked up as ordinary contract dependencies; the unkeyed
    /// registration is the default store, keyed registrations serve
    /// storage-location markers.
    pub fn register_scalar_store(&self, key: Option<&str>, store: SharedScalarStore) {
        self.insert(
            ContractKey::of::<SharedScalarStore>(),
            key.map(str::to_string),
            Registration::Instance(Rc::new(store) as Instance),
        );
    }

    fn insert(&self, contract: ContractKey, key: Option<String>, entry: Registration) {
        self.entries
            .borrow_mut()
            .insert((contract.type_id(), key), entry);
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ContractSource for MemoryContainer {
    fn lookup(&self, contract: &ContractKey, key: Option<&str>) -> Option<Registration> {
        self.entries
            .borrow()
            .get(&(contract.type_id(), key.map(str::to_string)))
            .cloned()
    }
}

impl fmt::Debug for MemoryContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryContainer")
            .field("registrations", &self.entries.borrow().len())
            .finish()
    }
}
