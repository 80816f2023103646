use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Nominal identity of a contract type.
///
/// A `ContractKey` names one capability an entity can expose. The runtime
/// key is the `TypeId`; the type name is the form written into persisted
/// binding records (stable for a fixed program, which is the only stability
/// the engine promises).
#[derive(Clone, Copy)]
pub struct ContractKey {
    type_id: TypeId,
    name: &'static str,
}

impl ContractKey {
    /// The key for contract type `T`.
    pub fn of<T: 'static + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Runtime identity of the contract type.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The persisted/diagnostic name of the contract type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ContractKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ContractKey {}

impl Hash for ContractKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractKey({})", self.name)
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One resolved contract implementation.
///
/// The engine is single-threaded by design, so implementations are shared
/// with `Rc` and downcast at the edges.
pub type Instance = Rc<dyn Any>;

/// Address identity of an instance.
///
/// Two clones of the same `Rc` report the same address; this is what the
/// session cache keys its reverse index on.
pub fn instance_ptr(instance: &Instance) -> usize {
    Rc::as_ptr(instance) as *const () as usize
}
