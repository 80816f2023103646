use std::fmt;
use std::rc::Rc;

use weft_types::{ContractKey, Instance};

/// One contract request: what an entity should expose and, optionally, how.
///
/// The descriptor is the whole public vocabulary of the request surface:
/// a contract type, an optional implementation type distinct from it, and
/// an optional ready-made instance. Which of the three is present decides
/// which resolver node ends up serving the request.
#[derive(Clone)]
pub struct ContractDescriptor {
    contract: ContractKey,
    implementation: Option<ContractKey>,
    instance: Option<Instance>,
}

impl ContractDescriptor {
    /// Request contract type `T`, resolved by whatever the chain finds.
    pub fn new<T: 'static + ?Sized>() -> Self {
        Self::for_key(ContractKey::of::<T>())
    }

    /// Request an already-known contract key.
    pub fn for_key(contract: ContractKey) -> Self {
        Self {
            contract,
            implementation: None,
            instance: None,
        }
    }

    /// Request contract `T` served by implementation type `I`.
    pub fn with_implementation<T: 'static + ?Sized, I: 'static + ?Sized>() -> Self {
        Self {
            contract: ContractKey::of::<T>(),
            implementation: Some(ContractKey::of::<I>()),
            instance: None,
        }
    }

    /// Request contract `T` served by this exact instance.
    pub fn with_instance<T: 'static>(instance: Rc<T>) -> Self {
        Self::with_instance_for(ContractKey::of::<T>(), instance)
    }

    /// Request an already-known contract key served by this exact instance.
    ///
    /// This is the form to use when the contract key names a trait object
    /// and the instance is a concrete implementor.
    pub fn with_instance_for<T: 'static>(contract: ContractKey, instance: Rc<T>) -> Self {
        Self {
            contract,
            implementation: None,
            instance: Some(instance as Instance),
        }
    }

    /// The requested contract type.
    pub fn contract(&self) -> &ContractKey {
        &self.contract
    }

    /// The explicit implementation type, if one was specified.
    pub fn implementation(&self) -> Option<&ContractKey> {
        self.implementation.as_ref()
    }

    /// The explicit instance, if one was supplied.
    pub fn instance(&self) -> Option<&Instance> {
        self.instance.as_ref()
    }
}

impl fmt::Debug for ContractDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractDescriptor")
            .field("contract", &self.contract)
            .field("implementation", &self.implementation)
            .field("has_instance", &self.instance.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Speed(u32);
    trait Mover {}

    #[test]
    fn plain_request() {
        let request = ContractDescriptor::new::<Speed>();
        assert_eq!(request.contract(), &ContractKey::of::<Speed>());
        assert!(request.implementation().is_none());
        assert!(request.instance().is_none());
    }

    #[test]
    fn implementation_request() {
        let request = ContractDescriptor::with_implementation::<dyn Mover, Speed>();
        assert_eq!(request.contract(), &ContractKey::of::<dyn Mover>());
        assert_eq!(request.implementation(), Some(&ContractKey::of::<Speed>()));
    }

    #[test]
    fn instance_request() {
        let speed = Rc::new(Speed(3));
        let request = ContractDescriptor::with_instance(speed.clone());
        let held = request.instance().expect("instance set");
        assert!(Rc::ptr_eq(
            &held.clone().downcast::<Speed>().unwrap(),
            &speed
        ));
    }

    #[test]
    fn instance_for_trait_contract() {
        let request =
            ContractDescriptor::with_instance_for(ContractKey::of::<dyn Mover>(), Rc::new(Speed(1)));
        assert_eq!(request.contract(), &ContractKey::of::<dyn Mover>());
        assert!(request.instance().is_some());
    }
}
