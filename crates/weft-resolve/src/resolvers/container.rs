use std::rc::Rc;

use crate::chain::ResolverChain;
use crate::container::{ContractSource, Registration};
use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::ResolveResult;
use crate::resolver::{Outcome, Resolver};

/// Container node: pure lookup in the ambient registry.
///
/// The lookup is keyed by the resolution key in the current site metadata,
/// so keyed registrations of the same contract type stay distinguishable.
/// This node never allocates ids and never touches the session cache.
pub struct ContainerResolver {
    source: Rc<dyn ContractSource>,
}

impl ContainerResolver {
    pub fn new(source: Rc<dyn ContractSource>) -> Self {
        Self { source }
    }
}

impl Resolver for ContainerResolver {
    fn name(&self) -> &str {
        "container"
    }

    fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
        _chain: &ResolverChain,
    ) -> ResolveResult<Outcome> {
        let key = scope.site().key.as_deref();
        match self.source.lookup(request.contract(), key) {
            Some(Registration::Instance(instance)) => Ok(Outcome::Resolved(instance)),
            Some(Registration::Factory(make)) => Ok(Outcome::Resolved(make())),
            None => Ok(Outcome::declined(match key {
                Some(key) => format!("nothing registered for {} (key {key})", request.contract()),
                None => format!("nothing registered for {}", request.contract()),
            })),
        }
    }
}
