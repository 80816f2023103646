use weft_bind::ObjectBindings;

use crate::chain::ResolverChain;
use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{Outcome, Resolver};

/// Descriptor node: serves what the request itself already carries.
///
/// An explicit instance is returned verbatim; its association to the
/// object's ContractId is recorded in the session cache so later lookups by
/// implementation find it. An explicit implementation type re-enters the
/// chain under a fresh descriptor, which normally lands in the construct
/// node. A bare descriptor is declined.
pub struct DescriptorResolver {
    objects: ObjectBindings,
}

impl DescriptorResolver {
    pub fn new(objects: ObjectBindings) -> Self {
        Self { objects }
    }
}

impl Resolver for DescriptorResolver {
    fn name(&self) -> &str {
        "descriptor"
    }

    fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
        chain: &ResolverChain,
    ) -> ResolveResult<Outcome> {
        if let Some(instance) = request.instance() {
            let contract_id = self.objects.contract_id(scope.object(), request.contract())?;
            // Record the association unless either side is already cached;
            // resolving the same descriptor twice must stay benign.
            if !scope.cache().contains_id(&contract_id) && scope.cache().id_of(instance).is_none()
            {
                scope.cache().add(contract_id, instance.clone())?;
            }
            return Ok(Outcome::Resolved(instance.clone()));
        }

        if let Some(implementation) = request.implementation() {
            if implementation != request.contract() {
                let redirected = ContractDescriptor::for_key(*implementation);
                return match chain.resolve(&redirected, scope) {
                    Ok(instance) => Ok(Outcome::Resolved(instance)),
                    Err(ResolveError::NotResolvable { .. }) => Ok(Outcome::declined(format!(
                        "implementation {implementation} is not resolvable"
                    ))),
                    Err(other) => Err(other),
                };
            }
        }

        Ok(Outcome::declined(
            "descriptor carries neither instance nor implementation type",
        ))
    }
}
