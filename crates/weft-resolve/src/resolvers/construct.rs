use std::rc::Rc;

use weft_bind::ObjectBindings;
use weft_types::SlotId;

use crate::blueprint::BlueprintRegistry;
use crate::chain::ResolverChain;
use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{Outcome, Resolver};

/// Cache-or-construct node: the identity-preserving heart of the chain.
///
/// For contract types with a declared blueprint, this node owns the stable
/// ContractId (allocated in the object's binding record on first use) and
/// the session cache entry under it. A cache hit returns the existing
/// instance -- which is also what terminates resolution cycles whose back
/// edge passes through an already-built contract. On a miss, constructors
/// are tried until one has every parameter resolvable; each parameter is a
/// full sub-resolution with its ordinal as the slot and its declared site
/// markers in scope.
///
/// Types without a blueprint are declined outright, before any id is
/// allocated, leaving them to the container, descriptor, and value nodes.
pub struct ConstructResolver {
    objects: ObjectBindings,
    blueprints: Rc<BlueprintRegistry>,
}

impl ConstructResolver {
    pub fn new(objects: ObjectBindings, blueprints: Rc<BlueprintRegistry>) -> Self {
        Self {
            objects,
            blueprints,
        }
    }
}

impl Resolver for ConstructResolver {
    fn name(&self) -> &str {
        "construct"
    }

    fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
        chain: &ResolverChain,
    ) -> ResolveResult<Outcome> {
        let contract = request.contract();
        let Some(blueprint) = self.blueprints.get(contract) else {
            return Ok(Outcome::declined(format!("no blueprint for {contract}")));
        };

        let contract_id = self.objects.contract_id(scope.object(), contract)?;
        if let Some(cached) = scope.cache().get_by_id(&contract_id) {
            return Ok(Outcome::Resolved(cached));
        }

        'constructors: for spec in blueprint.constructors() {
            let mut resolved = Vec::with_capacity(spec.params().len());
            for (ordinal, param) in spec.params().iter().enumerate() {
                let slot = SlotId::new(ordinal as u32);
                let child_scope = scope.for_slot(contract_id, slot, param.site.clone());
                let child_request = ContractDescriptor::for_key(param.contract);
                match chain.resolve(&child_request, &child_scope) {
                    Ok(instance) => resolved.push(instance),
                    // An unresolvable parameter fails only this
                    // constructor; the next one may still work.
                    Err(ResolveError::NotResolvable { .. }) => continue 'constructors,
                    Err(other) => return Err(other),
                }
            }
            let instance = spec.construct(resolved)?;
            scope.cache().add(contract_id, instance.clone())?;
            return Ok(Outcome::Resolved(instance));
        }

        Ok(Outcome::declined(format!(
            "no constructor of {contract} fully resolved"
        )))
    }
}
