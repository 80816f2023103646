use tracing::{debug, trace};
use weft_types::Instance;

use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::{ResolveError, ResolveResult};
use crate::resolver::{Outcome, Resolver};

/// Ordered chain of resolver nodes with first-success semantics.
///
/// Nodes are tried strictly in registration order; the first one that
/// resolves wins and the rest are never consulted. When every node
/// declines, the request fails with `NotResolvable` naming the contract.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    /// An empty chain. Every request against it fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the end of the chain.
    pub fn push(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Returns `true` if the chain has no nodes.
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolve one contract request.
    ///
    /// Hard errors from a node propagate immediately; declines move on to
    /// the next node.
    pub fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
    ) -> ResolveResult<Instance> {
        for resolver in &self.resolvers {
            match resolver.resolve(request, scope, self)? {
                Outcome::Resolved(instance) => {
                    debug!(
                        resolver = resolver.name(),
                        contract = request.contract().name(),
                        object = %scope.object(),
                        "resolved"
                    );
                    return Ok(instance);
                }
                Outcome::Declined { reason } => {
                    trace!(
                        resolver = resolver.name(),
                        contract = request.contract().name(),
                        reason,
                        "declined"
                    );
                }
            }
        }
        Err(ResolveError::NotResolvable {
            contract: request.contract().name().to_string(),
        })
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.resolvers.iter().map(|r| r.name()).collect();
        f.debug_struct("ResolverChain").field("nodes", &names).finish()
    }
}
