use weft_types::Instance;

use crate::chain::ResolverChain;
use crate::context::Scope;
use crate::descriptor::ContractDescriptor;
use crate::error::ResolveResult;

/// The outcome of asking one resolver node for a contract.
#[derive(Clone)]
pub enum Outcome {
    /// The node produced an implementation; the chain short-circuits.
    Resolved(Instance),
    /// The node cannot serve this request; the chain tries the next one.
    Declined { reason: String },
}

impl Outcome {
    /// Shorthand for a decline with a reason.
    pub fn declined(reason: impl Into<String>) -> Self {
        Self::Declined {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the outcome carries an implementation.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl std::fmt::Debug for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(_) => write!(f, "Outcome::Resolved"),
            Self::Declined { reason } => write!(f, "Outcome::Declined({reason})"),
        }
    }
}

/// One node in the resolver chain.
///
/// Nodes are evaluated in registration order. A node either resolves the
/// request, declines it, or fails hard: declines are local and non-fatal,
/// hard errors (storage backends, cache invariants) abort the whole
/// resolution. Nodes receive the chain so sub-resolutions -- constructor
/// parameters, implementation redirects, store lookups -- re-enter the full
/// pipeline.
pub trait Resolver {
    /// Human-readable node name (e.g. "construct", "container").
    fn name(&self) -> &str;

    /// Try to produce an implementation for the request.
    fn resolve(
        &self,
        request: &ContractDescriptor,
        scope: &Scope,
        chain: &ResolverChain,
    ) -> ResolveResult<Outcome>;
}
