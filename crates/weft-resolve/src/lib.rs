//! Contract resolution for Weft.
//!
//! A resolution request -- a [`ContractDescriptor`] -- flows through an
//! ordered [`ResolverChain`] until one node produces an implementation.
//! The built-in nodes, in their default order:
//!
//! 1. [`ConstructResolver`] -- session-cache hit or blueprint construction,
//!    with stable contract-id allocation and recursive parameter
//!    resolution.
//! 2. [`ContainerResolver`] -- lookup in the ambient registry via the
//!    [`ContractSource`] contract.
//! 3. [`DescriptorResolver`] -- explicit instances and implementation-type
//!    redirects carried by the request itself.
//! 4. [`ValueResolver`] -- value cells over persisted scalars, with
//!    per-call-site store selection.
//!
//! Construction recipes are declared as [`Blueprint`]s: an ordered
//! parameter list plus a build closure, replacing any form of runtime
//! signature introspection. The ambient state of a resolution -- object,
//! current binding, slot, site markers, session cache -- travels as an
//! explicit [`Scope`] value through every recursive call.

pub mod blueprint;
pub mod chain;
pub mod container;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod resolver;
pub mod resolvers;

pub use blueprint::{Blueprint, BlueprintRegistry, ConstructorArgs, ConstructorSpec, ParamSpec};
pub use chain::ResolverChain;
pub use container::{ContractSource, MemoryContainer, Registration};
pub use context::{Scope, SiteMetadata};
pub use descriptor::ContractDescriptor;
pub use error::{ResolveError, ResolveResult};
pub use resolver::{Outcome, Resolver};
pub use resolvers::{ConstructResolver, ContainerResolver, DescriptorResolver, ValueResolver};
