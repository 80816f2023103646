use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use weft_types::{ContractKey, Instance};

use crate::context::SiteMetadata;
use crate::error::{ResolveError, ResolveResult};

/// One declared constructor parameter: its contract type plus the call-site
/// markers carried into the sub-resolution that fills it.
#[derive(Clone, Debug)]
pub struct ParamSpec {
    pub contract: ContractKey,
    pub site: SiteMetadata,
}

/// The resolved arguments handed to a build closure, in parameter order.
pub struct ConstructorArgs {
    args: std::vec::IntoIter<Instance>,
}

impl ConstructorArgs {
    pub fn new(args: Vec<Instance>) -> Self {
        Self {
            args: args.into_iter(),
        }
    }

    /// Pop the next argument and downcast it to `T`.
    pub fn take<T: 'static>(&mut self) -> ResolveResult<Rc<T>> {
        let next = self.args.next().ok_or_else(|| ResolveError::ParameterType {
            expected: std::any::type_name::<T>().to_string(),
        })?;
        next.downcast::<T>().map_err(|_| ResolveError::ParameterType {
            expected: std::any::type_name::<T>().to_string(),
        })
    }

    /// Arguments not yet taken.
    pub fn remaining(&self) -> usize {
        self.args.len()
    }
}

type BuildFn = Rc<dyn Fn(ConstructorArgs) -> ResolveResult<Instance>>;

/// One constructor: an ordered parameter list plus the build closure that
/// assembles the implementation from the resolved arguments.
///
/// Declaring the signature explicitly stands in for any runtime
/// introspection of constructors: the parameter list is the signature, the
/// closure is the invocation.
#[derive(Clone)]
pub struct ConstructorSpec {
    params: Vec<ParamSpec>,
    build: BuildFn,
}

impl ConstructorSpec {
    /// A constructor with the given build closure and, initially, no
    /// parameters. Chain `param*` calls to declare the signature in order.
    pub fn new(build: impl Fn(ConstructorArgs) -> ResolveResult<Instance> + 'static) -> Self {
        Self {
            params: Vec::new(),
            build: Rc::new(build),
        }
    }

    /// Append a plain parameter of contract type `T`.
    pub fn param<T: 'static + ?Sized>(mut self) -> Self {
        self.params.push(ParamSpec {
            contract: ContractKey::of::<T>(),
            site: SiteMetadata::none(),
        });
        self
    }

    /// Append a parameter of contract type `T` carrying a storage-location
    /// marker.
    pub fn param_at<T: 'static + ?Sized>(mut self, location: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            contract: ContractKey::of::<T>(),
            site: SiteMetadata::at_location(location),
        });
        self
    }

    /// Append a parameter of contract type `T` carrying a container
    /// resolution key.
    pub fn keyed_param<T: 'static + ?Sized>(mut self, key: impl Into<String>) -> Self {
        self.params.push(ParamSpec {
            contract: ContractKey::of::<T>(),
            site: SiteMetadata::keyed(key),
        });
        self
    }

    /// Append a fully-specified parameter.
    pub fn with_param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// The declared parameters, in slot order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Run the build closure over resolved arguments.
    pub fn construct(&self, args: Vec<Instance>) -> ResolveResult<Instance> {
        (self.build)(ConstructorArgs::new(args))
    }
}

impl fmt::Debug for ConstructorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorSpec")
            .field("params", &self.params)
            .finish()
    }
}

/// Construction recipe for one contract type: its constructors in
/// declaration order. The first constructor whose parameters all resolve
/// wins; no ordering between them is otherwise significant.
#[derive(Clone, Debug)]
pub struct Blueprint {
    target: ContractKey,
    constructors: Vec<ConstructorSpec>,
}

impl Blueprint {
    /// A blueprint for contract type `T` with no constructors yet.
    pub fn new<T: 'static + ?Sized>() -> Self {
        Self {
            target: ContractKey::of::<T>(),
            constructors: Vec::new(),
        }
    }

    /// Add a constructor.
    pub fn constructor(mut self, spec: ConstructorSpec) -> Self {
        self.constructors.push(spec);
        self
    }

    /// The contract type this blueprint builds.
    pub fn target(&self) -> &ContractKey {
        &self.target
    }

    /// The declared constructors.
    pub fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }
}

/// All known blueprints, keyed by target contract type.
#[derive(Default)]
pub struct BlueprintRegistry {
    blueprints: HashMap<std::any::TypeId, Blueprint>,
}

impl BlueprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blueprint, replacing any previous one for the same target.
    pub fn register(&mut self, blueprint: Blueprint) {
        self.blueprints
            .insert(blueprint.target().type_id(), blueprint);
    }

    /// The blueprint for a contract type, if declared.
    pub fn get(&self, contract: &ContractKey) -> Option<&Blueprint> {
        self.blueprints.get(&contract.type_id())
    }

    /// Returns `true` if the contract type has a blueprint.
    pub fn contains(&self, contract: &ContractKey) -> bool {
        self.blueprints.contains_key(&contract.type_id())
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

impl fmt::Debug for BlueprintRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlueprintRegistry")
            .field("targets", &self.blueprints.len())
            .finish()
    }
}
