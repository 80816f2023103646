use weft_bind::BindError;
use weft_store::StoreError;

/// Errors from contract resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Every node in the chain declined the request. Fatal for the build
    /// that asked for this contract; never retried.
    #[error("contract {contract} is not resolvable")]
    NotResolvable { contract: String },

    /// A build closure failed while assembling an implementation.
    #[error("construction of {contract} failed: {message}")]
    Construction { contract: String, message: String },

    /// A build closure asked for a differently-typed argument than the
    /// blueprint's parameter list produced. Blueprint programming error.
    #[error("constructor argument mismatch: expected {expected}")]
    ParameterType { expected: String },

    /// Failure in the binding/caching layer.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Failure in a storage backend.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// Construction-failure error for a named contract.
    pub fn construction(contract: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            contract: contract.into(),
            message: message.into(),
        }
    }
}

/// Result alias for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
