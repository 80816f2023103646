use weft_resolve::ResolveError;

/// Errors from entity assembly and access.
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// `get` was asked for a contract type that was not part of the
    /// requested contract set.
    #[error("contract {contract} was not requested for this entity")]
    NotRequested { contract: String },

    /// The contract is present but its stored implementation is a
    /// different concrete type (an implementation-redirect binding).
    /// Retrieve it with `get_with` instead.
    #[error("contract {contract} is served by a different implementation type")]
    Implementation { contract: String },

    /// Resolution of a requested contract failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Result alias for entity operations.
pub type EntityResult<T> = Result<T, EntityError>;
